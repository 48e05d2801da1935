//! One-shot animation timelines.
//!
//! A [`Timeline`] is an ordered sequence of tweens run to completion exactly
//! once; the orchestrator advances all live timelines from the same display
//! refresh that drives the frame loop. The intro camera move and the
//! nameplate scale-in are built here.

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use crate::{camera::CameraState, context::InputController};

/// Normalised easing curve: maps t in [0,1] to progress in [0,1].
pub type EasingFn = fn(f32) -> f32;

pub fn linear(t: f32) -> f32 {
    t
}

/// Cubic ease-in-out, the curve the intro camera move uses.
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Exponential ease-out, used by the nameplate scale-in.
pub fn ease_out_expo(t: f32) -> f32 {
    if t >= 1.0 { 1.0 } else { 1.0 - 2f32.powf(-10.0 * t) }
}

/// Eased interpolation of a value vector over a fixed duration.
///
/// The final step writes the target values verbatim, so the animated state
/// lands on its destination exactly regardless of step sizes.
pub struct Tween {
    from: Vec<f32>,
    to: Vec<f32>,
    duration: f32,
    easing: EasingFn,
    on_update: Box<dyn FnMut(&[f32])>,
    on_complete: Option<Box<dyn FnOnce()>>,
    delay: f32,
    elapsed: f32,
}

impl Tween {
    pub fn new(
        from: Vec<f32>,
        to: Vec<f32>,
        duration: f32,
        easing: EasingFn,
        on_update: impl FnMut(&[f32]) + 'static,
    ) -> Self {
        debug_assert_eq!(from.len(), to.len());
        Self {
            from,
            to,
            duration,
            easing,
            on_update: Box::new(on_update),
            on_complete: None,
            delay: 0.0,
            elapsed: 0.0,
        }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_on_complete(mut self, hook: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(hook));
        self
    }

    /// Advances by `dt` time-units; returns true once finished.
    fn advance(&mut self, dt: f32) -> bool {
        let mut dt = dt;
        if self.delay > 0.0 {
            if dt < self.delay {
                self.delay -= dt;
                return false;
            }
            dt -= self.delay;
            self.delay = 0.0;
        }
        self.elapsed += dt;
        let t = (self.elapsed / self.duration).min(1.0);
        let values: Vec<f32> = if t >= 1.0 {
            self.to.clone()
        } else {
            let progress = (self.easing)(t);
            self.from
                .iter()
                .zip(&self.to)
                .map(|(a, b)| a + (b - a) * progress)
                .collect()
        };
        (self.on_update)(&values);
        if t >= 1.0 {
            if let Some(hook) = self.on_complete.take() {
                hook();
            }
            true
        } else {
            false
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimelineState {
    Idle,
    Playing,
    Done,
}

/// Ordered tween sequence; plays once, never repeats.
pub struct Timeline {
    steps: VecDeque<Tween>,
    state: TimelineState,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            steps: VecDeque::new(),
            state: TimelineState::Idle,
        }
    }

    pub fn then(mut self, tween: Tween) -> Self {
        self.steps.push_back(tween);
        self
    }

    pub fn state(&self) -> TimelineState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == TimelineState::Done
    }

    /// Starts playback. A finished timeline stays finished.
    pub fn play(&mut self) {
        if self.state == TimelineState::Idle {
            self.state = TimelineState::Playing;
        }
    }

    /// Advances the front tween by `dt` time-units. At most one tween
    /// finishes per call; leftover time does not spill into the next step.
    pub fn advance(&mut self, dt: f32) {
        if self.state != TimelineState::Playing {
            return;
        }
        if let Some(front) = self.steps.front_mut() {
            if front.advance(dt) {
                self.steps.pop_front();
            }
        }
        if self.steps.is_empty() {
            self.state = TimelineState::Done;
        }
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Duration of the intro camera move, in time-units.
pub const INTRO_DURATION: f32 = 5.0;
const INTRO_OFFSET_X: f32 = -20.0;
const INTRO_OFFSET_Z: f32 = 4.0;

/// Builds the one-shot intro move: the camera slides from an offset start
/// pose to its current (final) pose. Every step re-invokes the input
/// controller's update so damping stays consistent while the camera is
/// animation-driven rather than user-driven.
///
/// The completion hook is reserved for re-enabling user input gating and is
/// currently a no-op.
pub fn intro_camera_timeline(
    camera: Rc<RefCell<CameraState>>,
    controller: Rc<RefCell<dyn InputController>>,
) -> Timeline {
    let (final_x, final_z) = {
        let camera = camera.borrow();
        (camera.position.x, camera.position.z)
    };
    let tween = Tween::new(
        vec![final_x + INTRO_OFFSET_X, final_z + INTRO_OFFSET_Z],
        vec![final_x, final_z],
        INTRO_DURATION,
        ease_in_out,
        move |values| {
            let mut camera = camera.borrow_mut();
            camera.position.x = values[0];
            camera.position.z = values[1];
            controller.borrow_mut().update(&mut camera);
        },
    )
    .with_on_complete(|| {});
    Timeline::new().then(tween)
}
