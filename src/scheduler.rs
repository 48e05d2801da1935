//! The frame scheduler: an explicit {Stopped, Running} state machine around
//! the monotonic frame clock.
//!
//! The host's display signal (requestAnimationFrame, a winit redraw, or a
//! test loop) drives [`FrameScheduler::run_frame`]; the scheduler itself owns
//! no threads and arms nothing — it reports whether the host should re-arm,
//! which makes shutdown deterministic and the loop testable without a real
//! display signal.

use thiserror::Error;

/// A failure inside a per-frame callback. Logged and swallowed by the
/// scheduler so one bad frame never permanently freezes rendering.
#[derive(Debug, Error)]
#[error("frame callback failed: {0}")]
pub struct RenderLoopError(#[source] pub anyhow::Error);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    Stopped,
    Running,
}

#[derive(Debug)]
pub struct FrameScheduler {
    state: SchedulerState,
    clock: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            state: SchedulerState::Stopped,
            clock: 0,
        }
    }

    pub fn start(&mut self) {
        self.state = SchedulerState::Running;
    }

    pub fn stop(&mut self) {
        self.state = SchedulerState::Stopped;
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    /// Frames completed so far. Never decreases while running.
    pub fn frame_clock(&self) -> u64 {
        self.clock
    }

    /// Runs one frame's work while Running and returns whether the host
    /// should re-arm. A stopped scheduler ignores the call entirely, so no
    /// frame is counted after `stop()`.
    ///
    /// The clock advances by exactly 1 per invocation, error or not.
    pub fn run_frame<F>(&mut self, work: F) -> bool
    where
        F: FnOnce(u64) -> Result<(), RenderLoopError>,
    {
        if !self.is_running() {
            return false;
        }
        if let Err(error) = work(self.clock) {
            log::error!("frame {} failed, continuing: {:#}", self.clock, error.0);
        }
        self.clock += 1;
        self.is_running()
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}
