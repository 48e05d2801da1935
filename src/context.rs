//! Contracts of the host-provided collaborators and the context bundle the
//! orchestrator consumes.
//!
//! The crate never draws, fetches or listens to the window itself: the host
//! hands a [`SceneContext`] of trait objects over and the orchestrator
//! sequences them. Everything is single-threaded, so collaborators are shared
//! as `Rc<RefCell<_>>` and no locking is involved.

use std::{cell::RefCell, rc::Rc};

use crate::{
    camera::CameraState,
    data_structures::{Rgb, SceneGraph},
};

/// Drawable target sized in device pixels, embedded in the host document.
///
/// The surface consumes the scene graph data model and camera state as
/// opaque descriptors; geometry synthesis and lighting live behind it.
pub trait RenderSurface {
    fn set_clear_color(&mut self, color: Rgb);
    fn set_pixel_ratio(&mut self, ratio: f32);
    fn set_size(&mut self, width: u32, height: u32);
    fn render(&mut self, scene: &SceneGraph, camera: &CameraState) -> anyhow::Result<()>;
}

/// Flags the orchestrator pushes to the orbit controller during init.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerSettings {
    pub damping: bool,
    pub pan: bool,
    pub zoom: bool,
    /// Polar angle clamp in radians, keeping the view above the water plane.
    pub min_polar: f32,
    pub max_polar: f32,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            damping: true,
            pan: false,
            zoom: false,
            min_polar: 0.8,
            max_polar: 1.55,
        }
    }
}

/// Damped orbit-style input controller, updated once per frame (and once per
/// intro-timeline step, so damping stays consistent while the camera is
/// animation-driven).
pub trait InputController {
    fn apply_settings(&mut self, settings: &ControllerSettings);
    fn update(&mut self, camera: &mut CameraState);
}

/// On-screen frame-rate widget; one begin/end pair wraps each frame's work.
pub trait FrameStats {
    fn begin(&mut self);
    fn end(&mut self);
}

/// No-op stats for hosts without a frame-rate widget.
#[derive(Debug, Default)]
pub struct NullStats;

impl FrameStats for NullStats {
    fn begin(&mut self) {}
    fn end(&mut self) {}
}

/// Resize notification callback: width, height and the device pixel ratio if
/// the host knows it.
pub type ResizeCallback = Box<dyn FnMut(u32, u32, Option<f32>)>;

/// Host window resize notifications, subscribed passively.
pub trait ResizeSignal {
    /// Registers `callback` and returns an id for [`ResizeSignal::unsubscribe`].
    fn subscribe(&mut self, callback: ResizeCallback) -> usize;
    fn unsubscribe(&mut self, id: usize);
}

/// Value delivered by a panel widget change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanelValue {
    Color(Rgb),
    Number(f32),
}

/// Binder returned by panel field registration.
pub trait PanelBinding {
    fn name(&mut self, label: &str);
    fn on_change(&mut self, callback: Box<dyn FnMut(PanelValue)>);
}

/// Parameter-panel toolkit; bounds passed here are advisory only and never
/// enforced by the core.
pub trait PanelHost {
    fn add_color(&mut self, field: &str, initial: Rgb) -> Box<dyn PanelBinding>;
    fn add_number(&mut self, field: &str, initial: f32, min: f32, max: f32)
    -> Box<dyn PanelBinding>;
}

/// The collaborator bundle handed to [`crate::orchestrator::SceneOrchestrator`],
/// plus the initial viewport geometry.
pub struct SceneContext {
    pub surface: Rc<RefCell<dyn RenderSurface>>,
    pub controller: Rc<RefCell<dyn InputController>>,
    pub stats: Rc<RefCell<dyn FrameStats>>,
    pub resize: Rc<RefCell<dyn ResizeSignal>>,
    pub panel: Rc<RefCell<dyn PanelHost>>,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// `None` when the host cannot report one; the resize adapter falls back
    /// to 2.
    pub pixel_ratio: Option<f32>,
}
