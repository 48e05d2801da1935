//! Viewport resize adaptation.
//!
//! Recomputes the camera aspect and resizes the render surface whenever the
//! host reports new dimensions. Applied once at startup for initial sizing
//! and idempotently on repeated identical inputs.

use crate::{camera::CameraState, context::RenderSurface};

/// Device pixel ratio assumed when the host cannot report one.
pub const FALLBACK_PIXEL_RATIO: f32 = 2.0;

#[derive(Debug, Default)]
pub struct ViewportResizeAdapter {
    applied: Option<(u32, u32, f32)>,
}

impl ViewportResizeAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes aspect, camera projection, pixel ratio and surface size.
    ///
    /// Dimensions are floored at 1 so a degenerate (zero-sized) viewport
    /// never divides by zero. Returns the aspect that was applied.
    pub fn apply(
        &mut self,
        camera: &mut CameraState,
        surface: &mut dyn RenderSurface,
        width: u32,
        height: u32,
        pixel_ratio: Option<f32>,
    ) -> f32 {
        let width = width.max(1);
        let height = height.max(1);
        let aspect = width as f32 / height as f32;
        camera.set_aspect(aspect);

        let ratio = pixel_ratio.unwrap_or(FALLBACK_PIXEL_RATIO);
        surface.set_pixel_ratio(ratio);
        surface.set_size(width, height);

        log::debug!("viewport {}x{} @ {} (aspect {})", width, height, ratio, aspect);
        self.applied = Some((width, height, ratio));
        aspect
    }

    /// Last (width, height, pixel ratio) pushed to the surface, if any.
    pub fn applied(&self) -> Option<(u32, u32, f32)> {
        self.applied
    }
}
