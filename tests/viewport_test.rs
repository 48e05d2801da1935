use cgmath::Deg;
use moonwake::{
    camera::CameraState,
    viewport::{FALLBACK_PIXEL_RATIO, ViewportResizeAdapter},
};

use crate::common::test_utils::RecordingSurface;

mod common;

fn camera() -> CameraState {
    CameraState::new(Deg(48.0), 1.0, 0.6, 1600.0)
}

#[test]
fn apply_recomputes_aspect_and_resizes_the_surface() {
    let mut camera = camera();
    let mut surface = RecordingSurface::new();
    let mut adapter = ViewportResizeAdapter::new();

    let aspect = adapter.apply(&mut camera, &mut surface, 1920, 1080, Some(1.5));

    assert!((aspect - 1920.0 / 1080.0).abs() < 1e-6);
    assert_eq!(camera.aspect(), aspect);
    assert_eq!(surface.sizes, vec![(1920, 1080)]);
    assert_eq!(surface.pixel_ratios, vec![1.5]);
    assert_eq!(adapter.applied(), Some((1920, 1080, 1.5)));
}

#[test]
fn a_missing_pixel_ratio_falls_back_to_two() {
    let mut camera = camera();
    let mut surface = RecordingSurface::new();
    let mut adapter = ViewportResizeAdapter::new();

    adapter.apply(&mut camera, &mut surface, 800, 600, None);

    assert_eq!(surface.pixel_ratios, vec![FALLBACK_PIXEL_RATIO]);
}

#[test]
fn degenerate_dimensions_are_floored_at_one() {
    let mut camera = camera();
    let mut surface = RecordingSurface::new();
    let mut adapter = ViewportResizeAdapter::new();

    // A collapsed window must not divide by zero.
    let aspect = adapter.apply(&mut camera, &mut surface, 500, 0, Some(1.0));

    assert_eq!(aspect, 500.0);
    assert!(aspect.is_finite());
    assert_eq!(surface.sizes, vec![(500, 1)]);
}

#[test]
fn repeated_identical_inputs_are_idempotent() {
    let mut camera = camera();
    let mut surface = RecordingSurface::new();
    let mut adapter = ViewportResizeAdapter::new();

    let first = adapter.apply(&mut camera, &mut surface, 1024, 768, Some(2.0));
    let second = adapter.apply(&mut camera, &mut surface, 1024, 768, Some(2.0));

    assert_eq!(first, second);
    assert_eq!(camera.aspect(), first);
    assert_eq!(adapter.applied(), Some((1024, 768, 2.0)));
}
