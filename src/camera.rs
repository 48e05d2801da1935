//! Perspective camera state.
//!
//! Only the state lives here; orbiting, panning and damping belong to the
//! host-provided input controller, and the resize adapter owns aspect
//! updates.

use cgmath::{Deg, Matrix4, Point3, Vector3, perspective};

#[derive(Clone, Debug)]
pub struct CameraState {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    fov_y: Deg<f32>,
    aspect: f32,
    near: f32,
    far: f32,
}

impl CameraState {
    pub fn new(fov_y: Deg<f32>, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 0.0),
            target: Point3::new(0.0, 0.0, 0.0),
            fov_y,
            aspect,
            near,
            far,
        }
    }

    pub fn look_at(&mut self, target: Point3<f32>) {
        self.target = target;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn fov_y(&self) -> Deg<f32> {
        self.fov_y
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        perspective(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.target, Vector3::unit_y())
    }
}
