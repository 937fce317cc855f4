//! Camera looking down the Z axis at the play field

use glam::{Mat4, Vec3};

use super::field::PlayField;
use crate::consts::{CAMERA_DISTANCE, SHAKE_DECAY};

/// Perspective camera with decaying screen shake
#[derive(Debug, Clone)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    /// Current shake intensity (world units)
    pub shake: f32,
    /// Seconds since the camera was created, drives the shake pattern
    pub elapsed: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_DISTANCE),
            target: Vec3::ZERO,
            shake: 0.0,
            elapsed: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        self.shake *= SHAKE_DECAY;
        if self.shake < 0.01 {
            self.shake = 0.0;
        }
    }

    pub fn add_shake(&mut self, amount: f32) {
        self.shake = (self.shake + amount).min(2.0);
    }

    pub fn view_matrix(&self) -> Mat4 {
        let jitter = if self.shake > 0.0 {
            let t = self.elapsed * 60.0;
            Vec3::new((t * 1.7).sin(), (t * 2.3).cos(), 0.0) * self.shake
        } else {
            Vec3::ZERO
        };
        Mat4::look_at_rh(self.eye + jitter, self.target + jitter, Vec3::Y)
    }

    /// Perspective just wide enough to show the whole field on the z = 0 plane
    pub fn projection(&self, field: &PlayField, aspect: f32) -> Mat4 {
        let half_height = field
            .top
            .max(-field.bottom)
            .max(field.right.max(-field.left) / aspect);
        let distance = self.eye.distance(self.target);
        let fov_y = 2.0 * (half_height / distance).atan();
        Mat4::perspective_rh(fov_y, aspect, 0.1, 1000.0)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
