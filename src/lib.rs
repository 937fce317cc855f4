//! Asteroids 3D - simulation core for a tumbling-rock space shooter
//!
//! Core modules:
//! - `sim`: Entity model, per-tick update pipeline, collisions, effects
//! - `renderer`: Render-ready instances and the renderer collaborator trait
//! - `platform`: Input and clock collaborators
//! - `assets`: Mesh loading collaborator and fail-fast mesh set
//! - `tuning`: Data-driven game balance
//! - `ui`: Menu layout and HUD panels

pub mod assets;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Fixed geometry constants (balance values live in `Tuning`)
pub mod consts {
    /// Fixed simulation timestep used by the headless runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Collision forgiveness: circles touch when distance <= (r1 + r2) * margin
    pub const COLLISION_MARGIN: f32 = 1.2;

    /// Play field: left edge sits at -FIELD_LEFT_FACTOR * view width
    pub const FIELD_LEFT_FACTOR: f32 = 0.7;
    /// Play field: total width as a multiple of view width
    pub const FIELD_WIDTH_FACTOR: f32 = 1.4;

    /// Collider offset for ships and missiles (stored, not used by the distance test)
    pub const NOSE_COLLIDER_OFFSET: [f32; 2] = [0.5, 0.0];

    /// Asteroid waves spawn on a ring of this radius around the origin
    pub const SPAWN_RING_RADIUS: f32 = 5.0;

    /// Camera sits on +Z looking down at the play field
    pub const CAMERA_DISTANCE: f32 = 100.0;

    /// Per-update multiplier applied to camera shake
    pub const SHAKE_DECAY: f32 = 0.9;

    /// Frames in the explosion sheet
    pub const EXPLOSION_FRAMES: usize = 16;
}

/// Unit heading for a yaw angle in degrees (0 = +X, counter-clockwise)
#[inline]
pub fn heading(yaw_degrees: f32) -> Vec2 {
    let rad = yaw_degrees.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Yaw in degrees that points from `from` toward `to`
#[inline]
pub fn aim_degrees(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x).to_degrees()
}

/// Convert polar (r, theta radians) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_cardinal() {
        assert!((heading(0.0) - Vec2::X).length() < 1e-6);
        assert!((heading(90.0) - Vec2::Y).length() < 1e-6);
        assert!((heading(180.0) + Vec2::X).length() < 1e-6);
    }

    #[test]
    fn test_aim_degrees() {
        assert!((aim_degrees(Vec2::ZERO, Vec2::new(0.0, 3.0)) - 90.0).abs() < 1e-4);
        assert!((aim_degrees(Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0)) - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_polar_ring() {
        let p = polar_to_cartesian(5.0, 1.3);
        assert!((p.length() - 5.0).abs() < 1e-5);
    }
}
