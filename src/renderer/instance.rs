//! Per-draw instance data

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

use crate::sim::Entity;

/// Model transform plus flat colour, laid out for an instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct DrawInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl DrawInstance {
    pub fn new(model: Mat4, color: [f32; 4]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color,
        }
    }

    /// Transform for an entity. Planar kinds spin about Z by their yaw;
    /// the rest use their full orientation.
    pub fn for_entity(entity: &Entity, color: [f32; 4]) -> Self {
        let rotation = if entity.behavior().planar_render {
            Quat::from_rotation_z(entity.yaw().to_radians())
        } else {
            entity.orientation()
        };
        let model = Mat4::from_scale_rotation_translation(entity.scale(), rotation, entity.position());
        Self::new(model, color)
    }

    pub fn translation(&self) -> Vec3 {
        Mat4::from_cols_array_2d(&self.model).w_axis.truncate()
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Colors for game elements
pub mod colors {
    pub const SHIP: [f32; 4] = [0.0, 0.8, 0.4, 1.0];
    pub const ASTEROID: [f32; 4] = [0.545, 0.27, 0.07, 1.0];
    pub const PLAYER_MISSILE: [f32; 4] = [0.0, 0.4, 0.8, 1.0];
    pub const ENEMY_SHIP: [f32; 4] = [0.8, 0.1, 0.05, 1.0];
    pub const ENEMY_MISSILE: [f32; 4] = [0.8, 0.8, 0.1, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}
