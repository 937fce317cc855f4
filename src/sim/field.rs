//! Play-field bounds derived from the view
//!
//! Entities live on the z = 0 plane inside a rectangle sized from the camera
//! field of view and the viewport aspect ratio.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_LEFT_FACTOR, FIELD_WIDTH_FACTOR};

/// Viewport size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Axis-aligned play-field rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayField {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl PlayField {
    /// Build the field for a field of view (view height) and viewport size
    pub fn new(fov: f32, width: u32, height: u32) -> Self {
        let view_height = fov;
        let view_width = view_height * Viewport::new(width, height).aspect();

        let left = -FIELD_LEFT_FACTOR * view_width;
        Self {
            left,
            right: left + view_width * FIELD_WIDTH_FACTOR,
            bottom: -view_height,
            top: view_height,
        }
    }

    pub fn from_viewport(fov: f32, viewport: Viewport) -> Self {
        Self::new(fov, viewport.width, viewport.height)
    }

    /// Whether a point lies inside the field (edges count as inside)
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.bottom && p.y <= self.top
    }

    /// Teleport a point that left the field to the opposite edge.
    /// Overshoot is discarded.
    pub fn wrap(&self, mut p: Vec3) -> Vec3 {
        if p.x < self.left {
            p.x = self.right;
        } else if p.x > self.right {
            p.x = self.left;
        }

        if p.y < self.bottom {
            p.y = self.top;
        } else if p.y > self.top {
            p.y = self.bottom;
        }
        p
    }
}
