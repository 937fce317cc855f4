//! Time-boxed visual effects (explosions)
//!
//! Effects never influence gameplay. They are spawned by death events and
//! reaped once their duration has elapsed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which explosion sheet an effect plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    MissileExplosion,
    ShipExplosion,
}

/// A single running effect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    /// Bottom-left corner of the sprite on the play field
    pub position: Vec2,
    /// Sprite rotation in degrees
    pub angle: f32,
    pub duration: f32,
    pub elapsed: f32,
}

impl Effect {
    pub fn new(kind: EffectKind, position: Vec2, angle: f32, duration: f32) -> Self {
        Self {
            kind,
            position,
            angle,
            duration,
            elapsed: 0.0,
        }
    }

    pub fn add_time(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Sheet frame for the current time, in `0..frame_count`
    pub fn frame(&self, frame_count: usize) -> usize {
        if frame_count == 0 || self.elapsed <= 0.0 {
            return 0;
        }
        if self.finished() {
            return frame_count - 1;
        }
        let t = self.elapsed / self.duration;
        ((t * frame_count as f32) as usize).min(frame_count - 1)
    }
}

/// Owns every active effect
#[derive(Debug, Clone, Default)]
pub struct EffectTracker {
    effects: Vec<Effect>,
}

impl EffectTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    /// Advance every effect, then drop all that have finished
    pub fn advance(&mut self, dt: f32) -> usize {
        for effect in &mut self.effects {
            effect.add_time(dt);
        }
        let before = self.effects.len();
        self.effects.retain(|e| !e.finished());
        before - self.effects.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}
