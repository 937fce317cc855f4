//! Platform abstraction layer
//!
//! The simulation never polls a window or a wall clock. Hosts implement:
//! - `InputSource` for keyboard/mouse state
//! - `Clock` for per-tick elapsed time

use std::collections::HashSet;

use glam::Vec2;

use crate::consts::SIM_DT;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
}

/// Keyboard and mouse state for the current frame
pub trait InputSource {
    /// Went down this frame (edge-triggered)
    fn key_pressed(&self, key: Key) -> bool;
    /// Currently held (level-triggered)
    fn key_down(&self, key: Key) -> bool;
    /// Clicked this frame (edge-triggered)
    fn button_pressed(&self, button: MouseButton) -> bool;
    /// Pointer in screen pixels, origin top-left
    fn pointer(&self) -> Vec2;
}

/// Supplies elapsed seconds per tick
pub trait Clock {
    fn delta(&mut self) -> f32;
}

/// Constant timestep clock
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub dt: f32,
}

impl Default for FixedClock {
    fn default() -> Self {
        Self { dt: SIM_DT }
    }
}

impl Clock for FixedClock {
    fn delta(&mut self) -> f32 {
        self.dt
    }
}

/// Programmable input for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    held: HashSet<Key>,
    pressed: HashSet<Key>,
    clicks: HashSet<MouseButton>,
    pointer: Vec2,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press a key: edge this frame, held until released
    pub fn press(&mut self, key: Key) {
        if self.held.insert(key) {
            self.pressed.insert(key);
        }
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn click(&mut self, button: MouseButton, at: Vec2) {
        self.pointer = at;
        self.clicks.insert(button);
    }

    pub fn move_pointer(&mut self, at: Vec2) {
        self.pointer = at;
    }

    /// Clear edge-triggered state; held keys stay down
    pub fn end_frame(&mut self) {
        self.pressed.clear();
        self.clicks.clear();
    }
}

impl InputSource for ScriptedInput {
    fn key_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn key_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn button_pressed(&self, button: MouseButton) -> bool {
        self.clicks.contains(&button)
    }

    fn pointer(&self) -> Vec2 {
        self.pointer
    }
}
