//! The shared entity record
//!
//! Every movable object (player ship, asteroid, missile, enemy ship) is one
//! `Entity`. Spatial state, orientation and the collider live here; the
//! per-kind update policy is looked up through [`EntityKind::behavior`].

use glam::{Mat4, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::field::PlayField;
use super::kinds::KindBehavior;
use crate::consts::COLLISION_MARGIN;
use crate::heading;

/// Which kind of object an entity is, plus the data only that kind carries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Player ship
    Ship,
    /// Tumbling rock
    Asteroid,
    /// Projectile with a countdown (seconds remaining)
    Missile { lifetime: f32 },
    /// Autonomous shooter
    EnemyShip {
        time_since_last_fire: f32,
        fire_rate: f32,
    },
}

/// Circle used for proximity collision
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub radius: f32,
    /// Reserved; not applied to the distance test
    pub offset: Vec2,
}

/// A game object on the play field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    position: Vec3,
    /// Euler angles in degrees
    yaw: f32,
    pitch: f32,
    roll: f32,
    /// Always derived from (yaw, pitch, roll)
    orientation: Quat,
    scale: Vec3,
    speed: f32,
    velocity: Vec2,
    /// Degrees per second
    yaw_speed: f32,
    pitch_speed: f32,
    roll_speed: f32,
    collider: Collider,
    /// Marked on death, swept by the owning collection
    pub dead: bool,
}

/// Compose an orientation as pitch * yaw * roll (yaw about Y, pitch about X, roll about Z)
pub fn compose_orientation(yaw: f32, pitch: f32, roll: f32) -> Quat {
    let yaw_q = Quat::from_axis_angle(Vec3::Y, yaw.to_radians());
    let pitch_q = Quat::from_axis_angle(Vec3::X, pitch.to_radians());
    let roll_q = Quat::from_axis_angle(Vec3::Z, roll.to_radians());
    pitch_q * yaw_q * roll_q
}

impl Entity {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            orientation: Quat::IDENTITY,
            scale: Vec3::ONE,
            speed: 0.0,
            velocity: Vec2::ZERO,
            yaw_speed: 0.0,
            pitch_speed: 0.0,
            roll_speed: 0.0,
            collider: Collider::default(),
            dead: false,
        }
    }

    pub fn behavior(&self) -> &'static KindBehavior {
        self.kind.behavior()
    }

    /// Derive the collider from the current scale
    pub fn initialize(&mut self) {
        (self.behavior().initialize)(self);
    }

    /// Advance one tick using this kind's update policy
    pub fn update(&mut self, dt: f32, field: &PlayField) {
        (self.behavior().update)(self, dt, field);
    }

    // --- Getters ---

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn roll(&self) -> f32 {
        self.roll
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn rotation_matrix(&self) -> Mat4 {
        Mat4::from_quat(self.orientation)
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn collider(&self) -> Collider {
        self.collider
    }

    pub fn rotation_speeds(&self) -> Vec3 {
        Vec3::new(self.yaw_speed, self.pitch_speed, self.roll_speed)
    }

    // --- Setters ---

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_yaw(&mut self, degrees: f32) {
        self.yaw = degrees;
        self.refresh_orientation();
    }

    pub fn set_pitch(&mut self, degrees: f32) {
        self.pitch = degrees;
        self.refresh_orientation();
    }

    pub fn set_roll(&mut self, degrees: f32) {
        self.roll = degrees;
        self.refresh_orientation();
    }

    pub fn set_yaw_speed(&mut self, degrees_per_sec: f32) {
        self.yaw_speed = degrees_per_sec;
    }

    pub fn set_pitch_speed(&mut self, degrees_per_sec: f32) {
        self.pitch_speed = degrees_per_sec;
    }

    pub fn set_roll_speed(&mut self, degrees_per_sec: f32) {
        self.roll_speed = degrees_per_sec;
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    /// Set speed and point the velocity along the current yaw.
    /// Later yaw changes leave the velocity alone.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
        self.velocity = heading(self.yaw) * speed;
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub(super) fn set_collider(&mut self, collider: Collider) {
        self.collider = collider;
    }

    // --- Integration ---

    pub fn update_yaw(&mut self, degrees: f32) {
        self.yaw += degrees;
        self.refresh_orientation();
    }

    pub fn update_pitch(&mut self, degrees: f32) {
        self.pitch += degrees;
        self.refresh_orientation();
    }

    pub fn update_roll(&mut self, degrees: f32) {
        self.roll += degrees;
        self.refresh_orientation();
    }

    /// Move by `delta`, then pop to the opposite edge if the field was left
    pub fn update_position(&mut self, delta: Vec3, field: &PlayField) {
        self.position = field.wrap(self.position + delta);
    }

    /// Displacement this entity would make over `dt`
    pub fn step(&self, dt: f32) -> Vec3 {
        self.velocity.extend(0.0) * dt
    }

    /// Circle-circle overlap with the forgiveness margin; touching counts
    pub fn check_collision(&self, other: &Entity) -> bool {
        let reach = (self.collider.radius + other.collider.radius) * COLLISION_MARGIN;
        self.position.distance(other.position) <= reach
    }

    fn refresh_orientation(&mut self) {
        self.orientation = compose_orientation(self.yaw, self.pitch, self.roll);
    }
}
