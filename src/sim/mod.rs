//! Simulation module
//!
//! All gameplay logic lives here:
//! - Caller-supplied dt only, no wall-clock reads
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod effects;
pub mod entity;
pub mod field;
pub mod kinds;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use collision::{MissileHits, PlayerHit, find_player_hit, resolve_missile_hits};
pub use effects::{Effect, EffectKind, EffectTracker};
pub use entity::{Collider, Entity, EntityKind, compose_orientation};
pub use field::{PlayField, Viewport};
pub use kinds::KindBehavior;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
