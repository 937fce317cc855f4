//! Data-driven game balance
//!
//! Every gameplay number the session loop consults lives here. The core never
//! touches the filesystem: hosts read a JSON document and hand it to
//! [`Tuning::from_json`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while loading a tuning document
#[derive(Error, Debug)]
pub enum TuningError {
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Session ===
    /// Lives at the start of a new game
    pub starting_lives: u32,
    /// Half-height of the play field in world units
    pub view_height: f32,

    // === Player ship ===
    pub ship_scale: f32,
    /// Speed while thrusting forward
    pub ship_forward_speed: f32,
    /// Speed while reversing (negative)
    pub ship_reverse_speed: f32,
    /// Yaw change per tick while a turn key is held (degrees, not dt-scaled)
    pub ship_turn_step: f32,
    /// Seconds between player shots
    pub fire_cooldown: f32,

    // === Missiles ===
    pub missile_scale: f32,
    pub missile_speed: f32,
    /// Seconds a missile survives
    pub missile_lifetime: f32,

    // === Asteroids ===
    /// Scale of a freshly spawned wave asteroid
    pub asteroid_base_scale: f32,
    pub asteroid_speed: f32,
    /// Magnitude of each per-axis tumble speed (degrees/sec)
    pub asteroid_spin: f32,
    /// Child scale as a fraction of the parent's
    pub fragment_ratio: f32,
    /// Children spawned when a large asteroid breaks
    pub fragment_count: u32,
    /// Asteroids per wave
    pub wave_size: u32,
    pub asteroid_points: u64,

    // === Enemy ship ===
    /// Seconds between enemy ship (re)spawns
    pub enemy_interval: f32,
    /// Seconds between enemy shots
    pub enemy_fire_rate: f32,
    pub enemy_spawn: [f32; 2],
    pub enemy_speed: f32,
    pub enemy_scale: f32,
    pub enemy_points: u64,

    // === Effects ===
    /// Explosion lifetime in seconds
    pub effect_duration: f32,
    /// Camera shake added when the player dies
    pub death_shake: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            view_height: 10.0,

            ship_scale: 0.2,
            ship_forward_speed: 2.5,
            ship_reverse_speed: -1.5,
            ship_turn_step: 2.0,
            fire_cooldown: 0.5,

            missile_scale: 0.3,
            missile_speed: 5.0,
            missile_lifetime: 4.0,

            asteroid_base_scale: 0.4,
            asteroid_speed: 2.0,
            asteroid_spin: 15.0,
            fragment_ratio: 0.6,
            fragment_count: 3,
            wave_size: 3,
            asteroid_points: 10,

            enemy_interval: 10.0,
            enemy_fire_rate: 2.0,
            enemy_spawn: [-6.9, 2.0],
            enemy_speed: 3.0,
            enemy_scale: 0.3,
            enemy_points: 100,

            effect_duration: 1.0,
            death_shake: 0.6,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning: {} lives, wave of {}", tuning.starting_lives, tuning.wave_size);
        Ok(tuning)
    }

    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        // A ratio >= 1 never shrinks below the split threshold
        if !(self.fragment_ratio > 0.0 && self.fragment_ratio < 1.0) {
            return Err(invalid("fragment_ratio", format!("{} is not in (0, 1)", self.fragment_ratio)));
        }
        if self.view_height <= 0.0 {
            return Err(invalid("view_height", format!("{} must be positive", self.view_height)));
        }
        if self.wave_size == 0 {
            return Err(invalid("wave_size", "must be at least 1".to_string()));
        }
        if self.asteroid_base_scale <= 0.0 {
            return Err(invalid(
                "asteroid_base_scale",
                format!("{} must be positive", self.asteroid_base_scale),
            ));
        }
        for (field, value) in [
            ("fire_cooldown", self.fire_cooldown),
            ("enemy_fire_rate", self.enemy_fire_rate),
            ("enemy_interval", self.enemy_interval),
            ("missile_lifetime", self.missile_lifetime),
            ("effect_duration", self.effect_duration),
            ("ship_scale", self.ship_scale),
            ("missile_scale", self.missile_scale),
            ("enemy_scale", self.enemy_scale),
        ] {
            if value <= 0.0 {
                return Err(invalid(field, format!("{} must be positive", value)));
            }
        }
        // Sign is drawn per axis at spawn
        if self.asteroid_spin < 0.0 {
            return Err(invalid(
                "asteroid_spin",
                format!("{} must not be negative", self.asteroid_spin),
            ));
        }
        Ok(())
    }

    /// Asteroids strictly larger than this split when destroyed
    pub fn fragment_threshold(&self) -> f32 {
        self.asteroid_base_scale * self.fragment_ratio * self.fragment_ratio
    }
}

fn invalid(field: &'static str, reason: String) -> TuningError {
    TuningError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "starting_lives": 5, "asteroid_speed": 3.5 }"#)
            .expect("partial document should parse");
        assert_eq!(tuning.starting_lives, 5);
        assert_eq!(tuning.asteroid_speed, 3.5);
        assert_eq!(tuning.wave_size, Tuning::default().wave_size);
        assert_eq!(tuning.enemy_spawn, [-6.9, 2.0]);
    }

    #[test]
    fn test_rejects_non_shrinking_fragments() {
        let err = Tuning::from_json(r#"{ "fragment_ratio": 1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "fragment_ratio", .. }));
    }

    #[test]
    fn test_rejects_zero_cooldown() {
        let err = Tuning::from_json(r#"{ "fire_cooldown": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "fire_cooldown", .. }));
    }

    #[test]
    fn test_rejects_non_positive_scale() {
        for field in ["ship_scale", "missile_scale", "enemy_scale"] {
            for value in ["0.0", "-0.5"] {
                let json = format!(r#"{{ "{}": {} }}"#, field, value);
                let err = Tuning::from_json(&json).unwrap_err();
                assert!(
                    matches!(err, TuningError::Invalid { field: f, .. } if f == field),
                    "{} = {} accepted",
                    field,
                    value
                );
            }
        }
    }

    #[test]
    fn test_rejects_negative_spin() {
        let err = Tuning::from_json(r#"{ "asteroid_spin": -1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "asteroid_spin", .. }));
        assert!(Tuning::from_json(r#"{ "asteroid_spin": 0.0 }"#).is_ok());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_threshold_matches_two_generations() {
        let tuning = Tuning::default();
        let grandchild = tuning.asteroid_base_scale * tuning.fragment_ratio * tuning.fragment_ratio;
        assert_eq!(tuning.fragment_threshold(), grandchild);
    }
}
