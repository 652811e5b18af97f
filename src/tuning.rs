//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. The defaults reproduce the
//! classic feel; a page may override any subset with a JSON blob.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading a tuning override
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay constants. Units: pixels, frames, milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub jump_velocity: f32,
    pub player_x: f32,
    pub player_size: f32,
    pub obstacle_size: f32,
    pub game_speed_start: f32,
    pub game_speed_step: f32,
    pub spawn_interval_start: f32,
    pub spawn_interval_step: f32,
    pub spawn_interval_floor: f32,
    pub ones_limit: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            player_x: PLAYER_X,
            player_size: PLAYER_SIZE,
            obstacle_size: OBSTACLE_SIZE,
            game_speed_start: GAME_SPEED_START,
            game_speed_step: GAME_SPEED_STEP,
            spawn_interval_start: SPAWN_INTERVAL_START,
            spawn_interval_step: SPAWN_INTERVAL_STEP,
            spawn_interval_floor: SPAWN_INTERVAL_FLOOR,
            ones_limit: ONES_LIMIT,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break the simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if !(self.gravity > 0.0) {
            return invalid("gravity", "must be positive");
        }
        if !(self.jump_velocity < 0.0) {
            return invalid("jump_velocity", "must be negative (upward)");
        }
        if !(self.player_size > 0.0) {
            return invalid("player_size", "must be positive");
        }
        if !(self.obstacle_size > 0.0) {
            return invalid("obstacle_size", "must be positive");
        }
        if !(self.game_speed_start > 0.0) {
            return invalid("game_speed_start", "must be positive");
        }
        if !(self.game_speed_step >= 0.0) {
            return invalid("game_speed_step", "must not be negative");
        }
        if !(self.spawn_interval_floor > 0.0) {
            return invalid("spawn_interval_floor", "must be positive");
        }
        if !(self.spawn_interval_start >= self.spawn_interval_floor) {
            return invalid("spawn_interval_start", "must be at least the floor");
        }
        if !(self.spawn_interval_step >= 0.0) {
            return invalid("spawn_interval_step", "must not be negative");
        }
        if self.spawn_interval_step > self.spawn_interval_start - self.spawn_interval_floor {
            return invalid(
                "spawn_interval_step",
                "must not exceed the gap between start and floor",
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.spawn_interval_start, 1200.0);
        assert_eq!(tuning.ones_limit, 5);
    }

    #[test]
    fn test_partial_override() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.5, "ones_limit": 3 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.5);
        assert_eq!(tuning.ones_limit, 3);
        // Untouched fields keep defaults
        assert_eq!(tuning.jump_velocity, JUMP_VELOCITY);
    }

    #[test]
    fn test_parse_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rejects_upward_gravity() {
        let err = Tuning::from_json(r#"{ "gravity": -1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "gravity", .. }));
    }

    #[test]
    fn test_rejects_start_below_floor() {
        let err = Tuning::from_json(r#"{ "spawn_interval_start": 500.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "spawn_interval_start",
                ..
            }
        ));
        assert!(err.to_string().contains("spawn_interval_start"));
    }

    #[test]
    fn test_rejects_oversized_interval_step() {
        let err = Tuning::from_json(r#"{ "spawn_interval_step": 5000.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "spawn_interval_step",
                ..
            }
        ));

        // A step that exactly spans the gap is still fine
        let tuning = Tuning::from_json(r#"{ "spawn_interval_step": 500.0 }"#).unwrap();
        assert_eq!(tuning.spawn_interval_step, 500.0);
    }
}
