//! Data-driven game balance
//!
//! Every gameplay constant in one serde struct. Defaults come from
//! [`crate::consts`]; a JSON file may override any subset of them.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors loading tuning or settings
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The JSON could not be parsed.
    #[error("invalid json: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of its allowed range.
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player_speed: f32,
    /// Degrees per second
    pub rotation_speed: f32,
    pub max_x: f32,
    pub max_y: f32,
    pub telegraph_duration: f32,
    pub detonate_duration: f32,
    pub spawn_extent: f32,
    pub home: Vec2,
    pub warning_falloff_radius: f32,
    pub warning_cue_height: f32,
    pub hit_radius: f32,
    pub min_points: i32,
    pub max_points: i32,
    pub difficulty_step: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            rotation_speed: PLAYER_ROTATION_SPEED,
            max_x: MAX_X,
            max_y: MAX_Y,
            telegraph_duration: TELEGRAPH_DURATION,
            detonate_duration: DETONATE_DURATION,
            spawn_extent: SPAWN_EXTENT,
            home: Vec2::new(HOME_X, HOME_Y),
            warning_falloff_radius: WARNING_FALLOFF_RADIUS,
            warning_cue_height: WARNING_CUE_HEIGHT,
            hit_radius: HIT_RADIUS,
            min_points: MIN_POINTS,
            max_points: MAX_POINTS,
            difficulty_step: DIFFICULTY_STEP,
        }
    }
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Difficulty multiplier for a score. Scales both the detonation's
    /// visual size and its hit radius; the two must stay identical.
    pub fn difficulty(&self, score: i32) -> f32 {
        1.0 + self.difficulty_step * (score - self.min_points) as f32
    }

    /// Largest hit radius any score can produce
    pub fn max_hit_radius(&self) -> f32 {
        self.hit_radius * self.difficulty(self.max_points)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("player_speed", self.player_speed),
            ("rotation_speed", self.rotation_speed),
            ("max_x", self.max_x),
            ("max_y", self.max_y),
            ("telegraph_duration", self.telegraph_duration),
            ("detonate_duration", self.detonate_duration),
            ("spawn_extent", self.spawn_extent),
            ("hit_radius", self.hit_radius),
            ("warning_falloff_radius", self.warning_falloff_radius),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be positive, got {value}"),
                });
            }
        }

        if self.min_points > self.max_points {
            return Err(ConfigError::Invalid {
                field: "min_points",
                reason: format!("{} exceeds max_points {}", self.min_points, self.max_points),
            });
        }
        if !(self.difficulty_step >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "difficulty_step",
                reason: "must not be negative".to_string(),
            });
        }

        // The explosion parks at home between detonations; no camera
        // position may reach it there.
        let gap = Vec2::new(
            (self.home.x.abs() - self.max_x).max(0.0),
            (self.home.y.abs() - self.max_y).max(0.0),
        )
        .length();
        if gap <= self.max_hit_radius() {
            return Err(ConfigError::Invalid {
                field: "home",
                reason: format!(
                    "{} is within hit radius {} of the play area",
                    self.home,
                    self.max_hit_radius()
                ),
            });
        }

        Ok(())
    }
}
