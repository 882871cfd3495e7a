//! Ekrixiphobia - dodge the oncoming explosion
//!
//! Core modules:
//! - `sim`: Per-frame gameplay simulation (camera, explosion cycle, hits, score)
//! - `input`: Discrete button state fed by raw key events
//! - `scene`: Minimal scene graph the mode resolves its handles from
//! - `audio`: Cue sink interface for the external audio collaborator
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (volumes, key bindings)

pub mod audio;
pub mod input;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use audio::{AudioCue, CueHandle, CueSink, NullSink, RecordingSink};
pub use input::{Action, Button, InputState};
pub use scene::{Pose, Scene, SceneError, TransformId};
pub use settings::{KeyBindings, Settings};
pub use sim::{ModeError, PlayMode};
pub use tuning::{ConfigError, Tuning};

/// Game configuration constants
pub mod consts {
    /// Name of the scene transform the explosion is drawn with
    pub const EXPLOSION_NAME: &str = "Explosion";

    /// Camera movement speed (units/s)
    pub const PLAYER_SPEED: f32 = 20.0;
    /// Camera yaw speed (degrees/s)
    pub const PLAYER_ROTATION_SPEED: f32 = 40.0;
    /// Play area half-extents
    pub const MAX_X: f32 = 29.5;
    pub const MAX_Y: f32 = 29.5;

    /// Phase durations (seconds)
    pub const TELEGRAPH_DURATION: f32 = 1.0;
    pub const DETONATE_DURATION: f32 = 5.0;

    /// Telegraph positions are drawn from [-SPAWN_EXTENT, SPAWN_EXTENT]²
    pub const SPAWN_EXTENT: f32 = 30.0;
    /// Where the explosion waits between detonations
    pub const HOME_X: f32 = 50.0;
    pub const HOME_Y: f32 = 0.0;

    /// Warning cue falloff radius and height above the floor
    pub const WARNING_FALLOFF_RADIUS: f32 = 20.0;
    pub const WARNING_CUE_HEIGHT: f32 = 2.0;

    /// Base hit radius at difficulty 1.0
    pub const HIT_RADIUS: f32 = 10.0;

    /// Score bounds
    pub const MIN_POINTS: i32 = 0;
    pub const MAX_POINTS: i32 = 10;
    /// Difficulty gained per point above MIN_POINTS
    pub const DIFFICULTY_STEP: f32 = 0.1;

    /// Cue volumes
    pub const BACKGROUND_VOLUME: f32 = 0.7;
    pub const ALARM_VOLUME: f32 = 1.0;
    pub const HIT_VOLUME: f32 = 1.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}
