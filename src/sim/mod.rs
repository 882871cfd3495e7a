//! Per-frame gameplay simulation
//!
//! Everything that decides what happens in a frame lives here:
//! - Camera movement from held buttons, clamped to the play area
//! - The telegraph/detonate explosion cycle
//! - Proximity hits and the bounded score they feed
//!
//! Rendering, audio playback and asset loading stay outside; the mode talks
//! to them through the scene handles and the cue sink.

pub mod camera;
pub mod cycle;
pub mod hit;
pub mod mode;
pub mod score;

pub use camera::CameraController;
pub use cycle::{CycleEvent, CyclePhase, ExplosionCycle};
pub use hit::HitDetector;
pub use mode::{ModeError, PlayMode};
pub use score::ScoreTracker;
