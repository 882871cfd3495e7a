//! Proximity hit test between the camera and the explosion

use glam::Vec2;

use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct HitDetector {
    tuning: Tuning,
    /// Set once per detonation, cleared when the round is settled
    hit: bool,
}

impl HitDetector {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            tuning: tuning.clone(),
            hit: false,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.hit
    }

    /// Read and clear the flag for the round that just ended
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.hit)
    }

    /// Returns true only on the frame a new hit registers.
    pub fn evaluate(&mut self, camera: Vec2, explosion: Vec2, score: i32) -> bool {
        let difficulty = self.tuning.difficulty(score);
        let radius_sq = self.tuning.hit_radius * self.tuning.hit_radius;
        let in_range = camera.distance_squared(explosion) < radius_sq * difficulty * difficulty;

        if in_range && !self.hit {
            self.hit = true;
            log::debug!("Hit at distance {:.2}", camera.distance(explosion));
            return true;
        }
        false
    }
}
