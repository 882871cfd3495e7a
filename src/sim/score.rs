//! Bounded score

use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreTracker {
    points: i32,
    min_points: i32,
    max_points: i32,
}

impl ScoreTracker {
    /// Starts at the lower bound
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            points: tuning.min_points,
            min_points: tuning.min_points,
            max_points: tuning.max_points,
        }
    }

    pub fn points(&self) -> i32 {
        self.points
    }

    /// Settle one round: a hit costs a point, a dodge earns one.
    pub fn apply_result(&mut self, was_hit: bool) {
        let delta = if was_hit { -1 } else { 1 };
        self.points = (self.points + delta).clamp(self.min_points, self.max_points);
    }
}
