//! Explosion telegraph/detonate cycle
//!
//! Telegraph: a target is picked and warned about while the explosion stays
//! parked. Detonate: the explosion sits on the target, scaled by difficulty.
//! When detonation ends the explosion goes home and the round is settled.
//!
//! One-shot entry effects run on the first frame after a transition, so a
//! single `advance` never performs more than one transition.

use glam::Vec2;
use rand::Rng;

use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Telegraph,
    Detonate,
}

/// Side effect requested by the cycle for the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleEvent {
    /// A new target was chosen; warn the player about it
    Telegraphed { target: Vec2 },
    /// Move the explosion onto `position` at uniform `scale`
    Detonated { position: Vec2, scale: f32 },
    /// Park the explosion at `home` and score the round
    Settled { home: Vec2 },
}

#[derive(Debug, Clone)]
pub struct ExplosionCycle {
    phase: CyclePhase,
    /// Seconds since the current phase began
    timer: f32,
    /// Entry effects for `phase` still pending
    phase_just_entered: bool,
    target: Vec2,
    telegraph_duration: f32,
    detonate_duration: f32,
    spawn_extent: f32,
    home: Vec2,
}

impl ExplosionCycle {
    /// Starts with a telegraph pending
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            phase: CyclePhase::Telegraph,
            timer: 0.0,
            phase_just_entered: true,
            target: tuning.home,
            telegraph_duration: tuning.telegraph_duration,
            detonate_duration: tuning.detonate_duration,
            spawn_extent: tuning.spawn_extent,
            home: tuning.home,
        }
    }

    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn phase_just_entered(&self) -> bool {
        self.phase_just_entered
    }

    /// Most recently telegraphed position
    pub fn target(&self) -> Vec2 {
        self.target
    }

    fn duration(&self, phase: CyclePhase) -> f32 {
        match phase {
            CyclePhase::Telegraph => self.telegraph_duration,
            CyclePhase::Detonate => self.detonate_duration,
        }
    }

    fn enter(&mut self, phase: CyclePhase) {
        self.phase = phase;
        self.timer = 0.0;
        self.phase_just_entered = true;
    }

    /// Advance by `dt` seconds. `difficulty` sizes a detonation that starts
    /// this frame.
    pub fn advance<R: Rng>(
        &mut self,
        dt: f32,
        difficulty: f32,
        rng: &mut R,
    ) -> Option<CycleEvent> {
        self.timer += dt;

        if self.phase_just_entered {
            self.phase_just_entered = false;
            return match self.phase {
                CyclePhase::Telegraph => {
                    let e = self.spawn_extent;
                    self.target = Vec2::new(rng.random_range(-e..=e), rng.random_range(-e..=e));
                    log::debug!("Telegraphing explosion at {}", self.target);
                    Some(CycleEvent::Telegraphed {
                        target: self.target,
                    })
                }
                CyclePhase::Detonate => None,
            };
        }

        if self.timer <= self.duration(self.phase) {
            return None;
        }

        match self.phase {
            CyclePhase::Telegraph => {
                self.enter(CyclePhase::Detonate);
                log::debug!("Detonating at {} (scale {difficulty})", self.target);
                Some(CycleEvent::Detonated {
                    position: self.target,
                    scale: difficulty,
                })
            }
            CyclePhase::Detonate => {
                self.enter(CyclePhase::Telegraph);
                Some(CycleEvent::Settled { home: self.home })
            }
        }
    }
}
