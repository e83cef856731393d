//! Difficulty controller
//!
//! Speed and density only ever ramp one way during a run; a new run starts
//! from `Difficulty::new` again.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// World speed multiplier
    pub speed: f32,
    /// Ceiling on simultaneously active entities
    pub max_entities: usize,
    /// Minimum forward gap between consecutive spawns
    pub min_spacing: f32,
}

impl Difficulty {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            speed: tuning.initial_speed,
            max_entities: tuning.initial_max_entities,
            min_spacing: tuning.initial_min_spacing,
        }
    }

    /// Periodic ramp (one per scroll wrap)
    pub fn ramp(&mut self, tuning: &Tuning) {
        self.speed = (self.speed + tuning.ramp_speed_step).min(tuning.max_speed.max(self.speed));
        self.max_entities = self
            .max_entities
            .saturating_add(tuning.ramp_entities_step)
            .min(tuning.max_entities_cap.max(self.max_entities));
        self.min_spacing = (self.min_spacing - tuning.ramp_spacing_step)
            .max(tuning.min_spacing_floor.min(self.min_spacing));
    }

    /// Small nudge after a pickup
    pub fn reward(&mut self, tuning: &Tuning) {
        self.speed = (self.speed + tuning.pickup_speed_step).min(tuning.max_speed.max(self.speed));
        self.min_spacing = (self.min_spacing - tuning.pickup_spacing_step)
            .max(tuning.min_spacing_floor.min(self.min_spacing));
    }
}
