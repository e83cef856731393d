//! Data-driven game balance
//!
//! Everything a designer might tweak between builds. Spawn weights are
//! deliberately absent: they are fixed per play mode in `sim::mode`.

use serde::{Deserialize, Serialize};

/// Balance values for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World motion ===
    /// World units travelled per nominal frame at speed 1.0
    pub base_step: f32,
    /// Forward offset entities spawn at (they start at -spawn_distance)
    pub spawn_distance: f32,
    /// Entities behind the player past this offset are pruned
    pub despawn_distance: f32,

    // === Difficulty ===
    pub initial_speed: f32,
    pub max_speed: f32,
    /// Speed added per scroll wrap
    pub ramp_speed_step: f32,
    /// Speed added per collected chest
    pub pickup_speed_step: f32,
    pub initial_max_entities: usize,
    pub max_entities_cap: usize,
    pub ramp_entities_step: usize,
    pub initial_min_spacing: f32,
    pub min_spacing_floor: f32,
    pub ramp_spacing_step: f32,
    pub pickup_spacing_step: f32,

    // === Player physics (units/s, units/s²) ===
    pub gravity: f32,
    pub jump_velocity: f32,
    /// Gravity multiplier while ducking in the air
    pub fast_fall_multiplier: f32,
    /// How long a touch duck lasts (seconds)
    pub duck_tap_secs: f32,

    // === Scoring ===
    pub collectible_reward: u64,
    /// Travel per distance point; <= 0 disables distance points
    pub distance_score_interval: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_step: 0.18,
            spawn_distance: 40.0,
            despawn_distance: 10.0,

            initial_speed: 1.0,
            max_speed: 2.5,
            ramp_speed_step: 0.1,
            pickup_speed_step: 0.02,
            initial_max_entities: 5,
            max_entities_cap: 10,
            ramp_entities_step: 1,
            initial_min_spacing: 7.0,
            min_spacing_floor: 3.0,
            ramp_spacing_step: 0.5,
            pickup_spacing_step: 0.1,

            gravity: 30.0,
            jump_velocity: 9.0,
            fast_fall_multiplier: 3.0,
            duck_tap_secs: 0.5,

            collectible_reward: 10,
            distance_score_interval: 1.8,
        }
    }
}

impl Tuning {
    /// Repair values that would break the difficulty bounds or physics.
    /// Returns true if anything was changed.
    pub fn sanitize(&mut self) -> bool {
        let before = self.clone();
        let defaults = Tuning::default();

        if !(self.base_step.is_finite() && self.base_step > 0.0) {
            self.base_step = defaults.base_step;
        }
        if !(self.spawn_distance.is_finite() && self.spawn_distance > 0.0) {
            self.spawn_distance = defaults.spawn_distance;
        }
        if !(self.despawn_distance.is_finite() && self.despawn_distance > 0.0) {
            self.despawn_distance = defaults.despawn_distance;
        }
        if !(self.gravity.is_finite() && self.gravity > 0.0) {
            self.gravity = defaults.gravity;
        }
        if !(self.jump_velocity.is_finite() && self.jump_velocity > 0.0) {
            self.jump_velocity = defaults.jump_velocity;
        }
        self.fast_fall_multiplier = self.fast_fall_multiplier.max(1.0);
        self.duck_tap_secs = self.duck_tap_secs.max(0.0);

        // Bounds must bracket the initial values
        self.initial_speed = self.initial_speed.max(0.0);
        self.max_speed = self.max_speed.max(self.initial_speed);
        self.ramp_speed_step = self.ramp_speed_step.max(0.0);
        self.pickup_speed_step = self.pickup_speed_step.max(0.0);
        self.max_entities_cap = self.max_entities_cap.max(self.initial_max_entities);
        self.min_spacing_floor = self.min_spacing_floor.max(0.0);
        self.initial_min_spacing = self.initial_min_spacing.max(self.min_spacing_floor);
        self.ramp_spacing_step = self.ramp_spacing_step.max(0.0);
        self.pickup_spacing_step = self.pickup_spacing_step.max(0.0);

        let changed = *self != before;
        if changed {
            log::warn!("Tuning had out-of-range values and was repaired");
        }
        changed
    }
}
