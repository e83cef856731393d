//! Weighted spawn sampling
//!
//! Kinds come from a fixed per-mode weight table drawn through the run's
//! seeded RNG, so a seed fully determines the obstacle stream.

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand_pcg::Pcg32;

use super::difficulty::Difficulty;
use super::kinds::EntityKind;
use super::mode::PlayMode;
use super::registry::EntityRegistry;
use crate::consts::SPAWN_LANES;

/// Discrete distribution over entity kinds
#[derive(Debug, Clone)]
pub struct SpawnTable {
    kinds: Vec<EntityKind>,
    /// `None` when the weights are unusable; sampling is then uniform
    index: Option<WeightedIndex<u32>>,
}

impl SpawnTable {
    pub fn for_mode(mode: PlayMode) -> Self {
        Self::from_weights(mode.spawn_weights())
    }

    /// Build from (kind, weight) pairs. All-zero or empty weights fall back
    /// to a uniform draw so sampling never fails mid-run.
    pub fn from_weights(weights: &[(EntityKind, u32)]) -> Self {
        if weights.is_empty() {
            log::error!("Empty spawn table, sampling all kinds uniformly");
            return Self {
                kinds: EntityKind::ALL.to_vec(),
                index: None,
            };
        }

        let kinds = weights.iter().map(|&(kind, _)| kind).collect();
        let index = match WeightedIndex::new(weights.iter().map(|&(_, w)| w)) {
            Ok(index) => Some(index),
            Err(e) => {
                log::error!("Unusable spawn weights ({}), sampling uniformly", e);
                None
            }
        };
        Self { kinds, index }
    }

    pub fn sample(&self, rng: &mut Pcg32) -> EntityKind {
        match &self.index {
            Some(index) => self.kinds[index.sample(rng)],
            None => self.kinds[rng.random_range(0..self.kinds.len())],
        }
    }
}

/// Whether the registry has room and the newest entity has pulled far enough ahead
pub fn spawn_due(registry: &EntityRegistry, difficulty: &Difficulty, spawn_distance: f32) -> bool {
    if registry.len() >= difficulty.max_entities {
        return false;
    }
    match registry.newest() {
        None => true,
        Some(newest) => newest.z > -spawn_distance + difficulty.min_spacing,
    }
}

/// Draw a kind and lane and spawn it at the spawn plane
pub fn spawn_random(
    registry: &mut EntityRegistry,
    table: &SpawnTable,
    rng: &mut Pcg32,
    spawn_distance: f32,
) -> (u32, EntityKind) {
    let kind = table.sample(rng);
    let lane = rng.random_range(SPAWN_LANES) as f32;
    let id = registry.spawn(kind, lane, -spawn_distance);
    log::trace!("Spawned {} #{} in lane {}", kind.as_str(), id, lane);
    (id, kind)
}
