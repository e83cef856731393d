//! Player-vs-entity contact and dodge detection
//!
//! Contact needs both a lateral and a forward overlap, then the kind's
//! height rule decides whether the entity actually reaches the player's feet.
//! A jump clears low threats; staying on the sand clears high ones.

use super::kinds::ContactEffect;
use super::player::Player;
use super::registry::{Entity, EntityRegistry};
use crate::consts::{COLLISION_DEPTH, COLLISION_LATERAL};

/// Contacts found in one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactReport {
    /// First hazard touching the player (takes precedence over pickups)
    pub fatal: Option<u32>,
    /// Collectibles touching the player
    pub collected: Vec<u32>,
}

/// Whether `entity` overlaps the player in all three axes
pub fn touches(player: &Player, entity: &Entity) -> bool {
    let lateral = (entity.lane - player.lane).abs();
    let forward = (entity.z - player.depth).abs();
    lateral < COLLISION_LATERAL
        && forward < COLLISION_DEPTH
        && entity.kind.traits().collision.reaches(player.height)
}

/// Evaluate every active entity against the player
pub fn detect(player: &Player, entities: &EntityRegistry) -> ContactReport {
    let mut report = ContactReport::default();
    for entity in entities.iter().filter(|e| touches(player, e)) {
        match entity.kind.traits().effect {
            ContactEffect::Fatal => {
                if report.fatal.is_none() {
                    report.fatal = Some(entity.id);
                }
            }
            ContactEffect::Collect => report.collected.push(entity.id),
        }
    }
    if report.fatal.is_some() {
        report.collected.clear();
    }
    report
}

/// Mark hazards that crossed the player plane untouched; returns (id, reward) pairs
pub fn score_dodges(player: &Player, entities: &mut EntityRegistry) -> Vec<(u32, u64)> {
    let plane = player.depth + COLLISION_DEPTH;
    let mut dodged = Vec::new();
    for entity in entities.iter_mut() {
        let reward = entity.kind.traits().dodge_reward;
        if reward > 0 && !entity.scored && entity.z >= plane {
            entity.scored = true;
            dodged.push((entity.id, reward));
        }
    }
    dodged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::kinds::EntityKind;

    fn registry_with(items: &[(EntityKind, f32, f32)]) -> (EntityRegistry, Vec<u32>) {
        let mut registry = EntityRegistry::new();
        let ids = items
            .iter()
            .map(|&(kind, lane, z)| registry.spawn(kind, lane, z))
            .collect();
        (registry, ids)
    }

    #[test]
    fn test_palm_in_lane_is_fatal() {
        let (registry, ids) = registry_with(&[(EntityKind::Palm, 0.0, -0.5)]);
        let report = detect(&Player::default(), &registry);
        assert_eq!(report.fatal, Some(ids[0]));
    }

    #[test]
    fn test_adjacent_lane_misses() {
        let (registry, _) = registry_with(&[(EntityKind::Palm, 1.0, 0.0)]);
        assert_eq!(detect(&Player::default(), &registry), ContactReport::default());
    }

    #[test]
    fn test_forward_window() {
        let (registry, _) = registry_with(&[(EntityKind::Palm, 0.0, -0.8)]);
        assert_eq!(detect(&Player::default(), &registry), ContactReport::default());
    }

    #[test]
    fn test_hazard_beats_collectible() {
        let (registry, ids) = registry_with(&[
            (EntityKind::Chest, 0.0, 0.1),
            (EntityKind::Crab, 0.0, -0.1),
        ]);
        let report = detect(&Player::default(), &registry);
        assert_eq!(report.fatal, Some(ids[1]));
        assert!(report.collected.is_empty());
    }

    #[test]
    fn test_low_gull_cleared_by_jump_height() {
        let (registry, _) = registry_with(&[(EntityKind::LowGull, 0.0, 0.0)]);
        let mut player = Player::default();
        assert!(detect(&player, &registry).fatal.is_some());
        player.height = 0.7;
        assert_eq!(detect(&player, &registry), ContactReport::default());
    }

    #[test]
    fn test_high_gull_only_hits_airborne() {
        let (registry, _) = registry_with(&[(EntityKind::HighGull, 0.0, 0.0)]);
        let mut player = Player::default();
        assert_eq!(detect(&player, &registry), ContactReport::default());
        player.height = 0.6;
        assert!(detect(&player, &registry).fatal.is_some());
    }

    #[test]
    fn test_depth_shifts_collision_plane() {
        let (registry, _) = registry_with(&[(EntityKind::Palm, 0.0, -2.0)]);
        let mut player = Player::default();
        assert_eq!(detect(&player, &registry), ContactReport::default());
        player.depth = -2.0;
        assert!(detect(&player, &registry).fatal.is_some());
    }

    #[test]
    fn test_dodge_scored_once() {
        let (mut registry, ids) = registry_with(&[
            (EntityKind::Crab, 0.0, 0.8),
            (EntityKind::Palm, 1.0, 0.8),
            (EntityKind::LowGull, 2.0, -3.0),
        ]);
        let player = Player::default();
        assert_eq!(score_dodges(&player, &mut registry), vec![(ids[0], 1)]);
        assert!(score_dodges(&player, &mut registry).is_empty());
    }
}
