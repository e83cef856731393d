//! Active obstacle/collectible registry
//!
//! Entities are kept in spawn order, so the last element is always the most
//! recently spawned one still alive. Ids are never reused within a run.

use serde::{Deserialize, Serialize};

use super::kinds::EntityKind;

/// An obstacle or collectible on the corridor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// Lateral position
    pub lane: f32,
    /// Forward offset: negative ahead of the player, 0 at the player plane
    pub z: f32,
    /// Dodge points already awarded
    #[serde(default)]
    pub scored: bool,
}

#[derive(Debug, Clone)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
    next_id: u32,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Add an entity and return its id
    pub fn spawn(&mut self, kind: EntityKind, lane: f32, z: f32) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.entities.push(Entity {
            id,
            kind,
            lane,
            z,
            scored: false,
        });
        id
    }

    /// Move every entity toward (and past) the player
    pub fn advance_all(&mut self, travel: f32) {
        for entity in &mut self.entities {
            entity.z += travel * entity.kind.traits().speed_multiplier;
        }
    }

    /// Drop everything further behind the player than `threshold`
    pub fn prune_beyond(&mut self, threshold: f32) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| e.z <= threshold);
        before - self.entities.len()
    }

    /// Remove an entity by id; removing twice is a no-op
    pub fn remove_by_id(&mut self, id: u32) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(idx))
    }

    /// Most recently spawned entity still active
    pub fn newest(&self) -> Option<&Entity> {
        self.entities.last()
    }

    pub fn get(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_assigns_unique_ids() {
        let mut registry = EntityRegistry::new();
        let a = registry.spawn(EntityKind::Palm, 0.0, -40.0);
        let b = registry.spawn(EntityKind::Chest, 1.0, -40.0);
        assert_ne!(a, b);
        assert_eq!(registry.newest().map(|e| e.id), Some(b));
    }

    #[test]
    fn test_ids_not_reused_after_removal() {
        let mut registry = EntityRegistry::new();
        let a = registry.spawn(EntityKind::Palm, 0.0, -40.0);
        registry.remove_by_id(a);
        let b = registry.spawn(EntityKind::Palm, 0.0, -40.0);
        assert!(b > a);
    }

    #[test]
    fn test_advance_uses_kind_multiplier() {
        let mut registry = EntityRegistry::new();
        let palm = registry.spawn(EntityKind::Palm, 0.0, -10.0);
        let gull = registry.spawn(EntityKind::LowGull, 0.0, -10.0);
        registry.advance_all(1.0);
        assert_eq!(registry.get(palm).map(|e| e.z), Some(-9.0));
        assert_eq!(registry.get(gull).map(|e| e.z), Some(-8.5));
    }

    #[test]
    fn test_prune_beyond() {
        let mut registry = EntityRegistry::new();
        registry.spawn(EntityKind::Palm, 0.0, 10.5);
        let kept = registry.spawn(EntityKind::Palm, 0.0, 9.5);
        assert_eq!(registry.prune_beyond(10.0), 1);
        assert_eq!(registry.len(), 1);
        assert!(registry.get(kept).is_some());
    }

    #[test]
    fn test_remove_by_id_is_idempotent() {
        let mut registry = EntityRegistry::new();
        let a = registry.spawn(EntityKind::Chest, 0.0, -1.0);
        let b = registry.spawn(EntityKind::Palm, 1.0, -1.0);
        assert!(registry.remove_by_id(a).is_some());
        assert!(registry.remove_by_id(a).is_none());
        assert!(registry.get(b).is_some());
        assert_eq!(registry.len(), 1);
    }
}
