//! Entity kinds and their capability table
//!
//! Every type-specific rule (speed, contact, scoring, placement) is looked up
//! here instead of being branched on throughout the tick.

use serde::{Deserialize, Serialize};

/// Closed set of things that scroll toward the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Palm tree planted on the road; blocks the lane at any height
    Palm,
    /// Treasure chest; collected on contact
    Chest,
    /// Gull skimming the sand; jump over it
    LowGull,
    /// Gull at head height; only hits a jumping player
    HighGull,
    /// Crab; a short hop clears it
    Crab,
    /// Driftwood log; needs a near-full jump
    Driftwood,
}

/// Which player heights an entity can touch
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionRule {
    /// Touches regardless of player height
    Solid,
    /// Touches while the player's feet are below `clearance`
    Low { clearance: f32 },
    /// Touches once the player's feet are at or above `floor`
    High { floor: f32 },
}

impl CollisionRule {
    /// Whether an entity with this rule reaches a player at `player_height`
    #[inline]
    pub fn reaches(self, player_height: f32) -> bool {
        match self {
            CollisionRule::Solid => true,
            CollisionRule::Low { clearance } => player_height < clearance,
            CollisionRule::High { floor } => player_height >= floor,
        }
    }
}

/// What happens when the player touches an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEffect {
    /// Ends the run
    Fatal,
    /// Awards the collectible reward and removes the entity
    Collect,
}

/// Per-kind capabilities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindTraits {
    /// Multiplier on world travel (gulls fly toward the player)
    pub speed_multiplier: f32,
    pub collision: CollisionRule,
    pub effect: ContactEffect,
    /// Points for letting it pass untouched (0 = no dodge score)
    pub dodge_reward: u64,
    /// Vertical placement for the renderer
    pub render_height: f32,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Palm,
        EntityKind::Chest,
        EntityKind::LowGull,
        EntityKind::HighGull,
        EntityKind::Crab,
        EntityKind::Driftwood,
    ];

    pub const fn traits(self) -> KindTraits {
        match self {
            EntityKind::Palm => KindTraits {
                speed_multiplier: 1.0,
                collision: CollisionRule::Solid,
                effect: ContactEffect::Fatal,
                dodge_reward: 0,
                render_height: 0.0,
            },
            EntityKind::Chest => KindTraits {
                speed_multiplier: 1.0,
                collision: CollisionRule::Low { clearance: 0.8 },
                effect: ContactEffect::Collect,
                dodge_reward: 0,
                render_height: 0.25,
            },
            EntityKind::LowGull => KindTraits {
                speed_multiplier: 1.5,
                collision: CollisionRule::Low { clearance: 0.6 },
                effect: ContactEffect::Fatal,
                dodge_reward: 2,
                render_height: 0.4,
            },
            EntityKind::HighGull => KindTraits {
                speed_multiplier: 1.5,
                collision: CollisionRule::High { floor: 0.6 },
                effect: ContactEffect::Fatal,
                dodge_reward: 2,
                render_height: 1.4,
            },
            EntityKind::Crab => KindTraits {
                speed_multiplier: 1.0,
                collision: CollisionRule::Low { clearance: 0.5 },
                effect: ContactEffect::Fatal,
                dodge_reward: 1,
                render_height: 0.0,
            },
            EntityKind::Driftwood => KindTraits {
                speed_multiplier: 1.0,
                collision: CollisionRule::Low { clearance: 1.0 },
                effect: ContactEffect::Fatal,
                dodge_reward: 1,
                render_height: 0.0,
            },
        }
    }

    #[inline]
    pub fn is_hazard(self) -> bool {
        self.traits().effect == ContactEffect::Fatal
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Palm => "palm",
            EntityKind::Chest => "chest",
            EntityKind::LowGull => "low_gull",
            EntityKind::HighGull => "high_gull",
            EntityKind::Crab => "crab",
            EntityKind::Driftwood => "driftwood",
        }
    }
}
