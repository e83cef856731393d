//! Play modes
//!
//! The three control schemes share one loop; what differs is captured in a
//! small capability table plus a fixed spawn table per mode.

use serde::{Deserialize, Serialize};

use super::kinds::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayMode {
    /// Lane changes, jump and duck
    #[default]
    Classic,
    /// Lane changes only; palms and chests
    LanesOnly,
    /// Lane changes, forward/back movement and jump (chase camera)
    FreeRoam,
}

/// Per-mode capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTraits {
    pub allows_jump: bool,
    pub allows_duck: bool,
    pub allows_depth: bool,
    /// Award dodge points for hazards that pass untouched
    pub dodge_scoring: bool,
}

impl PlayMode {
    pub const fn traits(self) -> ModeTraits {
        match self {
            PlayMode::Classic => ModeTraits {
                allows_jump: true,
                allows_duck: true,
                allows_depth: false,
                dodge_scoring: true,
            },
            PlayMode::LanesOnly => ModeTraits {
                allows_jump: false,
                allows_duck: false,
                allows_depth: false,
                dodge_scoring: false,
            },
            PlayMode::FreeRoam => ModeTraits {
                allows_jump: true,
                allows_duck: false,
                allows_depth: true,
                dodge_scoring: true,
            },
        }
    }

    /// Fixed spawn weights (percent) for this mode
    pub const fn spawn_weights(self) -> &'static [(EntityKind, u32)] {
        match self {
            PlayMode::Classic => &[
                (EntityKind::Palm, 70),
                (EntityKind::Chest, 20),
                (EntityKind::LowGull, 3),
                (EntityKind::HighGull, 3),
                (EntityKind::Crab, 2),
                (EntityKind::Driftwood, 2),
            ],
            PlayMode::LanesOnly => &[(EntityKind::Palm, 80), (EntityKind::Chest, 20)],
            // No high gulls: nothing to duck under without a duck
            PlayMode::FreeRoam => &[
                (EntityKind::Palm, 70),
                (EntityKind::Chest, 20),
                (EntityKind::LowGull, 4),
                (EntityKind::Crab, 3),
                (EntityKind::Driftwood, 3),
            ],
        }
    }

    /// Next mode in the selector cycle
    pub fn next(self) -> Self {
        match self {
            PlayMode::Classic => PlayMode::LanesOnly,
            PlayMode::LanesOnly => PlayMode::FreeRoam,
            PlayMode::FreeRoam => PlayMode::Classic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayMode::Classic => "Classic",
            PlayMode::LanesOnly => "Lanes",
            PlayMode::FreeRoam => "Free Roam",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(PlayMode::Classic),
            "lanes" | "lanes_only" | "lanesonly" => Some(PlayMode::LanesOnly),
            "free" | "free_roam" | "freeroam" => Some(PlayMode::FreeRoam),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_cycles_all_modes() {
        let mut mode = PlayMode::Classic;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(mode);
            mode = mode.next();
        }
        assert_eq!(mode, PlayMode::Classic);
        assert!(seen.contains(&PlayMode::LanesOnly) && seen.contains(&PlayMode::FreeRoam));
    }

    #[test]
    fn test_weights_total_one_hundred() {
        for mode in [PlayMode::Classic, PlayMode::LanesOnly, PlayMode::FreeRoam] {
            let total: u32 = mode.spawn_weights().iter().map(|(_, w)| w).sum();
            assert_eq!(total, 100, "{}", mode.as_str());
        }
    }

    #[test]
    fn test_lanes_only_spawns_no_vertical_threats() {
        assert!(
            PlayMode::LanesOnly
                .spawn_weights()
                .iter()
                .all(|(kind, _)| matches!(kind, EntityKind::Palm | EntityKind::Chest))
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!(PlayMode::from_str("Classic"), Some(PlayMode::Classic));
        assert_eq!(PlayMode::from_str("free_roam"), Some(PlayMode::FreeRoam));
        assert_eq!(PlayMode::from_str("lanes"), Some(PlayMode::LanesOnly));
        assert_eq!(PlayMode::from_str("hard"), None);
    }
}
