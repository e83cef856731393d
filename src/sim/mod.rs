//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Frame length clamped before it touches any state
//! - Stable iteration order (by spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod kinds;
pub mod mode;
pub mod player;
pub mod registry;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::ScrollClock;
pub use collision::{ContactReport, detect, score_dodges};
pub use difficulty::Difficulty;
pub use kinds::{CollisionRule, ContactEffect, EntityKind, KindTraits};
pub use mode::{ModeTraits, PlayMode};
pub use player::Player;
pub use registry::{Entity, EntityRegistry};
pub use snapshot::{EntityView, PlayerView, RenderSnapshot};
pub use spawn::SpawnTable;
pub use state::{GameEvent, GamePhase, GameState, Intent};
pub use tick::{FrameContext, tick};
