//! Dinovox Run - A beach endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (scrolling, entities, collisions, scoring)
//! - `input`: Keyboard/touch translation into player intents
//! - `game`: Session driver wiring the sim to callbacks and persistence
//! - `highscores`: High score persistence port
//! - `tuning`: Data-driven game balance
//! - `settings`: User preferences

pub mod game;
pub mod highscores;
pub mod input;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{Game, Presenter};
pub use highscores::{HighScoreStore, MemoryStore, StorageError};
pub use input::{InputAdapter, InputEvent, Key};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Nominal frame duration (the per-frame constants below assume 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Frame scale bounds; a hitch never advances more than 4 frames at once
    pub const MIN_FRAME_SCALE: f32 = 0.25;
    pub const MAX_FRAME_SCALE: f32 = 4.0;

    /// Lanes are one unit apart, centered on 0
    pub const LANE_WIDTH: f32 = 1.0;
    /// Player lateral range [-2, 2] (five lanes)
    pub const LANE_LIMIT: f32 = 2.0;
    /// Lanes entities spawn into
    pub const SPAWN_LANES: std::ops::RangeInclusive<i32> = -2..=2;

    /// Free-roam forward/back step and range
    pub const DEPTH_STEP: f32 = 1.0;
    pub const DEPTH_LIMIT: f32 = 2.0;

    /// Contact half-extents (lateral and forward)
    pub const COLLISION_LATERAL: f32 = 0.7;
    pub const COLLISION_DEPTH: f32 = 0.7;

    /// Corridor segment length used by the renderer
    pub const SEGMENT_LENGTH: f32 = 50.0;
    /// Side palm spacing used by the renderer
    pub const PALM_SPACING: f32 = 7.0;
    /// Scroll wraps here; multiple of both periods so decor stays put across wraps
    pub const SCROLL_MODULUS: f32 = SEGMENT_LENGTH * PALM_SPACING;
}

/// Lateral world coordinate of a lane value
#[inline]
pub fn lane_to_x(lane: f32) -> f32 {
    lane * consts::LANE_WIDTH
}
