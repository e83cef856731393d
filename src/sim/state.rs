//! Game state and core simulation types
//!
//! Everything the tick reads or writes lives in `GameState`. The renderer
//! only ever sees a `RenderSnapshot` built from it.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::ScrollClock;
use super::difficulty::Difficulty;
use super::kinds::EntityKind;
use super::mode::PlayMode;
use super::player::Player;
use super::registry::EntityRegistry;
use super::spawn::SpawnTable;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start
    Ready,
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// Something the presentation layer or session driver may react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: u32, kind: EntityKind },
    Collected { id: u32, reward: u64 },
    Dodged { id: u32, reward: u64 },
    DifficultyRamped { speed: f32, max_entities: usize, min_spacing: f32 },
    /// Emitted at most once per tick, with the new total
    ScoreChanged(u64),
    /// Emitted once per run, with the score at the moment of impact
    GameOver { final_score: u64, hazard: u32 },
}

/// A player request, already decoupled from keys and gestures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// -1 left, +1 right
    ShiftLane(i8),
    /// -1 forward, +1 back
    ShiftDepth(i8),
    Jump,
    /// Duck key pressed/released
    Duck(bool),
    /// Duck for the tuned duration
    DuckTap,
    TogglePause,
    /// Start or restart a run
    Start,
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub mode: PlayMode,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    /// Ticks simulated this run
    pub frame: u64,
    pub clock: ScrollClock,
    pub difficulty: Difficulty,
    pub player: Player,
    pub entities: EntityRegistry,
    /// Travel not yet converted into distance points
    pub(crate) distance_accum: f32,
    pub(crate) rng: Pcg32,
    pub(crate) spawn_table: SpawnTable,
}

impl GameState {
    /// Create a new run in the `Ready` phase
    pub fn new(seed: u64, mode: PlayMode, mut tuning: Tuning) -> Self {
        tuning.sanitize();
        Self {
            seed,
            mode,
            difficulty: Difficulty::new(&tuning),
            tuning,
            phase: GamePhase::Ready,
            score: 0,
            frame: 0,
            clock: ScrollClock::new(),
            player: Player::default(),
            entities: EntityRegistry::new(),
            distance_accum: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            spawn_table: SpawnTable::for_mode(mode),
        }
    }

    /// Begin the run (no-op unless `Ready`)
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Ready {
            return false;
        }
        self.phase = GamePhase::Running;
        log::info!("Run started (seed {}, mode {})", self.seed, self.mode.as_str());
        true
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Apply an intent immediately. Returns true if anything changed.
    pub fn apply_intent(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::TogglePause => {
                return match self.phase {
                    GamePhase::Running => {
                        self.phase = GamePhase::Paused;
                        true
                    }
                    GamePhase::Paused => {
                        self.phase = GamePhase::Running;
                        true
                    }
                    _ => false,
                };
            }
            // A release must never leave the duck stuck, whatever the phase
            Intent::Duck(false) => {
                let changed = self.player.ducking;
                self.player.set_ducking(false);
                return changed;
            }
            _ => {}
        }

        if !self.is_running() {
            return false;
        }

        let caps = self.mode.traits();
        match intent {
            Intent::ShiftLane(dir) => self.player.shift_lane(dir),
            Intent::ShiftDepth(dir) if caps.allows_depth => self.player.shift_depth(dir),
            Intent::Jump if caps.allows_jump => self.player.jump(self.tuning.jump_velocity),
            Intent::Duck(true) if caps.allows_duck => {
                let changed = !self.player.ducking;
                self.player.set_ducking(true);
                changed
            }
            Intent::DuckTap if caps.allows_duck => {
                self.player.duck_for(self.tuning.duck_tap_secs);
                true
            }
            _ => false,
        }
    }
}
