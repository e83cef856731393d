//! Per-frame simulation tick
//!
//! Core game loop that advances the run by exactly one rendered frame.
//! The step order is fixed; later steps read what earlier ones wrote.

use super::collision;
use super::spawn;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Timing for one rendered frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Seconds since the previous frame
    pub dt: f32,
}

impl Default for FrameContext {
    fn default() -> Self {
        Self::nominal()
    }
}

impl FrameContext {
    pub fn new(dt: f32) -> Self {
        Self { dt }
    }

    /// Exactly one 60 Hz frame
    pub fn nominal() -> Self {
        Self { dt: SIM_DT }
    }

    /// Frame length relative to 60 Hz, clamped; garbage dt gets the minimum step
    pub fn scale(&self) -> f32 {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return MIN_FRAME_SCALE;
        }
        (self.dt / SIM_DT).clamp(MIN_FRAME_SCALE, MAX_FRAME_SCALE)
    }
}

/// Advance the run by one frame, returning what happened.
///
/// Long frames are split into substeps of at most one nominal frame, so an
/// entity never moves further per step than the contact window is deep.
pub fn tick(state: &mut GameState, frame: FrameContext) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Don't tick unless running
    if state.phase != GamePhase::Running {
        return events;
    }

    let scale = frame.scale();
    let substeps = scale.ceil().max(1.0) as u32;
    let step_scale = scale / substeps as f32;
    let score_before = state.score;
    state.frame += 1;

    for _ in 0..substeps {
        if !step(state, step_scale, &mut events) {
            // Game over: the score stays at its pre-impact value
            return events;
        }
    }

    if state.score != score_before {
        events.push(GameEvent::ScoreChanged(state.score));
    }

    events
}

/// One substep of at most a nominal frame; false once the run has ended
fn step(state: &mut GameState, scale: f32, events: &mut Vec<GameEvent>) -> bool {
    let dt = scale * SIM_DT;

    // 1. Scroll the corridor
    let travel = state.difficulty.speed * state.tuning.base_step * scale;
    let wraps = state.clock.advance(travel);

    // 2. Entities come toward the player
    state.entities.advance_all(travel);

    // 3. Forget what is far behind
    state.entities.prune_beyond(state.tuning.despawn_distance);

    // 4. Maybe spawn one more
    if spawn::spawn_due(&state.entities, &state.difficulty, state.tuning.spawn_distance) {
        let (id, kind) = spawn::spawn_random(
            &mut state.entities,
            &state.spawn_table,
            &mut state.rng,
            state.tuning.spawn_distance,
        );
        events.push(GameEvent::Spawned { id, kind });
    }

    // 5. Contacts; a hazard ends the run before anything else scores
    let contacts = collision::detect(&state.player, &state.entities);
    if let Some(hazard) = contacts.fatal {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over: hit #{} after {:.1} units, score {}",
            hazard,
            state.clock.distance(),
            state.score
        );
        events.push(GameEvent::GameOver {
            final_score: state.score,
            hazard,
        });
        return false;
    }

    for id in contacts.collected {
        if state.entities.remove_by_id(id).is_some() {
            let reward = state.tuning.collectible_reward;
            state.score += reward;
            state.difficulty.reward(&state.tuning);
            log::debug!("Collected #{} (+{}), speed {:.2}", id, reward, state.difficulty.speed);
            events.push(GameEvent::Collected { id, reward });
        }
    }

    // 6. Dodges and distance
    if state.mode.traits().dodge_scoring {
        for (id, reward) in collision::score_dodges(&state.player, &mut state.entities) {
            state.score += reward;
            events.push(GameEvent::Dodged { id, reward });
        }
    }

    let interval = state.tuning.distance_score_interval;
    if interval > 0.0 {
        state.distance_accum += travel;
        while state.distance_accum >= interval {
            state.distance_accum -= interval;
            state.score += 1;
        }
    }

    // 7. Ramp once per scroll wrap
    for _ in 0..wraps {
        state.difficulty.ramp(&state.tuning);
        log::debug!(
            "Difficulty ramp: speed {:.2}, max {}, spacing {:.1}",
            state.difficulty.speed,
            state.difficulty.max_entities,
            state.difficulty.min_spacing
        );
        events.push(GameEvent::DifficultyRamped {
            speed: state.difficulty.speed,
            max_entities: state.difficulty.max_entities,
            min_spacing: state.difficulty.min_spacing,
        });
    }

    // 8. Jump/duck physics
    state.player.integrate(dt, &state.tuning);

    true
}
