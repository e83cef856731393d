//! Demo autopilot
//!
//! Looks a fixed number of ticks down the corridor and suggests one intent
//! per frame: sidestep solid hazards, hop low ones, fast-fall under high
//! ones, and drift toward chests when nothing is threatening.

use super::kinds::{CollisionRule, ContactEffect, EntityKind};
use super::registry::Entity;
use super::state::{GameState, Intent};
use crate::consts::{COLLISION_DEPTH, COLLISION_LATERAL, LANE_LIMIT, LANE_WIDTH};

/// How far ahead (in ticks) hazards are considered
const LOOKAHEAD_TICKS: f32 = 30.0;
/// Jump when a low hazard is this close (in ticks)
const JUMP_LEAD_TICKS: f32 = 10.0;
/// A jump keeps the player off the sand for about this long
const AIRTIME_TICKS: f32 = 36.0;

/// Pick the next intent for the running player, if any
pub fn suggest(state: &GameState) -> Option<Intent> {
    if !state.is_running() {
        return None;
    }

    let caps = state.mode.traits();
    let player = &state.player;

    let threat = hazards_in_lane(state, player.lane, LOOKAHEAD_TICKS)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let Some((entity, ticks)) = threat else {
        return chase_chest(state);
    };

    match entity.kind.traits().collision {
        CollisionRule::High { .. } => {
            // Only dangerous in the air
            if !player.is_grounded() && caps.allows_duck && !player.is_ducking() {
                return Some(Intent::DuckTap);
            }
            None
        }
        CollisionRule::Low { .. } if caps.allows_jump && !high_hazard_overhead(state) => {
            if ticks <= JUMP_LEAD_TICKS && player.is_grounded() {
                Some(Intent::Jump)
            } else {
                None
            }
        }
        _ => sidestep(state),
    }
}

/// Ticks until `entity` enters the player's contact window
fn ticks_to_contact(state: &GameState, entity: &Entity) -> f32 {
    let per_tick =
        state.difficulty.speed * state.tuning.base_step * entity.kind.traits().speed_multiplier;
    if per_tick <= 0.0 {
        return f32::INFINITY;
    }
    (state.player.depth - COLLISION_DEPTH - entity.z) / per_tick
}

/// Fatal entities in `lane` that reach the contact window within `horizon` ticks
fn hazards_in_lane(
    state: &GameState,
    lane: f32,
    horizon: f32,
) -> impl Iterator<Item = (&Entity, f32)> + '_ {
    state
        .entities
        .iter()
        .filter(move |e| {
            e.kind.traits().effect == ContactEffect::Fatal
                && (e.lane - lane).abs() < COLLISION_LATERAL
                && e.z < state.player.depth + COLLISION_DEPTH
        })
        .map(move |e| (e, ticks_to_contact(state, e)))
        .filter(move |&(_, ticks)| ticks <= horizon)
}

/// A high hazard that would meet the player mid-jump
fn high_hazard_overhead(state: &GameState) -> bool {
    hazards_in_lane(state, state.player.lane, AIRTIME_TICKS)
        .any(|(e, _)| matches!(e.kind.traits().collision, CollisionRule::High { .. }))
}

/// Whether a grounded player could stand in `lane` for the lookahead
fn lane_is_clear(state: &GameState, lane: f32) -> bool {
    if lane.abs() > LANE_LIMIT {
        return false;
    }
    hazards_in_lane(state, lane, LOOKAHEAD_TICKS)
        .all(|(e, _)| matches!(e.kind.traits().collision, CollisionRule::High { .. }))
}

/// Move to a clear neighbouring lane, preferring the middle of the beach
fn sidestep(state: &GameState) -> Option<Intent> {
    let lane = state.player.lane;
    let order: [i8; 2] = if lane > 0.0 { [-1, 1] } else { [1, -1] };
    order
        .into_iter()
        .find(|&dir| lane_is_clear(state, lane + f32::from(dir) * LANE_WIDTH))
        .map(Intent::ShiftLane)
}

/// Drift one lane toward the nearest reachable chest
fn chase_chest(state: &GameState) -> Option<Intent> {
    let lane = state.player.lane;
    let chest = state
        .entities
        .iter()
        .filter(|e| e.kind == EntityKind::Chest && e.z < state.player.depth - COLLISION_DEPTH)
        .map(|e| (e, ticks_to_contact(state, e)))
        .filter(|&(_, ticks)| ticks <= LOOKAHEAD_TICKS)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))?
        .0;

    if (chest.lane - lane).abs() < COLLISION_LATERAL {
        return None;
    }
    let dir: i8 = if chest.lane > lane { 1 } else { -1 };
    let next = lane + f32::from(dir) * LANE_WIDTH;
    lane_is_clear(state, next).then_some(Intent::ShiftLane(dir))
}
