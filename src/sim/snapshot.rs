//! Read-only view handed to the presentation layer each frame

use glam::Vec3;
use serde::Serialize;

use super::kinds::EntityKind;
use super::state::{GamePhase, GameState};
use crate::lane_to_x;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub position: Vec3,
    pub ducking: bool,
    pub airborne: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    pub id: u32,
    pub kind: EntityKind,
    pub position: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub frame: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    pub scroll_offset: f32,
    pub speed: f32,
    pub player: PlayerView,
    pub entities: Vec<EntityView>,
}

impl GameState {
    pub fn snapshot(&self, high_score: u64) -> RenderSnapshot {
        let player = &self.player;
        RenderSnapshot {
            frame: self.frame,
            phase: self.phase,
            score: self.score,
            high_score,
            scroll_offset: self.clock.offset(),
            speed: self.difficulty.speed,
            player: PlayerView {
                position: Vec3::new(lane_to_x(player.lane), player.height, player.depth),
                ducking: player.is_ducking(),
                airborne: !player.is_grounded(),
            },
            entities: self
                .entities
                .iter()
                .map(|e| EntityView {
                    id: e.id,
                    kind: e.kind,
                    position: Vec3::new(lane_to_x(e.lane), e.kind.traits().render_height, e.z),
                })
                .collect(),
        }
    }
}
