//! The runner: lane, depth and jump/duck physics

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Lateral position, one unit per lane, within [-LANE_LIMIT, LANE_LIMIT]
    pub lane: f32,
    /// Forward/back offset (free-roam only), within [-DEPTH_LIMIT, DEPTH_LIMIT]
    pub depth: f32,
    /// Feet height above the sand, never negative
    pub height: f32,
    pub vertical_velocity: f32,
    /// Duck key held
    pub ducking: bool,
    /// Remaining time of a touch duck
    #[serde(default)]
    pub duck_timer: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            lane: 0.0,
            depth: 0.0,
            height: 0.0,
            vertical_velocity: 0.0,
            ducking: false,
            duck_timer: 0.0,
        }
    }
}

impl Player {
    /// Shift one lane left (negative) or right (positive); false if clamped
    pub fn shift_lane(&mut self, dir: i8) -> bool {
        let target = (self.lane + f32::from(dir.signum()) * LANE_WIDTH).clamp(-LANE_LIMIT, LANE_LIMIT);
        let moved = target != self.lane;
        self.lane = target;
        moved
    }

    /// Step forward (negative) or back (positive); false if clamped
    pub fn shift_depth(&mut self, dir: i8) -> bool {
        let target = (self.depth + f32::from(dir.signum()) * DEPTH_STEP).clamp(-DEPTH_LIMIT, DEPTH_LIMIT);
        let moved = target != self.depth;
        self.depth = target;
        moved
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.height <= 0.0 && self.vertical_velocity <= 0.0
    }

    #[inline]
    pub fn is_ducking(&self) -> bool {
        self.ducking || self.duck_timer > 0.0
    }

    /// Start a jump; only allowed from the ground
    pub fn jump(&mut self, velocity: f32) -> bool {
        if !self.is_grounded() {
            return false;
        }
        self.vertical_velocity = velocity;
        self.duck_timer = 0.0;
        true
    }

    pub fn set_ducking(&mut self, ducking: bool) {
        self.ducking = ducking;
    }

    /// Duck for a fixed time (touch gesture has no key-up)
    pub fn duck_for(&mut self, secs: f32) {
        self.duck_timer = self.duck_timer.max(secs);
    }

    /// Integrate vertical motion over `dt` seconds
    pub fn integrate(&mut self, dt: f32, tuning: &Tuning) {
        if self.duck_timer > 0.0 {
            self.duck_timer = (self.duck_timer - dt).max(0.0);
        }

        if self.is_grounded() {
            self.height = 0.0;
            self.vertical_velocity = 0.0;
            return;
        }

        let gravity = if self.is_ducking() {
            tuning.gravity * tuning.fast_fall_multiplier
        } else {
            tuning.gravity
        };
        self.vertical_velocity -= gravity * dt;
        self.height += self.vertical_velocity * dt;

        // Sand is a hard floor
        if self.height <= 0.0 {
            self.height = 0.0;
            self.vertical_velocity = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_shift_clamps() {
        let mut player = Player::default();
        assert!(player.shift_lane(1));
        assert!(player.shift_lane(1));
        assert!(!player.shift_lane(1));
        assert_eq!(player.lane, LANE_LIMIT);
        for _ in 0..10 {
            player.shift_lane(-1);
        }
        assert_eq!(player.lane, -LANE_LIMIT);
    }

    #[test]
    fn test_depth_shift_clamps() {
        let mut player = Player::default();
        for _ in 0..5 {
            player.shift_depth(-1);
        }
        assert_eq!(player.depth, -DEPTH_LIMIT);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        assert!(player.jump(tuning.jump_velocity));
        assert!(!player.jump(tuning.jump_velocity));
        player.integrate(SIM_DT, &tuning);
        assert!(player.height > 0.0);
        assert!(!player.jump(tuning.jump_velocity));
    }

    #[test]
    fn test_jump_arc_lands_on_floor() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        player.jump(tuning.jump_velocity);

        let mut apex: f32 = 0.0;
        for _ in 0..120 {
            player.integrate(SIM_DT, &tuning);
            assert!(player.height >= 0.0);
            apex = apex.max(player.height);
        }
        assert!(apex > 1.0, "apex {apex}");
        assert_eq!(player.height, 0.0);
        assert_eq!(player.vertical_velocity, 0.0);
        assert!(player.is_grounded());
    }

    #[test]
    fn test_ducking_falls_faster() {
        let tuning = Tuning::default();
        let mut normal = Player::default();
        let mut ducked = Player::default();
        normal.jump(tuning.jump_velocity);
        ducked.jump(tuning.jump_velocity);
        for _ in 0..10 {
            normal.integrate(SIM_DT, &tuning);
            ducked.integrate(SIM_DT, &tuning);
        }
        ducked.set_ducking(true);
        normal.integrate(SIM_DT, &tuning);
        ducked.integrate(SIM_DT, &tuning);
        assert!(ducked.height < normal.height);
    }

    #[test]
    fn test_duck_timer_expires() {
        let tuning = Tuning::default();
        let mut player = Player::default();
        player.duck_for(0.1);
        assert!(player.is_ducking());
        for _ in 0..10 {
            player.integrate(SIM_DT, &tuning);
        }
        assert!(!player.is_ducking());
    }
}
