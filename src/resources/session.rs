//! Round and scoring state of the running session.
//!
//! Created once at startup and never removed. The session systems mutate it
//! every playing tick; it is advanced on round completion and reset to its
//! initial values on game over.

use bevy_ecs::prelude::Resource;

pub const STARTING_ROUND_TIME: u32 = 30;
pub const STARTING_SPAWN_CADENCE: u32 = 5;
pub const MIN_SPAWN_CADENCE: u32 = 1;

pub const KICK_SCORE: u32 = 25;
pub const PICKUP_SCORE: u32 = 100;
pub const PICKUP_HEAL: i32 = 10;
pub const ZOMBIE_DAMAGE: i32 = 20;
pub const KNOCKBACK_DISTANCE: f32 = 256.0;

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub score: u32,
    /// Night number, starting at 1.
    pub round: u32,
    /// Seconds until sunrise. Never negative.
    pub round_time: u32,
    /// A zombie spawns on every whole second divisible by this.
    pub spawn_cadence: u32,
    /// Ticks since the last whole second.
    pub frame_count: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            score: 0,
            round: 1,
            round_time: STARTING_ROUND_TIME,
            spawn_cadence: STARTING_SPAWN_CADENCE,
            frame_count: 0,
        }
    }

    /// Count one tick. Returns `true` when a whole second just elapsed, in
    /// which case the countdown has been decremented and the frame counter
    /// cleared.
    pub fn tick(&mut self, ticks_per_second: u32) -> bool {
        self.frame_count += 1;
        if self.frame_count % ticks_per_second.max(1) == 0 {
            self.round_time = self.round_time.saturating_sub(1);
            self.frame_count = 0;
            true
        } else {
            false
        }
    }

    /// A zombie is due on a whole-second boundary whose countdown is a
    /// multiple of the cadence.
    pub fn spawn_due(&self) -> bool {
        self.frame_count == 0 && self.round_time % self.spawn_cadence.max(1) == 0
    }

    pub fn round_over(&self) -> bool {
        self.round_time == 0
    }

    /// Advance to the next night: one more round, faster spawns, full clock.
    pub fn next_round(&mut self) {
        self.round += 1;
        self.spawn_cadence = self.spawn_cadence.saturating_sub(1).max(MIN_SPAWN_CADENCE);
        self.round_time = STARTING_ROUND_TIME;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Inclusive speed range of zombies spawned this round.
    pub fn zombie_speed_range(&self) -> (i32, i32) {
        let round = self.round as i32;
        (round, 5 + round)
    }
}
