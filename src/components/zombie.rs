//! Zombie enemy and its death / resurrection cycle.
//!
//! ```text
//! Alive --projectile--> Dying --death clip done--> Dead --timer--> Rising --rise clip done--> Alive
//! ```
//!
//! While `Dying`, `Dead` or `Rising` the zombie does not move and counts as
//! dead for the player: touching it kicks it out of play for good.

use bevy_ecs::prelude::Component;

use crate::components::animation::{Facing, ZombieKind};

pub const ZOMBIE_SIZE: i32 = 64;
pub const ZOMBIE_GRAVITY: f32 = 3.0;
pub const ZOMBIE_LANDING_OFFSET: f32 = 1.0;
/// Seconds a zombie lies on the ground before rising.
pub const ZOMBIE_RISE_TIME: u32 = 2;
pub const ZOMBIE_SPAWN_X_MIN: i32 = 100;
pub const ZOMBIE_SPAWN_X_MAX: i32 = 800;
pub const ZOMBIE_SPAWN_Y: f32 = -100.0;

pub const WALK_SPEED: f32 = 0.5;
pub const DIE_SPEED: f32 = 0.095;
pub const RISE_SPEED: f32 = 0.095;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZombieState {
    Alive,
    /// Playing the death clip.
    Dying,
    /// Frozen on the last death frame, counting ticks on the ground.
    Dead { ticks: u32 },
    /// Playing the rise clip.
    Rising,
}

#[derive(Component, Clone, Debug)]
pub struct Zombie {
    pub kind: ZombieKind,
    /// Horizontal direction fixed at spawn: `-1` left, `1` right.
    pub direction: i32,
    pub state: ZombieState,
}

impl Zombie {
    pub fn new(kind: ZombieKind, direction: i32) -> Self {
        Self {
            kind,
            direction: if direction < 0 { -1 } else { 1 },
            state: ZombieState::Alive,
        }
    }

    pub fn facing(&self) -> Facing {
        Facing::from_direction(self.direction)
    }

    pub fn is_dead(&self) -> bool {
        !matches!(self.state, ZombieState::Alive)
    }

    /// Projectile hit. Only a living zombie starts dying; returns whether it did.
    pub fn kill(&mut self) -> bool {
        if self.state == ZombieState::Alive {
            self.state = ZombieState::Dying;
            true
        } else {
            false
        }
    }
}
