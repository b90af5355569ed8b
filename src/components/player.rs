//! Player-controlled knight.
//!
//! Movement sprite selection (idle / run) is driven each tick by horizontal
//! input and the sign of the velocity. Jump and attack are overlay flags set
//! by input edges; they stay raised until their clip completes.

use std::sync::Arc;

use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::resources::collisionmask::CollisionMask;

pub const PLAYER_SIZE: i32 = 64;
pub const PLAYER_HORIZONTAL_ACCELERATION: f32 = 2.0;
pub const PLAYER_HORIZONTAL_FRICTION: f32 = 0.15;
pub const PLAYER_GRAVITY: f32 = 0.8;
pub const PLAYER_JUMP_SPEED: f32 = 18.0;
pub const PLAYER_STARTING_HEALTH: i32 = 100;
/// How far the player's feet sink into a platform when landing.
pub const PLAYER_LANDING_OFFSET: f32 = 5.0;

pub const RUN_SPEED: f32 = 0.5;
pub const IDLE_SPEED: f32 = 0.5;
pub const JUMP_SPEED: f32 = 0.1;
pub const ATTACK_SPEED: f32 = 0.25;

#[derive(Component, Clone, Debug)]
pub struct Player {
    pub health: i32,
    pub jumping: bool,
    pub attacking: bool,
    /// Bottom-left anchor the player returns to between rounds.
    pub spawn: Vec2,
    /// Pixel mask of the frame shown at the end of the last tick.
    pub mask: Arc<CollisionMask>,
}

impl Player {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            health: PLAYER_STARTING_HEALTH,
            jumping: false,
            attacking: false,
            spawn,
            mask: Arc::new(CollisionMask::solid(PLAYER_SIZE, PLAYER_SIZE)),
        }
    }

    /// Take damage. Returns `true` once health is at or below zero.
    pub fn hurt(&mut self, amount: i32) -> bool {
        self.health -= amount;
        self.health <= 0
    }

    /// Heal, never above the starting health.
    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(PLAYER_STARTING_HEALTH);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Back to full health with no overlay running, for a fresh session.
    pub fn restore(&mut self) {
        self.health = PLAYER_STARTING_HEALTH;
        self.jumping = false;
        self.attacking = false;
    }
}
