//! Ruby pickup dropped when a dead zombie is kicked.

use bevy_ecs::prelude::Component;

pub const PICKUP_SIZE: i32 = 64;
pub const PICKUP_GRAVITY: f32 = 3.0;
pub const PICKUP_HORIZONTAL_SPEED: f32 = 5.0;
pub const PICKUP_MAX_SPEED_X: f32 = 10.0;
pub const PICKUP_LANDING_OFFSET: f32 = 1.0;
pub const PICKUP_SPIN_SPEED: f32 = 0.25;
/// Spawn point bottom-left y; x is the screen centre.
pub const PICKUP_SPAWN_Y: f32 = 100.0;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Pickup;
