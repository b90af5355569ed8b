//! Sword slash launched by the player.

use bevy_ecs::prelude::Component;

pub const PROJECTILE_SIZE: i32 = 32;
pub const PROJECTILE_SPEED: f32 = 20.0;
/// Horizontal distance after which a projectile removes itself.
pub const PROJECTILE_RANGE: f32 = 500.0;

#[derive(Component, Clone, Copy, Debug)]
pub struct Projectile {
    /// Anchor x at launch.
    pub start_x: f32,
}

impl Projectile {
    pub fn out_of_range(&self, x: f32) -> bool {
        (x - self.start_x).abs() > PROJECTILE_RANGE
    }
}
