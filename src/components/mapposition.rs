//! World-space position component.
//!
//! Every sprite in the game is anchored at its bottom-left corner, so
//! [`MapPosition::pos`] is the pixel where the sprite's left edge meets its
//! floor. Colliders and draw rectangles are derived from this anchor.

use bevy_ecs::prelude::Component;
use glam::Vec2;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }
}
