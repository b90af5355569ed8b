//! Draw layer component.
//!
//! The renderer sorts sprites by [`ZIndex`] so the frame is painted in a
//! fixed order: tiles, portals, player, projectiles, zombies, pickups.

use bevy_ecs::prelude::Component;

/// Rendering order hint. Higher values are drawn later (on top).
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);

impl ZIndex {
    pub const TILES: ZIndex = ZIndex(0);
    pub const PORTALS: ZIndex = ZIndex(1);
    pub const PLAYER: ZIndex = ZIndex(2);
    pub const PROJECTILES: ZIndex = ZIndex(3);
    pub const ZOMBIES: ZIndex = ZIndex(4);
    pub const PICKUPS: ZIndex = ZIndex(5);
}
