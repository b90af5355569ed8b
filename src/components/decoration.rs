//! Animated level decorations: portal swirls and the ruby spawner.
//!
//! These entities only animate and draw. Portal collision uses the static
//! portal set in [`LevelGeometry`](crate::resources::level::LevelGeometry).

use bevy_ecs::prelude::Component;

pub const PORTAL_SIZE: i32 = 72;
pub const PORTAL_SPIN_SPEED: f32 = 0.2;
pub const SPAWNER_SIZE: i32 = 64;
pub const SPAWNER_SPIN_SPEED: f32 = 0.25;

/// Looping animation speed for a decoration.
#[derive(Component, Clone, Copy, Debug)]
pub struct Decoration {
    pub speed: f32,
}

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct PortalVisual;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct SpawnerVisual;
