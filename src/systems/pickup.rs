//! Ruby pickup spawning.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::animation::{Actor, Animation, ClipKey};
use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::pickup::{
    PICKUP_GRAVITY, PICKUP_HORIZONTAL_SPEED, PICKUP_MAX_SPEED_X, PICKUP_SIZE, PICKUP_SPAWN_Y,
    Pickup,
};
use crate::components::rigidbody::RigidBody;
use crate::components::zindex::ZIndex;
use crate::resources::rng::GameRng;
use crate::resources::screensize::ScreenSize;

/// Ruby dropping from the top centre, drifting toward `direction` (`-1`/`1`).
pub fn pickup_bundle(anchor: Vec2, direction: i32) -> impl Bundle {
    (
        Pickup,
        MapPosition { pos: anchor },
        RigidBody::with_gravity(PICKUP_GRAVITY)
            .with_velocity(Vec2::new(direction as f32 * PICKUP_HORIZONTAL_SPEED, 0.0))
            .with_max_speed_x(PICKUP_MAX_SPEED_X),
        BoxCollider::new(PICKUP_SIZE, PICKUP_SIZE),
        Animation::new(ClipKey::looping(Actor::Pickup)),
        ZIndex::PICKUPS,
    )
}

/// Fixed spawn point of every pickup.
pub fn pickup_spawn_point(screen: &ScreenSize) -> Vec2 {
    Vec2::new(screen.half_width() as f32, PICKUP_SPAWN_Y)
}

pub fn spawn_pickup(commands: &mut Commands, screen: &ScreenSize, rng: &mut GameRng) -> Entity {
    commands
        .spawn(pickup_bundle(pickup_spawn_point(screen), rng.sign()))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_point_is_top_centre() {
        assert_eq!(
            pickup_spawn_point(&ScreenSize::new(1280, 736)),
            Vec2::new(640.0, 100.0)
        );
    }

    #[test]
    fn test_bundle_drifts_and_clamps() {
        let mut world = World::new();
        let e = world.spawn(pickup_bundle(Vec2::new(640.0, 100.0), -1)).id();
        let body = world.get::<RigidBody>(e).unwrap();
        assert_eq!(body.velocity, Vec2::new(-5.0, 0.0));
        assert_eq!(body.max_speed_x, Some(10.0));
        assert!(body.wrap_x);
    }
}
