//! Kinematic integration for every moving entity.
//!
//! Runs once per playing tick, before any collision correction. Bodies that
//! are frozen (dead zombies) keep their position and velocity.

use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::resources::screensize::ScreenSize;

pub fn movement_system(
    mut query: Query<(&mut MapPosition, &mut RigidBody)>,
    screen: Res<ScreenSize>,
) {
    let width = screen.w as f32;
    for (mut position, mut rigidbody) in query.iter_mut() {
        if rigidbody.frozen {
            continue;
        }
        rigidbody.integrate(&mut position.pos, width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(movement_system);
        schedule.run(world);
    }

    #[test]
    fn test_integrates_unfrozen_bodies() {
        let mut world = World::new();
        world.insert_resource(ScreenSize::new(1280, 736));
        let moving = world
            .spawn((
                MapPosition::new(100.0, 100.0),
                RigidBody::with_gravity(3.0).with_velocity(Vec2::new(4.0, 0.0)),
            ))
            .id();
        let mut frozen_body = RigidBody::with_gravity(3.0);
        frozen_body.freeze();
        let frozen = world
            .spawn((MapPosition::new(50.0, 50.0), frozen_body))
            .id();

        run(&mut world);

        let pos = world.get::<MapPosition>(moving).unwrap().pos;
        assert_eq!(pos, Vec2::new(104.0, 104.5));
        assert_eq!(world.get::<RigidBody>(moving).unwrap().velocity, Vec2::new(4.0, 3.0));
        assert_eq!(world.get::<MapPosition>(frozen).unwrap().pos, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_wraps_at_right_edge() {
        let mut world = World::new();
        world.insert_resource(ScreenSize::new(1280, 736));
        let e = world
            .spawn((
                MapPosition::new(1279.0, 0.0),
                RigidBody::new().with_velocity(Vec2::new(5.0, 0.0)),
            ))
            .id();
        run(&mut world);
        assert_eq!(world.get::<MapPosition>(e).unwrap().pos.x, 0.0);
    }
}
