//! Sword slash spawning and range expiry.

use bevy_ecs::prelude::*;
use glam::{IVec2, Vec2};

use crate::components::animation::{Action, Actor, Animation, ClipKey, Facing};
use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::projectile::{PROJECTILE_SIZE, PROJECTILE_SPEED, Projectile};
use crate::components::rigidbody::RigidBody;
use crate::components::zindex::ZIndex;

/// Slash centred on `center`, flying toward `facing`. It never wraps.
pub fn projectile_bundle(center: IVec2, facing: Facing) -> impl Bundle {
    let half = PROJECTILE_SIZE / 2;
    let anchor = Vec2::new((center.x - half) as f32, (center.y + half) as f32);
    let speed = match facing {
        Facing::Right => PROJECTILE_SPEED,
        Facing::Left => -PROJECTILE_SPEED,
    };
    (
        Projectile { start_x: anchor.x },
        MapPosition { pos: anchor },
        RigidBody::new()
            .with_velocity(Vec2::new(speed, 0.0))
            .without_wrap(),
        BoxCollider::new(PROJECTILE_SIZE, PROJECTILE_SIZE),
        Animation::new(ClipKey::new(Actor::Projectile, Action::Loop, facing)),
        ZIndex::PROJECTILES,
    )
}

/// Remove slashes that travelled past their range.
pub fn projectile_range(
    mut commands: Commands,
    query: Query<(Entity, &MapPosition, &Projectile)>,
) {
    for (entity, position, projectile) in query.iter() {
        if projectile.out_of_range(position.pos.x) {
            commands.entity(entity).try_despawn();
        }
    }
}
