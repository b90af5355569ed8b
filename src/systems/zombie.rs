//! Zombie spawning, walking and the death / resurrection cycle.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::animation::{Action, Actor, Animation, ClipKey, ZombieKind};
use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::zindex::ZIndex;
use crate::components::zombie::{
    DIE_SPEED, RISE_SPEED, WALK_SPEED, ZOMBIE_GRAVITY, ZOMBIE_RISE_TIME, ZOMBIE_SIZE,
    ZOMBIE_SPAWN_Y, Zombie, ZombieState,
};
use crate::resources::animationstore::AnimationStore;
use crate::resources::worldtime::WorldTime;

/// Zombie dropping in at `x`, drifting at a constant `speed` toward `direction`.
pub fn zombie_bundle(kind: ZombieKind, direction: i32, speed: i32, x: i32) -> impl Bundle {
    let zombie = Zombie::new(kind, direction);
    let velocity = Vec2::new((zombie.direction * speed) as f32, 0.0);
    let clip = ClipKey::new(Actor::Zombie(kind), Action::Walk, zombie.facing());
    (
        zombie,
        MapPosition::new(x as f32, ZOMBIE_SPAWN_Y),
        RigidBody::with_gravity(ZOMBIE_GRAVITY).with_velocity(velocity),
        BoxCollider::new(ZOMBIE_SIZE, ZOMBIE_SIZE),
        Animation::new(clip),
        ZIndex::ZOMBIES,
    )
}

/// Living zombies walk; any other state holds the body still.
///
/// Runs before integration so a zombie killed this tick stops at once.
pub fn zombie_motion(mut query: Query<(&Zombie, &mut RigidBody)>) {
    for (zombie, mut body) in query.iter_mut() {
        if zombie.is_dead() {
            body.freeze();
        } else {
            body.unfreeze();
        }
    }
}

/// Advance each zombie's clip and its lifecycle.
///
/// ```text
/// Alive   walk clip loops
/// Dying   death clip; on completion freeze on its last frame -> Dead
/// Dead    count ticks; after the rise time restart the cursor -> Rising
/// Rising  rise clip; on completion -> Alive
/// ```
pub fn zombie_animation(
    mut query: Query<(&mut Zombie, &mut Animation)>,
    store: Res<AnimationStore>,
    time: Res<WorldTime>,
) {
    let rise_ticks = ZOMBIE_RISE_TIME * time.ticks_per_second;
    for (mut zombie, mut animation) in query.iter_mut() {
        let actor = Actor::Zombie(zombie.kind);
        let facing = zombie.facing();
        match zombie.state {
            ZombieState::Alive => {
                let clip = ClipKey::new(actor, Action::Walk, facing);
                animation.play(clip, store.len(&clip), WALK_SPEED);
            }
            ZombieState::Dying => {
                let clip = ClipKey::new(actor, Action::Die, facing);
                let len = store.len(&clip);
                if animation.play(clip, len, DIE_SPEED) {
                    animation.freeze_on_last(len);
                    zombie.state = ZombieState::Dead { ticks: 0 };
                }
            }
            ZombieState::Dead { ticks } => {
                let ticks = ticks + 1;
                if ticks >= rise_ticks {
                    animation.clip = ClipKey::new(actor, Action::Rise, facing);
                    animation.restart();
                    zombie.state = ZombieState::Rising;
                    debug!("Zombie rising");
                } else {
                    zombie.state = ZombieState::Dead { ticks };
                }
            }
            ZombieState::Rising => {
                let clip = ClipKey::new(actor, Action::Rise, facing);
                if animation.play(clip, store.len(&clip), RISE_SPEED) {
                    zombie.state = ZombieState::Alive;
                }
            }
        }
    }
}
