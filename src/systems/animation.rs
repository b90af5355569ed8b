//! Looping animation systems for entities without their own state machine.
//!
//! Player and zombie clips are driven by their behavior systems because clip
//! completion feeds back into their state. Decorations and pickups simply
//! loop their single clip every tick.
//!
//! # Related
//!
//! - [`crate::components::animation::Animation`] – per-entity playback cursor
//! - [`crate::resources::animationstore::AnimationStore`] – clip table

use bevy_ecs::prelude::*;

use crate::components::animation::Animation;
use crate::components::decoration::Decoration;
use crate::components::pickup::{PICKUP_SPIN_SPEED, Pickup};
use crate::resources::animationstore::AnimationStore;

/// Advance portal and spawner visuals at their own speed.
pub fn animate_decorations(
    mut query: Query<(&mut Animation, &Decoration)>,
    store: Res<AnimationStore>,
) {
    for (mut anim, decoration) in query.iter_mut() {
        let len = store.len(&anim.clip);
        anim.advance(len, decoration.speed);
    }
}

/// Spin pickups. Runs before integration.
pub fn animate_pickups(mut query: Query<&mut Animation, With<Pickup>>, store: Res<AnimationStore>) {
    for mut anim in query.iter_mut() {
        let len = store.len(&anim.clip);
        anim.advance(len, PICKUP_SPIN_SPEED);
    }
}
