//! Knight control: input edges, base movement clip and overlay clips.
//!
//! A playing tick touches the player in three places:
//!
//! 1. [`player_actions`] reacts to the jump and attack key-down edges.
//! 2. [`player_control`] sets the horizontal acceleration from the held
//!    direction keys and plays the run or idle clip.
//! 3. [`player_overlays`], after integration and collision, plays the jump
//!    and attack overlays on top and refreshes the pixel mask used for the
//!    next platform test.
//!
//! Any clip completing clears both overlay flags.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::animation::{Action, Actor, Animation, ClipKey, Facing};
use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::player::{
    ATTACK_SPEED, IDLE_SPEED, JUMP_SPEED, PLAYER_GRAVITY, PLAYER_HORIZONTAL_ACCELERATION,
    PLAYER_HORIZONTAL_FRICTION, PLAYER_JUMP_SPEED, PLAYER_SIZE, Player, RUN_SPEED,
};
use crate::components::rigidbody::RigidBody;
use crate::components::zindex::ZIndex;
use crate::events::audio::{AudioCmd, FX_JUMP, FX_SLASH};
use crate::resources::animationstore::AnimationStore;
use crate::resources::input::InputState;
use crate::resources::level::LevelGeometry;
use crate::systems::collision::touches_platform;
use crate::systems::projectile::projectile_bundle;

pub fn player_bundle(spawn: Vec2) -> impl Bundle {
    (
        Player::new(spawn),
        MapPosition { pos: spawn },
        RigidBody::with_gravity(PLAYER_GRAVITY).with_friction(PLAYER_HORIZONTAL_FRICTION),
        BoxCollider::new(PLAYER_SIZE, PLAYER_SIZE),
        Animation::new(ClipKey::new(Actor::Player, Action::Idle, Facing::Right)),
        ZIndex::PLAYER,
    )
}

/// Jump (only while touching a platform) and attack on key-down edges.
pub fn player_actions(
    mut commands: Commands,
    input: Res<InputState>,
    mut query: Query<(&MapPosition, &mut RigidBody, &BoxCollider, &mut Player)>,
    geometry: Res<LevelGeometry>,
    mut audio_cmd_writer: MessageWriter<AudioCmd>,
) {
    for (position, mut body, collider, mut player) in query.iter_mut() {
        let aabb = collider.aabb(position.pos);

        if input.jump.just_pressed && touches_platform(&geometry, &aabb) {
            body.velocity.y = -PLAYER_JUMP_SPEED;
            player.jumping = true;
            audio_cmd_writer.write(AudioCmd::fx(FX_JUMP));
        }

        if input.attack.just_pressed {
            let facing = Facing::from_velocity(body.velocity.x);
            commands.spawn(projectile_bundle(aabb.center(), facing));
            player.attacking = true;
            audio_cmd_writer.write(AudioCmd::fx(FX_SLASH));
            debug!("Slash {:?} from {:?}", facing, aabb.center());
        }
    }
}

/// Horizontal acceleration from the held keys, and the run / idle clip.
pub fn player_control(
    input: Res<InputState>,
    mut query: Query<(&mut RigidBody, &mut Animation, &mut Player)>,
    store: Res<AnimationStore>,
) {
    for (mut body, mut animation, mut player) in query.iter_mut() {
        body.acceleration = Vec2::new(0.0, PLAYER_GRAVITY);

        let (clip, speed) = if input.move_left.active {
            body.acceleration.x = -PLAYER_HORIZONTAL_ACCELERATION;
            (ClipKey::new(Actor::Player, Action::Run, Facing::Left), RUN_SPEED)
        } else if input.move_right.active {
            body.acceleration.x = PLAYER_HORIZONTAL_ACCELERATION;
            (ClipKey::new(Actor::Player, Action::Run, Facing::Right), RUN_SPEED)
        } else {
            let facing = Facing::from_velocity(body.velocity.x);
            (ClipKey::new(Actor::Player, Action::Idle, facing), IDLE_SPEED)
        };

        if animation.play(clip, store.len(&clip), speed) {
            player.jumping = false;
            player.attacking = false;
        }
    }
}

/// Jump and attack overlays, then the mask of the frame now showing.
pub fn player_overlays(
    mut query: Query<(&RigidBody, &mut Animation, &mut Player)>,
    store: Res<AnimationStore>,
) {
    for (body, mut animation, mut player) in query.iter_mut() {
        let facing = Facing::from_velocity(body.velocity.x);

        if player.jumping {
            let clip = ClipKey::new(Actor::Player, Action::Jump, facing);
            if animation.play(clip, store.len(&clip), JUMP_SPEED) {
                player.jumping = false;
                player.attacking = false;
            }
        }

        if player.attacking {
            let clip = ClipKey::new(Actor::Player, Action::Attack, facing);
            if animation.play(clip, store.len(&clip), ATTACK_SPEED) {
                player.jumping = false;
                player.attacking = false;
            }
        }

        if let Some(frame) = store.frame(&animation.clip, animation.index) {
            player.mask = frame.mask.clone();
        }
    }
}

/// Put the player back on its spawn point, at rest.
pub fn reset_player(position: &mut MapPosition, body: &mut RigidBody, player: &Player) {
    position.pos = player.spawn;
    body.velocity = Vec2::ZERO;
    body.acceleration = Vec2::new(0.0, PLAYER_GRAVITY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::projectile::Projectile;
    use crate::resources::level::{LevelGrid, TileMasks};

    /// Resting on the small platform under the spawn cell.
    const GROUNDED: Vec2 = Vec2::new(608.0, 581.0);

    fn setup() -> World {
        let mut world = World::new();
        let grid = LevelGrid::graveyard().unwrap();
        world.insert_resource(LevelGeometry::from_grid(&grid, &TileMasks::default()));
        world.insert_resource(AnimationStore::placeholder());
        world.insert_resource(InputState::default());
        world.init_resource::<Messages<AudioCmd>>();
        world
    }

    fn run_actions(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(player_actions);
        schedule.run(world);
    }

    fn drain(world: &mut World) -> Vec<AudioCmd> {
        world.resource_mut::<Messages<AudioCmd>>().drain().collect()
    }

    #[test]
    fn test_jump_when_grounded() {
        let mut world = setup();
        let e = world.spawn(player_bundle(GROUNDED)).id();
        world.resource_mut::<InputState>().jump.press();
        run_actions(&mut world);

        assert_eq!(world.get::<RigidBody>(e).unwrap().velocity.y, -PLAYER_JUMP_SPEED);
        assert!(world.get::<Player>(e).unwrap().jumping);
        assert_eq!(drain(&mut world), vec![AudioCmd::fx(FX_JUMP)]);
    }

    #[test]
    fn test_no_jump_in_mid_air() {
        let mut world = setup();
        let e = world.spawn(player_bundle(Vec2::new(608.0, 300.0))).id();
        world.resource_mut::<InputState>().jump.press();
        run_actions(&mut world);

        assert_eq!(world.get::<RigidBody>(e).unwrap().velocity.y, 0.0);
        assert!(!world.get::<Player>(e).unwrap().jumping);
        assert!(drain(&mut world).is_empty());
    }

    #[test]
    fn test_attack_spawns_projectile_facing_left_when_still() {
        let mut world = setup();
        world.spawn(player_bundle(GROUNDED));
        world.resource_mut::<InputState>().attack.press();
        run_actions(&mut world);

        let mut projectiles = world.query::<(&Projectile, &RigidBody)>();
        let (_, body) = projectiles.single(&world).unwrap();
        assert!(body.velocity.x < 0.0);
        assert_eq!(drain(&mut world), vec![AudioCmd::fx(FX_SLASH)]);
    }

    #[test]
    fn test_attack_facing_right_when_moving_right() {
        let mut world = setup();
        let e = world.spawn(player_bundle(GROUNDED)).id();
        world.get_mut::<RigidBody>(e).unwrap().velocity.x = 3.0;
        world.resource_mut::<InputState>().attack.press();
        run_actions(&mut world);

        let mut projectiles = world.query::<&RigidBody>();
        let speeds: Vec<f32> = projectiles
            .iter(&world)
            .map(|b| b.velocity.x)
            .filter(|vx| vx.abs() > 10.0)
            .collect();
        assert_eq!(speeds, vec![20.0]);
    }

    #[test]
    fn test_control_sets_acceleration_and_run_clip() {
        let mut world = setup();
        let e = world.spawn(player_bundle(GROUNDED)).id();
        world.resource_mut::<InputState>().move_left.press();
        let mut schedule = Schedule::default();
        schedule.add_systems(player_control);
        schedule.run(&mut world);

        let body = world.get::<RigidBody>(e).unwrap();
        assert_eq!(body.acceleration, Vec2::new(-2.0, PLAYER_GRAVITY));
        let anim = world.get::<Animation>(e).unwrap();
        assert_eq!(anim.clip, ClipKey::new(Actor::Player, Action::Run, Facing::Left));
        assert_eq!(anim.index, 0.5);
    }

    #[test]
    fn test_overlay_completion_clears_both_flags() {
        let mut world = setup();
        let e = world.spawn(player_bundle(GROUNDED)).id();
        {
            let mut player = world.get_mut::<Player>(e).unwrap();
            player.jumping = true;
            player.attacking = true;
        }
        // Cursor already on the last jump frame: the jump overlay completes.
        world.get_mut::<Animation>(e).unwrap().index = 9.0;
        let mut schedule = Schedule::default();
        schedule.add_systems(player_overlays);
        schedule.run(&mut world);

        let player = world.get::<Player>(e).unwrap();
        assert!(!player.jumping);
        assert!(!player.attacking);
        let anim = world.get::<Animation>(e).unwrap();
        assert_eq!(anim.clip.action, Action::Jump);
        assert_eq!(anim.index, 0.0);
    }

    #[test]
    fn test_reset_player_returns_to_spawn() {
        let mut position = MapPosition { pos: Vec2::new(1.0, 2.0) };
        let mut body = RigidBody::with_gravity(PLAYER_GRAVITY).with_velocity(Vec2::new(4.0, -3.0));
        body.acceleration.x = 2.0;
        let player = Player::new(GROUNDED);
        reset_player(&mut position, &mut body, &player);
        assert_eq!(position.pos, GROUNDED);
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(body.acceleration, Vec2::new(0.0, PLAYER_GRAVITY));
    }
}
