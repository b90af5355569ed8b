//! Whole-game integration tests: the real world and schedule, ticked frame by frame.

use bevy_ecs::prelude::*;
use glam::{IVec2, Vec2};

use zombieknight::components::animation::{Facing, ZombieKind};
use zombieknight::components::mapposition::MapPosition;
use zombieknight::components::pickup::Pickup;
use zombieknight::components::player::Player;
use zombieknight::components::projectile::Projectile;
use zombieknight::components::rigidbody::RigidBody;
use zombieknight::components::zombie::{Zombie, ZombieState};
use zombieknight::events::audio::{AudioCmd, MUSIC_LEVEL};
use zombieknight::game::{build_default_world, build_schedule, is_quitting, tick};
use zombieknight::resources::gameconfig::GameConfig;
use zombieknight::resources::gamestate::{GameState, GameStates};
use zombieknight::resources::input::InputState;
use zombieknight::resources::level::LevelGeometry;
use zombieknight::resources::renderqueue::RenderQueue;
use zombieknight::resources::session::Session;
use zombieknight::systems::pickup::pickup_bundle;
use zombieknight::systems::projectile::projectile_bundle;
use zombieknight::systems::zombie::zombie_bundle;

/// Resting on the small platform under the spawn cell.
const GROUNDED: Vec2 = Vec2::new(608.0, 581.0);

fn make_game() -> (World, Schedule) {
    let config = GameConfig {
        seed: Some(42),
        ..GameConfig::new()
    };
    let world = build_default_world(config).unwrap();
    (world, build_schedule())
}

fn state(world: &World) -> GameStates {
    world.resource::<GameState>().get().clone()
}

fn drain_audio(world: &mut World) -> Vec<AudioCmd> {
    world.resource_mut::<Messages<AudioCmd>>().drain().collect()
}

fn player_entity(world: &mut World) -> Entity {
    let mut query = world.query_filtered::<Entity, With<Player>>();
    query.single(world).unwrap()
}

fn count<F: bevy_ecs::query::QueryFilter>(world: &mut World) -> usize {
    world.query_filtered::<Entity, F>().iter(world).count()
}

/// Confirm the current overlay: one tick with the key down, then release it.
fn confirm(world: &mut World, schedule: &mut Schedule) {
    world.resource_mut::<InputState>().confirm.press();
    tick(world, schedule);
    world.resource_mut::<InputState>().confirm.update(false);
}

/// Leave the title screen and park the knight on the spawn platform.
fn start_playing(world: &mut World, schedule: &mut Schedule) -> Entity {
    confirm(world, schedule);
    assert_eq!(state(world), GameStates::Playing);
    drain_audio(world);
    let player = player_entity(world);
    world.get_mut::<MapPosition>(player).unwrap().pos = GROUNDED;
    world.get_mut::<RigidBody>(player).unwrap().velocity = Vec2::ZERO;
    player
}

fn spawn_zombie_at(world: &mut World, pos: Vec2, speed: i32) -> Entity {
    let e = world.spawn(zombie_bundle(ZombieKind::Boy, 1, speed, 0)).id();
    world.get_mut::<MapPosition>(e).unwrap().pos = pos;
    e
}

#[test]
fn test_title_waits_for_confirm_then_starts_music() {
    let (mut world, mut schedule) = make_game();
    for _ in 0..10 {
        tick(&mut world, &mut schedule);
    }
    assert_eq!(state(&world), GameStates::Title);
    assert_eq!(
        world.resource::<RenderQueue>().texts(),
        vec!["Zombie Knight", "Press 'Enter' to Begin"]
    );

    confirm(&mut world, &mut schedule);
    assert_eq!(state(&world), GameStates::Playing);
    assert_eq!(drain_audio(&mut world), vec![AudioCmd::play_level_music()]);
    assert!(world.resource::<RenderQueue>().texts().contains(&"Sunrise In: 30"));
}

#[test]
fn test_pause_freezes_simulation() {
    let (mut world, mut schedule) = make_game();
    let zombie = spawn_zombie_at(&mut world, Vec2::new(300.0, 200.0), 3);
    world.resource_mut::<InputState>().move_left.press();
    for _ in 0..30 {
        tick(&mut world, &mut schedule);
    }
    assert_eq!(world.get::<MapPosition>(zombie).unwrap().pos, Vec2::new(300.0, 200.0));
    assert_eq!(*world.resource::<Session>(), Session::new());
    // Only the press edge is discarded; the key still reads as held.
    let input = world.resource::<InputState>();
    assert!(!input.move_left.just_pressed);
    assert!(input.move_left.active);
}

#[test]
fn test_kicking_a_dead_zombie() {
    let (mut world, mut schedule) = make_game();
    let player = start_playing(&mut world, &mut schedule);
    let zombie = spawn_zombie_at(&mut world, GROUNDED, 0);
    world.get_mut::<Zombie>(zombie).unwrap().state = ZombieState::Dead { ticks: 0 };

    tick(&mut world, &mut schedule);

    assert_eq!(world.resource::<Session>().score, 25);
    assert!(world.get_entity(zombie).is_err());
    assert_eq!(world.get::<Player>(player).unwrap().health, 100);
    let mut pickups = world.query_filtered::<&MapPosition, With<Pickup>>();
    let positions: Vec<Vec2> = pickups.iter(&world).map(|p| p.pos).collect();
    assert_eq!(positions, vec![Vec2::new(640.0, 100.0)]);
    assert!(drain_audio(&mut world).contains(&AudioCmd::fx("zombie_kick")));
}

#[test]
fn test_living_zombie_hurts_and_knocks_back() {
    let (mut world, mut schedule) = make_game();
    let player = start_playing(&mut world, &mut schedule);
    spawn_zombie_at(&mut world, GROUNDED, 0);

    tick(&mut world, &mut schedule);

    assert_eq!(world.get::<Player>(player).unwrap().health, 80);
    // Zombie walks right, so the knight is thrown left.
    assert_eq!(world.get::<MapPosition>(player).unwrap().pos.x, GROUNDED.x - 256.0);
    assert_eq!(world.resource::<Session>().score, 0);
}

#[test]
fn test_collecting_a_pickup_heals_up_to_the_cap() {
    let (mut world, mut schedule) = make_game();
    let player = start_playing(&mut world, &mut schedule);
    world.get_mut::<Player>(player).unwrap().health = 95;
    world.spawn(pickup_bundle(GROUNDED, 1));

    tick(&mut world, &mut schedule);

    assert_eq!(world.resource::<Session>().score, 100);
    assert_eq!(world.get::<Player>(player).unwrap().health, 100);
    assert_eq!(count::<With<Pickup>>(&mut world), 0);
}

#[test]
fn test_projectile_kills_and_is_consumed() {
    let (mut world, mut schedule) = make_game();
    start_playing(&mut world, &mut schedule);
    let zombie = spawn_zombie_at(&mut world, Vec2::new(300.0, 400.0), 0);
    // Still inside the zombie's box after one step.
    world.spawn(projectile_bundle(IVec2::new(312, 368), Facing::Right));

    tick(&mut world, &mut schedule);

    assert_eq!(world.get::<Zombie>(zombie).unwrap().state, ZombieState::Dying);
    assert_eq!(count::<With<Projectile>>(&mut world), 0);
}

#[test]
fn test_round_completion_prepares_next_night() {
    let (mut world, mut schedule) = make_game();
    let player = start_playing(&mut world, &mut schedule);
    {
        let mut session = world.resource_mut::<Session>();
        session.round_time = 1;
        session.frame_count = 59;
    }
    spawn_zombie_at(&mut world, Vec2::new(200.0, 200.0), 2);
    world.spawn(pickup_bundle(Vec2::new(900.0, 200.0), -1));

    tick(&mut world, &mut schedule);

    assert_eq!(state(&world), GameStates::RoundComplete);
    let session = world.resource::<Session>().clone();
    assert_eq!(session.round, 2);
    assert_eq!(session.spawn_cadence, 4);
    assert_eq!(session.round_time, 30);
    assert_eq!(count::<Or<(With<Zombie>, With<Pickup>, With<Projectile>)>>(&mut world), 0);
    let spawn = world.resource::<LevelGeometry>().player_spawn;
    assert_eq!(world.get::<MapPosition>(player).unwrap().pos, spawn);
    assert!(drain_audio(&mut world).contains(&AudioCmd::PauseMusic {
        id: MUSIC_LEVEL.to_string()
    }));
    assert_eq!(
        world.resource::<RenderQueue>().texts(),
        vec!["You survived the night!", "Press 'Enter' to continue..."]
    );

    confirm(&mut world, &mut schedule);
    assert_eq!(state(&world), GameStates::Playing);
    assert_eq!(
        drain_audio(&mut world),
        vec![AudioCmd::ResumeMusic {
            id: MUSIC_LEVEL.to_string()
        }]
    );
}

#[test]
fn test_keys_held_through_round_end_are_not_fresh_presses() {
    let (mut world, mut schedule) = make_game();
    start_playing(&mut world, &mut schedule);
    {
        let mut input = world.resource_mut::<InputState>();
        input.confirm.update(true);
        input.attack.update(true);
    }
    tick(&mut world, &mut schedule);
    // The attack edge fired on that first tick; clear what it left behind.
    drain_audio(&mut world);
    let slashes: Vec<Entity> = world
        .query_filtered::<Entity, With<Projectile>>()
        .iter(&world)
        .collect();
    for slash in slashes {
        world.despawn(slash);
    }
    {
        let mut session = world.resource_mut::<Session>();
        session.round_time = 1;
        session.frame_count = 59;
    }

    for _ in 0..4 {
        {
            let mut input = world.resource_mut::<InputState>();
            input.confirm.update(true);
            input.attack.update(true);
        }
        tick(&mut world, &mut schedule);
    }
    assert_eq!(state(&world), GameStates::RoundComplete);

    // A fresh confirm resumes; attack is still held and does not slash.
    world.resource_mut::<InputState>().confirm.update(false);
    tick(&mut world, &mut schedule);
    confirm(&mut world, &mut schedule);
    assert_eq!(state(&world), GameStates::Playing);
    for _ in 0..3 {
        world.resource_mut::<InputState>().attack.update(true);
        tick(&mut world, &mut schedule);
    }
    assert_eq!(count::<With<Projectile>>(&mut world), 0);
    assert!(!drain_audio(&mut world).contains(&AudioCmd::fx("slash")));
}

#[test]
fn test_death_resets_the_session() {
    let (mut world, mut schedule) = make_game();
    let player = start_playing(&mut world, &mut schedule);
    world.get_mut::<Player>(player).unwrap().health = 20;
    world.resource_mut::<Session>().score = 150;
    spawn_zombie_at(&mut world, GROUNDED, 0);

    tick(&mut world, &mut schedule);

    assert_eq!(state(&world), GameStates::GameOver { final_score: 150 });
    assert_eq!(*world.resource::<Session>(), Session::new());
    assert_eq!(world.get::<Player>(player).unwrap().health, 100);
    assert_eq!(count::<With<Zombie>>(&mut world), 0);
    assert_eq!(
        world.resource::<RenderQueue>().texts(),
        vec!["Game Over! Final Score: 150", "Press 'Enter' to play again..."]
    );

    drain_audio(&mut world);
    confirm(&mut world, &mut schedule);
    assert_eq!(state(&world), GameStates::Playing);
    assert_eq!(drain_audio(&mut world), vec![AudioCmd::play_level_music()]);
}

#[test]
fn test_quit_is_honoured_during_a_pause() {
    let (mut world, mut schedule) = make_game();
    world.resource_mut::<InputState>().quit.press();
    tick(&mut world, &mut schedule);
    assert!(is_quitting(&world));
    assert_eq!(
        drain_audio(&mut world),
        vec![AudioCmd::StopMusic {
            id: MUSIC_LEVEL.to_string()
        }]
    );
}

#[test]
fn test_first_zombie_arrives_five_seconds_in() {
    let (mut world, mut schedule) = make_game();
    start_playing(&mut world, &mut schedule);
    // The confirming tick was the first playing tick.
    for _ in 0..298 {
        tick(&mut world, &mut schedule);
    }
    assert_eq!(count::<With<Zombie>>(&mut world), 0);
    tick(&mut world, &mut schedule);
    assert_eq!(world.resource::<Session>().round_time, 25);
    assert_eq!(count::<With<Zombie>>(&mut world), 1);

    let mut zombies = world.query::<(&Zombie, &RigidBody)>();
    let (_, body) = zombies.single(&world).unwrap();
    assert!((1.0..=6.0).contains(&body.velocity.x.abs()));
}
