//! World construction and the per-frame schedule.
//!
//! [`build_world`] inserts every resource the systems read and spawns the
//! entities that live for the whole session: the knight, the portal swirls
//! and the ruby spawner decorations. [`build_schedule`] orders the systems
//! of one frame; [`tick`] runs it once.
//!
//! # Frame order
//!
//! ```text
//! state input -> pending transition
//!   [playing only]
//!   player actions -> player control -> zombie motion -> looping clips
//!   -> integration -> platform / portal collisions
//!   -> player overlays, zombie lifecycle, projectile range
//!   -> clock, contacts, spawning, round end, game over -> world time
//! pending transition -> render queue -> audio forwarding
//! ```

use bevy_ecs::prelude::*;
use log::info;

use crate::components::animation::{Actor, Animation, ClipKey};
use crate::components::boxcollider::BoxCollider;
use crate::components::decoration::{
    Decoration, PORTAL_SIZE, PORTAL_SPIN_SPEED, PortalVisual, SPAWNER_SIZE, SPAWNER_SPIN_SPEED,
    SpawnerVisual,
};
use crate::components::mapposition::MapPosition;
use crate::components::zindex::ZIndex;
use crate::events::audio::{AudioCmd, AudioMessage};
use crate::events::gamestate::observe_gamestate_change_event;
use crate::resources::animationstore::AnimationStore;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::input::InputState;
use crate::resources::level::{LevelError, LevelGeometry, LevelGrid, TileMasks};
use crate::resources::renderqueue::RenderQueue;
use crate::resources::rng::GameRng;
use crate::resources::screensize::ScreenSize;
use crate::resources::session::Session;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::{animate_decorations, animate_pickups};
use crate::systems::audio::{
    forward_audio_cmds, log_audio_messages, poll_audio_messages, update_bevy_audio_cmds,
    update_bevy_audio_messages,
};
use crate::systems::collision::{body_platform_collision, player_platform_collision, portal_collision};
use crate::systems::gamestate::{check_pending_state, handle_state_input, state_is_playing};
use crate::systems::movement::movement_system;
use crate::systems::player::{player_actions, player_bundle, player_control, player_overlays};
use crate::systems::projectile::projectile_range;
use crate::systems::render::build_render_queue;
use crate::systems::session::{
    check_game_over, check_round_completion, player_pickup_contacts, player_zombie_contacts,
    projectile_hits, session_clock, spawn_zombies,
};
use crate::systems::time::advance_world_time;
use crate::systems::zombie::{zombie_animation, zombie_motion};

/// World for `grid` with solid tile masks and placeholder clips.
pub fn build_world(config: GameConfig, grid: &LevelGrid) -> World {
    build_world_with_assets(config, grid, &TileMasks::default(), AnimationStore::placeholder())
}

/// World for the built-in graveyard level.
pub fn build_default_world(config: GameConfig) -> Result<World, LevelError> {
    Ok(build_world(config, &LevelGrid::graveyard()?))
}

/// World for `grid` using decoded tile masks and clips.
pub fn build_world_with_assets(
    config: GameConfig,
    grid: &LevelGrid,
    masks: &TileMasks,
    store: AnimationStore,
) -> World {
    let mut world = World::new();

    let geometry = LevelGeometry::from_grid(grid, masks);
    let mut rng = GameRng::from_seed(config.seed);
    let (width, height) = config.window_size();
    let screen = ScreenSize::new(width as i32, height as i32);

    world.spawn(player_bundle(geometry.player_spawn));

    for portal in &geometry.portals {
        let clip = ClipKey::looping(Actor::Portal(portal.color));
        let start = rng.range(0, store.len(&clip) as i32 - 1);
        world.spawn((
            PortalVisual,
            Decoration {
                speed: PORTAL_SPIN_SPEED,
            },
            MapPosition::new(portal.aabb.left() as f32, portal.aabb.bottom() as f32),
            BoxCollider::new(PORTAL_SIZE, PORTAL_SIZE),
            Animation::new(clip).with_index(start as f32),
            ZIndex::PORTALS,
        ));
    }

    for anchor in &geometry.spawners {
        world.spawn((
            SpawnerVisual,
            Decoration {
                speed: SPAWNER_SPIN_SPEED,
            },
            MapPosition { pos: *anchor },
            BoxCollider::new(SPAWNER_SIZE, SPAWNER_SIZE),
            Animation::new(ClipKey::looping(Actor::Spawner)),
            ZIndex::TILES,
        ));
    }

    world.insert_resource(WorldTime {
        ticks: 0,
        ticks_per_second: config.target_fps,
    });
    world.insert_resource(screen);
    world.insert_resource(geometry);
    world.insert_resource(store);
    world.insert_resource(rng);
    world.insert_resource(Session::new());
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());
    world.insert_resource(InputState::default());
    world.insert_resource(RenderQueue::default());
    world.insert_resource(config);
    world.init_resource::<Messages<AudioCmd>>();
    world.init_resource::<Messages<AudioMessage>>();

    world.add_observer(observe_gamestate_change_event);
    world.flush();

    info!("World ready for level '{}'", grid.name);
    world
}

pub fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            handle_state_input,
            check_pending_state,
            (
                (player_actions, player_control, zombie_motion).chain(),
                (animate_decorations, animate_pickups, movement_system).chain(),
                (player_platform_collision, body_platform_collision, portal_collision).chain(),
                (player_overlays, zombie_animation, projectile_range).chain(),
                (
                    session_clock,
                    projectile_hits,
                    player_zombie_contacts,
                    player_pickup_contacts,
                    spawn_zombies,
                    check_round_completion,
                    check_game_over,
                )
                    .chain(),
                advance_world_time,
            )
                .chain()
                .run_if(state_is_playing),
            check_pending_state,
            build_render_queue,
            (
                forward_audio_cmds,
                poll_audio_messages,
                log_audio_messages,
                update_bevy_audio_cmds,
                update_bevy_audio_messages,
            )
                .chain(),
        )
            .chain(),
    );
    schedule
}

/// Run one frame.
pub fn tick(world: &mut World, schedule: &mut Schedule) {
    schedule.run(world);
}

pub fn is_quitting(world: &World) -> bool {
    matches!(world.resource::<GameState>().get(), GameStates::Quitting)
}
