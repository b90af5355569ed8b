//! Round and session control.
//!
//! Runs after every entity has moved and resolved its collisions:
//!
//! - [`session_clock`] counts ticks and the round countdown
//! - [`projectile_hits`], [`player_zombie_contacts`] and
//!   [`player_pickup_contacts`] turn entity overlaps into damage and score
//! - [`spawn_zombies`] adds a zombie on cadence boundaries
//! - [`check_round_completion`] and [`check_game_over`] prepare the next
//!   round or a fresh session and request the matching pause state
//!
//! Entity removals go through `Commands`, so they take effect at the next
//! sync point and never while a query over the same entities is iterating.

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::animation::ZombieKind;
use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::pickup::Pickup;
use crate::components::player::Player;
use crate::components::projectile::Projectile;
use crate::components::rigidbody::RigidBody;
use crate::components::zombie::{ZOMBIE_SPAWN_X_MAX, ZOMBIE_SPAWN_X_MIN, Zombie};
use crate::events::audio::{AudioCmd, FX_PLAYER_HIT, FX_RUBY_PICKUP, FX_ZOMBIE_HIT, FX_ZOMBIE_KICK};
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::rng::GameRng;
use crate::resources::screensize::ScreenSize;
use crate::resources::session::{
    KICK_SCORE, KNOCKBACK_DISTANCE, PICKUP_HEAL, PICKUP_SCORE, Session, ZOMBIE_DAMAGE,
};
use crate::resources::worldtime::WorldTime;
use crate::systems::pickup::spawn_pickup;
use crate::systems::player::reset_player;
use crate::systems::zombie::zombie_bundle;

/// Entities that only live for one round.
type Transient = Or<(With<Zombie>, With<Pickup>, With<Projectile>)>;

type PlayerQuery<'w, 's> = Query<
    'w,
    's,
    (&'static mut MapPosition, &'static mut RigidBody, &'static BoxCollider, &'static mut Player),
    (Without<Zombie>, Without<Pickup>),
>;

pub fn session_clock(mut session: ResMut<Session>, time: Res<WorldTime>) {
    if session.tick(time.ticks_per_second) {
        debug!("Sunrise in {}", session.round_time);
    }
}

/// Every projectile touching a zombie is consumed; living zombies it touches
/// start dying.
pub fn projectile_hits(
    mut commands: Commands,
    projectiles: Query<(Entity, &MapPosition, &BoxCollider), With<Projectile>>,
    mut zombies: Query<(&MapPosition, &BoxCollider, &mut Zombie), Without<Projectile>>,
    mut audio_cmd_writer: MessageWriter<AudioCmd>,
) {
    for (entity, position, collider) in projectiles.iter() {
        let aabb = collider.aabb(position.pos);
        let mut consumed = false;
        for (zombie_position, zombie_collider, mut zombie) in zombies.iter_mut() {
            if !zombie_collider.aabb(zombie_position.pos).overlaps(&aabb) {
                continue;
            }
            consumed = true;
            if zombie.kill() {
                audio_cmd_writer.write(AudioCmd::fx(FX_ZOMBIE_HIT));
            }
        }
        if consumed {
            commands.entity(entity).try_despawn();
        }
    }
}

/// Kick dead zombies out of play, take damage from living ones.
pub fn player_zombie_contacts(
    mut commands: Commands,
    mut players: PlayerQuery,
    zombies: Query<(Entity, &MapPosition, &BoxCollider, &Zombie), Without<Player>>,
    mut session: ResMut<Session>,
    screen: Res<ScreenSize>,
    mut rng: ResMut<GameRng>,
    mut audio_cmd_writer: MessageWriter<AudioCmd>,
) {
    for (mut position, _, collider, mut player) in players.iter_mut() {
        let aabb = collider.aabb(position.pos);
        for (entity, zombie_position, zombie_collider, zombie) in zombies.iter() {
            if !zombie_collider.aabb(zombie_position.pos).overlaps(&aabb) {
                continue;
            }
            if zombie.is_dead() {
                commands.entity(entity).try_despawn();
                session.score += KICK_SCORE;
                spawn_pickup(&mut commands, &screen, &mut rng);
                audio_cmd_writer.write(AudioCmd::fx(FX_ZOMBIE_KICK));
                debug!("Kicked zombie, score {}", session.score);
            } else {
                player.hurt(ZOMBIE_DAMAGE);
                position.pos.x -= KNOCKBACK_DISTANCE * zombie.direction as f32;
                audio_cmd_writer.write(AudioCmd::fx(FX_PLAYER_HIT));
                debug!("Player hit, health {}", player.health);
            }
        }
    }
}

/// Collect every pickup the player touches.
pub fn player_pickup_contacts(
    mut commands: Commands,
    mut players: PlayerQuery,
    pickups: Query<(Entity, &MapPosition, &BoxCollider), (With<Pickup>, Without<Player>)>,
    mut session: ResMut<Session>,
    mut audio_cmd_writer: MessageWriter<AudioCmd>,
) {
    for (position, _, collider, mut player) in players.iter_mut() {
        let aabb = collider.aabb(position.pos);
        for (entity, pickup_position, pickup_collider) in pickups.iter() {
            if !pickup_collider.aabb(pickup_position.pos).overlaps(&aabb) {
                continue;
            }
            commands.entity(entity).try_despawn();
            session.score += PICKUP_SCORE;
            player.heal(PICKUP_HEAL);
            audio_cmd_writer.write(AudioCmd::fx(FX_RUBY_PICKUP));
        }
    }
}

/// One zombie on each whole second whose countdown is a multiple of the cadence.
pub fn spawn_zombies(mut commands: Commands, session: Res<Session>, mut rng: ResMut<GameRng>) {
    if session.round_over() || !session.spawn_due() {
        return;
    }
    let kind = if rng.coin() {
        ZombieKind::Boy
    } else {
        ZombieKind::Girl
    };
    let direction = rng.sign();
    let (low, high) = session.zombie_speed_range();
    let speed = rng.range(low, high);
    let x = rng.range(ZOMBIE_SPAWN_X_MIN, ZOMBIE_SPAWN_X_MAX);
    commands.spawn(zombie_bundle(kind, direction, speed, x));
    debug!("Zombie {:?} at x={} speed={} dir={}", kind, x, speed, direction);
}

/// Sunrise: advance the round, clear the board and pause on the survival overlay.
pub fn check_round_completion(
    mut commands: Commands,
    mut session: ResMut<Session>,
    transients: Query<Entity, Transient>,
    mut players: PlayerQuery,
    mut next_state: ResMut<NextGameState>,
) {
    if !session.round_over() {
        return;
    }
    session.next_round();
    clear_transients(&mut commands, &transients);
    for (mut position, mut body, _, player) in players.iter_mut() {
        reset_player(&mut position, &mut body, &player);
    }
    info!(
        "Night survived; starting night {} with cadence {}",
        session.round, session.spawn_cadence
    );
    next_state.set(GameStates::RoundComplete);
}

/// Health at or below zero: reset the whole session and pause on the game over overlay.
pub fn check_game_over(
    mut commands: Commands,
    mut session: ResMut<Session>,
    transients: Query<Entity, Transient>,
    mut players: PlayerQuery,
    mut next_state: ResMut<NextGameState>,
) {
    let mut final_score = None;
    for (mut position, mut body, _, mut player) in players.iter_mut() {
        if !player.is_dead() {
            continue;
        }
        final_score = Some(session.score);
        player.restore();
        reset_player(&mut position, &mut body, &player);
    }
    let Some(final_score) = final_score else {
        return;
    };
    session.reset();
    clear_transients(&mut commands, &transients);
    info!("Game over, final score {}", final_score);
    next_state.set(GameStates::GameOver { final_score });
}

fn clear_transients(commands: &mut Commands, transients: &Query<Entity, Transient>) {
    for entity in transients.iter() {
        commands.entity(entity).try_despawn();
    }
}
