//! Collision resolution against the static level geometry.
//!
//! Two query classes run every playing tick, after integration:
//!
//! - body vs platform set: the player is tested with its pixel mask,
//!   zombies and pickups with rectangles. Only the direction of vertical
//!   travel is tested. A falling hit snaps the body onto the platform top; a
//!   rising hit (player only) stops the jump and pushes the player down a
//!   pixel at a time until its rectangle is clear.
//! - body vs portal set: any rectangle overlap teleports the body to the
//!   opposite quadrant of the screen. Player and zombies land on fixed
//!   points; pickups land somewhere random inside the same margin bands.
//!
//! Queries against an empty platform or portal set find nothing.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::trace;
use smallvec::SmallVec;

use crate::components::boxcollider::{Aabb, BoxCollider};
use crate::components::mapposition::MapPosition;
use crate::components::pickup::{PICKUP_LANDING_OFFSET, Pickup};
use crate::components::player::{PLAYER_LANDING_OFFSET, Player};
use crate::components::projectile::Projectile;
use crate::components::rigidbody::RigidBody;
use crate::components::zombie::{ZOMBIE_LANDING_OFFSET, Zombie};
use crate::events::audio::{AudioCmd, FX_PORTAL};
use crate::resources::collisionmask::CollisionMask;
use crate::resources::level::{LevelGeometry, PlatformTile};
use crate::resources::rng::GameRng;
use crate::resources::screensize::ScreenSize;

/// Upper bound on the one-pixel pushes out of a ceiling.
pub const MAX_CEILING_NUDGE: u32 = 256;

/// Fixed portal exits for player and zombies.
pub const PORTAL_EXIT_LEFT_X: f32 = 86.0;
pub const PORTAL_EXIT_RIGHT_MARGIN: f32 = 150.0;
pub const PORTAL_EXIT_TOP_Y: f32 = 64.0;
pub const PORTAL_EXIT_BOTTOM_MARGIN: f32 = 132.0;

/// Randomized portal exit bands for pickups, inclusive.
pub const PICKUP_EXIT_LEFT_X: (i32, i32) = (60, 100);
pub const PICKUP_EXIT_RIGHT_MARGINS: (i32, i32) = (150, 100);
pub const PICKUP_EXIT_TOP_Y: (i32, i32) = (64, 100);
pub const PICKUP_EXIT_BOTTOM_MARGINS: (i32, i32) = (132, 100);

type Hits = SmallVec<[usize; 4]>;

/// Indices of platforms whose rectangle overlaps `aabb`, in row-major order.
pub fn platform_hits(geometry: &LevelGeometry, aabb: &Aabb) -> Hits {
    geometry
        .platforms
        .iter()
        .enumerate()
        .filter(|(_, platform)| platform.aabb.overlaps(aabb))
        .map(|(i, _)| i)
        .collect()
}

/// Indices of platforms whose mask overlaps `mask` placed at `aabb`.
pub fn platform_hits_masked(geometry: &LevelGeometry, aabb: &Aabb, mask: &CollisionMask) -> Hits {
    let origin = aabb.top_left();
    let bounds = Aabb::new(origin.x, origin.y, mask.width(), mask.height());
    geometry
        .platforms
        .iter()
        .enumerate()
        .filter(|(_, platform)| {
            platform.aabb.overlaps(&bounds)
                && mask.overlaps(&platform.mask, platform.aabb.top_left() - origin)
        })
        .map(|(i, _)| i)
        .collect()
}

/// First platform, in grid order, overlapping `aabb`.
pub fn first_platform_hit<'a>(geometry: &'a LevelGeometry, aabb: &Aabb) -> Option<&'a PlatformTile> {
    platform_hits(geometry, aabb)
        .first()
        .and_then(|i| geometry.platforms.get(*i))
}

pub fn touches_platform(geometry: &LevelGeometry, aabb: &Aabb) -> bool {
    geometry.platforms.iter().any(|p| p.aabb.overlaps(aabb))
}

pub fn touches_portal(geometry: &LevelGeometry, aabb: &Aabb) -> bool {
    geometry.portals.iter().any(|p| p.aabb.overlaps(aabb))
}

/// Fixed exit in the quadrant opposite to `pos`.
pub fn portal_exit(pos: Vec2, screen: &ScreenSize) -> Vec2 {
    let x = if pos.x > screen.half_width() as f32 {
        PORTAL_EXIT_LEFT_X
    } else {
        screen.w as f32 - PORTAL_EXIT_RIGHT_MARGIN
    };
    let y = if pos.y > screen.half_height() as f32 {
        PORTAL_EXIT_TOP_Y
    } else {
        screen.h as f32 - PORTAL_EXIT_BOTTOM_MARGIN
    };
    Vec2::new(x, y)
}

/// Random exit inside the margin band of the quadrant opposite to `pos`.
pub fn random_portal_exit(pos: Vec2, screen: &ScreenSize, rng: &mut GameRng) -> Vec2 {
    let x = if pos.x > screen.half_width() as f32 {
        rng.range(PICKUP_EXIT_LEFT_X.0, PICKUP_EXIT_LEFT_X.1)
    } else {
        rng.range(
            screen.w - PICKUP_EXIT_RIGHT_MARGINS.0,
            screen.w - PICKUP_EXIT_RIGHT_MARGINS.1,
        )
    };
    let y = if pos.y > screen.half_height() as f32 {
        rng.range(PICKUP_EXIT_TOP_Y.0, PICKUP_EXIT_TOP_Y.1)
    } else {
        rng.range(
            screen.h - PICKUP_EXIT_BOTTOM_MARGINS.0,
            screen.h - PICKUP_EXIT_BOTTOM_MARGINS.1,
        )
    };
    Vec2::new(x as f32, y as f32)
}

/// Snap a falling body onto the first platform it overlaps.
fn land(
    position: &mut MapPosition,
    body: &mut RigidBody,
    collider: &BoxCollider,
    geometry: &LevelGeometry,
    offset: f32,
) {
    if body.velocity.y <= 0.0 {
        return;
    }
    if let Some(platform) = first_platform_hit(geometry, &collider.aabb(position.pos)) {
        position.pos.y = platform.aabb.top() as f32 + offset;
        body.velocity.y = 0.0;
    }
}

/// Mask-accurate landing and ceiling bonk for the player.
pub fn player_platform_collision(
    mut query: Query<(&mut MapPosition, &mut RigidBody, &BoxCollider, &Player)>,
    geometry: Res<LevelGeometry>,
) {
    for (mut position, mut body, collider, player) in query.iter_mut() {
        if body.velocity.y > 0.0 {
            let aabb = collider.aabb(position.pos);
            let hits = platform_hits_masked(&geometry, &aabb, &player.mask);
            if let Some(platform) = hits.first().and_then(|i| geometry.platforms.get(*i)) {
                position.pos.y = platform.aabb.top() as f32 + PLAYER_LANDING_OFFSET;
                body.velocity.y = 0.0;
            }
        }

        if body.velocity.y < 0.0 {
            let aabb = collider.aabb(position.pos);
            if !platform_hits_masked(&geometry, &aabb, &player.mask).is_empty() {
                body.velocity.y = 0.0;
                let mut steps = 0;
                while steps < MAX_CEILING_NUDGE
                    && touches_platform(&geometry, &collider.aabb(position.pos))
                {
                    position.pos.y += 1.0;
                    steps += 1;
                }
                trace!("Ceiling bonk, pushed down {} px", steps);
            }
        }
    }
}

/// Rectangle landing for zombies and pickups.
pub fn body_platform_collision(
    mut zombies: Query<
        (&mut MapPosition, &mut RigidBody, &BoxCollider),
        (With<Zombie>, Without<Pickup>),
    >,
    mut pickups: Query<
        (&mut MapPosition, &mut RigidBody, &BoxCollider),
        (With<Pickup>, Without<Zombie>),
    >,
    geometry: Res<LevelGeometry>,
) {
    for (mut position, mut body, collider) in zombies.iter_mut() {
        land(&mut position, &mut body, collider, &geometry, ZOMBIE_LANDING_OFFSET);
    }
    for (mut position, mut body, collider) in pickups.iter_mut() {
        land(&mut position, &mut body, collider, &geometry, PICKUP_LANDING_OFFSET);
    }
}

/// Teleport any moving body (projectiles excepted) that touches a portal.
pub fn portal_collision(
    mut query: Query<(&mut MapPosition, &BoxCollider, Has<Pickup>), (With<RigidBody>, Without<Projectile>)>,
    geometry: Res<LevelGeometry>,
    screen: Res<ScreenSize>,
    mut rng: ResMut<GameRng>,
    mut audio_cmd_writer: MessageWriter<AudioCmd>,
) {
    for (mut position, collider, is_pickup) in query.iter_mut() {
        if !touches_portal(&geometry, &collider.aabb(position.pos)) {
            continue;
        }
        let from = position.pos;
        position.pos = if is_pickup {
            random_portal_exit(from, &screen, &mut rng)
        } else {
            portal_exit(from, &screen)
        };
        trace!("Portal: {:?} -> {:?}", from, position.pos);
        audio_cmd_writer.write(AudioCmd::fx(FX_PORTAL));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::level::{LevelGrid, TileMasks};
    use crate::systems::player::player_bundle;

    fn graveyard() -> LevelGeometry {
        LevelGeometry::from_grid(&LevelGrid::graveyard().unwrap(), &TileMasks::default())
    }

    fn screen() -> ScreenSize {
        ScreenSize::new(1280, 736)
    }

    #[test]
    fn test_empty_geometry_finds_nothing() {
        let geometry = LevelGeometry {
            name: "empty".into(),
            platforms: vec![],
            portals: vec![],
            ground: vec![],
            spawners: vec![],
            player_spawn: Vec2::ZERO,
            width: 1280,
            height: 736,
        };
        let aabb = Aabb::new(0, 0, 64, 64);
        assert!(platform_hits(&geometry, &aabb).is_empty());
        assert!(first_platform_hit(&geometry, &aabb).is_none());
        assert!(!touches_portal(&geometry, &aabb));
    }

    #[test]
    fn test_first_hit_is_row_major() {
        let geometry = graveyard();
        // Straddles platform cells (3,0) and (3,1).
        let aabb = Aabb::new(10, 100, 40, 10);
        let hits = platform_hits(&geometry, &aabb);
        assert_eq!(hits.len(), 2);
        assert_eq!(first_platform_hit(&geometry, &aabb).unwrap().aabb, Aabb::new(0, 96, 32, 32));
    }

    #[test]
    fn test_mask_hit_respects_transparent_pixels() {
        let geometry = graveyard();
        // Player box whose bottom row dips into the floor row (y 672).
        let aabb = Aabb::new(600, 610, 64, 64);
        let solid = CollisionMask::solid(64, 64);
        assert!(!platform_hits_masked(&geometry, &aabb, &solid).is_empty());

        // Only the top half is solid: nothing reaches the floor.
        let mut alpha = vec![255u8; 64 * 32];
        alpha.extend(vec![0u8; 64 * 32]);
        let top_half = CollisionMask::from_alpha(64, 64, &alpha);
        assert!(platform_hits_masked(&geometry, &aabb, &top_half).is_empty());
    }

    /// Run the player platform system once on a knight at `pos` moving at `vy`.
    fn resolve_player(pos: Vec2, vy: f32, mask: Option<CollisionMask>) -> (Vec2, f32) {
        let mut world = World::new();
        world.insert_resource(graveyard());
        let e = world.spawn(player_bundle(pos)).id();
        world.get_mut::<RigidBody>(e).unwrap().velocity.y = vy;
        if let Some(mask) = mask {
            world.get_mut::<Player>(e).unwrap().mask = std::sync::Arc::new(mask);
        }
        let mut schedule = Schedule::default();
        schedule.add_systems(player_platform_collision);
        schedule.run(&mut world);
        let pos = world.get::<MapPosition>(e).unwrap().pos;
        (pos, world.get::<RigidBody>(e).unwrap().velocity.y)
    }

    #[test]
    fn test_falling_player_lands_on_spawn_platform() {
        let (pos, vy) = resolve_player(Vec2::new(608.0, 590.0), 5.0, None);
        assert_eq!(pos, Vec2::new(608.0, 581.0));
        assert_eq!(vy, 0.0);
    }

    #[test]
    fn test_rising_player_bonks_and_is_pushed_clear() {
        let (pos, vy) = resolve_player(Vec2::new(100.0, 560.0), -10.0, None);
        assert_eq!(pos, Vec2::new(100.0, 576.0));
        assert_eq!(vy, 0.0);
    }

    #[test]
    fn test_transparent_feet_do_not_land() {
        let mut alpha = vec![255u8; 64 * 32];
        alpha.extend(vec![0u8; 64 * 32]);
        let top_half = CollisionMask::from_alpha(64, 64, &alpha);
        let (pos, vy) = resolve_player(Vec2::new(608.0, 590.0), 5.0, Some(top_half));
        assert_eq!(pos, Vec2::new(608.0, 590.0));
        assert_eq!(vy, 5.0);
    }

    #[test]
    fn test_fixed_portal_exit_quadrants() {
        let s = screen();
        assert_eq!(portal_exit(Vec2::new(1200.0, 700.0), &s), Vec2::new(86.0, 64.0));
        assert_eq!(portal_exit(Vec2::new(10.0, 64.0), &s), Vec2::new(1130.0, 604.0));
        // Exactly on the centre counts as the low side.
        assert_eq!(portal_exit(Vec2::new(640.0, 368.0), &s), Vec2::new(1130.0, 604.0));
    }

    #[test]
    fn test_random_portal_exit_stays_in_band() {
        let s = screen();
        let mut rng = GameRng::seeded(3);
        for _ in 0..200 {
            let exit = random_portal_exit(Vec2::new(1200.0, 700.0), &s, &mut rng);
            assert!((60.0..=100.0).contains(&exit.x));
            assert!((64.0..=100.0).contains(&exit.y));
            let exit = random_portal_exit(Vec2::new(0.0, 0.0), &s, &mut rng);
            assert!((1130.0..=1180.0).contains(&exit.x));
            assert!((604.0..=636.0).contains(&exit.y));
        }
    }

    #[test]
    fn test_portal_touch() {
        let geometry = graveyard();
        // Green portal at top-left spans (0,-8)-(72,64).
        assert!(touches_portal(&geometry, &Aabb::new(20, 0, 64, 64)));
        assert!(!touches_portal(&geometry, &Aabb::new(300, 300, 64, 64)));
    }
}
