//! Level grid and the static geometry derived from it.
//!
//! A level is a rectangular grid of small integer tile codes, loaded once at
//! startup:
//!
//! | code | tile                     |
//! |------|--------------------------|
//! | 0    | empty                    |
//! | 1    | ground (drawn, not solid)|
//! | 2-5  | platform variants 1..4   |
//! | 6    | pickup spawner decoration|
//! | 7    | portal A (green)         |
//! | 8    | portal B (purple)        |
//! | 9    | player spawn             |
//!
//! [`LevelGrid`] validates the grid; [`LevelGeometry`] turns it into the
//! platform set and portal set the collision systems query every tick. Both
//! are immutable once the simulation starts.

use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use glam::{IVec2, Vec2};
use log::info;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::components::animation::PortalColor;
use crate::components::boxcollider::Aabb;
use crate::components::decoration::PORTAL_SIZE;
use crate::resources::collisionmask::CollisionMask;

pub const TILE_SIZE: i32 = 32;

const GRAVEYARD_JSON: &str = include_str!("../../assets/levels/graveyard.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    Empty,
    Ground,
    /// Solid platform, variant 1..=4.
    Platform(u8),
    PickupSpawner,
    PortalA,
    PortalB,
    PlayerSpawn,
}

impl TileKind {
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => TileKind::Empty,
            1 => TileKind::Ground,
            2..=5 => TileKind::Platform(code - 1),
            6 => TileKind::PickupSpawner,
            7 => TileKind::PortalA,
            8 => TileKind::PortalB,
            9 => TileKind::PlayerSpawn,
            _ => return None,
        })
    }

    pub fn code(&self) -> u8 {
        match self {
            TileKind::Empty => 0,
            TileKind::Ground => 1,
            TileKind::Platform(variant) => variant + 1,
            TileKind::PickupSpawner => 6,
            TileKind::PortalA => 7,
            TileKind::PortalB => 8,
            TileKind::PlayerSpawn => 9,
        }
    }
}

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to parse level JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level grid has no rows")]
    Empty,
    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown tile code {code} at row {row}, column {col}")]
    UnknownTile { row: usize, col: usize, code: u8 },
    #[error("level needs exactly one player spawn, found {0}")]
    PlayerSpawnCount(usize),
    #[error("portals must come in pairs, found {a} of kind A and {b} of kind B")]
    PortalPairing { a: usize, b: usize },
}

/// On-disk level format.
#[derive(Debug, Deserialize)]
pub struct LevelFile {
    pub name: String,
    pub tile_size: u32,
    pub rows: Vec<Vec<u8>>,
}

/// Validated tile grid, indexed `[row][column]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelGrid {
    pub name: String,
    cells: Vec<Vec<TileKind>>,
}

impl LevelGrid {
    /// Validate a grid of raw tile codes.
    pub fn from_codes(name: impl Into<String>, rows: &[Vec<u8>]) -> Result<Self, LevelError> {
        let width = rows.first().map(Vec::len).ok_or(LevelError::Empty)?;
        if width == 0 {
            return Err(LevelError::Empty);
        }

        let mut cells = Vec::with_capacity(rows.len());
        for (row, codes) in rows.iter().enumerate() {
            if codes.len() != width {
                return Err(LevelError::Ragged {
                    row,
                    expected: width,
                    found: codes.len(),
                });
            }
            let kinds = codes
                .iter()
                .enumerate()
                .map(|(col, &code)| {
                    TileKind::from_code(code).ok_or(LevelError::UnknownTile { row, col, code })
                })
                .collect::<Result<Vec<_>, _>>()?;
            cells.push(kinds);
        }

        let grid = Self {
            name: name.into(),
            cells,
        };

        let spawns = grid.count(TileKind::PlayerSpawn);
        if spawns != 1 {
            return Err(LevelError::PlayerSpawnCount(spawns));
        }
        let a = grid.count(TileKind::PortalA);
        let b = grid.count(TileKind::PortalB);
        if a != b || a == 0 {
            return Err(LevelError::PortalPairing { a, b });
        }

        Ok(grid)
    }

    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let file: LevelFile = serde_json::from_str(json)?;
        Self::from_codes(file.name, &file.rows)
    }

    /// The built-in graveyard level.
    pub fn graveyard() -> Result<Self, LevelError> {
        Self::from_json(GRAVEYARD_JSON)
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn columns(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<TileKind> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Row-major iteration over `(row, column, kind)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, TileKind)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, kinds)| {
            kinds
                .iter()
                .enumerate()
                .map(move |(col, kind)| (row, col, *kind))
        })
    }

    fn count(&self, kind: TileKind) -> usize {
        self.iter().filter(|(_, _, k)| *k == kind).count()
    }
}

/// Pixel masks for the platform variants, keyed by variant (1..=4).
///
/// Variants without a registered mask collide as solid squares.
#[derive(Debug, Clone, Default)]
pub struct TileMasks {
    masks: FxHashMap<u8, Arc<CollisionMask>>,
}

impl TileMasks {
    pub fn insert(&mut self, variant: u8, mask: CollisionMask) {
        self.masks.insert(variant, Arc::new(mask));
    }

    pub fn get(&self, variant: u8) -> Arc<CollisionMask> {
        self.masks
            .get(&variant)
            .cloned()
            .unwrap_or_else(|| Arc::new(CollisionMask::solid(TILE_SIZE, TILE_SIZE)))
    }
}

#[derive(Debug, Clone)]
pub struct PlatformTile {
    pub aabb: Aabb,
    pub variant: u8,
    pub mask: Arc<CollisionMask>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortalSite {
    pub aabb: Aabb,
    pub color: PortalColor,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundTile {
    pub aabb: Aabb,
}

/// Static collision geometry and spawn points derived from a [`LevelGrid`].
#[derive(Resource, Debug, Clone)]
pub struct LevelGeometry {
    pub name: String,
    /// Solid platforms in row-major grid order.
    pub platforms: Vec<PlatformTile>,
    pub portals: Vec<PortalSite>,
    /// Non-solid ground tiles, drawn only.
    pub ground: Vec<GroundTile>,
    /// Bottom-left anchors of the pickup spawner decorations.
    pub spawners: Vec<Vec2>,
    /// Bottom-left anchor where the player starts.
    pub player_spawn: Vec2,
    pub width: i32,
    pub height: i32,
}

impl LevelGeometry {
    pub fn from_grid(grid: &LevelGrid, masks: &TileMasks) -> Self {
        let mut platforms = Vec::new();
        let mut portals = Vec::new();
        let mut ground = Vec::new();
        let mut spawners = Vec::new();
        let mut player_spawn = Vec2::ZERO;

        for (row, col, kind) in grid.iter() {
            let x = col as i32 * TILE_SIZE;
            let y = row as i32 * TILE_SIZE;
            let cell = Aabb::new(x, y, TILE_SIZE, TILE_SIZE);
            match kind {
                TileKind::Empty => {}
                TileKind::Ground => ground.push(GroundTile { aabb: cell }),
                TileKind::Platform(variant) => platforms.push(PlatformTile {
                    aabb: cell,
                    variant,
                    mask: masks.get(variant),
                }),
                TileKind::PickupSpawner => spawners.push(Vec2::new(x as f32, y as f32)),
                TileKind::PortalA | TileKind::PortalB => {
                    let color = if kind == TileKind::PortalA {
                        PortalColor::Green
                    } else {
                        PortalColor::Purple
                    };
                    portals.push(PortalSite {
                        aabb: Aabb::from_bottom_left(
                            Vec2::new(x as f32, y as f32),
                            IVec2::splat(PORTAL_SIZE),
                        ),
                        color,
                    });
                }
                TileKind::PlayerSpawn => {
                    player_spawn = Vec2::new((x - TILE_SIZE) as f32, (y + TILE_SIZE) as f32);
                }
            }
        }

        info!(
            "Level '{}': {} platforms, {} portals, {} spawners",
            grid.name,
            platforms.len(),
            portals.len(),
            spawners.len()
        );

        Self {
            name: grid.name.clone(),
            platforms,
            portals,
            ground,
            spawners,
            player_spawn,
            width: grid.columns() as i32 * TILE_SIZE,
            height: grid.rows() as i32 * TILE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny(rows: &[&[u8]]) -> Vec<Vec<u8>> {
        rows.iter().map(|r| r.to_vec()).collect()
    }

    #[test]
    fn test_graveyard_loads() {
        let grid = LevelGrid::graveyard().unwrap();
        assert_eq!(grid.rows(), 23);
        assert_eq!(grid.columns(), 40);
        assert_eq!(grid.get(17, 20), Some(TileKind::PlayerSpawn));
        assert_eq!(grid.get(3, 19), Some(TileKind::PickupSpawner));
    }

    #[test]
    fn test_graveyard_geometry() {
        let grid = LevelGrid::graveyard().unwrap();
        let geometry = LevelGeometry::from_grid(&grid, &TileMasks::default());
        assert_eq!(geometry.width, 1280);
        assert_eq!(geometry.height, 736);
        assert_eq!(geometry.portals.len(), 4);
        assert_eq!(geometry.spawners, vec![Vec2::new(608.0, 96.0)]);
        assert_eq!(geometry.player_spawn, Vec2::new(608.0, 576.0));
        assert_eq!(geometry.ground.len(), 40);
        // Row-major: the first platform is the top-left ledge.
        assert_eq!(geometry.platforms[0].aabb, Aabb::new(0, 96, 32, 32));
    }

    #[test]
    fn test_portal_is_anchored_bottom_left_at_cell() {
        let grid = LevelGrid::graveyard().unwrap();
        let geometry = LevelGeometry::from_grid(&grid, &TileMasks::default());
        let first = geometry.portals[0];
        assert_eq!(first.color, PortalColor::Green);
        assert_eq!(first.aabb, Aabb::new(0, 64 - 72, 72, 72));
    }

    #[test]
    fn test_tile_codes_round_trip() {
        for code in 0..=9u8 {
            assert_eq!(TileKind::from_code(code).unwrap().code(), code);
        }
        assert!(TileKind::from_code(10).is_none());
    }

    #[test]
    fn test_missing_player_spawn_rejected() {
        let rows = tiny(&[&[7, 0], &[8, 2]]);
        assert!(matches!(
            LevelGrid::from_codes("t", &rows),
            Err(LevelError::PlayerSpawnCount(0))
        ));
    }

    #[test]
    fn test_two_player_spawns_rejected() {
        let rows = tiny(&[&[7, 9], &[8, 9]]);
        assert!(matches!(
            LevelGrid::from_codes("t", &rows),
            Err(LevelError::PlayerSpawnCount(2))
        ));
    }

    #[test]
    fn test_unpaired_portal_rejected() {
        let rows = tiny(&[&[7, 9], &[7, 8]]);
        assert!(matches!(
            LevelGrid::from_codes("t", &rows),
            Err(LevelError::PortalPairing { a: 2, b: 1 })
        ));
    }

    #[test]
    fn test_ragged_rejected() {
        let rows = tiny(&[&[7, 9, 8], &[0, 0]]);
        assert!(matches!(
            LevelGrid::from_codes("t", &rows),
            Err(LevelError::Ragged { row: 1, .. })
        ));
    }

    #[test]
    fn test_unknown_code_rejected() {
        let rows = tiny(&[&[7, 9, 8], &[0, 42, 0]]);
        assert!(matches!(
            LevelGrid::from_codes("t", &rows),
            Err(LevelError::UnknownTile { row: 1, col: 1, code: 42 })
        ));
    }

    #[test]
    fn test_bad_json_rejected() {
        assert!(matches!(
            LevelGrid::from_json("{ not json"),
            Err(LevelError::Parse(_))
        ));
    }

    #[test]
    fn test_tile_masks_default_to_solid() {
        let masks = TileMasks::default();
        let mask = masks.get(3);
        assert_eq!(mask.width(), TILE_SIZE);
        assert!(mask.get(0, 0));
    }
}
