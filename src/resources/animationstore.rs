//! Animation clip registry.
//!
//! One table maps every [`ClipKey`] (actor, action, facing) to its ordered
//! frame list. Each frame names the image to draw, whether it is mirrored and
//! the pixel mask used for mask-accurate collision. Left-facing clips reuse
//! the right-facing images mirrored.
//!
//! The table layout is fixed by [`clip_catalog`]. [`AnimationStore::build`]
//! fills in the masks from a caller-supplied loader, so the frontend can
//! derive them from decoded images while headless runs and tests use
//! [`AnimationStore::placeholder`] with solid masks.

use std::convert::Infallible;
use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use glam::IVec2;
use rustc_hash::FxHashMap;

use crate::components::animation::{Action, Actor, ClipKey, Facing, PortalColor, ZombieKind};
use crate::components::decoration::{PORTAL_SIZE, SPAWNER_SIZE};
use crate::components::pickup::PICKUP_SIZE;
use crate::components::player::PLAYER_SIZE;
use crate::components::projectile::PROJECTILE_SIZE;
use crate::components::zombie::ZOMBIE_SIZE;
use crate::resources::collisionmask::CollisionMask;

/// One image of a clip.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Image path relative to the assets directory.
    pub texture: Arc<str>,
    /// Draw mirrored horizontally.
    pub flip_x: bool,
    pub mask: Arc<CollisionMask>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Clip {
    pub frames: Vec<Frame>,
}

impl Clip {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Layout of a clip before its masks are known.
#[derive(Debug, Clone)]
pub struct ClipSpec {
    pub key: ClipKey,
    pub textures: Vec<String>,
    pub flip_x: bool,
    /// Size the images are scaled to.
    pub size: IVec2,
}

/// Central registry of animation clips keyed by [`ClipKey`].
#[derive(Resource, Debug, Clone, Default)]
pub struct AnimationStore {
    clips: FxHashMap<ClipKey, Clip>,
}

impl AnimationStore {
    /// Build every clip of [`clip_catalog`], asking `load_mask` for the mask
    /// of each `(texture, flip_x, size)`.
    pub fn build<E>(
        mut load_mask: impl FnMut(&str, bool, IVec2) -> Result<CollisionMask, E>,
    ) -> Result<Self, E> {
        let mut store = Self::default();
        let mut cache: FxHashMap<(String, bool, IVec2), Arc<CollisionMask>> = FxHashMap::default();
        for spec in clip_catalog() {
            let mut frames = Vec::with_capacity(spec.textures.len());
            for texture in &spec.textures {
                let cache_key = (texture.clone(), spec.flip_x, spec.size);
                let mask = match cache.get(&cache_key) {
                    Some(mask) => mask.clone(),
                    None => {
                        let mask = Arc::new(load_mask(texture, spec.flip_x, spec.size)?);
                        cache.insert(cache_key, mask.clone());
                        mask
                    }
                };
                frames.push(Frame {
                    texture: Arc::from(texture.as_str()),
                    flip_x: spec.flip_x,
                    mask,
                });
            }
            store.insert(spec.key, Clip { frames });
        }
        Ok(store)
    }

    /// Full catalog with solid rectangular masks.
    pub fn placeholder() -> Self {
        Self::build(|_, _, size| Ok::<_, Infallible>(CollisionMask::solid(size.x, size.y)))
            .unwrap_or_else(|never| match never {})
    }

    pub fn insert(&mut self, key: ClipKey, clip: Clip) {
        self.clips.insert(key, clip);
    }

    pub fn get(&self, key: &ClipKey) -> Option<&Clip> {
        self.clips.get(key)
    }

    /// Frame count of a clip; unknown clips are empty.
    pub fn len(&self, key: &ClipKey) -> usize {
        self.clips.get(key).map_or(0, Clip::len)
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Frame shown for a cursor index, truncated toward zero.
    pub fn frame(&self, key: &ClipKey, index: f32) -> Option<&Frame> {
        let clip = self.clips.get(key)?;
        if clip.is_empty() {
            return None;
        }
        let i = (index.max(0.0) as usize).min(clip.len() - 1);
        clip.frames.get(i)
    }

    /// Every distinct texture path referenced by the store.
    pub fn textures(&self) -> Vec<Arc<str>> {
        let mut textures: Vec<Arc<str>> = self
            .clips
            .values()
            .flat_map(|clip| clip.frames.iter().map(|f| f.texture.clone()))
            .collect();
        textures.sort();
        textures.dedup();
        textures
    }
}

fn numbered(dir: &str, stem: &str, numbers: impl Iterator<Item = u32>) -> Vec<String> {
    numbers
        .map(|i| format!("images/{dir}/{stem} ({i}).png"))
        .collect()
}

fn tiles(dir: &str, count: u32) -> Vec<String> {
    (0..count)
        .map(|i| format!("images/{dir}/tile{i:03}.png"))
        .collect()
}

fn both_facings(
    out: &mut Vec<ClipSpec>,
    actor: Actor,
    action: Action,
    textures: Vec<String>,
    size: i32,
) {
    out.push(ClipSpec {
        key: ClipKey::new(actor, action, Facing::Right),
        textures: textures.clone(),
        flip_x: false,
        size: IVec2::splat(size),
    });
    out.push(ClipSpec {
        key: ClipKey::new(actor, action, Facing::Left),
        textures,
        flip_x: true,
        size: IVec2::splat(size),
    });
}

/// Layout of every clip the game plays.
pub fn clip_catalog() -> Vec<ClipSpec> {
    let mut out = Vec::new();

    for (action, dir, stem) in [
        (Action::Run, "player/run", "Run"),
        (Action::Idle, "player/idle", "Idle"),
        (Action::Jump, "player/jump", "Jump"),
        (Action::Attack, "player/attack", "Attack"),
    ] {
        both_facings(
            &mut out,
            Actor::Player,
            action,
            numbered(dir, stem, 1..=10),
            PLAYER_SIZE,
        );
    }

    for (kind, name) in [(ZombieKind::Boy, "boy"), (ZombieKind::Girl, "girl")] {
        let actor = Actor::Zombie(kind);
        let walk = format!("zombie/{name}/walk");
        let dead = format!("zombie/{name}/dead");
        both_facings(&mut out, actor, Action::Walk, numbered(&walk, "Walk", 1..=10), ZOMBIE_SIZE);
        both_facings(&mut out, actor, Action::Die, numbered(&dead, "Dead", 1..=10), ZOMBIE_SIZE);
        both_facings(
            &mut out,
            actor,
            Action::Rise,
            numbered(&dead, "Dead", (1..=10).rev()),
            ZOMBIE_SIZE,
        );
    }

    both_facings(
        &mut out,
        Actor::Projectile,
        Action::Loop,
        vec!["images/player/slash.png".to_string()],
        PROJECTILE_SIZE,
    );

    out.push(ClipSpec {
        key: ClipKey::looping(Actor::Pickup),
        textures: tiles("ruby", 7),
        flip_x: false,
        size: IVec2::splat(PICKUP_SIZE),
    });
    out.push(ClipSpec {
        key: ClipKey::looping(Actor::Spawner),
        textures: tiles("ruby", 7),
        flip_x: false,
        size: IVec2::splat(SPAWNER_SIZE),
    });

    for (color, name) in [(PortalColor::Green, "green"), (PortalColor::Purple, "purple")] {
        out.push(ClipSpec {
            key: ClipKey::looping(Actor::Portal(color)),
            textures: tiles(&format!("portals/{name}"), 22),
            flip_x: false,
            size: IVec2::splat(PORTAL_SIZE),
        });
    }

    out
}

/// Image of a level tile by its grid code (1 ground, 2-5 platforms).
pub fn tile_texture(code: u8) -> String {
    format!("images/tiles/Tile ({code}).png")
}

pub const BACKGROUND_TEXTURE: &str = "images/background.png";
