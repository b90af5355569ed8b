//! Asset decoding: textures, fonts and the pixel masks derived from images.
//!
//! Every asset is resolved before the first tick. Any failure is an
//! [`AssetError`] and aborts startup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use glam::IVec2;
use raylib::prelude::*;
use rustc_hash::FxHashMap;
use thiserror::Error;

use zombieknight::resources::animationstore::{AnimationStore, BACKGROUND_TEXTURE, tile_texture};
use zombieknight::resources::collisionmask::CollisionMask;
use zombieknight::resources::level::{TILE_SIZE, TileMasks};
use zombieknight::resources::renderqueue::FontKind;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to load image {path:?}: {reason}")]
    Image { path: PathBuf, reason: String },
    #[error("failed to load texture {path:?}: {reason}")]
    Texture { path: PathBuf, reason: String },
    #[error("failed to load font {path:?}: {reason}")]
    Font { path: PathBuf, reason: String },
    #[error("failed to load sound '{id}': {reason}")]
    Sound { id: String, reason: String },
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Alpha mask of an image scaled to `size`, optionally mirrored.
pub fn load_mask(
    assets_dir: &Path,
    texture: &str,
    flip_x: bool,
    size: IVec2,
) -> Result<CollisionMask, AssetError> {
    let path = assets_dir.join(texture);
    let mut image = Image::load_image(&path_str(&path)).map_err(|e| AssetError::Image {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    image.resize(size.x, size.y);
    if flip_x {
        image.flip_horizontal();
    }
    let alpha: Vec<u8> = image.get_image_data().iter().map(|c| c.a).collect();
    Ok(CollisionMask::from_alpha(size.x, size.y, &alpha))
}

/// Every clip, with masks decoded from the frame images.
pub fn load_animation_store(assets_dir: &Path) -> Result<AnimationStore, AssetError> {
    AnimationStore::build(|texture, flip_x, size| load_mask(assets_dir, texture, flip_x, size))
}

/// Masks of the four platform variants.
pub fn load_tile_masks(assets_dir: &Path) -> Result<TileMasks, AssetError> {
    let mut masks = TileMasks::default();
    for variant in 1..=4u8 {
        let mask = load_mask(
            assets_dir,
            &tile_texture(variant + 1),
            false,
            IVec2::splat(TILE_SIZE),
        )?;
        masks.insert(variant, mask);
    }
    Ok(masks)
}

/// GPU textures keyed by their path relative to the assets directory.
pub struct TextureStore {
    map: FxHashMap<Arc<str>, Texture2D>,
}

impl TextureStore {
    pub fn load(
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        assets_dir: &Path,
        store: &AnimationStore,
    ) -> Result<Self, AssetError> {
        let mut keys = store.textures();
        keys.push(Arc::from(BACKGROUND_TEXTURE));
        keys.extend((1..=5u8).map(|code| Arc::from(tile_texture(code))));

        let mut map = FxHashMap::default();
        for key in keys {
            let path = assets_dir.join(&*key);
            let texture = rl
                .load_texture(thread, &path_str(&path))
                .map_err(|e| AssetError::Texture {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
            map.insert(key, texture);
        }
        log::info!("Loaded {} textures", map.len());
        Ok(Self { map })
    }

    pub fn get(&self, key: &str) -> Option<&Texture2D> {
        self.map.get(key)
    }
}

pub struct FontStore {
    title: Font,
    hud: Font,
}

impl FontStore {
    pub fn load(
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        assets_dir: &Path,
    ) -> Result<Self, AssetError> {
        let mut load = |kind: FontKind| {
            let path = assets_dir.join(kind.path());
            rl.load_font_ex(thread, &path_str(&path), kind.size(), None)
                .map_err(|e| AssetError::Font {
                    path: path.clone(),
                    reason: e.to_string(),
                })
        };
        Ok(Self {
            title: load(FontKind::Title)?,
            hud: load(FontKind::Hud)?,
        })
    }

    pub fn get(&self, kind: FontKind) -> &Font {
        match kind {
            FontKind::Title => &self.title,
            FontKind::Hud => &self.hud,
        }
    }
}
