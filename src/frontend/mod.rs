//! Window, asset and audio frontend built on raylib.
//!
//! Everything platform-facing lives here: the simulation in the library
//! only sees [`InputState`] going in and the [`RenderQueue`] coming out.

mod assets;
mod audio;
mod draw;
mod input;

pub use assets::AssetError;

use log::info;
use raylib::prelude::*;

use zombieknight::game::{build_schedule, build_world_with_assets, is_quitting, tick};
use zombieknight::resources::audio::{setup_audio, shutdown_audio};
use zombieknight::resources::gameconfig::GameConfig;
use zombieknight::resources::input::InputState;
use zombieknight::resources::level::LevelGrid;
use zombieknight::resources::renderqueue::RenderQueue;
use zombieknight::systems::render::TITLE_TEXT;

use assets::{FontStore, TextureStore, load_animation_store, load_tile_masks};

/// Open the window, load every asset and run frames until the player quits.
pub fn run(config: GameConfig, grid: &LevelGrid) -> Result<(), AssetError> {
    let (width, height) = config.window_size();
    let mut builder = raylib::init();
    builder
        .size(width as i32, height as i32)
        .title(TITLE_TEXT);
    if config.vsync {
        builder.vsync();
    }
    if config.fullscreen {
        builder.fullscreen();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);
    // Escape is a game key, not a window close.
    rl.set_exit_key(None);

    let assets_dir = config.assets_dir.clone();
    let store = load_animation_store(&assets_dir)?;
    let tile_masks = load_tile_masks(&assets_dir)?;
    let textures = TextureStore::load(&mut rl, &thread, &assets_dir, &store)?;
    let fonts = FontStore::load(&mut rl, &thread, &assets_dir)?;

    let mut world = build_world_with_assets(config, grid, &tile_masks, store);

    setup_audio(&mut world, audio::audio_thread);
    if let Err(e) = audio::preload_sounds(&world, &assets_dir) {
        shutdown_audio(&mut world);
        return Err(e);
    }

    let mut schedule = build_schedule();
    while !is_quitting(&world) {
        input::poll_input(&rl, &mut world.resource_mut::<InputState>());
        tick(&mut world, &mut schedule);
        draw::draw_queue(
            &mut rl,
            &thread,
            &textures,
            &fonts,
            world.resource::<RenderQueue>(),
        );
    }

    shutdown_audio(&mut world);
    info!("Goodbye");
    Ok(())
}
