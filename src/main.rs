//! Zombie Knight entry point.
//!
//! A 2D platform brawler built on:
//! - **bevy_ecs** for the entity-component-system simulation
//! - **raylib** (optional `raylib` feature) for the window, drawing, input
//!   and audio
//!
//! Survive each night on the graveyard level: slash zombies, kick them
//! before they rise again and collect the rubies they leave behind.
//!
//! # Running
//!
//! ```sh
//! cargo run --release --features raylib
//! cargo run --release -- --headless-ticks 3600 --seed 42
//! ```

// Do not create console on Windows
#![cfg_attr(
    all(target_os = "windows", feature = "raylib"),
    windows_subsystem = "windows"
)]

#[cfg(feature = "raylib")]
mod frontend;

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info};

use zombieknight::components::player::Player;
use zombieknight::game::{build_schedule, build_world, is_quitting, tick};
use zombieknight::resources::gameconfig::GameConfig;
use zombieknight::resources::gamestate::GameState;
use zombieknight::resources::input::InputState;
use zombieknight::resources::level::LevelGrid;
use zombieknight::resources::session::Session;

/// Ticks simulated when no window is available and no count was given.
#[cfg(not(feature = "raylib"))]
const DEFAULT_HEADLESS_TICKS: u64 = 3600;

/// Zombie Knight
#[derive(Parser)]
#[command(version, about = "Survive the night against waves of zombies.")]
struct Cli {
    /// Path of the INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Seed for the gameplay random generator (overrides the config file).
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Run N ticks without a window, confirming every pause, then print the HUD.
    #[arg(long, value_name = "N")]
    headless_ticks: Option<u64>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_or_default() {
        error!("{}", e);
        std::process::exit(1);
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let grid = match LevelGrid::graveyard() {
        Ok(grid) => grid,
        Err(e) => {
            error!("Invalid level: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(ticks) = cli.headless_ticks {
        run_headless(config, &grid, ticks);
        return;
    }

    #[cfg(feature = "raylib")]
    if let Err(e) = frontend::run(config, &grid) {
        error!("{}", e);
        std::process::exit(1);
    }

    #[cfg(not(feature = "raylib"))]
    {
        log::warn!(
            "Built without the raylib feature; running {} headless ticks",
            DEFAULT_HEADLESS_TICKS
        );
        run_headless(config, &grid, DEFAULT_HEADLESS_TICKS);
    }
}

/// Simulate without a window. Pause overlays are confirmed on the next tick.
fn run_headless(config: GameConfig, grid: &LevelGrid, ticks: u64) {
    let mut world = build_world(config, grid);
    let mut schedule = build_schedule();

    for _ in 0..ticks {
        let paused = world.resource::<GameState>().get().is_paused();
        world.resource_mut::<InputState>().confirm.update(paused);
        tick(&mut world, &mut schedule);
        if is_quitting(&world) {
            break;
        }
    }

    let session = world.resource::<Session>().clone();
    let health = world
        .query::<&Player>()
        .iter(&world)
        .next()
        .map_or(0, |p| p.health);
    info!(
        "Score: {}  Health: {}  Night: {}  Sunrise In: {}",
        session.score, health, session.round, session.round_time
    );
}
