//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution. Each submodule documents the
//! semantics and intended usage of its resource(s).
//!
//! Overview
//! - `animationstore` – clip table keyed by actor, action and facing
//! - `audio` – bridge and channels for the background audio thread
//! - `collisionmask` – per-pixel solidity maps (not a resource itself)
//! - `gameconfig` – INI-backed window, seed and asset settings
//! - `gamestate` – authoritative and pending high-level game state
//! - `input` – per-frame key state relevant to the game
//! - `level` – level grid, validation and static collision geometry
//! - `renderqueue` – draw commands for the frontend
//! - `rng` – seedable gameplay RNG
//! - `screensize` – logical playfield dimensions in pixels
//! - `session` – score, round, countdown and spawn cadence
//! - `worldtime` – fixed-step tick counter
pub mod animationstore;
pub mod audio;
pub mod collisionmask;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod level;
pub mod renderqueue;
pub mod rng;
pub mod screensize;
pub mod session;
pub mod worldtime;
