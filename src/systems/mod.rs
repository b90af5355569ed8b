//! Game systems.
//!
//! Submodules overview
//! - [`animation`] – loop decoration and pickup clips
//! - [`audio`] – bridge with the audio thread (forward commands, poll replies)
//! - [`collision`] – platform landing, ceiling bonks and portal teleports
//! - [`gamestate`] – pause overlays, quit, and pending state transitions
//! - [`movement`] – integrate every unfrozen rigid body
//! - [`pickup`] – spawn rubies
//! - [`player`] – knight input, base clip and overlay clips
//! - [`projectile`] – spawn slashes and expire them past their range
//! - [`render`] – build the frame's [`crate::resources::renderqueue::RenderQueue`]
//! - [`session`] – round clock, contacts, scoring, spawning, round end and game over
//! - [`time`] – advance the fixed-step clock
//! - [`zombie`] – zombie spawning, walking and resurrection

pub mod animation;
pub mod audio;
pub mod collision;
pub mod gamestate;
pub mod movement;
pub mod pickup;
pub mod player;
pub mod projectile;
pub mod render;
pub mod session;
pub mod time;
pub mod zombie;
