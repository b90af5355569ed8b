//! Event types and observers used by the game.
//!
//! Submodules:
//! - [`audio`] – commands and messages for the background audio thread
//! - [`gamestate`] – state transition notifications for the high-level game flow
pub mod audio;
pub mod gamestate;
