//! Zombie Knight library.
//!
//! The simulation core of the game: ECS components, resources, systems and
//! events, plus [`game`] to assemble a world and its per-frame schedule.
//! Everything here runs without a window, which is how the tests and the
//! headless mode drive it.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
