//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the game world.
//!
//! Submodules overview:
//! - [`animation`] – clip addressing and the fractional playback cursor
//! - [`boxcollider`] – axis-aligned rectangular collider and integer boxes
//! - [`decoration`] – animated portal and pickup-spawner visuals
//! - [`mapposition`] – world-space bottom-left anchor of an entity
//! - [`pickup`] – collectible ruby
//! - [`player`] – the knight: health and jump/attack overlay flags
//! - [`projectile`] – sword slash with a limited range
//! - [`rigidbody`] – kinematic body storing velocity and acceleration
//! - [`zindex`] – rendering order hint for 2D drawing
//! - [`zombie`] – enemy with a death and resurrection cycle

pub mod animation;
pub mod boxcollider;
pub mod decoration;
pub mod mapposition;
pub mod pickup;
pub mod player;
pub mod projectile;
pub mod rigidbody;
pub mod zindex;
pub mod zombie;
