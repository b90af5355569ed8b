//! Screen size resource.
//!
//! Logical playfield dimensions in pixels. Horizontal wrap-around and the
//! portal destination quadrants are computed against these values.

use bevy_ecs::prelude::Resource;

/// Logical playfield size in pixels.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl ScreenSize {
    pub fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    pub fn half_width(&self) -> i32 {
        self.w / 2
    }

    pub fn half_height(&self) -> i32 {
        self.h / 2
    }
}
