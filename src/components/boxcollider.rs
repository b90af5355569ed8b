//! Axis-aligned rectangular collider.
//!
//! Rectangles are integer pixel boxes derived from the bottom-left anchor in
//! [`MapPosition`](super::mapposition::MapPosition). Fractional positions are
//! truncated toward zero when a box is built, so overlap tests agree with the
//! pixel masks used for the player.

use bevy_ecs::prelude::Component;
use glam::{IVec2, Vec2};

/// Integer pixel rectangle, top-left origin, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Aabb {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Aabb {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Box of `size` whose bottom-left corner sits at `anchor`.
    pub fn from_bottom_left(anchor: Vec2, size: IVec2) -> Self {
        let left = anchor.x as i32;
        let bottom = anchor.y as i32;
        Self::new(left, bottom - size.y, size.x, size.y)
    }

    /// Box of `size` centred on `center`.
    pub fn from_center(center: IVec2, size: IVec2) -> Self {
        Self::new(center.x - size.x / 2, center.y - size.y / 2, size.x, size.y)
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn top_left(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    /// Strict overlap: boxes that only share an edge do not collide, and a
    /// box with zero area never collides.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        if self.w <= 0 || self.h <= 0 || other.w <= 0 || other.h <= 0 {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Collision footprint of an entity, anchored at its bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Component)]
pub struct BoxCollider {
    pub size: IVec2,
}

impl BoxCollider {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: IVec2::new(width, height),
        }
    }

    /// World-space box for an entity anchored at `position`.
    pub fn aabb(&self, position: Vec2) -> Aabb {
        Aabb::from_bottom_left(position, self.size)
    }

    /// Box vs box overlap test against another collider at a different position.
    pub fn overlaps(&self, position: Vec2, other: &Self, other_position: Vec2) -> bool {
        self.aabb(position).overlaps(&other.aabb(other_position))
    }
}
