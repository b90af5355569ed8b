//! Pixel-accurate collision masks.
//!
//! A [`CollisionMask`] is a per-pixel solidity map built from a sprite's alpha
//! channel. It is used where rectangle tests are too coarse: the player
//! landing on the sloped ends of a platform. Masks are immutable after
//! construction and shared between frames through `Arc`.

use glam::IVec2;

/// Alpha above this value counts as solid.
pub const ALPHA_THRESHOLD: u8 = 127;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionMask {
    width: i32,
    height: i32,
    bits: Vec<bool>,
}

impl CollisionMask {
    /// Fully solid mask, equivalent to a rectangle test.
    pub fn solid(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        }
    }

    /// Build from row-major alpha values. Missing pixels count as empty.
    pub fn from_alpha(width: i32, height: i32, alpha: &[u8]) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let len = (width * height) as usize;
        let bits = (0..len)
            .map(|i| alpha.get(i).is_some_and(|a| *a > ALPHA_THRESHOLD))
            .collect();
        Self {
            width,
            height,
            bits,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y * self.width + x) as usize]
    }

    /// True if any solid pixel of `self` coincides with a solid pixel of
    /// `other`, where `offset` is `other`'s top-left relative to `self`'s.
    pub fn overlaps(&self, other: &CollisionMask, offset: IVec2) -> bool {
        let x0 = offset.x.max(0);
        let y0 = offset.y.max(0);
        let x1 = (offset.x + other.width).min(self.width);
        let y1 = (offset.y + other.height).min(self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - offset.x, y - offset.y) {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 4x4 mask with only the bottom-right 2x2 quadrant solid.
    fn corner_mask() -> CollisionMask {
        #[rustfmt::skip]
        let alpha = [
            0, 0, 0, 0,
            0, 0, 0, 0,
            0, 0, 255, 255,
            0, 0, 255, 255,
        ];
        CollisionMask::from_alpha(4, 4, &alpha)
    }

    #[test]
    fn test_from_alpha_threshold() {
        let mask = CollisionMask::from_alpha(3, 1, &[127, 128, 0]);
        assert!(!mask.get(0, 0));
        assert!(mask.get(1, 0));
        assert!(!mask.get(2, 0));
    }

    #[test]
    fn test_get_out_of_bounds_is_empty() {
        let mask = CollisionMask::solid(2, 2);
        assert!(mask.get(1, 1));
        assert!(!mask.get(2, 0));
        assert!(!mask.get(-1, 0));
    }

    #[test]
    fn test_solid_overlap_matches_rectangles() {
        let a = CollisionMask::solid(4, 4);
        let b = CollisionMask::solid(4, 4);
        assert!(a.overlaps(&b, IVec2::new(3, 3)));
        assert!(!a.overlaps(&b, IVec2::new(4, 0)));
        assert!(a.overlaps(&b, IVec2::new(-3, -3)));
    }

    #[test]
    fn test_transparent_pixels_do_not_collide() {
        let corner = corner_mask();
        let block = CollisionMask::solid(2, 2);
        assert!(!corner.overlaps(&block, IVec2::new(0, 0)));
        assert!(corner.overlaps(&block, IVec2::new(1, 1)));
    }
}
