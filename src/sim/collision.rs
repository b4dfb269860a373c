//! Collision detection between the player and obstacles
//!
//! Both boxes are shrunk before the overlap test so that grazing a sprite's
//! transparent corner does not end the run.

use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;
use crate::consts::HITBOX_INSET_RATIO;

/// Axis-aligned bounding box (top-left corner plus size, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Shrink every side by `ratio` of the box's own width/height
    ///
    /// Returns `None` if the result would have non-positive size.
    pub fn inset(&self, ratio: f32) -> Option<Aabb> {
        let dx = self.width * ratio;
        let dy = self.height * ratio;
        let width = self.width - 2.0 * dx;
        let height = self.height - 2.0 * dy;
        if width > 0.0 && height > 0.0 {
            Some(Aabb::new(self.x + dx, self.y + dy, width, height))
        } else {
            None
        }
    }

    /// Inset hitbox, or the full box when the inset collapses
    pub fn hitbox(&self, ratio: f32) -> Aabb {
        self.inset(ratio).unwrap_or(*self)
    }

    /// Plain AABB overlap (touching edges count)
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(self.right() < other.x
            || other.right() < self.x
            || self.bottom() < other.y
            || other.bottom() < self.y)
    }
}

/// Overlap test with the standard fairness inset applied to both boxes
pub fn boxes_overlap(a: &Aabb, b: &Aabb) -> bool {
    boxes_overlap_with_inset(a, b, HITBOX_INSET_RATIO)
}

pub fn boxes_overlap_with_inset(a: &Aabb, b: &Aabb, ratio: f32) -> bool {
    a.hitbox(ratio).intersects(&b.hitbox(ratio))
}

/// Index of the first obstacle (in iteration order) overlapping the player
///
/// Stops at the first hit; later obstacles are not tested.
pub fn first_hit(player: &Aabb, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles
        .iter()
        .position(|o| o.active && boxes_overlap(player, &o.aabb()))
}
