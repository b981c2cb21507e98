//! Axis-aligned bounding boxes
//!
//! Every entity is drawn and collided as a single rectangle in screen space
//! (y-down), stored as top-left corner plus size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size whose bottom-center sits at `anchor`
    pub fn from_midbottom(anchor: Vec2, w: f32, h: f32) -> Self {
        Self::new(anchor.x - w / 2.0, anchor.y - h, w, h)
    }

    /// Rectangle of the given size centered on `center`
    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.y + self.h / 2.0)
    }

    pub fn midbottom(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.bottom())
    }

    /// Move so the bottom-center sits at `anchor`
    pub fn set_midbottom(&mut self, anchor: Vec2) {
        self.x = anchor.x - self.w / 2.0;
        self.y = anchor.y - self.h;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Copy of this rectangle moved by `delta`
    pub fn translated(&self, delta: Vec2) -> Self {
        let mut moved = *self;
        moved.translate(delta);
        moved
    }

    /// Strict overlap test: shared edges and empty rectangles never intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.w > 0.0
            && self.h > 0.0
            && other.w > 0.0
            && other.h > 0.0
            && self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Anything with a collision/render extent
pub trait HasBoundingBox {
    fn bounds(&self) -> Rect;

    fn overlaps<T: HasBoundingBox + ?Sized>(&self, other: &T) -> bool {
        self.bounds().intersects(&other.bounds())
    }
}

impl HasBoundingBox for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}
