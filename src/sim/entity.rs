//! Entity geometry and identity
//!
//! Every object in the arena is an axis-aligned box with an id. Circles (the
//! ball) are tracked by their bounding box, which is all the collision rules
//! look at.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque entity handle, unique within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Variant tag used instead of runtime type checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Ball,
    Paddle,
    Brick,
    PowerUp,
}

impl EntityKind {
    /// Shape the presentation layer should draw for this kind
    pub fn shape(&self) -> Shape {
        match self {
            EntityKind::Ball => Shape::Ellipse,
            _ => Shape::Rectangle,
        }
    }

    /// Whether the ball deflects off this kind of entity
    pub fn is_solid(&self) -> bool {
        matches!(self, EntityKind::Paddle | EntityKind::Brick)
    }
}

/// Drawable primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Rectangle,
    Ellipse,
}

/// Axis-aligned bounding box in arena coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Aabb {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Box of the given half extents centered on a point
    pub fn centered(center: Vec2, half_width: f32, half_height: f32) -> Self {
        Self {
            x1: center.x - half_width,
            y1: center.y - half_height,
            x2: center.x + half_width,
            y2: center.y + half_height,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.x1 + self.x2) * 0.5, (self.y1 + self.y2) * 0.5)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// Top-left corner
    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x1, self.y1)
    }

    /// Shift the box by a delta
    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        self.x1 += delta.x;
        self.x2 += delta.x;
        self.y1 += delta.y;
        self.y2 += delta.y;
    }

    /// Inclusive overlap test: boxes that only touch at an edge overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        !(self.x2 < other.x1 || other.x2 < self.x1 || self.y2 < other.y1 || other.y2 < self.y1)
    }
}

/// Common surface of everything that lives in the arena
pub trait Entity {
    fn id(&self) -> EntityId;
    fn kind(&self) -> EntityKind;
    fn bounds(&self) -> Aabb;
    fn translate(&mut self, delta: Vec2);
    /// Current fill color as 0xRRGGBB
    fn fill(&self) -> u32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_box() {
        let b = Aabb::centered(Vec2::new(100.0, 50.0), 10.0, 5.0);
        assert_eq!(b, Aabb::new(90.0, 45.0, 110.0, 55.0));
        assert_eq!(b.center(), Vec2::new(100.0, 50.0));
        assert_eq!(b.width(), 20.0);
        assert_eq!(b.height(), 10.0);
    }

    #[test]
    fn test_overlap_includes_touching_edges() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Aabb::new(10.0, 0.0, 20.0, 10.0)));
        assert!(a.overlaps(&Aabb::new(0.0, 10.0, 10.0, 20.0)));
        assert!(a.overlaps(&Aabb::new(2.0, 2.0, 4.0, 4.0)));
        assert!(!a.overlaps(&Aabb::new(10.5, 0.0, 20.0, 10.0)));
        assert!(!a.overlaps(&Aabb::new(0.0, -20.0, 10.0, -0.1)));
    }

    #[test]
    fn test_translate() {
        let mut b = Aabb::new(0.0, 0.0, 10.0, 10.0);
        b.translate(Vec2::new(5.0, -2.0));
        assert_eq!(b, Aabb::new(5.0, -2.0, 15.0, 8.0));
    }
}
