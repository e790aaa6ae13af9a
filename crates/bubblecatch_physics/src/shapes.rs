//! Collider shapes for 2D physics
//!
//! Shapes are stored in body-local space: a circle is centered on the
//! body position and a box extends `half_extents` around it.

use bubblecatch_math::Vec2;
use std::fmt;

/// Default collider size (circle radius, or box half width/height)
pub const DEFAULT_COLLIDER_HALF_SIZE: f32 = 64.0;

/// A circle defined by its radius
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub radius: f32,
}

impl Circle {
    /// Create a new circle with the given radius
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}

/// An axis-aligned box defined by its half extents
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Half width (x) and half height (y)
    pub half_extents: Vec2,
}

impl Aabb {
    /// Create a box with the given half extents
    pub fn new(half_extents: Vec2) -> Self {
        Self { half_extents }
    }

    /// Check if a point (relative to the box center) is inside or on the box
    pub fn contains(&self, local_point: Vec2) -> bool {
        local_point.x.abs() <= self.half_extents.x && local_point.y.abs() <= self.half_extents.y
    }

    /// Closest point inside or on the box to a point relative to its center
    pub fn closest_point(&self, local_point: Vec2) -> Vec2 {
        local_point.clamp_components(-self.half_extents, self.half_extents)
    }
}

/// Shape attached to a body
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Collider {
    /// No collision shape (the body still integrates)
    #[default]
    None,
    Circle(Circle),
    Aabb(Aabb),
}

impl Collider {
    /// Circle collider with the given radius
    pub fn circle(radius: f32) -> Self {
        Collider::Circle(Circle::new(radius))
    }

    /// Box collider with the given half extents
    pub fn aabb(half_extents: Vec2) -> Self {
        Collider::Aabb(Aabb::new(half_extents))
    }

    /// The kind of this collider, for dispatch and diagnostics
    pub fn kind(&self) -> ColliderKind {
        match self {
            Collider::None => ColliderKind::None,
            Collider::Circle(_) => ColliderKind::Circle,
            Collider::Aabb(_) => ColliderKind::Aabb,
        }
    }

    /// Radius if this is a circle
    pub fn radius(&self) -> Option<f32> {
        match self {
            Collider::Circle(circle) => Some(circle.radius),
            _ => None,
        }
    }
}

/// Collider kind without the shape parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColliderKind {
    None,
    Circle,
    Aabb,
}

impl ColliderKind {
    /// Upper-case name used in logs and debug output
    pub fn name(self) -> &'static str {
        match self {
            ColliderKind::None => "NONE",
            ColliderKind::Circle => "CIRCLE",
            ColliderKind::Aabb => "AABB",
        }
    }
}

impl fmt::Display for ColliderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_contains() {
        let aabb = Aabb::new(Vec2::new(2.0, 1.0));
        assert!(aabb.contains(Vec2::new(-2.0, 1.0)));
        assert!(!aabb.contains(Vec2::new(0.0, 1.1)));
    }

    #[test]
    fn test_aabb_closest_point() {
        let aabb = Aabb::new(Vec2::new(2.0, 1.0));

        // Outside on a corner
        assert_eq!(aabb.closest_point(Vec2::new(5.0, -3.0)), Vec2::new(2.0, -1.0));
        // Inside stays put
        assert_eq!(aabb.closest_point(Vec2::new(0.5, 0.5)), Vec2::new(0.5, 0.5));
    }

    #[test]
    fn test_collider_kind() {
        assert_eq!(Collider::None.kind(), ColliderKind::None);
        assert_eq!(Collider::circle(1.0).kind(), ColliderKind::Circle);
        assert_eq!(Collider::aabb(Vec2::splat(1.0)).kind(), ColliderKind::Aabb);
    }

    #[test]
    fn test_collider_accessors() {
        assert_eq!(Collider::circle(3.0).radius(), Some(3.0));
        assert_eq!(Collider::aabb(Vec2::new(1.0, 2.0)).radius(), None);
        assert_eq!(Collider::None.radius(), None);
    }

    #[test]
    fn test_collider_kind_names() {
        assert_eq!(ColliderKind::None.to_string(), "NONE");
        assert_eq!(ColliderKind::Circle.to_string(), "CIRCLE");
        assert_eq!(ColliderKind::Aabb.to_string(), "AABB");
    }
}
