//! Narrow-phase collision for circles and axis-aligned boxes
//!
//! Each routine tests one pair of bodies, records a contact on first
//! detection and pushes the bodies apart. Nothing is returned: callers that
//! need to know whether the pair touched read the [`ContactRegistry`].
//!
//! Passing a body with the wrong collider kind is a programming error. Debug
//! builds panic; release builds leave both bodies untouched.

use crate::body::{Body, BodyKey};
use crate::contact::{Contact, ContactRegistry};
use crate::shapes::{Collider, ColliderKind};
use bubblecatch_math::Vec2;

/// Overlap left in place after a correction
///
/// Resting bodies stay in contact from frame to frame instead of ending up
/// exactly touching, which would not count as a contact.
pub const CONTACT_SLOP: f32 = 1e-4;

/// Test two circles
///
/// The pair is put in canonical order first (smaller [`BodyKey`] becomes
/// `a`), so `(x, y)` and `(y, x)` record the same contact. The normal points
/// from `b` to `a`. When both centers coincide the normal is `+Y`.
pub fn circle_vs_circle(
    contacts: &mut ContactRegistry,
    first: (BodyKey, &mut Body),
    second: (BodyKey, &mut Body),
) {
    debug_assert_eq!(
        first.1.collider_kind(),
        ColliderKind::Circle,
        "circle_vs_circle: '{}' is not a circle",
        first.1.name()
    );
    debug_assert_eq!(
        second.1.collider_kind(),
        ColliderKind::Circle,
        "circle_vs_circle: '{}' is not a circle",
        second.1.name()
    );

    // Deterministic order
    let ((key_a, body_a), (key_b, body_b)) = if second.0 < first.0 {
        (second, first)
    } else {
        (first, second)
    };

    let (Some(radius_a), Some(radius_b)) = (body_a.collider.radius(), body_b.collider.radius())
    else {
        return;
    };

    let separation = body_a.position - body_b.position;
    let dist_squared = separation.length_squared();
    let min_dist = radius_a + radius_b;

    if dist_squared >= min_dist * min_dist {
        return;
    }

    if contacts.contains_pair(key_a, key_b) {
        return;
    }

    let dist = dist_squared.sqrt();
    let normal = if dist > 0.0 { separation / dist } else { Vec2::Y };

    contacts.insert(Contact::new(key_a, key_b, normal));
    log::trace!(
        "contact {} vs {}: <{:.2}, {:.2}>",
        body_a.name(),
        body_b.name(),
        normal.x,
        normal.y
    );

    separate(body_a, body_b, normal, min_dist - dist);
}

/// Test a circle against a box
///
/// The contact is recorded as `{circle, aabb}` with the normal pointing from
/// the box toward the circle. If the circle center is inside the box, it is
/// pushed out through the nearest face (x before y on ties).
pub fn circle_vs_aabb(
    contacts: &mut ContactRegistry,
    circle: (BodyKey, &mut Body),
    aabb: (BodyKey, &mut Body),
) {
    let (circle_key, circle_body) = circle;
    let (aabb_key, aabb_body) = aabb;

    debug_assert_eq!(
        circle_body.collider_kind(),
        ColliderKind::Circle,
        "circle_vs_aabb: '{}' is not a circle",
        circle_body.name()
    );
    debug_assert_eq!(
        aabb_body.collider_kind(),
        ColliderKind::Aabb,
        "circle_vs_aabb: '{}' is not a box",
        aabb_body.name()
    );

    let (Collider::Circle(circle), Collider::Aabb(aabb)) =
        (circle_body.collider, aabb_body.collider)
    else {
        return;
    };
    let radius = circle.radius;
    let half = aabb.half_extents;

    let rel = circle_body.position - aabb_body.position;

    // Separating axis test on the box grown by the radius
    if rel.x.abs() - radius > half.x || rel.y.abs() - radius > half.y {
        return;
    }

    let closest = aabb.closest_point(rel);
    let inside = aabb.contains(rel);

    let (normal, penetration) = if inside {
        let escape_x = half.x - rel.x.abs();
        let escape_y = half.y - rel.y.abs();
        if escape_x <= escape_y {
            (Vec2::new(sign(rel.x), 0.0), radius + escape_x)
        } else {
            (Vec2::new(0.0, sign(rel.y)), radius + escape_y)
        }
    } else {
        let delta = rel - closest;
        let dist_squared = delta.length_squared();
        if dist_squared >= radius * radius {
            return;
        }
        let dist = dist_squared.sqrt();
        (delta / dist, radius - dist)
    };

    if !contacts.insert(Contact::new(circle_key, aabb_key, normal)) {
        return;
    }
    log::trace!(
        "contact {} vs {}: <{:.2}, {:.2}>",
        circle_body.name(),
        aabb_body.name(),
        normal.x,
        normal.y
    );

    separate(circle_body, aabb_body, normal, penetration);
}

/// Push two overlapping bodies apart along `normal` (from `b` toward `a`)
///
/// Only dynamic bodies move. Two dynamic bodies share the correction
/// equally, otherwise the dynamic one takes all of it. Every moved body also
/// loses the part of its velocity heading into the other one.
fn separate(a: &mut Body, b: &mut Body, normal: Vec2, penetration: f32) {
    let factor = if a.is_dynamic() && b.is_dynamic() { 0.5 } else { 1.0 };
    let correction = normal * ((penetration - CONTACT_SLOP).max(0.0) * factor);

    if a.is_dynamic() {
        a.translate(correction);
        stop_approach(a, normal);
    }
    if b.is_dynamic() {
        b.translate(-correction);
        stop_approach(b, -normal);
    }
}

/// Remove the velocity component opposing `push_dir`
fn stop_approach(body: &mut Body, push_dir: Vec2) {
    let along = body.linear_velocity.dot(push_dir);
    if along < 0.0 {
        body.linear_velocity -= push_dir * along;
    }
}

fn sign(v: f32) -> f32 {
    if v >= 0.0 {
        1.0
    } else {
        -1.0
    }
}
