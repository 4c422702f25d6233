//! Collision detection primitives
//!
//! Two tests cover every interaction in the game: a circle against the
//! ship's axis-aligned box, and a circle against a comet's trail segment.
//! Both compare squared distances so the common path avoids a square root.

use glam::Vec2;

/// Closest point on the rectangle `[min, min + size]` to `p`
#[inline]
pub fn closest_point_on_rect(p: Vec2, rect_min: Vec2, rect_size: Vec2) -> Vec2 {
    let rect_max = rect_min + rect_size;
    Vec2::new(
        p.x.min(rect_max.x).max(rect_min.x),
        p.y.min(rect_max.y).max(rect_min.y),
    )
}

/// Circle vs axis-aligned rectangle
///
/// Touching counts as a hit.
pub fn circle_rect_collision(center: Vec2, radius: f32, rect_min: Vec2, rect_size: Vec2) -> bool {
    let closest = closest_point_on_rect(center, rect_min, rect_size);
    center.distance_squared(closest) <= radius * radius
}

/// Closest point on segment `a`-`b` to `p`
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return a; // Degenerate segment
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Thick segment (comet beam) vs circle
pub fn segment_circle_collision(
    a: Vec2,
    b: Vec2,
    center: Vec2,
    radius: f32,
    thickness: f32,
) -> bool {
    let reach = radius + thickness;
    center.distance_squared(closest_point_on_segment(center, a, b)) <= reach * reach
}

/// Radial push for a body at `target` from a blast at `center`
///
/// Linear falloff: full `strength` at the center, zero at `radius`.
/// Returns `None` outside the radius and for a body exactly at the center
/// (no direction to push in).
pub fn shockwave_impulse(center: Vec2, target: Vec2, radius: f32, strength: f32) -> Option<Vec2> {
    let offset = target - center;
    let dist = offset.length();
    if dist == 0.0 || dist > radius {
        return None;
    }
    let falloff = 1.0 - dist / radius;
    Some(offset / dist * strength * falloff)
}
