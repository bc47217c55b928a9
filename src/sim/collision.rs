//! Circle contact tests between the player and world actors

use glam::Vec2;

use crate::circles_overlap;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Unit vector from the other circle toward the first
    pub normal: Vec2,
    /// Overlap depth
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check two circles. A zero radius never collides.
pub fn circle_collision(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> CollisionResult {
    if a_radius <= 0.0 || b_radius <= 0.0 || !circles_overlap(a_pos, a_radius, b_pos, b_radius) {
        return CollisionResult::miss();
    }
    let delta = a_pos - b_pos;
    let dist = delta.length();
    let normal = if dist > f32::EPSILON { delta / dist } else { Vec2::Y };
    CollisionResult {
        hit: true,
        normal,
        penetration: a_radius + b_radius - dist,
    }
}

/// Whether `pos` is behind a target moving along `heading`
pub fn is_behind(pos: Vec2, target: Vec2, heading: Vec2) -> bool {
    (pos - target).dot(heading) < 0.0
}

/// Gap between a circle's edge and a point (negative = point inside)
pub fn edge_distance(center: Vec2, radius: f32, point: Vec2) -> f32 {
    center.distance(point) - radius
}
