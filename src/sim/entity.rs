//! Entity base types
//!
//! Every simulated thing carries a `Body` and reports an `EntityKind`.
//! Containers own their entities outright; an `EntityId` is only an
//! observation handle and goes stale once the entity is swept.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::renderer::Canvas;

/// Stable handle to an entity inside an `EntityManager`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Placeholder for entities not yet handed to a manager
    pub const UNASSIGNED: EntityId = EntityId(0);
}

/// Discriminant for every entity variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Fish,
    Hazard,
    PowerUp,
    BonusItem,
}

/// Shared physical state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub alive: bool,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            id: EntityId::UNASSIGNED,
            pos,
            vel,
            radius,
            alive: true,
        }
    }

    /// Mark for removal on the owner's next sweep
    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Unit heading, facing right when stationary
    pub fn heading(&self) -> Vec2 {
        let dir = self.vel.normalize_or_zero();
        if dir == Vec2::ZERO { Vec2::X } else { dir }
    }
}

/// Playfield rectangle, origin top-left, y down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Keep a circle fully inside the arena
    pub fn clamp(&self, pos: Vec2, radius: f32) -> Vec2 {
        let r = radius.min(self.width / 2.0).min(self.height / 2.0);
        Vec2::new(
            pos.x.clamp(r, self.width - r),
            pos.y.clamp(r, self.height - r),
        )
    }

    /// True once a circle has left the arena and keeps moving away
    pub fn has_left(&self, body: &Body) -> bool {
        let slack = body.radius * 2.0;
        (body.pos.x < -slack && body.vel.x <= 0.0)
            || (body.pos.x > self.width + slack && body.vel.x >= 0.0)
            || (body.pos.y < -slack && body.vel.y <= 0.0)
            || (body.pos.y > self.height + slack && body.vel.y >= 0.0)
    }
}

/// Per-step information shared with every entity update
#[derive(Debug, Clone, Copy)]
pub struct StepContext {
    pub arena: Arena,
    /// Freeze power-up active: fish hold still
    pub frozen: bool,
}

/// Polymorphic entity operations
pub trait Entity {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;
    fn kind(&self) -> EntityKind;
    fn update(&mut self, dt: f32, ctx: &StepContext);
    fn render(&self, canvas: &mut dyn Canvas);

    /// Radius used for contact checks (may differ from the body radius)
    fn contact_radius(&self) -> f32 {
        self.body().radius
    }

    fn id(&self) -> EntityId {
        self.body().id
    }

    fn is_alive(&self) -> bool {
        self.body().alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_clamp() {
        let arena = Arena::new(100.0, 50.0);
        assert_eq!(arena.clamp(Vec2::new(-5.0, 60.0), 10.0), Vec2::new(10.0, 40.0));
        assert_eq!(arena.clamp(Vec2::new(50.0, 25.0), 10.0), Vec2::new(50.0, 25.0));
    }

    #[test]
    fn test_has_left_only_when_moving_away() {
        let arena = Arena::new(100.0, 100.0);
        // Spawned off the left edge, swimming in
        let incoming = Body::new(Vec2::new(-30.0, 50.0), Vec2::new(10.0, 0.0), 10.0);
        assert!(!arena.has_left(&incoming));
        let outgoing = Body::new(Vec2::new(-30.0, 50.0), Vec2::new(-10.0, 0.0), 10.0);
        assert!(arena.has_left(&outgoing));
    }

    #[test]
    fn test_heading_defaults_right() {
        let body = Body::new(Vec2::ZERO, Vec2::ZERO, 1.0);
        assert_eq!(body.heading(), Vec2::X);
    }
}
