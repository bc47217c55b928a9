//! Power-ups and bonus items

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity, EntityKind, StepContext};
use crate::consts::*;
use crate::renderer::Canvas;
use crate::resources::TextureId;

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    /// Temporary speed multiplier
    SpeedBoost,
    /// +1 life
    ExtraLife,
    /// Fish stop moving for a while
    Freeze,
    /// Reversed controls (a power-down)
    Poison,
    /// Bonus points
    Pearl,
}

impl PickupKind {
    pub const ALL: [PickupKind; 5] = [
        PickupKind::SpeedBoost,
        PickupKind::Pearl,
        PickupKind::Poison,
        PickupKind::ExtraLife,
        PickupKind::Freeze,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PickupKind::SpeedBoost => "SpeedBoost",
            PickupKind::ExtraLife => "ExtraLife",
            PickupKind::Freeze => "Freeze",
            PickupKind::Poison => "Poison",
            PickupKind::Pearl => "Pearl",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name().eq_ignore_ascii_case(name))
    }

    /// Pearls are bonus items; everything else is a power-up
    pub fn entity_kind(&self) -> EntityKind {
        match self {
            PickupKind::Pearl => EntityKind::BonusItem,
            _ => EntityKind::PowerUp,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub body: Body,
    pub kind: PickupKind,
    /// Seconds left before it vanishes
    pub ttl: f32,
}

impl Pickup {
    pub fn new(kind: PickupKind, pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, Vec2::new(0.0, -PICKUP_FLOAT_SPEED), PICKUP_RADIUS),
            kind,
            ttl: PICKUP_LIFETIME,
        }
    }
}

impl Entity for Pickup {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn kind(&self) -> EntityKind {
        self.kind.entity_kind()
    }

    fn update(&mut self, dt: f32, ctx: &StepContext) {
        self.ttl -= dt;
        self.body.integrate(dt);
        // Float up to the surface and stay there
        self.body.pos.y = self.body.pos.y.max(self.body.radius);
        if self.ttl <= 0.0 || ctx.arena.has_left(&self.body) {
            self.body.kill();
        }
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        let texture = match self.kind {
            PickupKind::Pearl => TextureId::Pearl,
            _ => TextureId::PowerUp,
        };
        canvas.sprite(texture, 0, self.body.pos, 1.0, 0.0);
    }
}
