//! World actors: everything in a level except the player

use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity, EntityKind, StepContext};
use super::fish::Fish;
use super::hazard::Hazard;
use super::pickup::Pickup;
use crate::renderer::Canvas;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Actor {
    Fish(Fish),
    Hazard(Hazard),
    Pickup(Pickup),
}

impl Actor {
    pub fn as_fish(&self) -> Option<&Fish> {
        match self {
            Actor::Fish(fish) => Some(fish),
            _ => None,
        }
    }

    pub fn as_fish_mut(&mut self) -> Option<&mut Fish> {
        match self {
            Actor::Fish(fish) => Some(fish),
            _ => None,
        }
    }

    pub fn as_hazard(&self) -> Option<&Hazard> {
        match self {
            Actor::Hazard(hazard) => Some(hazard),
            _ => None,
        }
    }

    pub fn as_pickup(&self) -> Option<&Pickup> {
        match self {
            Actor::Pickup(pickup) => Some(pickup),
            _ => None,
        }
    }
}

impl From<Fish> for Actor {
    fn from(fish: Fish) -> Self {
        Actor::Fish(fish)
    }
}

impl From<Hazard> for Actor {
    fn from(hazard: Hazard) -> Self {
        Actor::Hazard(hazard)
    }
}

impl From<Pickup> for Actor {
    fn from(pickup: Pickup) -> Self {
        Actor::Pickup(pickup)
    }
}

impl Entity for Actor {
    fn body(&self) -> &Body {
        match self {
            Actor::Fish(e) => e.body(),
            Actor::Hazard(e) => e.body(),
            Actor::Pickup(e) => e.body(),
        }
    }

    fn body_mut(&mut self) -> &mut Body {
        match self {
            Actor::Fish(e) => e.body_mut(),
            Actor::Hazard(e) => e.body_mut(),
            Actor::Pickup(e) => e.body_mut(),
        }
    }

    fn kind(&self) -> EntityKind {
        match self {
            Actor::Fish(e) => e.kind(),
            Actor::Hazard(e) => e.kind(),
            Actor::Pickup(e) => e.kind(),
        }
    }

    fn update(&mut self, dt: f32, ctx: &StepContext) {
        match self {
            Actor::Fish(e) => e.update(dt, ctx),
            Actor::Hazard(e) => e.update(dt, ctx),
            Actor::Pickup(e) => e.update(dt, ctx),
        }
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        match self {
            Actor::Fish(e) => e.render(canvas),
            Actor::Hazard(e) => e.render(canvas),
            Actor::Pickup(e) => e.render(canvas),
        }
    }

    fn contact_radius(&self) -> f32 {
        match self {
            Actor::Fish(e) => e.contact_radius(),
            Actor::Hazard(e) => e.contact_radius(),
            Actor::Pickup(e) => e.contact_radius(),
        }
    }
}
