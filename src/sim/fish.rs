//! Fish: prey and predators
//!
//! A fish's size tier decides who eats whom: the player eats fish whose tier
//! is below its stage, may tail-bite fish exactly one tier up, and is eaten
//! by anything else.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity, EntityKind, StepContext};
use crate::consts::*;
use crate::renderer::Canvas;
use crate::resources::TextureId;

/// Fish species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FishSpecies {
    Minnow,
    Angelfish,
    Snapper,
    Barracuda,
    Shark,
}

impl FishSpecies {
    pub const ALL: [FishSpecies; 5] = [
        FishSpecies::Minnow,
        FishSpecies::Angelfish,
        FishSpecies::Snapper,
        FishSpecies::Barracuda,
        FishSpecies::Shark,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FishSpecies::Minnow => "Minnow",
            FishSpecies::Angelfish => "Angelfish",
            FishSpecies::Snapper => "Snapper",
            FishSpecies::Barracuda => "Barracuda",
            FishSpecies::Shark => "Shark",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name().eq_ignore_ascii_case(name))
    }

    /// Size tier (0 = smallest)
    pub fn tier(&self) -> u8 {
        match self {
            FishSpecies::Minnow | FishSpecies::Angelfish => 0,
            FishSpecies::Snapper => 1,
            FishSpecies::Barracuda => 2,
            FishSpecies::Shark => 3,
        }
    }

    /// Growth measure awarded when eaten
    pub fn score_value(&self) -> u32 {
        match self {
            FishSpecies::Minnow => 2,
            FishSpecies::Angelfish => 3,
            FishSpecies::Snapper => 5,
            FishSpecies::Barracuda => 8,
            FishSpecies::Shark => 12,
        }
    }

    /// Score awarded when eaten
    pub fn points(&self) -> u64 {
        match self {
            FishSpecies::Minnow => 10,
            FishSpecies::Angelfish => 15,
            FishSpecies::Snapper => 30,
            FishSpecies::Barracuda => 60,
            FishSpecies::Shark => 120,
        }
    }

    pub fn radius(&self) -> f32 {
        match self {
            FishSpecies::Minnow => 10.0,
            FishSpecies::Angelfish => 13.0,
            FishSpecies::Snapper => 22.0,
            FishSpecies::Barracuda => 32.0,
            FishSpecies::Shark => 50.0,
        }
    }

    /// Swim speed (pixels/s)
    pub fn speed(&self) -> f32 {
        match self {
            FishSpecies::Minnow => 90.0,
            FishSpecies::Angelfish => 70.0,
            FishSpecies::Snapper => 100.0,
            FishSpecies::Barracuda => 140.0,
            FishSpecies::Shark => 110.0,
        }
    }

    pub fn texture(&self) -> TextureId {
        match self {
            FishSpecies::Minnow => TextureId::Minnow,
            FishSpecies::Angelfish => TextureId::Angelfish,
            FishSpecies::Snapper => TextureId::Snapper,
            FishSpecies::Barracuda => TextureId::Barracuda,
            FishSpecies::Shark => TextureId::Shark,
        }
    }
}

/// Vertical wiggle while swimming
const WIGGLE_AMPLITUDE: f32 = 12.0;
const WIGGLE_FREQUENCY: f32 = 1.5;
/// Animation frames per second
const SWIM_FPS: f32 = 8.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fish {
    pub body: Body,
    pub species: FishSpecies,
    /// Seconds until this fish can be tail-bitten again
    pub tail_bite_cooldown: f32,
    swim_time: f32,
}

impl Fish {
    /// A fish at `pos` swimming horizontally (`direction` sign picks the side)
    pub fn new(species: FishSpecies, pos: Vec2, direction: f32) -> Self {
        let vx = if direction < 0.0 { -species.speed() } else { species.speed() };
        Self {
            body: Body::new(pos, Vec2::new(vx, 0.0), species.radius()),
            species,
            tail_bite_cooldown: 0.0,
            swim_time: 0.0,
        }
    }

    pub fn tier(&self) -> u8 {
        self.species.tier()
    }

    /// Point at the back of the fish, opposite its heading
    pub fn tail_position(&self) -> Vec2 {
        self.body.pos - self.body.heading() * self.body.radius
    }

    pub fn can_be_tail_bitten(&self) -> bool {
        self.body.alive && self.tail_bite_cooldown <= 0.0
    }

    /// React to a tail bite: speed away and start the cooldown
    pub fn flee(&mut self) {
        self.tail_bite_cooldown = TAIL_BITE_COOLDOWN;
        self.body.vel *= FLEE_SPEED_MULTIPLIER;
    }
}

impl Entity for Fish {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Fish
    }

    fn update(&mut self, dt: f32, ctx: &StepContext) {
        self.tail_bite_cooldown = (self.tail_bite_cooldown - dt).max(0.0);
        if ctx.frozen {
            return;
        }

        self.swim_time += dt;
        let wiggle = (self.swim_time * WIGGLE_FREQUENCY * std::f32::consts::TAU).cos();
        self.body.vel.y = wiggle * WIGGLE_AMPLITUDE;
        self.body.integrate(dt);

        if ctx.arena.has_left(&self.body) {
            self.body.kill();
        }
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        let texture = self.species.texture();
        let frame = (self.swim_time * SWIM_FPS) as usize % texture.frame_count();
        let rotation = if self.body.vel.x < 0.0 { std::f32::consts::PI } else { 0.0 };
        canvas.sprite(texture, frame, self.body.pos, self.body.radius / 16.0, rotation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Arena;

    fn ctx(frozen: bool) -> StepContext {
        StepContext {
            arena: Arena::new(400.0, 300.0),
            frozen,
        }
    }

    #[test]
    fn test_names_round_trip() {
        for species in FishSpecies::ALL {
            assert_eq!(FishSpecies::from_name(species.name()), Some(species));
        }
        assert_eq!(FishSpecies::from_name("kraken"), None);
    }

    #[test]
    fn test_fish_swims_in_and_dies_past_far_edge() {
        let mut fish = Fish::new(FishSpecies::Minnow, Vec2::new(-15.0, 150.0), 1.0);
        fish.update(0.1, &ctx(false));
        assert!(fish.body.alive);
        assert!(fish.body.pos.x > -15.0);

        fish.body.pos.x = 430.0;
        fish.update(0.1, &ctx(false));
        assert!(!fish.body.alive);
    }

    #[test]
    fn test_frozen_fish_hold_still() {
        let mut fish = Fish::new(FishSpecies::Snapper, Vec2::new(100.0, 100.0), -1.0);
        fish.tail_bite_cooldown = 1.0;
        fish.update(0.5, &ctx(true));
        assert_eq!(fish.body.pos, Vec2::new(100.0, 100.0));
        assert!((fish.tail_bite_cooldown - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_tail_is_behind_heading() {
        let fish = Fish::new(FishSpecies::Barracuda, Vec2::new(100.0, 100.0), -1.0);
        // Swimming left, so the tail is on the right
        assert!(fish.tail_position().x > 100.0);
    }

    #[test]
    fn test_flee_starts_cooldown() {
        let mut fish = Fish::new(FishSpecies::Shark, Vec2::ZERO, 1.0);
        assert!(fish.can_be_tail_bitten());
        fish.flee();
        assert!(!fish.can_be_tail_bitten());
        assert!(fish.body.vel.x > FishSpecies::Shark.speed());
    }
}
