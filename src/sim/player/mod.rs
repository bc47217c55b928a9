//! The player fish
//!
//! `Player` owns its body and four helpers. Helpers never see the player:
//! each gets only the data it works on (`Growth` the counters, `Status` the
//! timers, `PlayerInput` the keys and a position, `Effects` its own list) and
//! `Player` applies their results to the body.

pub mod effects;
pub mod growth;
pub mod input;
pub mod status;

pub use effects::{EffectKind, Effects, VisualEffect};
pub use growth::{Growth, growth_for, radius_for_stage};
pub use input::{PlayerInput, autopilot_target};
pub use status::Status;

use glam::Vec2;

use super::actor::Actor;
use super::collision::{edge_distance, is_behind};
use super::entity::{Body, Entity, EntityKind, StepContext};
use super::pickup::PickupKind;
use crate::consts::*;
use crate::renderer::Canvas;
use crate::resources::TextureId;

const SWIM_FPS: f32 = 10.0;

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub input: PlayerInput,
    pub growth: Growth,
    pub status: Status,
    pub effects: Effects,
    spawn_point: Vec2,
    anim_time: f32,
    facing_left: bool,
}

impl Player {
    pub fn new(spawn_point: Vec2, lives: u8, total_points: u64, max_effects: usize) -> Self {
        let growth = Growth::with_total_points(total_points);
        Self {
            body: Body::new(spawn_point, Vec2::ZERO, growth.radius()),
            input: PlayerInput::default(),
            growth,
            status: Status::new(lives),
            effects: Effects::new(max_effects),
            spawn_point,
            anim_time: 0.0,
            facing_left: false,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    pub fn stage(&self) -> u8 {
        self.growth.stage()
    }

    pub fn lives(&self) -> u8 {
        self.status.lives
    }

    pub fn is_dead(&self) -> bool {
        self.status.dead
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over()
    }

    // === Growth ===

    /// Feed the growth meter for an eaten fish's score value
    pub fn grow(&mut self, score_value: u32) -> f32 {
        let delta = self.growth.grow(score_value);
        self.effects.push(EffectKind::Eat);
        delta
    }

    pub fn add_points(&mut self, points: u64) {
        self.growth.add_points(points);
    }

    /// Advance at most one stage, resizing the body
    pub fn check_stage_advancement(&mut self) -> Option<u8> {
        let stage = self.growth.check_stage_advancement()?;
        self.body.radius = self.growth.radius();
        self.effects.push(EffectKind::Grow);
        log::info!("Player reached stage {} (radius {:.1})", stage, self.body.radius);
        Some(stage)
    }

    pub fn reset_size(&mut self) {
        self.growth.reset_size();
        self.body.radius = self.growth.radius();
    }

    /// Fresh run: points, lives, effects and position
    pub fn full_reset(&mut self, lives: u8) {
        self.growth.full_reset();
        self.status.full_reset(lives);
        self.effects.clear();
        self.input.release_all();
        self.body = Body::new(self.spawn_point, Vec2::ZERO, self.growth.radius());
    }

    // === Eating ===

    /// Edible fish, strictly smaller size class than the player's stage
    pub fn can_eat(&self, target: &Actor) -> bool {
        if self.is_dead() {
            return false;
        }
        match target {
            Actor::Fish(fish) => fish.body.alive && self.stage() > fish.tier(),
            _ => false,
        }
    }

    pub fn attempt_eat(&mut self, target: &mut Actor) -> bool {
        if !self.can_eat(target) {
            return false;
        }
        let Some(fish) = target.as_fish_mut() else {
            return false;
        };
        fish.body.kill();
        let (score_value, points) = (fish.species.score_value(), fish.species.points());
        log::debug!("Ate {:?} {:?}", fish.species, fish.body.id);
        self.grow(score_value);
        self.add_points(points);
        true
    }

    /// Bite the tail of a fish one size class up, from behind
    pub fn can_tail_bite(&self, target: &Actor) -> bool {
        if self.is_dead() || !self.growth.can_tail_bite() {
            return false;
        }
        let Actor::Fish(fish) = target else {
            return false;
        };
        fish.can_be_tail_bitten()
            && fish.tier() == self.stage()
            && is_behind(self.body.pos, fish.body.pos, fish.body.heading())
            && edge_distance(self.body.pos, self.body.radius, fish.tail_position()) <= TAIL_BITE_REACH
    }

    pub fn attempt_tail_bite(&mut self, target: &mut Actor) -> bool {
        if !self.can_tail_bite(target) {
            return false;
        }
        let Some(fish) = target.as_fish_mut() else {
            return false;
        };
        fish.flee();
        log::debug!("Tail-bit {:?} {:?}", fish.species, fish.body.id);
        self.add_points(TAIL_BITE_POINTS);
        self.effects.push(EffectKind::Eat);
        true
    }

    // === Status ===

    /// Lose a life unless invulnerable or cooling down
    pub fn take_damage(&mut self, amount: u8) -> bool {
        if !self.status.take_damage(amount) {
            return false;
        }
        self.effects.push(EffectKind::Hurt);
        log::debug!("Player hit, {} lives left", self.status.lives);
        if self.status.lives == 0 {
            self.die();
        }
        true
    }

    pub fn stun(&mut self, seconds: f32) -> bool {
        self.status.stun(seconds)
    }

    /// Returns false if already dead
    pub fn die(&mut self) -> bool {
        if !self.status.die() {
            return false;
        }
        self.reset_size();
        self.body.vel = Vec2::ZERO;
        self.effects.clear();
        self.input.release_all();
        log::info!("Player died ({} lives left)", self.status.lives);
        true
    }

    /// Returns false unless dead with lives remaining
    pub fn respawn(&mut self) -> bool {
        if !self.status.respawn() {
            return false;
        }
        self.body.pos = self.spawn_point;
        self.body.vel = Vec2::ZERO;
        log::debug!("Player respawned");
        true
    }

    /// Collect a pickup and apply its personal effect. Freeze affects the
    /// world, so it is only reported back.
    pub fn collect(&mut self, target: &mut Actor) -> Option<PickupKind> {
        if self.is_dead() {
            return None;
        }
        let Actor::Pickup(pickup) = target else {
            return None;
        };
        if !pickup.body.alive {
            return None;
        }
        pickup.body.kill();
        match pickup.kind {
            PickupKind::SpeedBoost => self.status.boost_speed(),
            PickupKind::ExtraLife => {
                self.status.add_life();
            }
            PickupKind::Poison => self.status.poison(),
            PickupKind::Pearl => self.add_points(PEARL_POINTS),
            PickupKind::Freeze => {}
        }
        self.effects.push(EffectKind::PowerUp);
        Some(pickup.kind)
    }
}

impl Entity for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Player
    }

    fn update(&mut self, dt: f32, ctx: &StepContext) {
        if self.status.tick(dt) {
            self.respawn();
        }
        self.effects.update(dt);
        self.anim_time += dt;

        if self.status.dead || self.status.is_stunned() {
            self.body.vel = Vec2::ZERO;
            return;
        }

        let dir = self.input.intent(self.body.pos, self.status.poisoned);
        self.body.vel = dir * PLAYER_SPEED * self.status.speed_multiplier;
        self.body.integrate(dt);
        self.body.pos = ctx.arena.clamp(self.body.pos, self.body.radius);
        if dir.x != 0.0 {
            self.facing_left = dir.x < 0.0;
        }
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        if self.status.dead {
            return;
        }
        // Blink while invulnerable
        if self.status.is_invulnerable() && (self.anim_time * 10.0) as u32 % 2 == 1 {
            return;
        }
        let frame = (self.anim_time * SWIM_FPS) as usize % TextureId::Player.frame_count();
        let flip = if self.facing_left { std::f32::consts::PI } else { 0.0 };
        let scale = self.body.radius / PLAYER_BASE_RADIUS * self.effects.scale();
        canvas.sprite(TextureId::Player, frame, self.body.pos, scale, flip + self.effects.rotation());
        if let Some(tint) = self.effects.tint() {
            canvas.circle(self.body.pos, self.body.radius * scale, tint);
        }
    }
}
