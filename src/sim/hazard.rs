//! Hazards: bombs and jellyfish
//!
//! Bomb phases run Idle → Exploding → Puffs → Smoke → Done. An idle bomb goes
//! off when the player touches it or its fuse runs out, whichever is first.
//! Only the Exploding phase hurts, and it uses the growing blast radius for
//! contact checks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity, EntityKind, StepContext};
use crate::consts::*;
use crate::renderer::{Canvas, Color};
use crate::resources::TextureId;

/// Hazard types, for spawn selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    Jellyfish,
    Bomb,
}

impl HazardKind {
    pub const ALL: [HazardKind; 2] = [HazardKind::Jellyfish, HazardKind::Bomb];

    /// First level this hazard appears on
    pub fn min_level(&self) -> u32 {
        match self {
            HazardKind::Jellyfish => 1,
            HazardKind::Bomb => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BombPhase {
    Idle,
    Exploding,
    Puffs,
    Smoke,
    Done,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bomb {
    pub phase: BombPhase,
    pub fuse: f32,
    /// Time spent in the current phase
    pub timer: f32,
    pub blast_radius: f32,
}

impl Bomb {
    pub fn new() -> Self {
        Self::with_fuse(BOMB_FUSE)
    }

    pub fn with_fuse(fuse: f32) -> Self {
        Self {
            phase: BombPhase::Idle,
            fuse,
            timer: 0.0,
            blast_radius: 0.0,
        }
    }

    /// Start the explosion; returns false if already past Idle
    pub fn detonate(&mut self) -> bool {
        if self.phase != BombPhase::Idle {
            return false;
        }
        self.phase = BombPhase::Exploding;
        self.timer = 0.0;
        self.blast_radius = 0.0;
        true
    }

    /// Advance phase timers
    pub fn tick(&mut self, dt: f32) {
        self.timer += dt;
        match self.phase {
            BombPhase::Idle => {
                if self.timer >= self.fuse {
                    self.detonate();
                }
            }
            BombPhase::Exploding => {
                let t = (self.timer / BOMB_EXPLODE_DURATION).min(1.0);
                self.blast_radius = BOMB_BLAST_RADIUS * t;
                if self.timer >= BOMB_EXPLODE_DURATION {
                    self.enter(BombPhase::Puffs);
                }
            }
            BombPhase::Puffs => {
                if self.timer >= BOMB_PUFFS_DURATION {
                    self.enter(BombPhase::Smoke);
                }
            }
            BombPhase::Smoke => {
                if self.timer >= BOMB_SMOKE_DURATION {
                    self.enter(BombPhase::Done);
                }
            }
            BombPhase::Done => {}
        }
    }

    fn enter(&mut self, phase: BombPhase) {
        self.phase = phase;
        self.timer = 0.0;
    }
}

impl Default for Bomb {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jellyfish {
    pub base_y: f32,
    pub age: f32,
}

/// Behaviour-specific state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HazardState {
    Bomb(Bomb),
    Jellyfish(Jellyfish),
}

/// What touching a hazard does to the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactEffect {
    None,
    Damage(u8),
    Stun(f32),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub body: Body,
    pub damage: u8,
    pub state: HazardState,
}

impl Hazard {
    pub fn bomb(pos: Vec2) -> Self {
        Self::bomb_with_fuse(pos, BOMB_FUSE)
    }

    pub fn bomb_with_fuse(pos: Vec2, fuse: f32) -> Self {
        Self {
            body: Body::new(pos, Vec2::new(0.0, BOMB_SINK_SPEED), BOMB_RADIUS),
            damage: BOMB_DAMAGE,
            state: HazardState::Bomb(Bomb::with_fuse(fuse)),
        }
    }

    /// A jellyfish drifting horizontally (`direction` sign picks the side)
    pub fn jellyfish(pos: Vec2, direction: f32) -> Self {
        let vx = if direction < 0.0 { -JELLYFISH_DRIFT_SPEED } else { JELLYFISH_DRIFT_SPEED };
        Self {
            body: Body::new(pos, Vec2::new(vx, 0.0), JELLYFISH_RADIUS),
            damage: JELLYFISH_DAMAGE,
            state: HazardState::Jellyfish(Jellyfish {
                base_y: pos.y,
                age: 0.0,
            }),
        }
    }

    pub fn hazard_kind(&self) -> HazardKind {
        match self.state {
            HazardState::Bomb(_) => HazardKind::Bomb,
            HazardState::Jellyfish(_) => HazardKind::Jellyfish,
        }
    }

    pub fn bomb_phase(&self) -> Option<BombPhase> {
        match &self.state {
            HazardState::Bomb(bomb) => Some(bomb.phase),
            HazardState::Jellyfish(_) => None,
        }
    }

    /// Whether touching this hazard currently does anything
    pub fn is_active(&self) -> bool {
        match &self.state {
            HazardState::Bomb(bomb) => matches!(bomb.phase, BombPhase::Idle | BombPhase::Exploding),
            HazardState::Jellyfish(_) => self.body.alive,
        }
    }

    /// Resolve player contact. Touching an idle bomb sets it off.
    pub fn contact(&mut self) -> ContactEffect {
        match &mut self.state {
            HazardState::Bomb(bomb) => match bomb.phase {
                BombPhase::Idle => {
                    bomb.detonate();
                    log::debug!("Bomb {:?} set off by contact", self.body.id);
                    ContactEffect::Damage(self.damage)
                }
                BombPhase::Exploding => ContactEffect::Damage(self.damage),
                _ => ContactEffect::None,
            },
            HazardState::Jellyfish(_) => ContactEffect::Stun(JELLYFISH_STUN),
        }
    }
}

impl Entity for Hazard {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Hazard
    }

    fn contact_radius(&self) -> f32 {
        match &self.state {
            HazardState::Bomb(bomb) => match bomb.phase {
                BombPhase::Idle => self.body.radius,
                BombPhase::Exploding => bomb.blast_radius.max(self.body.radius),
                _ => 0.0,
            },
            HazardState::Jellyfish(_) => self.body.radius,
        }
    }

    fn update(&mut self, dt: f32, ctx: &StepContext) {
        match &mut self.state {
            HazardState::Bomb(bomb) => {
                if bomb.phase == BombPhase::Idle {
                    self.body.integrate(dt);
                    // Hitting the sea floor sets it off
                    if self.body.pos.y + self.body.radius >= ctx.arena.height {
                        self.body.pos.y = ctx.arena.height - self.body.radius;
                        bomb.detonate();
                    }
                }
                bomb.tick(dt);
                if bomb.phase == BombPhase::Done {
                    self.body.kill();
                }
            }
            HazardState::Jellyfish(jelly) => {
                jelly.age += dt;
                self.body.pos.x += self.body.vel.x * dt;
                let bob = (jelly.age * JELLYFISH_BOB_FREQUENCY).sin() * JELLYFISH_BOB_AMPLITUDE;
                self.body.pos.y = jelly.base_y + bob;
                if jelly.age >= JELLYFISH_LIFETIME || ctx.arena.has_left(&self.body) {
                    self.body.kill();
                }
            }
        }
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        match &self.state {
            HazardState::Bomb(bomb) => {
                let frame = match bomb.phase {
                    BombPhase::Idle => 0,
                    BombPhase::Exploding => 1,
                    BombPhase::Puffs => 2,
                    BombPhase::Smoke => 3,
                    BombPhase::Done => 4,
                };
                canvas.sprite(TextureId::Bomb, frame, self.body.pos, 1.0, 0.0);
                if bomb.phase == BombPhase::Exploding {
                    canvas.circle(self.body.pos, bomb.blast_radius, Color::HAZARD.with_alpha(120));
                }
            }
            HazardState::Jellyfish(jelly) => {
                let frames = TextureId::Jellyfish.frame_count();
                let frame = (jelly.age * 6.0) as usize % frames;
                canvas.sprite(TextureId::Jellyfish, frame, self.body.pos, 1.0, 0.0);
            }
        }
    }
}
