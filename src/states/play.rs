//! In-level gameplay
//!
//! Each step:
//! 1. Steer (keys or autopilot) and move the player
//! 2. Run the spawn timers
//! 3. Update actors, resolving player contact for each survivor
//! 4. Check stage advancement, then the level goal and game over

use std::any::Any;

use glam::Vec2;

use super::{Context, Session, State, StateId};
use crate::audio::{MusicTrack, SoundEffect};
use crate::consts::*;
use crate::levels::LevelDef;
use crate::platform::{Event, Key};
use crate::renderer::{Canvas, Color};
use crate::resources::TextureId;
use crate::sim::actor::Actor;
use crate::sim::collision::{circle_collision, is_behind};
use crate::sim::entity::{Arena, Entity, StepContext};
use crate::sim::hazard::{BombPhase, ContactEffect};
use crate::sim::manager::EntityManager;
use crate::sim::pickup::PickupKind;
use crate::sim::player::{Player, autopilot_target};
use crate::sim::spawn::SpawnController;

/// Fish placed at level start
const INITIAL_FISH: usize = 6;

pub struct PlayState {
    player: Player,
    actors: EntityManager<Actor>,
    spawner: SpawnController,
    level: LevelDef,
    arena: Arena,
    /// Seconds of Freeze left
    freeze_timer: f32,
    finished: bool,
    /// Pause pushed and not yet popped
    pausing: bool,
}

impl PlayState {
    pub fn new(session: &Session) -> Self {
        let level = session.levels.get(session.level);
        let arena = session.arena;

        let mut player = Player::new(
            arena.center(),
            session.lives,
            session.total_points,
            session.settings.quality.max_effects(),
        );
        player.input.autopilot = session.settings.autopilot;
        // Grace period so the opening population can't hit immediately
        player.status.invulnerable = INVULNERABILITY_DURATION;

        let mut actors = EntityManager::new();
        let mut spawner = SpawnController::new(session.level_seed());
        spawner.populate(INITIAL_FISH, &level, &arena, &mut actors);
        log::info!("Level {} started with {} fish", level.number, actors.len());

        Self {
            player,
            actors,
            spawner,
            level,
            arena,
            freeze_timer: 0.0,
            finished: false,
            pausing: false,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn actors(&self) -> &EntityManager<Actor> {
        &self.actors
    }

    pub fn actors_mut(&mut self) -> &mut EntityManager<Actor> {
        &mut self.actors
    }

    pub fn level(&self) -> &LevelDef {
        &self.level
    }

    pub fn is_frozen(&self) -> bool {
        self.freeze_timer > 0.0
    }

    /// Advance one simulation step. Returns the transition to request, if any.
    fn step(&mut self, dt: f32, sounds: &mut Vec<SoundEffect>) -> Option<StateId> {
        if self.player.input.autopilot {
            let target = autopilot_target(
                self.player.pos(),
                self.player.body.radius,
                self.player.stage(),
                &self.actors,
            );
            self.player.input.set_target(target);
        }

        let step = StepContext {
            arena: self.arena,
            frozen: self.is_frozen(),
        };
        self.player.update(dt, &step);
        self.freeze_timer = (self.freeze_timer - dt).max(0.0);

        self.spawner
            .update(dt, &self.level, &self.arena, &mut self.actors);

        let player = &mut self.player;
        let freeze_timer = &mut self.freeze_timer;
        self.actors
            .update_with(dt, &step, |actor| resolve_contact(player, actor, freeze_timer, sounds));

        if self.player.check_stage_advancement().is_some() {
            sounds.push(SoundEffect::Grow);
        }

        if self.player.growth.level_goal_reached() {
            sounds.push(SoundEffect::LevelComplete);
            return Some(StateId::BetweenLevel);
        }
        if self.player.is_game_over() {
            sounds.push(SoundEffect::GameOver);
            return Some(StateId::GameOver);
        }
        None
    }

    fn render_hud(&self, canvas: &mut dyn Canvas) {
        let growth = &self.player.growth;
        canvas.text(Vec2::new(16.0, 16.0), 20.0, &format!("Score {}", growth.score()));
        canvas.text(Vec2::new(16.0, 40.0), 20.0, &format!("Total {}", growth.total_points()));
        canvas.text(Vec2::new(200.0, 16.0), 20.0, &format!("Level {}", self.level.number));
        canvas.text(Vec2::new(320.0, 16.0), 20.0, &format!("Lives {}", self.player.lives()));

        // Growth meter
        let meter_pos = Vec2::new(self.arena.width - 216.0, 16.0);
        canvas.rect(meter_pos, Vec2::new(200.0, 12.0), Color::DIM);
        canvas.rect(meter_pos, Vec2::new(200.0 * growth.meter(), 12.0), Color::PLAYER);

        if self.is_frozen() {
            canvas.text(Vec2::new(16.0, 64.0), 18.0, "FROZEN");
        }
    }
}

/// Apply whatever happens when the player meets `actor` this step
fn resolve_contact(player: &mut Player, actor: &mut Actor, freeze_timer: &mut f32, sounds: &mut Vec<SoundEffect>) {
    if player.is_dead() {
        return;
    }

    let contact = circle_collision(
        player.body.pos,
        player.body.radius,
        actor.body().pos,
        actor.contact_radius(),
    );

    // Tail bites work at reach, without overlap
    if !contact.hit {
        if player.attempt_tail_bite(actor) {
            sounds.push(SoundEffect::Bite);
        }
        return;
    }

    match actor {
        Actor::Fish(fish) => {
            let threat = fish.tier() >= player.stage()
                && !is_behind(player.body.pos, fish.body.pos, fish.body.heading());
            if player.attempt_eat(actor) {
                sounds.push(SoundEffect::Eat);
            } else if player.attempt_tail_bite(actor) {
                sounds.push(SoundEffect::Bite);
            } else if threat && player.take_damage(1) {
                player.die();
                sounds.push(SoundEffect::Die);
            }
        }
        Actor::Hazard(hazard) => {
            let was_idle = hazard.bomb_phase() == Some(BombPhase::Idle);
            match hazard.contact() {
                ContactEffect::Damage(amount) => {
                    if was_idle {
                        sounds.push(SoundEffect::Explosion);
                    }
                    if player.take_damage(amount) {
                        sounds.push(if player.is_dead() { SoundEffect::Die } else { SoundEffect::Hurt });
                    }
                }
                ContactEffect::Stun(seconds) => {
                    if !player.status.is_stunned() && player.stun(seconds) {
                        sounds.push(SoundEffect::Stun);
                    }
                }
                ContactEffect::None => {}
            }
        }
        Actor::Pickup(_) => {
            if let Some(kind) = player.collect(actor) {
                if kind == PickupKind::Freeze {
                    *freeze_timer = FREEZE_DURATION;
                }
                log::debug!("Collected {}", kind.name());
                sounds.push(SoundEffect::PowerUp);
            }
        }
    }
}

impl State for PlayState {
    fn handle_event(&mut self, event: &Event, ctx: &mut Context) {
        match event {
            Event::KeyPressed(Key::Escape | Key::P) | Event::FocusLost => {
                // Several triggers can land in one frame before the push applies
                if !self.pausing {
                    self.pausing = true;
                    self.player.input.release_all();
                    ctx.push(StateId::Pause);
                }
            }
            Event::KeyPressed(key) => {
                // Any steering hands control back to the keyboard
                if self.player.input.handle_key(*key, true) && self.player.input.autopilot {
                    log::info!("Autopilot off");
                    self.player.input.autopilot = false;
                }
            }
            Event::KeyReleased(key) => {
                self.player.input.handle_key(*key, false);
            }
            _ => {}
        }
    }

    fn update(&mut self, dt: f32, ctx: &mut Context) -> bool {
        if self.finished {
            return false;
        }

        let transition = self.step(dt, &mut ctx.session.sounds);
        let Some(next) = transition else {
            return false;
        };

        self.finished = true;
        let session = &mut *ctx.session;
        session.total_points = self.player.growth.total_points();
        session.lives = self.player.lives();
        if next == StateId::BetweenLevel {
            session.level += 1;
            log::info!("Level {} cleared, {} points", self.level.number, session.total_points);
        } else {
            log::info!("Game over on level {}, {} points", self.level.number, session.total_points);
        }
        ctx.switch_to(next);
        false
    }

    fn render(&self, canvas: &mut dyn Canvas, session: &Session) {
        canvas.clear(Color::OCEAN);
        canvas.sprite(TextureId::Background, 0, session.arena.center(), 1.0, 0.0);
        self.actors.render(canvas);
        self.player.render(canvas);
        self.render_hud(canvas);
    }

    fn on_activate(&mut self, ctx: &mut Context) {
        self.pausing = false;
        ctx.session.play_music(MusicTrack::Play);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityKind;
    use crate::sim::fish::{Fish, FishSpecies};
    use crate::sim::hazard::Hazard;
    use crate::sim::pickup::Pickup;
    use crate::states::{StateAction, test_support};

    /// Level-1 play state with no actors and the autopilot off
    fn empty_play(session: &Session) -> PlayState {
        let mut play = PlayState::new(session);
        play.actors_mut().clear();
        play.player_mut().input.autopilot = false;
        play.player_mut().status.invulnerable = 0.0;
        play
    }

    fn session() -> Session {
        let mut session = test_support::session();
        session.settings.autopilot = false;
        session
    }

    #[test]
    fn test_new_level_is_populated() {
        let session = session();
        let play = PlayState::new(&session);
        assert!(play.actors().of_kind(EntityKind::Fish).count() > 0);
        assert_eq!(play.player().lives(), session.lives);
        assert!(play.player().status.is_invulnerable());
        assert_eq!(play.level().number, 1);
    }

    #[test]
    fn test_touching_prey_eats_it() {
        let mut session = session();
        let mut play = empty_play(&session);
        let pos = play.player().pos();
        play.actors_mut().add(Fish::new(FishSpecies::Minnow, pos, 1.0).into());

        let mut actions = Vec::new();
        play.update(SIM_DT, &mut test_support::context(&mut session, &mut actions));
        assert_eq!(play.actors().of_kind(EntityKind::Fish).count(), 0);
        assert_eq!(play.player().growth.score(), FishSpecies::Minnow.points());
        assert!(session.sounds.contains(&SoundEffect::Eat));
    }

    #[test]
    fn test_predator_costs_a_life_and_size() {
        let mut session = session();
        let mut play = empty_play(&session);
        let pos = play.player().pos();
        // Snapper swimming left, straight at the player
        play.actors_mut()
            .add(Fish::new(FishSpecies::Snapper, pos + Vec2::new(5.0, 0.0), -1.0).into());

        let mut actions = Vec::new();
        play.update(SIM_DT, &mut test_support::context(&mut session, &mut actions));
        assert_eq!(play.player().lives(), session.lives - 1);
        assert!(play.player().is_dead());
        assert!(session.sounds.contains(&SoundEffect::Die));
        assert!(actions.is_empty());
    }

    #[test]
    fn test_bomb_costs_a_life_but_keeps_size() {
        let mut session = session();
        let mut play = empty_play(&session);
        play.player_mut().add_points(STAGE_2_THRESHOLD);
        assert_eq!(play.player_mut().check_stage_advancement(), Some(2));
        let pos = play.player().pos();
        play.actors_mut().add(Hazard::bomb(pos).into());

        let mut actions = Vec::new();
        play.update(SIM_DT, &mut test_support::context(&mut session, &mut actions));
        assert_eq!(play.player().lives(), session.lives - 1);
        assert!(!play.player().is_dead());
        assert_eq!(play.player().stage(), 2);
        assert!(session.sounds.contains(&SoundEffect::Explosion));
        assert!(session.sounds.contains(&SoundEffect::Hurt));
    }

    #[test]
    fn test_freeze_pickup_stops_fish() {
        let mut session = session();
        let mut play = empty_play(&session);
        let pos = play.player().pos();
        play.actors_mut().add(Pickup::new(PickupKind::Freeze, pos).into());
        let far = Vec2::new(100.0, 100.0);
        let id = play.actors_mut().add(Fish::new(FishSpecies::Minnow, far, 1.0).into());

        let mut actions = Vec::new();
        play.update(SIM_DT, &mut test_support::context(&mut session, &mut actions));
        assert!(play.is_frozen());
        let before = play.actors().get(id).map(|a| a.body().pos);
        play.update(SIM_DT, &mut test_support::context(&mut session, &mut actions));
        assert_eq!(play.actors().get(id).map(|a| a.body().pos), before);
    }

    #[test]
    fn test_jellyfish_stuns() {
        let mut session = session();
        let mut play = empty_play(&session);
        let pos = play.player().pos();
        play.actors_mut().add(Hazard::jellyfish(pos, 1.0).into());

        let mut actions = Vec::new();
        play.update(SIM_DT, &mut test_support::context(&mut session, &mut actions));
        assert!(play.player().status.is_stunned());
        assert_eq!(play.player().lives(), session.lives);
        assert_eq!(session.sounds, vec![SoundEffect::Stun]);
    }

    #[test]
    fn test_level_goal_moves_to_between_level() {
        let mut session = session();
        let mut play = empty_play(&session);
        play.player_mut().add_points(STAGE_3_THRESHOLD);
        play.player_mut().check_stage_advancement();
        play.player_mut().check_stage_advancement();
        play.player_mut().growth.grow(LEVEL_GOAL_GROWTH as u32 + 10);

        let mut actions = Vec::new();
        assert!(!play.update(SIM_DT, &mut test_support::context(&mut session, &mut actions)));
        assert_eq!(
            actions,
            vec![StateAction::Clear, StateAction::Push(StateId::BetweenLevel)]
        );
        assert_eq!(session.level, 2);
        assert_eq!(session.total_points, STAGE_3_THRESHOLD);

        // Only requested once
        play.update(SIM_DT, &mut test_support::context(&mut session, &mut actions));
        assert_eq!(actions.len(), 2);
    }

    #[test]
    fn test_last_life_goes_to_game_over() {
        let mut session = session();
        session.lives = 1;
        let mut play = empty_play(&session);
        assert!(play.player_mut().take_damage(1));

        let mut actions = Vec::new();
        play.update(SIM_DT, &mut test_support::context(&mut session, &mut actions));
        assert_eq!(actions, vec![StateAction::Clear, StateAction::Push(StateId::GameOver)]);
        assert_eq!(session.lives, 0);
    }

    #[test]
    fn test_pause_keys_and_autopilot_handoff() {
        let mut session = test_support::session();
        session.settings.autopilot = true;
        let mut play = PlayState::new(&session);
        assert!(play.player().input.autopilot);

        let mut actions = Vec::new();
        let mut ctx = test_support::context(&mut session, &mut actions);
        play.handle_event(&Event::KeyPressed(Key::Left), &mut ctx);
        play.handle_event(&Event::FocusLost, &mut ctx);
        assert!(!play.player().input.autopilot);
        assert_eq!(actions, vec![StateAction::Push(StateId::Pause)]);
    }

    #[test]
    fn test_render_draws_world_and_hud() {
        let session = session();
        let play = PlayState::new(&session);
        let mut frame = crate::renderer::Frame::new();
        play.render(&mut frame, &session);
        assert!(frame.sprites().any(|(id, _)| id == TextureId::Background));
        assert!(frame.texts().any(|t| t.starts_with("Lives")));
    }
}
