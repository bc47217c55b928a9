//! Screen state stack
//!
//! States never touch the stack directly. They record `StateAction`s through
//! their `Context`, and `StateManager::apply_pending_changes` replays them in
//! submission order between simulation steps.

pub mod between_level;
pub mod game_over;
pub mod manager;
pub mod menu;
pub mod pause;
pub mod play;

pub use between_level::BetweenLevelState;
pub use game_over::GameOverState;
pub use manager::StateManager;
pub use menu::MenuState;
pub use pause::PauseState;
pub use play::PlayState;

use std::any::Any;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::audio::{MusicTrack, SoundEffect};
use crate::highscores::HighScores;
use crate::levels::LevelTable;
use crate::platform::Event;
use crate::renderer::Canvas;
use crate::settings::Settings;
use crate::sim::entity::Arena;

/// Registered screen identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateId {
    Menu,
    Play,
    Pause,
    BetweenLevel,
    GameOver,
}

/// Deferred stack mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateAction {
    Push(StateId),
    Pop,
    Clear,
}

/// Data shared by every state for the lifetime of the game
pub struct Session {
    pub settings: Settings,
    pub levels: Rc<LevelTable>,
    pub high_scores: HighScores,
    pub arena: Arena,

    // === Current run ===
    pub level: u32,
    pub lives: u8,
    pub total_points: u64,
    /// Leaderboard rank from the last finished run
    pub last_rank: Option<usize>,
    runs: u64,
    seed: u64,

    // === Audio requests, drained by the game loop ===
    pub sounds: Vec<SoundEffect>,
    pub music: Option<MusicTrack>,
}

impl Session {
    pub fn new(settings: Settings, levels: Rc<LevelTable>, high_scores: HighScores) -> Self {
        let seed = settings.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });
        log::info!("Session seed {}", seed);
        Self {
            arena: Arena::new(settings.window_width, settings.window_height),
            lives: settings.starting_lives,
            settings,
            levels,
            high_scores,
            level: 1,
            total_points: 0,
            last_rank: None,
            runs: 0,
            seed,
            sounds: Vec::new(),
            music: None,
        }
    }

    /// Reset run progress for a new game
    pub fn new_run(&mut self) {
        self.runs += 1;
        self.level = 1;
        self.lives = self.settings.starting_lives;
        self.total_points = 0;
        self.last_rank = None;
        log::info!("Run {} started", self.runs);
    }

    /// Deterministic seed for the current run and level
    pub fn level_seed(&self) -> u64 {
        self.seed ^ (self.runs << 32) ^ self.level as u64
    }

    pub fn play_sound(&mut self, effect: SoundEffect) {
        self.sounds.push(effect);
    }

    pub fn play_music(&mut self, track: MusicTrack) {
        self.music = Some(track);
    }
}

/// What a state sees during a callback
pub struct Context<'a> {
    pub session: &'a mut Session,
    actions: &'a mut Vec<StateAction>,
}

impl<'a> Context<'a> {
    pub(crate) fn new(session: &'a mut Session, actions: &'a mut Vec<StateAction>) -> Self {
        Self { session, actions }
    }

    pub fn push(&mut self, id: StateId) {
        self.actions.push(StateAction::Push(id));
    }

    pub fn pop(&mut self) {
        self.actions.push(StateAction::Pop);
    }

    pub fn clear(&mut self) {
        self.actions.push(StateAction::Clear);
    }

    /// Replace the whole stack with `id`
    pub fn switch_to(&mut self, id: StateId) {
        self.clear();
        self.push(id);
    }
}

/// One screen on the stack
pub trait State: Any {
    fn handle_event(&mut self, event: &Event, ctx: &mut Context);

    /// Return false to stop states beneath from updating
    fn update(&mut self, dt: f32, ctx: &mut Context) -> bool;

    fn render(&self, canvas: &mut dyn Canvas, session: &Session);

    /// Became the top of the stack
    fn on_activate(&mut self, _ctx: &mut Context) {}

    /// Popped off the stack
    fn on_deactivate(&mut self, _ctx: &mut Context) {}

    /// Opaque states hide everything beneath them
    fn is_opaque(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any;
}

/// Register every built-in screen
pub fn register_all(states: &mut StateManager) {
    states.register(StateId::Menu, |_| Box::new(MenuState::new()));
    states.register(StateId::Play, |session| Box::new(PlayState::new(session)));
    states.register(StateId::Pause, |_| Box::new(PauseState::new()));
    states.register(StateId::BetweenLevel, |session| Box::new(BetweenLevelState::new(session)));
    states.register(StateId::GameOver, |_| Box::new(GameOverState::new()));
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run_resets_progress() {
        let mut session = test_support::session();
        session.level = 4;
        session.total_points = 900;
        session.lives = 1;
        let seed = session.level_seed();
        session.new_run();
        assert_eq!((session.level, session.total_points), (1, 0));
        assert_eq!(session.lives, session.settings.starting_lives);
        assert_ne!(session.level_seed(), seed);
    }

    #[test]
    fn test_switch_to_records_clear_then_push() {
        let mut session = test_support::session();
        let mut actions = Vec::new();
        let mut ctx = test_support::context(&mut session, &mut actions);
        ctx.switch_to(StateId::Play);
        assert_eq!(actions, vec![StateAction::Clear, StateAction::Push(StateId::Play)]);
    }
}
