//! Game over screen. Records the run on the leaderboard.

use std::any::Any;

use glam::Vec2;

use super::{Context, Session, State, StateId};
use crate::audio::MusicTrack;
use crate::highscores::now_timestamp;
use crate::platform::{Event, Key};
use crate::renderer::{Canvas, Color};

/// Autopilot returns to the menu after this long
const RETURN_DELAY: f32 = 4.0;

#[derive(Debug, Default)]
pub struct GameOverState {
    shown: f32,
    left: bool,
}

impl GameOverState {
    pub fn new() -> Self {
        Self::default()
    }

    fn return_to_menu(&mut self, ctx: &mut Context) {
        if !self.left {
            self.left = true;
            ctx.switch_to(StateId::Menu);
        }
    }
}

impl State for GameOverState {
    fn handle_event(&mut self, event: &Event, ctx: &mut Context) {
        if let Event::KeyPressed(Key::Enter | Key::Space | Key::Escape) = event {
            self.return_to_menu(ctx);
        }
    }

    fn update(&mut self, dt: f32, ctx: &mut Context) -> bool {
        self.shown += dt;
        if ctx.session.settings.autopilot && self.shown >= RETURN_DELAY {
            self.return_to_menu(ctx);
        }
        false
    }

    fn render(&self, canvas: &mut dyn Canvas, session: &Session) {
        let center = session.arena.center();
        canvas.clear(Color::BLACK);
        canvas.text(center - Vec2::new(0.0, 80.0), 56.0, "GAME OVER");
        canvas.text(center, 24.0, &format!("Final score {}", session.total_points));
        if let Some(rank) = session.last_rank {
            canvas.text(center + Vec2::new(0.0, 40.0), 22.0, &format!("New high score! Rank #{}", rank));
        }
    }

    fn on_activate(&mut self, ctx: &mut Context) {
        let session = &mut *ctx.session;
        session.last_rank = session
            .high_scores
            .add_score(session.total_points, session.level, now_timestamp());
        if session.last_rank.is_some() {
            if let Err(e) = session.high_scores.save(&session.settings.highscores_path) {
                log::warn!("Failed to save high scores: {}", e);
            }
        }
        session.play_music(MusicTrack::GameOver);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScores;
    use crate::renderer::Frame;
    use crate::states::{StateAction, test_support};

    #[test]
    fn test_records_and_saves_score() {
        let mut session = test_support::session();
        session.total_points = 321;
        session.level = 2;
        let path = session.settings.highscores_path.clone();
        let mut actions = Vec::new();
        let mut state = GameOverState::new();
        state.on_activate(&mut test_support::context(&mut session, &mut actions));

        assert_eq!(session.last_rank, Some(1));
        assert_eq!(session.music, Some(MusicTrack::GameOver));
        let saved = HighScores::load(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(saved.top_score(), Some(321));

        let mut frame = Frame::new();
        state.render(&mut frame, &session);
        assert!(frame.texts().any(|t| t.contains("Rank #1")));
    }

    #[test]
    fn test_zero_score_not_recorded() {
        let mut session = test_support::session();
        let mut actions = Vec::new();
        GameOverState::new().on_activate(&mut test_support::context(&mut session, &mut actions));
        assert_eq!(session.last_rank, None);
        assert!(session.high_scores.is_empty());
    }

    #[test]
    fn test_returns_to_menu() {
        let mut session = test_support::session();
        let mut actions = Vec::new();
        let mut state = GameOverState::new();
        let mut ctx = test_support::context(&mut session, &mut actions);
        state.handle_event(&Event::KeyPressed(Key::Enter), &mut ctx);
        state.handle_event(&Event::KeyPressed(Key::Escape), &mut ctx);
        assert_eq!(actions, vec![StateAction::Clear, StateAction::Push(StateId::Menu)]);
    }
}
