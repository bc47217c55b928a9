//! Interstitial shown before each new level

use std::any::Any;

use glam::Vec2;

use super::{Context, Session, State, StateId};
use crate::levels::LevelDef;
use crate::platform::{Event, Key};
use crate::renderer::{Canvas, Color};

/// Autopilot advances after this long
const AUTO_ADVANCE_DELAY: f32 = 3.0;

#[derive(Debug)]
pub struct BetweenLevelState {
    next: LevelDef,
    total_points: u64,
    shown: f32,
    advanced: bool,
}

impl BetweenLevelState {
    pub fn new(session: &Session) -> Self {
        Self {
            next: session.levels.get(session.level),
            total_points: session.total_points,
            shown: 0.0,
            advanced: false,
        }
    }

    pub fn next_level(&self) -> &LevelDef {
        &self.next
    }

    fn advance(&mut self, ctx: &mut Context) {
        if !self.advanced {
            self.advanced = true;
            ctx.switch_to(StateId::Play);
        }
    }
}

impl State for BetweenLevelState {
    fn handle_event(&mut self, event: &Event, ctx: &mut Context) {
        match event {
            Event::KeyPressed(Key::Enter | Key::Space) => self.advance(ctx),
            Event::KeyPressed(Key::Escape) => ctx.switch_to(StateId::Menu),
            _ => {}
        }
    }

    fn update(&mut self, dt: f32, ctx: &mut Context) -> bool {
        self.shown += dt;
        if ctx.session.settings.autopilot && self.shown >= AUTO_ADVANCE_DELAY {
            self.advance(ctx);
        }
        false
    }

    fn render(&self, canvas: &mut dyn Canvas, session: &Session) {
        let center = session.arena.center();
        canvas.clear(Color::BLACK);
        canvas.text(center - Vec2::new(0.0, 120.0), 48.0, &format!("Level {}", self.next.number));
        canvas.text(center - Vec2::new(0.0, 60.0), 22.0, self.next.goal);
        if !self.next.power_ups.is_empty() {
            let list = self.next.power_ups.join(", ");
            canvas.text(center, 18.0, &format!("Power-ups: {}", list));
        }
        canvas.text(center + Vec2::new(0.0, 60.0), 22.0, &format!("Total {}", self.total_points));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Frame;
    use crate::states::{StateAction, test_support};

    #[test]
    fn test_shows_upcoming_level() {
        let mut session = test_support::session();
        session.level = 2;
        let state = BetweenLevelState::new(&session);
        assert_eq!(state.next_level().number, 2);

        let mut frame = Frame::new();
        state.render(&mut frame, &session);
        assert!(frame.texts().any(|t| t == "Level 2"));
        assert!(frame.texts().any(|t| t.contains("Poison")));
    }

    #[test]
    fn test_enter_advances_once() {
        let mut session = test_support::session();
        session.settings.autopilot = true;
        let mut state = BetweenLevelState::new(&session);
        let mut actions = Vec::new();
        let mut ctx = test_support::context(&mut session, &mut actions);
        state.handle_event(&Event::KeyPressed(Key::Enter), &mut ctx);
        state.update(AUTO_ADVANCE_DELAY + 1.0, &mut ctx);
        assert_eq!(actions, vec![StateAction::Clear, StateAction::Push(StateId::Play)]);
    }
}
