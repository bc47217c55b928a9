//! Pause overlay. Transparent, and blocks updates beneath it.

use std::any::Any;

use glam::Vec2;

use super::{Context, Session, State, StateId};
use crate::platform::{Event, Key};
use crate::renderer::{Canvas, Color};

#[derive(Debug, Default)]
pub struct PauseState;

impl PauseState {
    pub fn new() -> Self {
        Self
    }
}

impl State for PauseState {
    fn handle_event(&mut self, event: &Event, ctx: &mut Context) {
        match event {
            Event::KeyPressed(Key::Escape | Key::P) => ctx.pop(),
            Event::KeyPressed(Key::Enter) => ctx.switch_to(StateId::Menu),
            _ => {}
        }
    }

    fn update(&mut self, _dt: f32, _ctx: &mut Context) -> bool {
        false
    }

    fn render(&self, canvas: &mut dyn Canvas, session: &Session) {
        let arena = session.arena;
        canvas.rect(Vec2::ZERO, Vec2::new(arena.width, arena.height), Color::DIM);
        canvas.text(arena.center(), 48.0, "PAUSED");
        canvas.text(arena.center() + Vec2::new(0.0, 50.0), 20.0, "P to resume, Enter for menu");
    }

    fn is_opaque(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
