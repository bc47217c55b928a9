//! Title screen

use std::any::Any;

use glam::Vec2;

use super::{Context, Session, State, StateId};
use crate::audio::{MusicTrack, SoundEffect};
use crate::platform::{Event, Key};
use crate::renderer::{Canvas, Color};
use crate::resources::TextureId;

/// Seconds before the autopilot starts a demo run
const AUTOSTART_DELAY: f32 = 2.0;

#[derive(Debug, Default)]
pub struct MenuState {
    idle: f32,
    started: bool,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    fn start(&mut self, ctx: &mut Context) {
        if self.started {
            return;
        }
        self.started = true;
        ctx.session.new_run();
        ctx.session.play_sound(SoundEffect::MenuSelect);
        ctx.switch_to(StateId::Play);
    }
}

impl State for MenuState {
    fn handle_event(&mut self, event: &Event, ctx: &mut Context) {
        match event {
            Event::KeyPressed(Key::Enter | Key::Space) => self.start(ctx),
            Event::KeyPressed(Key::Escape) => {
                log::info!("Quit from menu");
                ctx.clear();
            }
            Event::KeyPressed(_) => self.idle = 0.0,
            _ => {}
        }
    }

    fn update(&mut self, dt: f32, ctx: &mut Context) -> bool {
        if ctx.session.settings.autopilot {
            self.idle += dt;
            if self.idle >= AUTOSTART_DELAY {
                self.start(ctx);
            }
        }
        false
    }

    fn render(&self, canvas: &mut dyn Canvas, session: &Session) {
        let center = session.arena.center();
        canvas.clear(Color::OCEAN);
        canvas.sprite(TextureId::Background, 0, center, 1.0, 0.0);
        canvas.text(center - Vec2::new(0.0, 120.0), 64.0, "FEEDING FRENZY");
        canvas.text(center, 28.0, "Press Enter to start");
        if let Some(best) = session.high_scores.top_score() {
            canvas.text(center + Vec2::new(0.0, 60.0), 22.0, &format!("High score {}", best));
        }
    }

    fn on_activate(&mut self, ctx: &mut Context) {
        self.idle = 0.0;
        ctx.session.play_music(MusicTrack::Menu);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
