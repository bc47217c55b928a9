//! Backend-agnostic rendering
//!
//! States and entities draw through the `Canvas` trait. The only built-in
//! canvas is `Frame`, which records draw commands for a platform to present
//! (or for tests to inspect).

use glam::Vec2;

use crate::resources::{FontId, TextureId};

/// RGBA color, 0-255 per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const WHITE: Color = Color(255, 255, 255, 255);
    pub const BLACK: Color = Color(0, 0, 0, 255);
    pub const OCEAN: Color = Color(12, 60, 110, 255);
    pub const PLAYER: Color = Color(255, 170, 40, 255);
    pub const PREY: Color = Color(120, 220, 120, 255);
    pub const PREDATOR: Color = Color(220, 60, 60, 255);
    pub const HAZARD: Color = Color(200, 90, 220, 255);
    pub const PICKUP: Color = Color(250, 240, 120, 255);
    pub const DIM: Color = Color(0, 0, 0, 140);

    /// Same color with a new alpha
    pub fn with_alpha(self, alpha: u8) -> Self {
        Color(self.0, self.1, self.2, alpha)
    }
}

/// One recorded drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Circle { pos: Vec2, radius: f32, color: Color },
    Sprite { texture: TextureId, frame: usize, pos: Vec2, scale: f32, rotation: f32 },
    Rect { pos: Vec2, size: Vec2, color: Color },
    Text { font: FontId, pos: Vec2, size: f32, text: String },
}

/// A drawing surface
pub trait Canvas {
    fn draw(&mut self, command: DrawCommand);

    fn clear(&mut self, color: Color) {
        self.draw(DrawCommand::Clear(color));
    }

    fn circle(&mut self, pos: Vec2, radius: f32, color: Color) {
        self.draw(DrawCommand::Circle { pos, radius, color });
    }

    fn sprite(&mut self, texture: TextureId, frame: usize, pos: Vec2, scale: f32, rotation: f32) {
        self.draw(DrawCommand::Sprite {
            texture,
            frame,
            pos,
            scale,
            rotation,
        });
    }

    fn rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.draw(DrawCommand::Rect { pos, size, color });
    }

    fn text(&mut self, pos: Vec2, size: f32, text: &str) {
        self.draw(DrawCommand::Text {
            font: FontId::Main,
            pos,
            size,
            text: text.to_string(),
        });
    }
}

/// Command list for one rendered frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture frames referenced by this frame, in draw order
    pub fn sprites(&self) -> impl Iterator<Item = (TextureId, usize)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Sprite { texture, frame, .. } => Some((*texture, *frame)),
            _ => None,
        })
    }

    /// All text drawn this frame, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Canvas for Frame {
    fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}
