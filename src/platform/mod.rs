//! Platform abstraction layer
//!
//! Windowing, input and presentation belong to the platform. The game only
//! sees:
//! - Input events (`Event`)
//! - Wall-clock frame deltas
//! - A place to present recorded frames

pub mod headless;

pub use headless::HeadlessPlatform;

use crate::error::Result;
use crate::renderer::Frame;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Space,
    Escape,
    P,
}

/// Input/window events
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Window closed; ends the game loop
    Closed,
    KeyPressed(Key),
    KeyReleased(Key),
    /// Window lost focus (auto-pause)
    FocusLost,
}

/// Everything the game loop needs from the host
pub trait Platform {
    /// Drain pending events for this frame
    fn poll_events(&mut self) -> Vec<Event>;
    /// Seconds since the previous call
    fn frame_delta(&mut self) -> f32;
    /// Show a finished frame
    fn present(&mut self, frame: &Frame) -> Result<()>;
}
