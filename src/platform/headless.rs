//! Headless platform: fixed frame delta, scripted input, no window
//!
//! Used by the native binary (attract/demo runs) and by tests that drive the
//! full game loop.

use std::collections::VecDeque;

use super::{Event, Platform};
use crate::error::Result;
use crate::renderer::Frame;

pub struct HeadlessPlatform {
    frame_dt: f32,
    frame_index: u64,
    max_frames: Option<u64>,
    /// (frame, event) pairs, sorted by frame
    script: VecDeque<(u64, Event)>,
    last_frame: Option<Frame>,
}

impl HeadlessPlatform {
    pub fn new(frame_dt: f32, max_frames: Option<u64>) -> Self {
        Self {
            frame_dt,
            frame_index: 0,
            max_frames,
            script: VecDeque::new(),
            last_frame: None,
        }
    }

    /// Queue `event` for delivery at the start of `frame`
    pub fn schedule(&mut self, frame: u64, event: Event) {
        let pos = self
            .script
            .iter()
            .position(|(f, _)| *f > frame)
            .unwrap_or(self.script.len());
        self.script.insert(pos, (frame, event));
    }

    /// Frames presented so far
    pub fn frames_presented(&self) -> u64 {
        self.frame_index
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }
}

impl Platform for HeadlessPlatform {
    fn poll_events(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        while let Some((frame, _)) = self.script.front() {
            if *frame > self.frame_index {
                break;
            }
            if let Some((_, event)) = self.script.pop_front() {
                events.push(event);
            }
        }
        if self.max_frames.is_some_and(|max| self.frame_index >= max) {
            events.push(Event::Closed);
        }
        events
    }

    fn frame_delta(&mut self) -> f32 {
        self.frame_dt
    }

    fn present(&mut self, frame: &Frame) -> Result<()> {
        self.frame_index += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Key;

    #[test]
    fn test_scripted_events_arrive_in_order() {
        let mut platform = HeadlessPlatform::new(1.0 / 60.0, Some(3));
        platform.schedule(1, Event::KeyPressed(Key::Enter));
        platform.schedule(0, Event::KeyPressed(Key::Up));
        platform.schedule(1, Event::KeyReleased(Key::Enter));

        assert_eq!(platform.poll_events(), vec![Event::KeyPressed(Key::Up)]);
        platform.present(&Frame::new()).unwrap();
        assert_eq!(
            platform.poll_events(),
            vec![Event::KeyPressed(Key::Enter), Event::KeyReleased(Key::Enter)]
        );
        platform.present(&Frame::new()).unwrap();
        assert!(platform.poll_events().is_empty());
        platform.present(&Frame::new()).unwrap();
        assert_eq!(platform.poll_events(), vec![Event::Closed]);
        assert_eq!(platform.frames_presented(), 3);
    }
}
