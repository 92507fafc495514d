//! The contract between a backend and user code.
//!
//! A backend opens the window and GL context from a [`PlatformConfig`], calls
//! [`Program::init`] once, then runs one frame per iteration of its main loop:
//!
//!   1. pump native events into the event bridge
//!   2. [`Program::update`] with the frame's events and key state
//!   3. [`Program::draw`], then swap buffers
//!
//! The loop ends when `update` returns [`LoopControl::Exit`].

use kiln_core::math::UVec2;
use kiln_core::{Cursor, Event, KeyState};

use crate::config::PlatformConfig;
use crate::error::PlatformError;

/// Handed to [`Program::init`] once the GL context is current.
pub struct Context<'a> {
    pub gl: &'a glow::Context,
    pub config: &'a PlatformConfig,
    /// Drawable size in physical pixels.
    pub size: UVec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// One frame's view of the platform.
pub struct Frame<'a> {
    pub events: &'a [Event],
    pub keys: &'a KeyState,
    pub size: UVec2,
    /// Seconds since the previous frame, clamped after stalls.
    pub dt: f64,
    pub fps: f64,
    pub frame_number: u64,
    cursor: Option<Cursor>,
}

impl<'a> Frame<'a> {
    pub fn new(events: &'a [Event], keys: &'a KeyState, size: UVec2) -> Self {
        Self {
            events,
            keys,
            size,
            dt: 0.0,
            fps: 0.0,
            frame_number: 0,
            cursor: None,
        }
    }

    /// Asks the backend to show `cursor` once this frame's update returns.
    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = Some(cursor);
    }

    pub fn requested_cursor(&self) -> Option<Cursor> {
        self.cursor
    }

    pub fn close_requested(&self) -> bool {
        self.events.contains(&Event::Close)
    }
}

pub trait Program: Sized + 'static {
    fn init(ctx: &mut Context<'_>) -> Result<Self, PlatformError>;

    fn update(&mut self, frame: &mut Frame<'_>) -> LoopControl;

    fn draw(&mut self, gl: &glow::Context);
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::Key;

    #[test]
    fn frame_reports_close() {
        let keys = KeyState::new();
        let events = [Event::KeyDown(Key::SPACE), Event::Close];
        let frame = Frame::new(&events, &keys, UVec2::new(4, 4));
        assert!(frame.close_requested());

        let frame = Frame::new(&events[..1], &keys, UVec2::new(4, 4));
        assert!(!frame.close_requested());
    }

    #[test]
    fn cursor_request_is_last_write() {
        let keys = KeyState::new();
        let mut frame = Frame::new(&[], &keys, UVec2::ZERO);
        assert_eq!(frame.requested_cursor(), None);
        frame.set_cursor(Cursor::Wait);
        frame.set_cursor(Cursor::Pointer);
        assert_eq!(frame.requested_cursor(), Some(Cursor::Pointer));
    }
}
