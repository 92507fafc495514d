//! Native-to-neutral event translation state shared by all backends.
//!
//! Backends call the `key_*` / `mouse_*` / window methods while pumping their
//! native queue, then [`EventBridge::run_frame`] once per frame to hand the
//! collected events to the program.

use kiln_core::math::{IVec2, UVec2};
use kiln_core::{Cursor, Event, EventQueue, FrameClock, Key, KeyState, MouseButton};

use crate::program::{Frame, LoopControl, Program};

/// What the backend has to do after a program update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameOutcome {
    pub control: LoopControl,
    /// Set when the program asked for a cursor other than the one showing.
    pub cursor: Option<Cursor>,
}

pub struct EventBridge {
    queue: EventQueue,
    keys: KeyState,
    clock: FrameClock,
    mouse_position: IVec2,
    size: UVec2,
    cursor: Cursor,
}

impl EventBridge {
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: EventQueue::with_capacity(capacity),
            keys: KeyState::new(),
            clock: FrameClock::new(),
            mouse_position: IVec2::ZERO,
            size: UVec2::ZERO,
            cursor: Cursor::default(),
        }
    }

    /// Records a press. Auto-repeat presses queue another `KeyDown`.
    pub fn key_down(&mut self, key: Key) {
        self.keys.press(key);
        self.queue.push(Event::KeyDown(key));
    }

    pub fn key_up(&mut self, key: Key) {
        self.keys.release(key);
        self.queue.push(Event::KeyUp(key));
    }

    pub fn mouse_button(&mut self, button: MouseButton, pressed: bool, position: IVec2) {
        self.mouse_position = position;
        let event = if pressed {
            Event::MouseDown { button, position }
        } else {
            Event::MouseUp { button, position }
        };
        self.queue.push(event);
    }

    pub fn mouse_move(&mut self, position: IVec2) {
        let delta = position - self.mouse_position;
        self.mouse_position = position;
        self.queue.push(Event::MouseMove { position, delta });
    }

    pub fn mouse_position(&self) -> IVec2 {
        self.mouse_position
    }

    pub fn resize(&mut self, size: UVec2) {
        self.size = size;
        self.queue.push(Event::Resize(size));
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn close(&mut self) {
        self.queue.push(Event::Close);
    }

    /// Releases every held key; no `KeyUp` events are queued.
    pub fn focus_lost(&mut self) {
        let released = self.keys.release_all();
        if released > 0 {
            log::debug!("Focus lost, released {released} held key(s)");
        }
        self.queue.push(Event::FocusLost);
    }

    pub fn keys(&self) -> &KeyState {
        &self.keys
    }

    pub fn events(&self) -> &[Event] {
        self.queue.as_slice()
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Ticks the clock to `now` seconds, runs the program's update over the
    /// queued events and clears the queue.
    pub fn run_frame<P: Program>(&mut self, program: &mut P, now: f64) -> FrameOutcome {
        self.clock.tick(now);

        let mut frame = Frame::new(self.queue.as_slice(), &self.keys, self.size);
        frame.dt = self.clock.real_dt;
        frame.fps = self.clock.smoothed_fps;
        frame.frame_number = self.clock.frame_count;
        let control = program.update(&mut frame);
        let requested = frame.requested_cursor();

        self.queue.clear();

        let cursor = match requested {
            Some(cursor) if cursor != self.cursor => {
                self.cursor = cursor;
                Some(cursor)
            }
            _ => None,
        };
        FrameOutcome { control, cursor }
    }
}
