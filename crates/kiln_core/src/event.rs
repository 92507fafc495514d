//! Backend-neutral window/input events and the bounded per-frame queue.
//!
//! Backends translate native events into [`Event`] values and push them into an
//! [`EventQueue`]. Once per frame the queued slice is handed to user code and
//! the queue is cleared. The queue never grows past its capacity: extra events
//! are dropped and counted, with one exception: [`Event::Close`] is always
//! accepted, at most once per frame, so a full queue can never swallow a
//! close request.

use glam::{IVec2, UVec2};

use crate::input::Key;

/// Default queue capacity.
pub const MAX_EVENTS_PER_FRAME: usize = 256;

/// Largest capacity a queue preallocates for.
pub const MAX_EVENT_CAPACITY: usize = 65_536;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    KeyDown(Key),
    KeyUp(Key),
    MouseDown { button: MouseButton, position: IVec2 },
    MouseUp { button: MouseButton, position: IVec2 },
    /// `delta` is relative to the previous mouse position the backend reported.
    MouseMove { position: IVec2, delta: IVec2 },
    /// New drawable size in physical pixels.
    Resize(UVec2),
    Close,
    FocusLost,
}

#[derive(Debug)]
pub struct EventQueue {
    events: Vec<Event>,
    capacity: usize,
    dropped: usize,
    close_queued: bool,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::with_capacity(MAX_EVENTS_PER_FRAME)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            // One spare slot for a close request arriving on a full queue.
            events: Vec::with_capacity(capacity.min(MAX_EVENT_CAPACITY).saturating_add(1)),
            capacity,
            dropped: 0,
            close_queued: false,
        }
    }

    /// Appends `event`. Returns false when the event was dropped.
    pub fn push(&mut self, event: Event) -> bool {
        if event == Event::Close {
            if self.close_queued {
                return false;
            }
            self.close_queued = true;
            self.events.push(event);
            return true;
        }

        if self.events.len() >= self.capacity {
            self.dropped += 1;
            return false;
        }
        self.events.push(event);
        true
    }

    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Events rejected for lack of space since the last [`clear`](Self::clear).
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn close_requested(&self) -> bool {
        self.close_queued
    }

    /// Empties the queue for the next frame.
    pub fn clear(&mut self) {
        if self.dropped > 0 {
            log::warn!(
                "Event queue full: dropped {} event(s) this frame (capacity {})",
                self.dropped,
                self.capacity
            );
        }
        self.events.clear();
        self.dropped = 0;
        self.close_queued = false;
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_down(c: char) -> Event {
        Event::KeyDown(Key::from_char(c).unwrap())
    }

    #[test]
    fn test_push_preserves_order() {
        let mut queue = EventQueue::new();
        queue.push(key_down('a'));
        queue.push(Event::Resize(UVec2::new(640, 480)));
        queue.push(Event::FocusLost);
        assert_eq!(
            queue.as_slice(),
            &[
                key_down('a'),
                Event::Resize(UVec2::new(640, 480)),
                Event::FocusLost
            ]
        );
    }

    #[test]
    fn test_events_past_capacity_are_dropped() {
        let mut queue = EventQueue::with_capacity(2);
        assert!(queue.push(key_down('a')));
        assert!(queue.push(key_down('b')));
        assert!(!queue.push(key_down('c')));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.dropped(), 1);
        assert_eq!(queue.as_slice()[1], key_down('b'));
    }

    #[test]
    fn test_default_capacity() {
        let mut queue = EventQueue::default();
        assert_eq!(queue.capacity(), MAX_EVENTS_PER_FRAME);
        for _ in 0..MAX_EVENTS_PER_FRAME + 10 {
            queue.push(Event::FocusLost);
        }
        assert_eq!(queue.len(), MAX_EVENTS_PER_FRAME);
        assert_eq!(queue.dropped(), 10);
    }

    #[test]
    fn test_close_accepted_on_full_queue() {
        let mut queue = EventQueue::with_capacity(1);
        queue.push(key_down('a'));
        assert!(queue.push(Event::Close));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.as_slice().last(), Some(&Event::Close));
        assert!(queue.close_requested());
    }

    #[test]
    fn test_close_delivered_once_per_frame() {
        let mut queue = EventQueue::new();
        assert!(queue.push(Event::Close));
        assert!(!queue.push(Event::Close));
        let closes = queue
            .as_slice()
            .iter()
            .filter(|e| **e == Event::Close)
            .count();
        assert_eq!(closes, 1);
        // A duplicate close is not a capacity drop.
        assert_eq!(queue.dropped(), 0);
    }

    #[test]
    fn test_clear_resets_frame_state() {
        let mut queue = EventQueue::with_capacity(1);
        queue.push(key_down('a'));
        queue.push(key_down('b'));
        queue.push(Event::Close);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.dropped(), 0);
        assert!(!queue.close_requested());
        assert!(queue.push(Event::Close));
    }

    #[test]
    fn test_zero_capacity_still_delivers_close() {
        let mut queue = EventQueue::with_capacity(0);
        assert!(!queue.push(Event::FocusLost));
        assert!(queue.push(Event::Close));
        assert_eq!(queue.as_slice(), &[Event::Close]);
    }

    #[test]
    fn test_huge_capacity_does_not_preallocate() {
        let mut queue = EventQueue::with_capacity(usize::MAX);
        assert_eq!(queue.capacity(), usize::MAX);
        assert!(queue.push(key_down('a')));
        assert!(queue.push(Event::Close));
        assert_eq!(queue.len(), 2);
    }
}
