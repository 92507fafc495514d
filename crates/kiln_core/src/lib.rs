//! Backend-independent pieces of the kiln platform layer: math types, the
//! per-frame event queue, key state, cursor shapes and frame timing.

pub mod cursor;
pub mod event;
pub mod input;
pub mod math;
pub mod time;

pub use cursor::Cursor;
pub use event::{Event, EventQueue, MouseButton, MAX_EVENTS_PER_FRAME, MAX_EVENT_CAPACITY};
pub use input::{Key, KeyState, TOTAL_KEYS};
pub use time::FrameClock;
