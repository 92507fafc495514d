//! Platform-neutral key codes and level-triggered key state.
//!
//! Every backend maps its native key identifiers onto [`Key`], a code in
//! `0..TOTAL_KEYS`. Digits and upper-case letters use their ASCII codes, the
//! named keys use the values below. Native keys without a code are ignored by
//! the backends: they produce no event and never touch [`KeyState`].
//!
//! Edge information (press / release) travels through the per-frame event
//! queue; [`KeyState`] only answers "is this key down right now". It persists
//! across frames and is never cleared by the frame loop.

use std::fmt;

/// Number of addressable key codes.
pub const TOTAL_KEYS: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(u8);

impl Key {
    pub const SHIFT: Key = Key(0x03);
    pub const RETURN: Key = Key(0x0D);
    pub const ESCAPE: Key = Key(0x1B);
    pub const SPACE: Key = Key(0x20);
    pub const LEFT: Key = Key(0x25);
    pub const UP: Key = Key(0x26);
    pub const RIGHT: Key = Key(0x27);
    pub const DOWN: Key = Key(0x28);

    /// Wraps a raw code, rejecting codes outside the key array.
    pub const fn new(code: u8) -> Option<Key> {
        if (code as usize) < TOTAL_KEYS {
            Some(Key(code))
        } else {
            None
        }
    }

    pub const fn code(self) -> u8 {
        self.0
    }

    /// Key for a digit or letter (case-insensitive). Space maps to [`Key::SPACE`].
    pub fn from_char(c: char) -> Option<Key> {
        match c {
            '0'..='9' | 'A'..='Z' => Some(Key(c as u8)),
            'a'..='z' => Some(Key(c.to_ascii_uppercase() as u8)),
            ' ' => Some(Key::SPACE),
            _ => None,
        }
    }

    /// The digit or upper-case letter this key stands for, if any.
    pub fn as_char(self) -> Option<char> {
        match self.0 {
            b'0'..=b'9' | b'A'..=b'Z' => Some(self.0 as char),
            _ => None,
        }
    }

    fn name(self) -> Option<&'static str> {
        match self {
            Key::SHIFT => Some("Shift"),
            Key::RETURN => Some("Return"),
            Key::ESCAPE => Some("Escape"),
            Key::SPACE => Some("Space"),
            Key::LEFT => Some("Left"),
            Key::UP => Some("Up"),
            Key::RIGHT => Some("Right"),
            Key::DOWN => Some("Down"),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name() {
            f.write_str(name)
        } else if let Some(c) = self.as_char() {
            write!(f, "{c}")
        } else {
            write!(f, "0x{:02X}", self.0)
        }
    }
}

/// Held flag for every key code.
#[derive(Debug, Clone)]
pub struct KeyState {
    held: [bool; TOTAL_KEYS],
}

impl KeyState {
    pub fn new() -> Self {
        Self {
            held: [false; TOTAL_KEYS],
        }
    }

    /// Marks `key` as down. Returns true when the key was previously up.
    pub fn press(&mut self, key: Key) -> bool {
        let slot = &mut self.held[key.0 as usize];
        let was_up = !*slot;
        *slot = true;
        was_up
    }

    /// Marks `key` as up. Returns true when the key was previously down.
    pub fn release(&mut self, key: Key) -> bool {
        let slot = &mut self.held[key.0 as usize];
        let was_down = *slot;
        *slot = false;
        was_down
    }

    /// Releases every key, returning how many were down.
    pub fn release_all(&mut self) -> usize {
        let count = self.held.iter().filter(|&&down| down).count();
        self.held = [false; TOTAL_KEYS];
        count
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.0 as usize]
    }

    pub fn held_keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.held
            .iter()
            .enumerate()
            .filter(|(_, down)| **down)
            .map(|(code, _)| Key(code as u8))
    }

    /// Raw view, indexed by key code.
    pub fn as_array(&self) -> &[bool; TOTAL_KEYS] {
        &self.held
    }
}

impl Default for KeyState {
    fn default() -> Self {
        Self::new()
    }
}
