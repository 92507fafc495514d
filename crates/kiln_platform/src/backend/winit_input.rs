use winit::event::MouseButton as WinitButton;
use winit::keyboard::KeyCode;
use winit::window::CursorIcon;

use kiln_core::{Cursor, Key, MouseButton};

/// Maps a physical key to its kiln key code. Keys without a code are ignored.
pub(crate) fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::ArrowLeft => Some(Key::LEFT),
        KeyCode::ArrowRight => Some(Key::RIGHT),
        KeyCode::ArrowUp => Some(Key::UP),
        KeyCode::ArrowDown => Some(Key::DOWN),
        KeyCode::Escape => Some(Key::ESCAPE),
        KeyCode::Space => Some(Key::SPACE),
        KeyCode::Enter | KeyCode::NumpadEnter => Some(Key::RETURN),
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Some(Key::SHIFT),
        other => key_char(other).and_then(Key::from_char),
    }
}

fn key_char(key_code: KeyCode) -> Option<char> {
    let c = match key_code {
        KeyCode::Digit0 => '0',
        KeyCode::Digit1 => '1',
        KeyCode::Digit2 => '2',
        KeyCode::Digit3 => '3',
        KeyCode::Digit4 => '4',
        KeyCode::Digit5 => '5',
        KeyCode::Digit6 => '6',
        KeyCode::Digit7 => '7',
        KeyCode::Digit8 => '8',
        KeyCode::Digit9 => '9',
        KeyCode::KeyA => 'A',
        KeyCode::KeyB => 'B',
        KeyCode::KeyC => 'C',
        KeyCode::KeyD => 'D',
        KeyCode::KeyE => 'E',
        KeyCode::KeyF => 'F',
        KeyCode::KeyG => 'G',
        KeyCode::KeyH => 'H',
        KeyCode::KeyI => 'I',
        KeyCode::KeyJ => 'J',
        KeyCode::KeyK => 'K',
        KeyCode::KeyL => 'L',
        KeyCode::KeyM => 'M',
        KeyCode::KeyN => 'N',
        KeyCode::KeyO => 'O',
        KeyCode::KeyP => 'P',
        KeyCode::KeyQ => 'Q',
        KeyCode::KeyR => 'R',
        KeyCode::KeyS => 'S',
        KeyCode::KeyT => 'T',
        KeyCode::KeyU => 'U',
        KeyCode::KeyV => 'V',
        KeyCode::KeyW => 'W',
        KeyCode::KeyX => 'X',
        KeyCode::KeyY => 'Y',
        KeyCode::KeyZ => 'Z',
        _ => return None,
    };
    Some(c)
}

pub(crate) fn map_button(button: WinitButton) -> Option<MouseButton> {
    match button {
        WinitButton::Left => Some(MouseButton::Left),
        WinitButton::Right => Some(MouseButton::Right),
        _ => None,
    }
}

pub(crate) fn map_cursor(cursor: Cursor) -> CursorIcon {
    match cursor {
        Cursor::Arrow => CursorIcon::Default,
        Cursor::Pointer => CursorIcon::Pointer,
        Cursor::Wait => CursorIcon::Wait,
        Cursor::Write => CursorIcon::Text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_keys_use_legacy_codes() {
        assert_eq!(map_key(KeyCode::ShiftLeft).map(Key::code), Some(0x03));
        assert_eq!(map_key(KeyCode::ShiftRight).map(Key::code), Some(0x03));
        assert_eq!(map_key(KeyCode::Enter).map(Key::code), Some(0x0D));
        assert_eq!(map_key(KeyCode::Escape).map(Key::code), Some(0x1B));
        assert_eq!(map_key(KeyCode::Space).map(Key::code), Some(0x20));
        assert_eq!(map_key(KeyCode::ArrowLeft).map(Key::code), Some(0x25));
        assert_eq!(map_key(KeyCode::ArrowUp).map(Key::code), Some(0x26));
        assert_eq!(map_key(KeyCode::ArrowRight).map(Key::code), Some(0x27));
        assert_eq!(map_key(KeyCode::ArrowDown).map(Key::code), Some(0x28));
    }

    #[test]
    fn letters_and_digits_use_ascii() {
        assert_eq!(map_key(KeyCode::KeyA).map(Key::code), Some(b'A'));
        assert_eq!(map_key(KeyCode::KeyZ).map(Key::code), Some(b'Z'));
        assert_eq!(map_key(KeyCode::Digit0).map(Key::code), Some(b'0'));
        assert_eq!(map_key(KeyCode::Digit9).map(Key::code), Some(b'9'));
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        assert_eq!(map_key(KeyCode::F1), None);
        assert_eq!(map_key(KeyCode::ControlLeft), None);
        assert_eq!(map_key(KeyCode::Numpad5), None);
    }

    #[test]
    fn only_left_and_right_buttons() {
        assert_eq!(map_button(WinitButton::Left), Some(MouseButton::Left));
        assert_eq!(map_button(WinitButton::Right), Some(MouseButton::Right));
        assert_eq!(map_button(WinitButton::Middle), None);
    }

    #[test]
    fn every_cursor_has_an_icon() {
        let icons: Vec<CursorIcon> = Cursor::ALL.iter().map(|&c| map_cursor(c)).collect();
        assert_eq!(
            icons,
            vec![
                CursorIcon::Default,
                CursorIcon::Pointer,
                CursorIcon::Wait,
                CursorIcon::Text
            ]
        );
    }
}
