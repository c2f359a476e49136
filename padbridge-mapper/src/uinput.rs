//! Virtual keyboard output via evdev/uinput
//!
//! Creates a virtual keyboard whose capability set covers exactly the
//! keys the loaded keymap can produce, and emits press/release events
//! for it. Applications see an ordinary keyboard.

use evdev::{
    uinput::{VirtualDevice, VirtualDeviceBuilder},
    AttributeSet, EventType, InputEvent, Key,
};
use tracing::debug;

use crate::dispatcher::{ActuatorError, KeyActuator};
use crate::keymap::{KeyAction, SpecialKey};

/// Virtual keyboard device
pub struct UinputKeyboard {
    device: VirtualDevice,
}

impl UinputKeyboard {
    /// Create a virtual keyboard able to emit every action in
    /// `actions`.
    ///
    /// Fails early with `UnsupportedKey` when the keymap contains a
    /// character with no key code, rather than at first press.
    pub fn new<I>(name: &str, actions: I) -> Result<Self, ActuatorError>
    where
        I: IntoIterator<Item = KeyAction>,
    {
        let mut keys = AttributeSet::<Key>::new();
        for action in actions {
            keys.insert(key_code(action)?);
        }

        let device = VirtualDeviceBuilder::new()
            .map_err(ActuatorError::CreateDevice)?
            .name(name)
            .with_keys(&keys)
            .map_err(ActuatorError::CreateDevice)?
            .build()
            .map_err(ActuatorError::CreateDevice)?;

        debug!("Created virtual keyboard \"{name}\"");
        Ok(Self { device })
    }

    fn emit(&mut self, action: KeyAction, value: i32) -> Result<(), ActuatorError> {
        let key = key_code(action)?;
        let event = InputEvent::new(EventType::KEY, key.code(), value);
        self.device.emit(&[event]).map_err(ActuatorError::EmitEvent)
    }
}

impl KeyActuator for UinputKeyboard {
    fn key_down(&mut self, action: KeyAction) -> Result<(), ActuatorError> {
        self.emit(action, 1)
    }

    fn key_up(&mut self, action: KeyAction) -> Result<(), ActuatorError> {
        self.emit(action, 0)
    }
}

/// Resolve the evdev key code for an action
fn key_code(action: KeyAction) -> Result<Key, ActuatorError> {
    match action {
        KeyAction::Special(special) => Ok(special_code(special)),
        KeyAction::Char(c) => char_code(c).ok_or(ActuatorError::UnsupportedKey(c)),
    }
}

fn special_code(special: SpecialKey) -> Key {
    match special {
        SpecialKey::Esc => Key::KEY_ESC,
        SpecialKey::Enter => Key::KEY_ENTER,
        SpecialKey::Up => Key::KEY_UP,
        SpecialKey::Down => Key::KEY_DOWN,
        SpecialKey::Left => Key::KEY_LEFT,
        SpecialKey::Right => Key::KEY_RIGHT,
    }
}

/// Key codes for the literal characters a keymap may type.
///
/// Letters map to their unshifted key; uppercase folds to the same key
/// (no synthetic shift press).
fn char_code(c: char) -> Option<Key> {
    let key = match c.to_ascii_lowercase() {
        'a' => Key::KEY_A,
        'b' => Key::KEY_B,
        'c' => Key::KEY_C,
        'd' => Key::KEY_D,
        'e' => Key::KEY_E,
        'f' => Key::KEY_F,
        'g' => Key::KEY_G,
        'h' => Key::KEY_H,
        'i' => Key::KEY_I,
        'j' => Key::KEY_J,
        'k' => Key::KEY_K,
        'l' => Key::KEY_L,
        'm' => Key::KEY_M,
        'n' => Key::KEY_N,
        'o' => Key::KEY_O,
        'p' => Key::KEY_P,
        'q' => Key::KEY_Q,
        'r' => Key::KEY_R,
        's' => Key::KEY_S,
        't' => Key::KEY_T,
        'u' => Key::KEY_U,
        'v' => Key::KEY_V,
        'w' => Key::KEY_W,
        'x' => Key::KEY_X,
        'y' => Key::KEY_Y,
        'z' => Key::KEY_Z,
        '0' => Key::KEY_0,
        '1' => Key::KEY_1,
        '2' => Key::KEY_2,
        '3' => Key::KEY_3,
        '4' => Key::KEY_4,
        '5' => Key::KEY_5,
        '6' => Key::KEY_6,
        '7' => Key::KEY_7,
        '8' => Key::KEY_8,
        '9' => Key::KEY_9,
        ' ' => Key::KEY_SPACE,
        '\t' => Key::KEY_TAB,
        '-' => Key::KEY_MINUS,
        '=' => Key::KEY_EQUAL,
        '[' => Key::KEY_LEFTBRACE,
        ']' => Key::KEY_RIGHTBRACE,
        '\\' => Key::KEY_BACKSLASH,
        ';' => Key::KEY_SEMICOLON,
        '\'' => Key::KEY_APOSTROPHE,
        '`' => Key::KEY_GRAVE,
        ',' => Key::KEY_COMMA,
        '.' => Key::KEY_DOT,
        '/' => Key::KEY_SLASH,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specials_map_to_named_keys() {
        assert_eq!(
            key_code(KeyAction::Special(SpecialKey::Esc)).unwrap(),
            Key::KEY_ESC
        );
        assert_eq!(
            key_code(KeyAction::Special(SpecialKey::Enter)).unwrap(),
            Key::KEY_ENTER
        );
        assert_eq!(
            key_code(KeyAction::Special(SpecialKey::Left)).unwrap(),
            Key::KEY_LEFT
        );
    }

    #[test]
    fn characters_map_to_their_keys() {
        assert_eq!(key_code(KeyAction::Char('y')).unwrap(), Key::KEY_Y);
        assert_eq!(key_code(KeyAction::Char('Y')).unwrap(), Key::KEY_Y);
        assert_eq!(key_code(KeyAction::Char('7')).unwrap(), Key::KEY_7);
        assert_eq!(key_code(KeyAction::Char(' ')).unwrap(), Key::KEY_SPACE);
    }

    #[test]
    fn unmappable_character_is_rejected() {
        let err = key_code(KeyAction::Char('€')).unwrap_err();
        assert!(matches!(err, ActuatorError::UnsupportedKey('€')));
    }

    #[test]
    #[ignore] // Requires uinput access (run with: cargo test -- --ignored)
    fn create_virtual_keyboard() {
        let actions = [
            KeyAction::Char('y'),
            KeyAction::Special(SpecialKey::Esc),
        ];
        let keyboard = UinputKeyboard::new("Test Pad Keyboard", actions);
        assert!(keyboard.is_ok());
    }
}
