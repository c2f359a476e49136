//! Button-to-key mapping table
//!
//! Config values are resolved once at load time into a closed set of
//! key actions. Lookups are total: an unmapped button resolves to
//! `None`, the same as an explicit `null` in the file.

use std::fmt;

use crate::buttons::{Button, BUTTON_COUNT};

/// Named non-printable keys the config may refer to.
///
/// This is the closed set of special names; anything else in the file
/// is taken as a literal character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialKey {
    Esc,
    Enter,
    Up,
    Down,
    Left,
    Right,
}

impl SpecialKey {
    /// Resolve a config name like `"esc"`. Names are case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "esc" => Some(Self::Esc),
            "enter" => Some(Self::Enter),
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Esc => "esc",
            Self::Enter => "enter",
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// What pressing a mapped button produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// A named special key (escape, enter, arrows)
    Special(SpecialKey),
    /// A literal printable character
    Char(char),
}

impl KeyAction {
    /// Resolve a config value. Special names win; anything else must be
    /// exactly one character. Returns `None` for values that are
    /// neither, so the config layer can reject them with context.
    pub fn parse(value: &str) -> Option<Self> {
        if let Some(special) = SpecialKey::from_name(value) {
            return Some(Self::Special(special));
        }
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(Self::Char(c)),
            _ => None,
        }
    }
}

impl fmt::Display for KeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Special(special) => write!(f, "{}", special.name()),
            Self::Char(c) => write!(f, "{c}"),
        }
    }
}

/// Immutable button-to-key table, one optional action per pad button
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    actions: [Option<KeyAction>; BUTTON_COUNT],
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a button, replacing any previous binding. `None` unbinds.
    pub fn set(&mut self, button: Button, action: Option<KeyAction>) {
        self.actions[button.index() as usize] = action;
    }

    /// Resolve a button. `None` for unmapped or null-mapped buttons.
    pub fn lookup(&self, button: Button) -> Option<KeyAction> {
        self.actions[button.index() as usize]
    }

    /// True when no button has a binding
    pub fn is_empty(&self) -> bool {
        self.actions.iter().all(Option::is_none)
    }

    /// Every action the map can produce (with repeats, in button order)
    pub fn actions(&self) -> impl Iterator<Item = KeyAction> + '_ {
        self.actions.iter().flatten().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(index: u8) -> Button {
        Button::new(index).unwrap()
    }

    #[test]
    fn special_names_resolve_to_special_keys() {
        assert_eq!(
            KeyAction::parse("esc"),
            Some(KeyAction::Special(SpecialKey::Esc))
        );
        assert_eq!(
            KeyAction::parse("enter"),
            Some(KeyAction::Special(SpecialKey::Enter))
        );
        assert_eq!(
            KeyAction::parse("left"),
            Some(KeyAction::Special(SpecialKey::Left))
        );
    }

    #[test]
    fn single_characters_resolve_to_literals() {
        assert_eq!(KeyAction::parse("y"), Some(KeyAction::Char('y')));
        assert_eq!(KeyAction::parse("7"), Some(KeyAction::Char('7')));
        // "e" is a character, not a prefix of "esc"
        assert_eq!(KeyAction::parse("e"), Some(KeyAction::Char('e')));
    }

    #[test]
    fn multi_character_values_are_rejected() {
        assert_eq!(KeyAction::parse("escape"), None);
        assert_eq!(KeyAction::parse("yy"), None);
        assert_eq!(KeyAction::parse(""), None);
    }

    #[test]
    fn unmapped_and_null_behave_identically() {
        let mut keymap = Keymap::new();
        keymap.set(button(0), Some(KeyAction::Char('y')));
        // B1 explicitly null, B2 never mentioned
        keymap.set(button(1), None);
        assert_eq!(keymap.lookup(button(1)), None);
        assert_eq!(keymap.lookup(button(2)), None);
        assert_eq!(keymap.lookup(button(1)), keymap.lookup(button(2)));
    }

    #[test]
    fn actions_lists_bindings_only() {
        let mut keymap = Keymap::new();
        assert!(keymap.is_empty());
        keymap.set(button(0), Some(KeyAction::Char('y')));
        keymap.set(button(8), Some(KeyAction::Special(SpecialKey::Esc)));
        let actions: Vec<KeyAction> = keymap.actions().collect();
        assert_eq!(
            actions,
            vec![
                KeyAction::Char('y'),
                KeyAction::Special(SpecialKey::Esc),
            ]
        );
        assert!(!keymap.is_empty());
    }
}
