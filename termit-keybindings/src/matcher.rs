//! Key event matching.
//!
//! Matches winit KeyEvents against parsed KeyCombos.

use super::parser::{KeyCombo, Modifiers, ParsedKey};
use winit::event::{KeyEvent, Modifiers as WinitModifiers};
use winit::keyboard::{Key, NamedKey};

/// Normalized key pressed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchKey {
    Character(char),
    Named(NamedKey),
}

/// A key press reduced to what keybindings care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeybindingMatcher {
    modifiers: Modifiers,
    key: Option<MatchKey>,
}

impl KeybindingMatcher {
    /// Build a matcher from already-normalized parts.
    pub fn new(modifiers: Modifiers, key: MatchKey) -> Self {
        let key = match key {
            MatchKey::Character(c) => MatchKey::Character(c.to_ascii_uppercase()),
            named => named,
        };
        Self {
            modifiers,
            key: Some(key),
        }
    }

    /// Create a matcher from a winit key event.
    pub fn from_event(event: &KeyEvent, modifiers: &WinitModifiers) -> Self {
        let mods = Modifiers {
            ctrl: modifiers.state().control_key(),
            alt: modifiers.state().alt_key(),
            shift: modifiers.state().shift_key(),
            super_key: modifiers.state().super_key(),
        };

        let key = match &event.logical_key {
            Key::Character(c) => c
                .chars()
                .next()
                .map(|ch| MatchKey::Character(ch.to_ascii_uppercase())),
            Key::Named(named) => Some(MatchKey::Named(*named)),
            _ => None,
        };

        Self {
            modifiers: mods,
            key,
        }
    }

    /// Check if this event matches the given key combo.
    pub fn matches(&self, combo: &KeyCombo) -> bool {
        let key_matches = match (&combo.key, &self.key) {
            (ParsedKey::Character(expected), Some(MatchKey::Character(actual))) => {
                expected.eq_ignore_ascii_case(actual)
            }
            (ParsedKey::Named(expected), Some(MatchKey::Named(actual))) => expected == actual,
            _ => false,
        };

        key_matches && self.modifiers == combo.modifiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_key_combo;

    fn ctrl() -> Modifiers {
        Modifiers {
            ctrl: true,
            ..Modifiers::default()
        }
    }

    #[test]
    fn test_character_matching_is_case_insensitive() {
        let combo = parse_key_combo("Ctrl+T").unwrap();

        assert!(KeybindingMatcher::new(ctrl(), MatchKey::Character('t')).matches(&combo));
        assert!(KeybindingMatcher::new(ctrl(), MatchKey::Character('T')).matches(&combo));
        assert!(!KeybindingMatcher::new(ctrl(), MatchKey::Character('w')).matches(&combo));
    }

    #[test]
    fn test_modifiers_must_match_exactly() {
        let combo = parse_key_combo("Ctrl+T").unwrap();
        let ctrl_shift = Modifiers {
            ctrl: true,
            shift: true,
            ..Modifiers::default()
        };

        assert!(!KeybindingMatcher::new(ctrl_shift, MatchKey::Character('T')).matches(&combo));
        assert!(
            !KeybindingMatcher::new(Modifiers::default(), MatchKey::Character('T'))
                .matches(&combo)
        );
    }

    #[test]
    fn test_named_key_matching() {
        let combo = parse_key_combo("Alt+Right").unwrap();
        let alt = Modifiers {
            alt: true,
            ..Modifiers::default()
        };

        assert!(KeybindingMatcher::new(alt, MatchKey::Named(NamedKey::ArrowRight)).matches(&combo));
        assert!(!KeybindingMatcher::new(alt, MatchKey::Named(NamedKey::ArrowLeft)).matches(&combo));
        assert!(!KeybindingMatcher::new(alt, MatchKey::Character('R')).matches(&combo));
    }
}
