//! Keybinding system for termit.
//!
//! Runtime-configurable keybindings map key combinations written in
//! config.yaml (`Ctrl+T`, `Alt-Left`, ...) to action names.

mod matcher;
pub mod parser;

pub use matcher::{KeybindingMatcher, MatchKey};
pub use parser::{KeyCombo, Modifiers, ParseError, ParsedKey, parse_key_combo};

use termit_config::KeyBinding;

/// Registry of keybindings mapping key combinations to action names.
#[derive(Debug, Default)]
pub struct KeybindingRegistry {
    /// Parsed key combos in config order; earlier entries win
    bindings: Vec<(KeyCombo, String)>,
}

impl KeybindingRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from config keybindings.
    ///
    /// Invalid keybinding strings are logged and skipped.
    pub fn from_config(keybindings: &[KeyBinding]) -> Self {
        let mut registry = Self::new();

        for binding in keybindings {
            match parser::parse_key_combo(&binding.key) {
                Ok(combo) => {
                    log::debug!(
                        "Registered keybinding: {} -> {} (parsed as: {})",
                        binding.key,
                        binding.action,
                        combo
                    );
                    registry.bindings.push((combo, binding.action.clone()));
                }
                Err(e) => {
                    log::warn!(
                        "Invalid keybinding '{}' for action '{}': {}",
                        binding.key,
                        binding.action,
                        e
                    );
                }
            }
        }

        log::info!(
            "Keybinding registry initialized with {} bindings",
            registry.bindings.len()
        );
        registry
    }

    /// Look up an action for a key event.
    pub fn lookup(
        &self,
        event: &winit::event::KeyEvent,
        modifiers: &winit::event::Modifiers,
    ) -> Option<&str> {
        self.lookup_matcher(&KeybindingMatcher::from_event(event, modifiers))
    }

    /// Look up an action for an already-normalized key press.
    pub fn lookup_matcher(&self, matcher: &KeybindingMatcher) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(combo, _)| matcher.matches(combo))
            .map(|(_, action)| action.as_str())
    }

    /// Key combo text bound to `action`, for menu accelerator labels.
    pub fn shortcut_for(&self, action: &str) -> Option<String> {
        self.bindings
            .iter()
            .find(|(_, a)| a == action)
            .map(|(combo, _)| combo.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::NamedKey;

    #[test]
    fn test_empty_registry() {
        let registry = KeybindingRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_invalid_keybinding_skipped() {
        let bindings = vec![
            KeyBinding::new("InvalidKey", "some_action"),
            KeyBinding::new("Ctrl+W", "close_tab"),
        ];

        let registry = KeybindingRegistry::from_config(&bindings);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lookup_matcher() {
        let registry = KeybindingRegistry::from_config(&termit_config::defaults::keybindings());
        let shift = Modifiers {
            shift: true,
            ..Modifiers::default()
        };

        let paste = KeybindingMatcher::new(shift, MatchKey::Named(NamedKey::Insert));
        assert_eq!(registry.lookup_matcher(&paste), Some("paste"));

        let plain_t = KeybindingMatcher::new(Modifiers::default(), MatchKey::Character('t'));
        assert_eq!(registry.lookup_matcher(&plain_t), None);
    }

    #[test]
    fn test_first_binding_wins() {
        let bindings = vec![
            KeyBinding::new("Ctrl+T", "new_tab"),
            KeyBinding::new("ctrl-t", "something_else"),
        ];
        let registry = KeybindingRegistry::from_config(&bindings);
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::default()
        };
        let matcher = KeybindingMatcher::new(ctrl, MatchKey::Character('t'));
        assert_eq!(registry.lookup_matcher(&matcher), Some("new_tab"));
        assert_eq!(registry.shortcut_for("new_tab").as_deref(), Some("Ctrl+T"));
    }
}
