//! Key binding strings from the config file.
//!
//! A binding is written as modifiers and one key joined with `+`
//! (`Ctrl+Shift+N`, `Alt+Left`). The GTK-era dash spelling (`Ctrl-t`,
//! `Alt-Left`) is read too, so old configs keep working.

use std::fmt;
use thiserror::Error;
use winit::keyboard::NamedKey;

/// Why a binding string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("binding is empty")]
    Empty,
    #[error("binding '{0}' has modifiers but no key")]
    MissingKey(String),
    #[error("binding '{binding}' names two keys ('{first}' and '{second}')")]
    TwoKeys {
        binding: String,
        first: String,
        second: String,
    },
    #[error("'{0}' is not a key termit knows")]
    UnknownKey(String),
}

/// Modifier keys held for a binding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub super_key: bool,
}

impl Modifiers {
    /// Set the modifier spelled `word`. Returns false if `word` is not one.
    fn set(&mut self, word: &str) -> bool {
        let flag = match word.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => &mut self.ctrl,
            "alt" | "meta" => &mut self.alt,
            "shift" => &mut self.shift,
            "super" | "win" | "cmd" => &mut self.super_key,
            _ => return false,
        };
        *flag = true;
        true
    }
}

/// Key part of a binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParsedKey {
    /// Printable key, kept in upper case so `Ctrl+t` and `Ctrl+T` agree
    Character(char),
    Named(NamedKey),
}

/// Modifiers plus key, as read from one binding string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub modifiers: Modifiers,
    pub key: ParsedKey,
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let held = [
            (self.modifiers.ctrl, "Ctrl"),
            (self.modifiers.alt, "Alt"),
            (self.modifiers.shift, "Shift"),
            (self.modifiers.super_key, "Super"),
        ];
        for (_, name) in held.iter().filter(|(on, _)| *on) {
            write!(f, "{}+", name)?;
        }
        match &self.key {
            ParsedKey::Character(c) => write!(f, "{}", c),
            ParsedKey::Named(key) => match NAMED_KEYS.iter().find(|(_, k)| k == key) {
                Some((name, _)) => write!(f, "{}", name),
                None => write!(f, "{:?}", key),
            },
        }
    }
}

/// Spellings of the non-printable keys, first entry per key is canonical.
const NAMED_KEYS: &[(&str, NamedKey)] = &[
    ("Enter", NamedKey::Enter),
    ("Return", NamedKey::Enter),
    ("Escape", NamedKey::Escape),
    ("Esc", NamedKey::Escape),
    ("Space", NamedKey::Space),
    ("Tab", NamedKey::Tab),
    ("BackSpace", NamedKey::Backspace),
    ("Delete", NamedKey::Delete),
    ("Del", NamedKey::Delete),
    ("Insert", NamedKey::Insert),
    ("Ins", NamedKey::Insert),
    ("Home", NamedKey::Home),
    ("End", NamedKey::End),
    ("PageUp", NamedKey::PageUp),
    ("Page_Up", NamedKey::PageUp),
    ("Prior", NamedKey::PageUp),
    ("PageDown", NamedKey::PageDown),
    ("Page_Down", NamedKey::PageDown),
    ("Next", NamedKey::PageDown),
    ("Up", NamedKey::ArrowUp),
    ("ArrowUp", NamedKey::ArrowUp),
    ("Down", NamedKey::ArrowDown),
    ("ArrowDown", NamedKey::ArrowDown),
    ("Left", NamedKey::ArrowLeft),
    ("ArrowLeft", NamedKey::ArrowLeft),
    ("Right", NamedKey::ArrowRight),
    ("ArrowRight", NamedKey::ArrowRight),
    ("F1", NamedKey::F1),
    ("F2", NamedKey::F2),
    ("F3", NamedKey::F3),
    ("F4", NamedKey::F4),
    ("F5", NamedKey::F5),
    ("F6", NamedKey::F6),
    ("F7", NamedKey::F7),
    ("F8", NamedKey::F8),
    ("F9", NamedKey::F9),
    ("F10", NamedKey::F10),
    ("F11", NamedKey::F11),
    ("F12", NamedKey::F12),
];

/// Read a binding string such as `Ctrl+Shift+N` or `Alt-Left`.
///
/// Modifier names are case-insensitive (`Ctrl`/`Control`, `Alt`/`Meta`,
/// `Shift`, `Super`/`Win`/`Cmd`). The key is a single character or one of
/// the names in [`NAMED_KEYS`], also case-insensitive.
pub fn parse_key_combo(s: &str) -> Result<KeyCombo, ParseError> {
    let binding = s.trim();
    if binding.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut modifiers = Modifiers::default();
    let mut key: Option<&str> = None;
    for word in words(binding) {
        if modifiers.set(word) {
            continue;
        }
        if let Some(first) = key {
            return Err(ParseError::TwoKeys {
                binding: binding.to_string(),
                first: first.to_string(),
                second: word.to_string(),
            });
        }
        key = Some(word);
    }

    // A modifier must not follow the key ("T+Ctrl")
    let last = words(binding).last().unwrap_or_default();
    let key = match key {
        Some(key) if !last.is_empty() && key == last => key,
        _ => return Err(ParseError::MissingKey(binding.to_string())),
    };

    Ok(KeyCombo {
        modifiers,
        key: parse_key(key)?,
    })
}

/// Words of a binding: `+` separated, or `-` separated in the dash spelling.
/// A lone `+` or `-` is itself the key.
fn words(binding: &str) -> impl Iterator<Item = &str> {
    let separator = if binding.len() > 1 && !binding.contains('+') {
        '-'
    } else {
        '+'
    };
    binding.split(separator).map(str::trim)
}

fn parse_key(word: &str) -> Result<ParsedKey, ParseError> {
    if let Some((_, named)) = NAMED_KEYS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(word))
    {
        return Ok(ParsedKey::Named(*named));
    }

    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(ParsedKey::Character(c.to_ascii_uppercase())),
        _ => Err(ParseError::UnknownKey(word.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_key_is_uppercased() {
        let combo = parse_key_combo("t").unwrap();
        assert_eq!(combo.modifiers, Modifiers::default());
        assert_eq!(combo.key, ParsedKey::Character('T'));
    }

    #[test]
    fn test_default_set_tab_name_binding() {
        let combo = parse_key_combo("Ctrl+Shift+N").unwrap();
        assert!(combo.modifiers.ctrl && combo.modifiers.shift);
        assert!(!combo.modifiers.alt);
        assert_eq!(combo.key, ParsedKey::Character('N'));
    }

    #[test]
    fn test_dash_spelling_from_old_configs() {
        let combo = parse_key_combo("Alt-Left").unwrap();
        assert!(combo.modifiers.alt);
        assert_eq!(combo.key, ParsedKey::Named(NamedKey::ArrowLeft));

        let combo = parse_key_combo("Ctrl-t").unwrap();
        assert!(combo.modifiers.ctrl);
        assert_eq!(combo.key, ParsedKey::Character('T'));
    }

    #[test]
    fn test_named_keys_ignore_case() {
        let combo = parse_key_combo("shift+INSERT").unwrap();
        assert!(combo.modifiers.shift);
        assert_eq!(combo.key, ParsedKey::Named(NamedKey::Insert));
        assert_eq!(
            parse_key_combo("Page_Up").unwrap().key,
            ParsedKey::Named(NamedKey::PageUp)
        );
    }

    #[test]
    fn test_lone_dash_is_a_key() {
        assert_eq!(
            parse_key_combo("-").unwrap().key,
            ParsedKey::Character('-')
        );
    }

    #[test]
    fn test_rejected_bindings() {
        assert_eq!(parse_key_combo("  "), Err(ParseError::Empty));
        assert_eq!(
            parse_key_combo("Ctrl+Shift"),
            Err(ParseError::MissingKey("Ctrl+Shift".to_string()))
        );
        assert_eq!(
            parse_key_combo("Ctrl+"),
            Err(ParseError::MissingKey("Ctrl+".to_string()))
        );
        assert_eq!(
            parse_key_combo("T+Ctrl"),
            Err(ParseError::MissingKey("T+Ctrl".to_string()))
        );
        assert!(matches!(
            parse_key_combo("Ctrl+A+B"),
            Err(ParseError::TwoKeys { .. })
        ));
        assert_eq!(
            parse_key_combo("Ctrl+Bogus"),
            Err(ParseError::UnknownKey("Bogus".to_string()))
        );
    }

    #[test]
    fn test_display_uses_canonical_names() {
        assert_eq!(parse_key_combo("ctrl+alt+x").unwrap().to_string(), "Ctrl+Alt+X");
        assert_eq!(parse_key_combo("alt-right").unwrap().to_string(), "Alt+Right");
        assert_eq!(parse_key_combo("Shift+Ins").unwrap().to_string(), "Shift+Insert");
    }
}
