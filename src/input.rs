use anyhow::{Context, Result, anyhow};
use arboard::Clipboard;
use winit::event::{ElementState, KeyEvent, Modifiers};
use winit::keyboard::{Key, ModifiersState, NamedKey};

/// Input handler for converting winit events to terminal input
pub struct InputHandler {
    pub modifiers: Modifiers,
    clipboard: Option<Clipboard>,
}

impl InputHandler {
    /// Create a new input handler
    pub fn new() -> Self {
        let clipboard = Clipboard::new().ok();
        if clipboard.is_none() {
            log::warn!("Failed to initialize clipboard support");
        }

        Self {
            modifiers: Modifiers::default(),
            clipboard,
        }
    }

    /// Update the current modifier state
    pub fn update_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Convert a keyboard event to terminal input bytes
    pub fn handle_key_event(&self, event: &KeyEvent, application_cursor: bool) -> Option<Vec<u8>> {
        if event.state != ElementState::Pressed {
            return None;
        }
        encode_key(&event.logical_key, self.modifiers.state(), application_cursor)
    }

    /// Read text from the clipboard (caller handles terminal conversion)
    pub fn paste_from_clipboard(&mut self) -> Result<String> {
        let clipboard = self
            .clipboard
            .as_mut()
            .ok_or_else(|| anyhow!("Clipboard not available"))?;
        let text = clipboard
            .get_text()
            .context("Failed to get clipboard text")?;
        log::debug!("Pasting from clipboard: {} chars", text.len());
        Ok(text)
    }

    /// Copy text to clipboard
    pub fn copy_to_clipboard(&mut self, text: &str) -> Result<()> {
        let clipboard = self
            .clipboard
            .as_mut()
            .ok_or_else(|| anyhow!("Clipboard not available"))?;
        clipboard
            .set_text(text.to_string())
            .context("Failed to set clipboard text")
    }

    /// Copy text to primary selection (Linux X11 only)
    #[cfg(target_os = "linux")]
    pub fn copy_to_primary_selection(&mut self, text: &str) -> Result<()> {
        use arboard::SetExtLinux;

        let clipboard = self
            .clipboard
            .as_mut()
            .ok_or_else(|| anyhow!("Clipboard not available"))?;
        clipboard
            .set()
            .clipboard(arboard::LinuxClipboardKind::Primary)
            .text(text.to_string())
            .context("Failed to set primary selection")
    }

    /// Primary selection only exists on Linux
    #[cfg(not(target_os = "linux"))]
    pub fn copy_to_primary_selection(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Bytes a key press sends to the child
pub fn encode_key(
    key: &Key,
    modifiers: ModifiersState,
    application_cursor: bool,
) -> Option<Vec<u8>> {
    let ctrl = modifiers.control_key();
    let alt = modifiers.alt_key();

    match key {
        // Character keys
        Key::Character(s) => {
            let ch = s.chars().next()?;
            if ctrl && ch.is_ascii_alphabetic() {
                // Ctrl+A through Ctrl+Z map to ASCII 1-26
                let byte = (ch.to_ascii_lowercase() as u8) - b'a' + 1;
                return Some(with_alt_prefix(vec![byte], alt));
            }
            Some(with_alt_prefix(s.as_bytes().to_vec(), alt))
        }

        // Special keys
        Key::Named(named_key) => {
            // Ctrl+Space sends NUL
            if ctrl && matches!(named_key, NamedKey::Space) {
                return Some(vec![0x00]);
            }

            let seq = match named_key {
                NamedKey::Enter => "\r",
                NamedKey::Tab if modifiers.shift_key() => "\x1b[Z",
                NamedKey::Tab => "\t",
                NamedKey::Space => " ",
                NamedKey::Backspace => "\x7f",
                NamedKey::Escape => "\x1b",
                NamedKey::Insert => "\x1b[2~",
                NamedKey::Delete => "\x1b[3~",

                // Arrow keys, SS3 form in application cursor mode
                NamedKey::ArrowUp if application_cursor => "\x1bOA",
                NamedKey::ArrowDown if application_cursor => "\x1bOB",
                NamedKey::ArrowRight if application_cursor => "\x1bOC",
                NamedKey::ArrowLeft if application_cursor => "\x1bOD",
                NamedKey::ArrowUp => "\x1b[A",
                NamedKey::ArrowDown => "\x1b[B",
                NamedKey::ArrowRight => "\x1b[C",
                NamedKey::ArrowLeft => "\x1b[D",

                // Navigation keys
                NamedKey::Home => "\x1b[H",
                NamedKey::End => "\x1b[F",
                NamedKey::PageUp => "\x1b[5~",
                NamedKey::PageDown => "\x1b[6~",

                // Function keys
                NamedKey::F1 => "\x1bOP",
                NamedKey::F2 => "\x1bOQ",
                NamedKey::F3 => "\x1bOR",
                NamedKey::F4 => "\x1bOS",
                NamedKey::F5 => "\x1b[15~",
                NamedKey::F6 => "\x1b[17~",
                NamedKey::F7 => "\x1b[18~",
                NamedKey::F8 => "\x1b[19~",
                NamedKey::F9 => "\x1b[20~",
                NamedKey::F10 => "\x1b[21~",
                NamedKey::F11 => "\x1b[23~",
                NamedKey::F12 => "\x1b[24~",

                _ => return None,
            };

            Some(with_alt_prefix(seq.as_bytes().to_vec(), alt && seq.len() == 1))
        }

        _ => None,
    }
}

/// Alt sends ESC before the key
fn with_alt_prefix(mut bytes: Vec<u8>, alt: bool) -> Vec<u8> {
    if alt {
        bytes.insert(0, 0x1b);
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ch(s: &str) -> Key {
        Key::Character(s.into())
    }

    #[test]
    fn test_plain_characters() {
        assert_eq!(encode_key(&ch("a"), ModifiersState::empty(), false), Some(b"a".to_vec()));
        assert_eq!(
            encode_key(&ch("é"), ModifiersState::empty(), false),
            Some("é".as_bytes().to_vec())
        );
    }

    #[test]
    fn test_ctrl_letters() {
        assert_eq!(encode_key(&ch("c"), ModifiersState::CONTROL, false), Some(vec![3]));
        assert_eq!(encode_key(&ch("A"), ModifiersState::CONTROL, false), Some(vec![1]));
        assert_eq!(
            encode_key(&Key::Named(NamedKey::Space), ModifiersState::CONTROL, false),
            Some(vec![0])
        );
    }

    #[test]
    fn test_alt_prefixes_escape() {
        assert_eq!(encode_key(&ch("b"), ModifiersState::ALT, false), Some(b"\x1bb".to_vec()));
        assert_eq!(
            encode_key(&Key::Named(NamedKey::Backspace), ModifiersState::ALT, false),
            Some(b"\x1b\x7f".to_vec())
        );
    }

    #[test]
    fn test_cursor_keys_follow_mode() {
        let up = Key::Named(NamedKey::ArrowUp);
        assert_eq!(encode_key(&up, ModifiersState::empty(), false), Some(b"\x1b[A".to_vec()));
        assert_eq!(encode_key(&up, ModifiersState::empty(), true), Some(b"\x1bOA".to_vec()));
    }

    #[test]
    fn test_function_and_editing_keys() {
        let none = ModifiersState::empty();
        assert_eq!(encode_key(&Key::Named(NamedKey::F1), none, false), Some(b"\x1bOP".to_vec()));
        assert_eq!(
            encode_key(&Key::Named(NamedKey::F11), none, false),
            Some(b"\x1b[23~".to_vec())
        );
        assert_eq!(
            encode_key(&Key::Named(NamedKey::Delete), none, false),
            Some(b"\x1b[3~".to_vec())
        );
        assert_eq!(
            encode_key(&Key::Named(NamedKey::Tab), ModifiersState::SHIFT, false),
            Some(b"\x1b[Z".to_vec())
        );
    }

    #[test]
    fn test_unmapped_keys() {
        let none = ModifiersState::empty();
        assert_eq!(encode_key(&Key::Named(NamedKey::CapsLock), none, false), None);
        assert_eq!(encode_key(&Key::Dead(None), none, false), None);
    }
}
