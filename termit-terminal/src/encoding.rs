//! Character encodings a tab can run in.
//!
//! Screen state is always UTF-8 internally; bytes from the child are decoded
//! on the way in and typed text is encoded on the way out.

use std::borrow::Cow;
use std::fmt;

/// Encoding of the byte stream exchanged with the child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminalEncoding {
    #[default]
    Utf8,
    /// ISO-8859-1: every byte maps to the code point of the same value
    Latin1,
}

impl TerminalEncoding {
    /// Look up an encoding by label, ignoring case, dashes and underscores.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized: String = label
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "utf8" => Some(Self::Utf8),
            "iso88591" | "latin1" | "l1" => Some(Self::Latin1),
            _ => None,
        }
    }

    /// Canonical label shown in menus and the status bar.
    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Latin1 => "ISO-8859-1",
        }
    }

    /// Convert child output to UTF-8.
    pub fn decode(self, bytes: &[u8]) -> Cow<'_, [u8]> {
        match self {
            Self::Utf8 => Cow::Borrowed(bytes),
            Self::Latin1 if bytes.is_ascii() => Cow::Borrowed(bytes),
            Self::Latin1 => {
                let mut out = Vec::with_capacity(bytes.len() * 2);
                let mut buf = [0u8; 4];
                for &b in bytes {
                    if b.is_ascii() {
                        out.push(b);
                    } else {
                        out.extend_from_slice(char::from(b).encode_utf8(&mut buf).as_bytes());
                    }
                }
                Cow::Owned(out)
            }
        }
    }

    /// Convert typed text to the child's encoding.
    ///
    /// Characters with no ISO-8859-1 representation become `?`.
    pub fn encode(self, text: &str) -> Cow<'_, [u8]> {
        match self {
            Self::Utf8 => Cow::Borrowed(text.as_bytes()),
            Self::Latin1 if text.is_ascii() => Cow::Borrowed(text.as_bytes()),
            Self::Latin1 => Cow::Owned(
                text.chars()
                    .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for TerminalEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
