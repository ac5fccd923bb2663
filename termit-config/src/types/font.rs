//! Font description in the familiar `"Family Size"` form (e.g. `"Monospace 10"`).

use std::fmt;

/// Size used when a description carries no trailing point size.
const FALLBACK_SIZE: f32 = 10.0;

/// A parsed font description.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescription {
    pub family: String,
    pub size: f32,
}

impl FontDescription {
    /// Parse a description such as `"DejaVu Sans Mono 11"`.
    ///
    /// The last whitespace-separated token is taken as the size when it is a
    /// positive number; everything before it is the family.
    pub fn parse(description: &str) -> Self {
        let trimmed = description.trim();
        if let Some((family, size)) = trimmed.rsplit_once(char::is_whitespace)
            && let Ok(size) = size.parse::<f32>()
            && size > 0.0
        {
            return Self {
                family: family.trim().to_string(),
                size,
            };
        }

        // A lone number is a size for the default family
        if let Ok(size) = trimmed.parse::<f32>()
            && size > 0.0
        {
            return Self {
                family: crate::defaults::font_family(),
                size,
            };
        }

        let family = if trimmed.is_empty() {
            crate::defaults::font_family()
        } else {
            trimmed.to_string()
        };
        Self {
            family,
            size: FALLBACK_SIZE,
        }
    }
}

impl fmt::Display for FontDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.size.fract() == 0.0 {
            write!(f, "{} {}", self.family, self.size as u32)
        } else {
            write!(f, "{} {:.1}", self.family, self.size)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_with_spaces_and_size() {
        let font = FontDescription::parse("DejaVu Sans Mono 11");
        assert_eq!(font.family, "DejaVu Sans Mono");
        assert_eq!(font.size, 11.0);
        assert_eq!(font.to_string(), "DejaVu Sans Mono 11");
    }

    #[test]
    fn test_missing_size_uses_fallback() {
        let font = FontDescription::parse("Terminus");
        assert_eq!(font.family, "Terminus");
        assert_eq!(font.size, FALLBACK_SIZE);
    }

    #[test]
    fn test_fractional_size_display() {
        let font = FontDescription::parse("Monospace 9.5");
        assert_eq!(font.to_string(), "Monospace 9.5");
    }

    #[test]
    fn test_empty_description() {
        let font = FontDescription::parse("   ");
        assert_eq!(font.family, crate::defaults::font_family());
    }
}
