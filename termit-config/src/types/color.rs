//! RGB colour stored as a `#rrggbb` string in YAML.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl FromStr for RgbColor {
    type Err = String;

    /// Accepts `#rgb` and `#rrggbb` (the leading `#` is optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let channel = |digits: &str| {
            u8::from_str_radix(digits, 16).map_err(|_| format!("Invalid colour '{}'", s))
        };
        match hex.len() {
            3 if hex.is_ascii() => Ok(Self::new(
                channel(&hex[0..1])? * 17,
                channel(&hex[1..2])? * 17,
                channel(&hex[2..3])? * 17,
            )),
            6 if hex.is_ascii() => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(format!("Invalid colour '{}': expected #rrggbb", s)),
        }
    }
}

impl TryFrom<String> for RgbColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RgbColor> for String {
    fn from(color: RgbColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_and_short_forms() {
        assert_eq!("#ff8000".parse::<RgbColor>(), Ok(RgbColor::new(255, 128, 0)));
        assert_eq!("0a0B0c".parse::<RgbColor>(), Ok(RgbColor::new(10, 11, 12)));
        assert_eq!("#fff".parse::<RgbColor>(), Ok(RgbColor::new(255, 255, 255)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("#12345".parse::<RgbColor>().is_err());
        assert!("#gggggg".parse::<RgbColor>().is_err());
        assert!("".parse::<RgbColor>().is_err());
    }

    #[test]
    fn test_display_is_lowercase_hex() {
        assert_eq!(RgbColor::new(0xAB, 0x01, 0xFF).to_string(), "#ab01ff");
    }
}
