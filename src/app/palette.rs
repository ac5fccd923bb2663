//! xterm 256-colour palette.

use egui::Color32;
use termit_config::RgbColor;
use termit_terminal::CellColor;

/// ANSI colors 0-15 (VTE's default "tango" scheme)
const ANSI_16: [[u8; 3]; 16] = [
    [0, 0, 0],
    [204, 0, 0],
    [78, 154, 6],
    [196, 160, 0],
    [52, 101, 164],
    [117, 80, 123],
    [6, 152, 154],
    [211, 215, 207],
    [85, 87, 83],
    [239, 41, 41],
    [138, 226, 52],
    [252, 233, 79],
    [114, 159, 207],
    [173, 127, 168],
    [52, 226, 226],
    [238, 238, 236],
];

/// Levels of the 6x6x6 colour cube
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// Get palette color by index (0-255)
pub fn indexed_color(index: u8) -> Color32 {
    let [r, g, b] = match index {
        0..=15 => ANSI_16[index as usize],
        16..=231 => {
            let i = index - 16;
            [
                CUBE_LEVELS[(i / 36) as usize],
                CUBE_LEVELS[((i / 6) % 6) as usize],
                CUBE_LEVELS[(i % 6) as usize],
            ]
        }
        232..=255 => {
            let level = 8 + (index - 232) * 10;
            [level, level, level]
        }
    };
    Color32::from_rgb(r, g, b)
}

pub fn rgb(color: RgbColor) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

/// Resolve a cell colour, `default` standing for the configured colour
pub fn cell_color(color: CellColor, default: Color32) -> Color32 {
    match color {
        CellColor::Default => default,
        CellColor::Indexed(index) => indexed_color(index),
        CellColor::Rgb(r, g, b) => Color32::from_rgb(r, g, b),
    }
}

/// Bold text in one of the first 8 colours uses the bright variant
pub fn bold_variant(color: CellColor) -> CellColor {
    match color {
        CellColor::Indexed(index) if index < 8 => CellColor::Indexed(index + 8),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_and_grey_ramp() {
        assert_eq!(indexed_color(16), Color32::from_rgb(0, 0, 0));
        assert_eq!(indexed_color(21), Color32::from_rgb(0, 0, 255));
        assert_eq!(indexed_color(196), Color32::from_rgb(255, 0, 0));
        assert_eq!(indexed_color(231), Color32::from_rgb(255, 255, 255));
        assert_eq!(indexed_color(232), Color32::from_rgb(8, 8, 8));
        assert_eq!(indexed_color(255), Color32::from_rgb(238, 238, 238));
    }

    #[test]
    fn test_default_cell_color_uses_fallback() {
        let fallback = Color32::from_rgb(1, 2, 3);
        assert_eq!(cell_color(CellColor::Default, fallback), fallback);
        assert_eq!(
            cell_color(CellColor::Rgb(10, 20, 30), fallback),
            Color32::from_rgb(10, 20, 30)
        );
    }

    #[test]
    fn test_bold_brightens_low_colors_only() {
        assert_eq!(bold_variant(CellColor::Indexed(1)), CellColor::Indexed(9));
        assert_eq!(bold_variant(CellColor::Indexed(9)), CellColor::Indexed(9));
        assert_eq!(bold_variant(CellColor::Default), CellColor::Default);
    }
}
