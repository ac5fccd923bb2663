//! Foreground colour picker.

use super::{DialogResponse, dialog_window, keyboard_response, ok_cancel_buttons};
use termit_config::RgbColor;

/// State for the colour dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorDialog {
    /// Colour being edited, prefilled with the current foreground
    pub color: RgbColor,
}

impl ColorDialog {
    pub fn new(current: RgbColor) -> Self {
        Self { color: current }
    }

    /// Render the dialog and return the user's answer
    pub fn show(&mut self, ctx: &egui::Context) -> DialogResponse {
        let mut response = DialogResponse::None;

        dialog_window("Select foreground color").show(ctx, |ui| {
            let mut rgb = self.color.to_array();
            ui.horizontal(|ui| {
                ui.label("Color:");
                if ui.color_edit_button_srgb(&mut rgb).changed() {
                    self.color = RgbColor::new(rgb[0], rgb[1], rgb[2]);
                }
                ui.monospace(self.color.to_string());
            });
            ui.add_space(8.0);
            response = ok_cancel_buttons(ui, "OK", "Cancel");
        });

        match keyboard_response(ctx) {
            DialogResponse::None => response,
            key => key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogs::test_support::press_key;

    #[test]
    fn test_enter_keeps_prefilled_color() {
        let current: RgbColor = "#aabbcc".parse().unwrap();
        let mut dialog = ColorDialog::new(current);
        assert_eq!(
            press_key(egui::Key::Enter, |ctx| dialog.show(ctx)),
            DialogResponse::Accept
        );
        assert_eq!(dialog.color, current);
    }
}
