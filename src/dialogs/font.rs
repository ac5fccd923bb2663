//! Font selection dialog: family name plus point size.

use super::{DialogResponse, dialog_window, keyboard_response, ok_cancel_buttons};
use termit_config::FontDescription;

const MIN_SIZE: f32 = 4.0;
const MAX_SIZE: f32 = 72.0;

/// State for the font dialog
#[derive(Debug, Clone, PartialEq)]
pub struct FontDialog {
    pub family: String,
    pub size: f32,
}

impl FontDialog {
    /// Prefill from the current font description, e.g. "Monospace 10"
    pub fn new(current: &str) -> Self {
        let font = FontDescription::parse(current);
        Self {
            family: font.family,
            size: font.size.clamp(MIN_SIZE, MAX_SIZE),
        }
    }

    /// The chosen font as a description string
    pub fn font_name(&self) -> String {
        FontDescription {
            family: self.family.trim().to_string(),
            size: self.size,
        }
        .to_string()
    }

    /// Render the dialog and return the user's answer
    pub fn show(&mut self, ctx: &egui::Context) -> DialogResponse {
        let mut response = DialogResponse::None;

        dialog_window("Select font").show(ctx, |ui| {
            egui::Grid::new("font_dialog_grid")
                .num_columns(2)
                .spacing([8.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Family:");
                    ui.add(egui::TextEdit::singleline(&mut self.family).desired_width(200.0));
                    ui.end_row();

                    ui.label("Size:");
                    ui.add(
                        egui::DragValue::new(&mut self.size)
                            .range(MIN_SIZE..=MAX_SIZE)
                            .speed(0.5),
                    );
                    ui.end_row();
                });
            ui.add_space(6.0);
            ui.label(
                egui::RichText::new("The quick brown fox 0123456789")
                    .family(egui::FontFamily::Monospace)
                    .size(self.size),
            );
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
    fn test_prefill_and_font_name() {
        let mut dialog = FontDialog::new("DejaVu Sans Mono 11");
        assert_eq!(dialog.family, "DejaVu Sans Mono");
        assert_eq!(dialog.size, 11.0);

        dialog.size = 13.0;
        assert_eq!(dialog.font_name(), "DejaVu Sans Mono 13");
    }

    #[test]
    fn test_size_is_clamped() {
        assert_eq!(FontDialog::new("Monospace 300").size, MAX_SIZE);
    }

    #[test]
    fn test_escape_rejects() {
        let mut dialog = FontDialog::new("Monospace 10");
        assert_eq!(
            press_key(egui::Key::Escape, |ctx| dialog.show(ctx)),
            DialogResponse::Reject
        );
    }
}
