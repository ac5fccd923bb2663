//! Yes/No confirmation shown before closing a window with several tabs.

use super::{DialogResponse, dialog_window, keyboard_response};

/// Question asked before closing several tabs at once
pub const CONFIRM_EXIT_MESSAGE: &str = "Several tabs are opened.\nClose anyway?";

/// State for the exit confirmation dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmExitDialog;

impl ConfirmExitDialog {
    pub fn new() -> Self {
        Self
    }

    /// Render the dialog and return the user's answer
    pub fn show(&mut self, ctx: &egui::Context) -> DialogResponse {
        let mut response = DialogResponse::None;

        dialog_window("Question").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);
                ui.label(egui::RichText::new(CONFIRM_EXIT_MESSAGE).size(15.0));
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    let yes = egui::Button::new(
                        egui::RichText::new("Yes").color(egui::Color32::WHITE),
                    )
                    .fill(egui::Color32::from_rgb(180, 50, 50));
                    if ui.add(yes).clicked() {
                        response = DialogResponse::Accept;
                    }
                    ui.add_space(10.0);
                    if ui.button("No").clicked() {
                        response = DialogResponse::Reject;
                    }
                });
                ui.add_space(8.0);
            });
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
    use crate::dialogs::test_support::{idle_frame, press_key};

    #[test]
    fn test_enter_confirms() {
        let mut dialog = ConfirmExitDialog::new();
        let answer = press_key(egui::Key::Enter, |ctx| dialog.show(ctx));
        assert_eq!(answer, DialogResponse::Accept);
    }

    #[test]
    fn test_escape_cancels() {
        let mut dialog = ConfirmExitDialog::new();
        let answer = press_key(egui::Key::Escape, |ctx| dialog.show(ctx));
        assert_eq!(answer, DialogResponse::Reject);
    }

    #[test]
    fn test_stays_open_without_input() {
        let mut dialog = ConfirmExitDialog::new();
        assert_eq!(idle_frame(|ctx| dialog.show(ctx)), DialogResponse::None);
    }
}
