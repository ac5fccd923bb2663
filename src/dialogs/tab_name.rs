//! "Tab name" dialog used to relabel a page.

use super::{DialogResponse, dialog_window, keyboard_response, ok_cancel_buttons};
use crate::tab::TabId;

/// State for the tab name dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabNameDialog {
    /// Tab the new name applies to; pages may shift while the dialog is open
    pub tab: TabId,
    /// Text being edited, prefilled with the current label
    pub text: String,
    focus_requested: bool,
}

impl TabNameDialog {
    pub fn new(tab: TabId, current_label: &str) -> Self {
        Self {
            tab,
            text: current_label.to_string(),
            focus_requested: false,
        }
    }

    /// Render the dialog and return the user's answer
    pub fn show(&mut self, ctx: &egui::Context) -> DialogResponse {
        let mut response = DialogResponse::None;

        dialog_window("Tab name").show(ctx, |ui| {
            let edit = ui.add(
                egui::TextEdit::singleline(&mut self.text).desired_width(260.0),
            );
            if !self.focus_requested {
                edit.request_focus();
                self.focus_requested = true;
            }
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
    fn test_prefilled_with_label() {
        let dialog = TabNameDialog::new(2, "build");
        assert_eq!(dialog.tab, 2);
        assert_eq!(dialog.text, "build");
    }

    #[test]
    fn test_enter_accepts_and_escape_rejects() {
        let mut dialog = TabNameDialog::new(0, "shell");
        assert_eq!(
            press_key(egui::Key::Enter, |ctx| dialog.show(ctx)),
            DialogResponse::Accept
        );
        assert_eq!(
            press_key(egui::Key::Escape, |ctx| dialog.show(ctx)),
            DialogResponse::Reject
        );
        assert_eq!(dialog.text, "shell");
    }
}
