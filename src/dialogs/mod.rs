//! Modal dialogs opened by callbacks.
//!
//! Each dialog is plain state plus a `show` method that renders it with egui
//! and reports how the user answered. While a dialog is open the terminal
//! does not receive keyboard input.

mod color;
mod confirm_exit;
pub mod file_chooser;
mod font;
mod tab_name;

pub use color::ColorDialog;
pub use confirm_exit::{CONFIRM_EXIT_MESSAGE, ConfirmExitDialog};
pub use file_chooser::{FileChooser, NativeFileChooser};
pub use font::FontDialog;
pub use tab_name::TabNameDialog;

/// How the user answered a dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResponse {
    /// OK / Yes / Enter
    Accept,
    /// Cancel / No / Escape / window closed
    Reject,
    /// Still open
    None,
}

/// Enter accepts and Escape rejects, whichever widget has focus
fn keyboard_response(ctx: &egui::Context) -> DialogResponse {
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        DialogResponse::Reject
    } else if ctx.input(|i| i.key_pressed(egui::Key::Enter)) {
        DialogResponse::Accept
    } else {
        DialogResponse::None
    }
}

/// Shared frame for every dialog: a fixed window centered over the terminal
fn dialog_window(title: &str) -> egui::Window<'_> {
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .order(egui::Order::Foreground)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
}

/// OK and Cancel buttons laid out right to left
fn ok_cancel_buttons(ui: &mut egui::Ui, ok: &str, cancel: &str) -> DialogResponse {
    let mut response = DialogResponse::None;
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        if ui.button(ok).clicked() {
            response = DialogResponse::Accept;
        }
        if ui.button(cancel).clicked() {
            response = DialogResponse::Reject;
        }
    });
    response
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::DialogResponse;

    /// Run one headless frame with a key press and collect the dialog answer
    pub(crate) fn press_key(
        key: egui::Key,
        mut show: impl FnMut(&egui::Context) -> DialogResponse,
    ) -> DialogResponse {
        let ctx = egui::Context::default();
        let mut input = egui::RawInput::default();
        input.events.push(egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        });

        let mut answer = DialogResponse::None;
        let _ = ctx.run(input, |ctx| {
            let response = show(ctx);
            if response != DialogResponse::None {
                answer = response;
            }
        });
        answer
    }

    /// Run one headless frame without input
    pub(crate) fn idle_frame(
        mut show: impl FnMut(&egui::Context) -> DialogResponse,
    ) -> DialogResponse {
        let ctx = egui::Context::default();
        let mut answer = DialogResponse::None;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            let response = show(ctx);
            if response != DialogResponse::None {
                answer = response;
            }
        });
        answer
    }
}
