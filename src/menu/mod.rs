//! Menus for termit
//!
//! - `menu_bar`: the File / Edit / View / user menus strip at the top of the window
//! - `ContextMenu`: the popup opened by a secondary click
//!
//! Both only report which `MenuAction` was picked; the callbacks act on it.

mod actions;

pub use actions::MenuAction;

use termit_config::{UserMenu, UserMenuItem};
use termit_keybindings::KeybindingRegistry;

/// Width of the popup menu
const CONTEXT_MENU_MIN_WIDTH: f32 = 200.0;
/// Height of one popup entry
const CONTEXT_MENU_ITEM_HEIGHT: f32 = 22.0;

/// What the menus need to know to render their entries
pub struct MenuModel<'a> {
    /// Encodings offered in the Encoding menu
    pub encodings: &'a [String],
    /// Encoding of the current tab
    pub current_encoding: Option<&'a str>,
    pub user_menus: &'a [UserMenu],
    /// State of the Scrollbar check item
    pub scrollbar_checked: bool,
    /// Source of the shortcut hints
    pub keybindings: &'a KeybindingRegistry,
}

impl MenuModel<'_> {
    fn shortcut(&self, action: &str) -> String {
        self.keybindings.shortcut_for(action).unwrap_or_default()
    }

    fn is_current_encoding(&self, encoding: &str) -> bool {
        use termit_terminal::TerminalEncoding;

        self.current_encoding.is_some_and(|current| {
            match (
                TerminalEncoding::from_label(current),
                TerminalEncoding::from_label(encoding),
            ) {
                (Some(a), Some(b)) => a == b,
                _ => current.eq_ignore_ascii_case(encoding),
            }
        })
    }
}

/// Render the menu bar and return the picked action
pub fn menu_bar(ctx: &egui::Context, model: &MenuModel<'_>) -> Option<MenuAction> {
    let mut picked = None;

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                item(ui, "New tab", &model.shortcut("new_tab"), MenuAction::NewTab, &mut picked);
                item(
                    ui,
                    "Close tab",
                    &model.shortcut("close_tab"),
                    MenuAction::CloseTab,
                    &mut picked,
                );
                ui.separator();
                item(ui, "Open session...", "", MenuAction::LoadSession, &mut picked);
                item(ui, "Save session...", "", MenuAction::SaveSession, &mut picked);
                ui.separator();
                item(ui, "Exit", &model.shortcut("exit"), MenuAction::Exit, &mut picked);
            });

            ui.menu_button("Edit", |ui| {
                item(ui, "Copy", &model.shortcut("copy"), MenuAction::Copy, &mut picked);
                item(ui, "Paste", &model.shortcut("paste"), MenuAction::Paste, &mut picked);
                ui.separator();
                item(
                    ui,
                    "Set tab name...",
                    &model.shortcut("set_tab_name"),
                    MenuAction::SetTabName,
                    &mut picked,
                );
                item(ui, "Select font...", "", MenuAction::SelectFont, &mut picked);
                item(
                    ui,
                    "Select foreground color...",
                    "",
                    MenuAction::SelectForegroundColor,
                    &mut picked,
                );
            });

            ui.menu_button("View", |ui| {
                scrollbar_item(ui, model, &mut picked);
                ui.menu_button("Encoding", |ui| encoding_items(ui, model, &mut picked));
                ui.separator();
                item(
                    ui,
                    "Previous tab",
                    &model.shortcut("prev_tab"),
                    MenuAction::PreviousTab,
                    &mut picked,
                );
                item(ui, "Next tab", &model.shortcut("next_tab"), MenuAction::NextTab, &mut picked);
            });

            for menu in model.user_menus {
                ui.menu_button(menu.name.as_str(), |ui| {
                    user_items(ui, &menu.items, &mut picked)
                });
            }
        });
    });

    picked
}

fn item(
    ui: &mut egui::Ui,
    label: &str,
    shortcut: &str,
    action: MenuAction,
    picked: &mut Option<MenuAction>,
) {
    let button = egui::Button::new(label).shortcut_text(shortcut);
    if ui.add(button).clicked() {
        *picked = Some(action);
        ui.close();
    }
}

fn scrollbar_item(ui: &mut egui::Ui, model: &MenuModel<'_>, picked: &mut Option<MenuAction>) {
    // The box reflects the tab; the click only requests a toggle
    let mut checked = model.scrollbar_checked;
    if ui.checkbox(&mut checked, "Scrollbar").clicked() {
        *picked = Some(MenuAction::ToggleScrollbar);
        ui.close();
    }
}

fn encoding_items(ui: &mut egui::Ui, model: &MenuModel<'_>, picked: &mut Option<MenuAction>) {
    for encoding in model.encodings {
        let supported = termit_terminal::TerminalEncoding::from_label(encoding).is_some();
        let selected = model.is_current_encoding(encoding);
        let response = ui
            .add_enabled(supported, egui::RadioButton::new(selected, encoding.as_str()))
            .on_disabled_hover_text("Encoding not supported");
        if response.clicked() {
            *picked = Some(MenuAction::SetEncoding(encoding.clone()));
            ui.close();
        }
    }
}

fn user_items(ui: &mut egui::Ui, items: &[UserMenuItem], picked: &mut Option<MenuAction>) {
    if items.is_empty() {
        ui.add_enabled(false, egui::Label::new("(empty)"));
    }
    for user_item in items {
        if ui.button(user_item.name.as_str()).clicked() {
            *picked = Some(MenuAction::UserItem(user_item.clone()));
            ui.close();
        }
    }
}

/// Popup menu state
#[derive(Debug, Default)]
pub struct ContextMenu {
    open: bool,
    pos: egui::Pos2,
    /// Frame the popup opened on, so the opening click does not close it
    opened_frame: Option<u64>,
}

impl ContextMenu {
    pub fn open_at(&mut self, pos: egui::Pos2) {
        self.open = true;
        self.pos = pos;
        self.opened_frame = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn position(&self) -> egui::Pos2 {
        self.pos
    }

    pub fn close(&mut self) {
        self.open = false;
        self.opened_frame = None;
    }

    /// Render the popup and return the picked action
    pub fn show(&mut self, ctx: &egui::Context, model: &MenuModel<'_>) -> Option<MenuAction> {
        if !self.open {
            return None;
        }
        let frame = ctx.cumulative_frame_nr();
        let opened_frame = *self.opened_frame.get_or_insert(frame);

        let mut picked = None;
        let area = egui::Area::new(egui::Id::new("terminal_context_menu"))
            .fixed_pos(self.pos)
            .constrain(true)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .inner_margin(egui::Margin::symmetric(1, 4))
                    .show(ui, |ui| {
                        ui.set_min_width(CONTEXT_MENU_MIN_WIDTH);

                        let entry = |ui: &mut egui::Ui, label: &str| -> bool {
                            ui.add_sized(
                                [ui.available_width(), CONTEXT_MENU_ITEM_HEIGHT],
                                egui::Button::new(label)
                                    .frame(false)
                                    .fill(egui::Color32::TRANSPARENT),
                            )
                            .clicked()
                        };

                        if entry(ui, "New tab") {
                            picked = Some(MenuAction::NewTab);
                        }
                        if entry(ui, "Close tab") {
                            picked = Some(MenuAction::CloseTab);
                        }
                        ui.separator();
                        if entry(ui, "Copy") {
                            picked = Some(MenuAction::Copy);
                        }
                        if entry(ui, "Paste") {
                            picked = Some(MenuAction::Paste);
                        }
                        ui.separator();
                        if entry(ui, "Set tab name...") {
                            picked = Some(MenuAction::SetTabName);
                        }
                        scrollbar_item(ui, model, &mut picked);
                        ui.menu_button("Encoding", |ui| encoding_items(ui, model, &mut picked));

                        for menu in model.user_menus {
                            ui.menu_button(menu.name.as_str(), |ui| {
                    user_items(ui, &menu.items, &mut picked)
                });
                        }
                        ui.separator();
                        if entry(ui, "Exit") {
                            picked = Some(MenuAction::Exit);
                        }
                    });
            });

        let escape = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        let clicked_outside = frame > opened_frame
            && ctx.input(|i| i.pointer.any_click())
            && !area.response.contains_pointer();
        if picked.is_some() || escape || clicked_outside {
            self.close();
        }
        picked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_menu_open_close() {
        let mut menu = ContextMenu::default();
        assert!(!menu.is_open());
        menu.open_at(egui::pos2(40.0, 60.0));
        assert!(menu.is_open());
        assert_eq!(menu.position(), egui::pos2(40.0, 60.0));
        menu.close();
        assert!(!menu.is_open());
    }

    #[test]
    fn test_escape_closes_open_menu() {
        let registry = KeybindingRegistry::new();
        let encodings = vec!["UTF-8".to_string()];
        let model = MenuModel {
            encodings: &encodings,
            current_encoding: Some("UTF-8"),
            user_menus: &[],
            scrollbar_checked: true,
            keybindings: &registry,
        };
        let mut menu = ContextMenu::default();
        menu.open_at(egui::pos2(10.0, 10.0));

        let ctx = egui::Context::default();
        let mut input = egui::RawInput::default();
        input.events.push(egui::Event::Key {
            key: egui::Key::Escape,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        });
        let _ = ctx.run(input, |ctx| {
            assert_eq!(menu.show(ctx, &model), None);
        });
        assert!(!menu.is_open());
    }
}
