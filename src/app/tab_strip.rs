//! The row of page labels above the terminal.

use crate::callbacks::ClickKind;
use crate::tab::Notebook;

/// Height of the tab strip
const TAB_STRIP_HEIGHT: f32 = 26.0;
/// Width of one page label
const TAB_WIDTH: f32 = 150.0;
const TAB_SPACING: f32 = 2.0;

/// What happened on the tab strip this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TabStripEvent {
    /// A page label was clicked
    Select(usize),
    /// The empty part of the strip was clicked
    Click(ClickKind),
    /// A mouse button was pressed somewhere on the strip
    Pointer(egui::PointerButton, egui::Pos2),
}

/// Render the tab strip and return its events
pub fn tab_strip(ctx: &egui::Context, notebook: &Notebook) -> Vec<TabStripEvent> {
    let mut events = Vec::new();
    let current = notebook.current_page();

    egui::TopBottomPanel::top("tab_strip")
        .exact_height(TAB_STRIP_HEIGHT)
        .show(ctx, |ui| {
            // Clicks on the background land on this response
            let background = ui.interact(
                ui.max_rect(),
                egui::Id::new("tab_strip_background"),
                egui::Sense::click(),
            );

            egui::ScrollArea::horizontal()
                .scroll_bar_visibility(egui::scroll_area::ScrollBarVisibility::AlwaysHidden)
                .show(ui, |ui| {
                    ui.horizontal_centered(|ui| {
                        ui.spacing_mut().item_spacing = egui::vec2(TAB_SPACING, 0.0);
                        for (page, tab) in notebook.tabs().iter().enumerate() {
                            let label = egui::RichText::new(tab.label()).monospace();
                            let response = ui
                                .add_sized(
                                    [TAB_WIDTH, TAB_STRIP_HEIGHT - 4.0],
                                    egui::Button::selectable(current == Some(page), label),
                                )
                                .on_hover_text(tab.title.as_str());
                            if response.clicked() && current != Some(page) {
                                events.push(TabStripEvent::Select(page));
                            }
                            if response.secondary_clicked()
                                && let Some(pos) = response.interact_pointer_pos()
                            {
                                events.push(TabStripEvent::Select(page));
                                events.push(TabStripEvent::Pointer(
                                    egui::PointerButton::Secondary,
                                    pos,
                                ));
                            }
                        }
                    });
                });

            if background.triple_clicked() {
                events.push(TabStripEvent::Click(ClickKind::Triple));
            } else if background.double_clicked() {
                events.push(TabStripEvent::Click(ClickKind::Double));
            } else if background.clicked() {
                events.push(TabStripEvent::Click(ClickKind::Single));
            }
            if background.secondary_clicked()
                && let Some(pos) = background.interact_pointer_pos()
            {
                events.push(TabStripEvent::Pointer(egui::PointerButton::Secondary, pos));
            }
        });

    events
}
