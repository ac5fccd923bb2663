//! Drawing the current tab's screen and handling mouse input on it.

use super::palette::{bold_variant, cell_color, rgb};
use crate::selection::Selection;
use crate::tab::Tab;
use egui::text::LayoutJob;
use egui::{Color32, FontId, Pos2, Rect, Sense, Stroke, StrokeKind, TextFormat, vec2};
use termit_config::Config;

/// Width of the scrollbar strip
const SCROLLBAR_WIDTH: f32 = 12.0;
/// Minimum thumb height
const SCROLLBAR_MIN_THUMB: f32 = 16.0;
const SELECTION_COLOR: Color32 = Color32::from_rgba_premultiplied(70, 90, 140, 160);

/// What the terminal area reported this frame
#[derive(Debug, Default)]
pub struct TerminalViewOutput {
    /// Grid that fits the area, in (cols, rows)
    pub grid_size: Option<(u16, u16)>,
    /// A non-primary button press, with its position
    pub pointer: Option<(egui::PointerButton, Pos2)>,
    /// A drag selection ended this frame
    pub selection_finished: bool,
}

/// Size of one character cell for `font_id`
pub fn cell_size(painter: &egui::Painter, font_id: &FontId) -> egui::Vec2 {
    let galley = painter.layout_no_wrap("M".to_string(), font_id.clone(), Color32::WHITE);
    vec2(galley.size().x.max(1.0), galley.size().y.max(1.0))
}

/// Render `tab` into the remaining central area
pub fn terminal_view(
    ctx: &egui::Context,
    tab: Option<&mut Tab>,
    config: &Config,
) -> TerminalViewOutput {
    let mut output = TerminalViewOutput::default();
    let background = rgb(config.background_color);
    let foreground = rgb(config.foreground_color);
    let font_id = FontId::monospace(config.font_description().size);

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(background))
        .show(ctx, |ui| {
            let full = ui.available_rect_before_wrap();
            let Some(tab) = tab else {
                return;
            };
            let cell = cell_size(ui.painter(), &font_id);

            let scrollbar_width = if tab.scrollbar_is_shown {
                SCROLLBAR_WIDTH
            } else {
                0.0
            };
            let grid_rect =
                Rect::from_min_max(full.min, Pos2::new(full.max.x - scrollbar_width, full.max.y));
            let cols = (grid_rect.width() / cell.x).floor().clamp(1.0, u16::MAX as f32) as u16;
            let rows = (grid_rect.height() / cell.y).floor().clamp(1.0, u16::MAX as f32) as u16;
            output.grid_size = Some((cols, rows));

            let response = ui.interact(
                grid_rect,
                ui.id().with("terminal_grid"),
                Sense::click_and_drag(),
            );
            handle_mouse(ui, &response, tab, grid_rect, cell, &mut output);

            let colors = (foreground, background);
            draw_screen(&ui.painter_at(grid_rect), tab, grid_rect.min, cell, &font_id, colors);

            if tab.scrollbar_is_shown {
                let bar_rect =
                    Rect::from_min_max(Pos2::new(grid_rect.max.x, full.min.y), full.max);
                scrollbar(ui, tab, bar_rect);
            }
        });

    output
}

/// Grid cell under `pos`, clamped to the visible screen
fn cell_at(pos: Pos2, grid: Rect, cell: egui::Vec2, dims: (u16, u16)) -> (u16, u16) {
    let col = ((pos.x - grid.min.x) / cell.x).floor().max(0.0) as u16;
    let row = ((pos.y - grid.min.y) / cell.y).floor().max(0.0) as u16;
    (
        row.min(dims.1.saturating_sub(1)),
        col.min(dims.0.saturating_sub(1)),
    )
}

fn handle_mouse(
    ui: &egui::Ui,
    response: &egui::Response,
    tab: &mut Tab,
    grid: Rect,
    cell: egui::Vec2,
    output: &mut TerminalViewOutput,
) {
    let dims = tab.terminal.dimensions();

    if response.drag_started_by(egui::PointerButton::Primary)
        && let Some(pos) = response.interact_pointer_pos()
    {
        tab.selection = Some(Selection::new(cell_at(pos, grid, cell, dims)));
    } else if response.dragged_by(egui::PointerButton::Primary)
        && let Some(pos) = response.interact_pointer_pos()
        && let Some(selection) = tab.selection.as_mut()
    {
        selection.extend(cell_at(pos, grid, cell, dims));
    }
    if response.drag_stopped_by(egui::PointerButton::Primary) {
        output.selection_finished = true;
    }
    if response.clicked() {
        tab.selection = None;
    }

    for button in [egui::PointerButton::Secondary, egui::PointerButton::Middle] {
        if response.clicked_by(button)
            && let Some(pos) = response.interact_pointer_pos()
        {
            output.pointer = Some((button, pos));
        }
    }

    if response.hovered() {
        let delta = ui.input(|i| i.raw_scroll_delta.y);
        let lines = (delta / cell.y).round() as isize;
        if lines != 0 {
            let offset = tab.terminal.scroll_offset().saturating_add_signed(lines);
            tab.terminal.set_scroll_offset(offset);
        }
    }
}

/// Paint the visible grid; `colors` are the default (foreground, background)
fn draw_screen(
    painter: &egui::Painter,
    tab: &Tab,
    origin: Pos2,
    cell: egui::Vec2,
    font_id: &FontId,
    colors: (Color32, Color32),
) {
    let (foreground, background) = colors;
    let snapshot = tab.terminal.snapshot();

    for (row, cells) in snapshot.rows.iter().enumerate() {
        let y = origin.y + row as f32 * cell.y;
        let mut job = LayoutJob::default();

        for (col, screen_cell) in cells.iter().enumerate() {
            let fg_color = if screen_cell.bold {
                bold_variant(screen_cell.fg)
            } else {
                screen_cell.fg
            };
            let mut fg = cell_color(fg_color, foreground);
            let mut bg = cell_color(screen_cell.bg, background);
            if screen_cell.inverse {
                std::mem::swap(&mut fg, &mut bg);
            }

            let cell_rect =
                Rect::from_min_size(Pos2::new(origin.x + col as f32 * cell.x, y), cell);
            if bg != background {
                painter.rect_filled(cell_rect, 0.0, bg);
            }
            if tab
                .selection
                .is_some_and(|s| !s.is_single_cell() && s.contains(row as u16, col as u16))
            {
                painter.rect_filled(cell_rect, 0.0, SELECTION_COLOR);
            }

            job.append(
                &screen_cell.text,
                0.0,
                TextFormat {
                    font_id: font_id.clone(),
                    color: fg,
                    italics: screen_cell.italic,
                    underline: if screen_cell.underline {
                        Stroke::new(1.0, fg)
                    } else {
                        Stroke::NONE
                    },
                    ..Default::default()
                },
            );
        }

        let galley = painter.layout_job(job);
        painter.galley(Pos2::new(origin.x, y), galley, foreground);
    }

    if snapshot.cursor_visible {
        let (row, col) = snapshot.cursor;
        let rect = Rect::from_min_size(
            Pos2::new(origin.x + col as f32 * cell.x, origin.y + row as f32 * cell.y),
            cell,
        );
        painter.rect_stroke(rect, 0.0, Stroke::new(1.0, foreground), StrokeKind::Inside);
    }
}

/// Vertical scrollbar over the scrollback history
fn scrollbar(ui: &mut egui::Ui, tab: &mut Tab, rect: Rect) {
    let history = tab.terminal.scrollback_len();
    let (_, rows) = tab.terminal.dimensions();
    let offset = tab.terminal.scroll_offset();

    let response = ui.interact(
        rect,
        ui.id().with("terminal_scrollbar"),
        Sense::click_and_drag(),
    );
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, ui.visuals().extreme_bg_color);

    let total = (history + rows as usize).max(1) as f32;
    let thumb_height = (rect.height() * rows as f32 / total)
        .max(SCROLLBAR_MIN_THUMB)
        .min(rect.height());
    let track = (rect.height() - thumb_height).max(0.0);
    // Offset 0 is the live screen at the bottom
    let position = if history == 0 {
        1.0
    } else {
        1.0 - offset as f32 / history as f32
    };
    let thumb = Rect::from_min_size(
        Pos2::new(rect.min.x + 2.0, rect.min.y + track * position),
        vec2(rect.width() - 4.0, thumb_height),
    );
    let thumb_color = if response.dragged() || response.hovered() {
        ui.visuals().widgets.hovered.bg_fill
    } else {
        ui.visuals().widgets.inactive.bg_fill
    };
    painter.rect_filled(thumb, 3.0, thumb_color);

    if (response.dragged() || response.clicked())
        && history > 0
        && track > 0.0
        && let Some(pos) = response.interact_pointer_pos()
    {
        let fraction = ((pos.y - rect.min.y - thumb_height / 2.0) / track).clamp(0.0, 1.0);
        let target = ((1.0 - fraction) * history as f32).round() as usize;
        tab.terminal.set_scroll_offset(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_at_clamps_to_grid() {
        let grid = Rect::from_min_size(Pos2::new(10.0, 20.0), vec2(800.0, 480.0));
        let cell = vec2(10.0, 20.0);
        assert_eq!(cell_at(Pos2::new(10.0, 20.0), grid, cell, (80, 24)), (0, 0));
        assert_eq!(cell_at(Pos2::new(35.0, 65.0), grid, cell, (80, 24)), (2, 2));
        assert_eq!(cell_at(Pos2::new(5000.0, 5000.0), grid, cell, (80, 24)), (23, 79));
        assert_eq!(cell_at(Pos2::new(0.0, 0.0), grid, cell, (80, 24)), (0, 0));
    }
}
