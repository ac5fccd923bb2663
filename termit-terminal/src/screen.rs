//! Screen state helpers: title tracking callbacks and drawable snapshots.

/// Receives out-of-band events from the vt100 parser.
#[derive(Debug, Default)]
pub(crate) struct TitleTracker {
    title: Option<String>,
    title_changed: bool,
}

impl TitleTracker {
    pub(crate) fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns true once per title change.
    pub(crate) fn take_title_changed(&mut self) -> bool {
        std::mem::take(&mut self.title_changed)
    }
}

impl vt100::Callbacks for TitleTracker {
    fn set_window_title(&mut self, _: &mut vt100::Screen, title: &[u8]) {
        let title = String::from_utf8_lossy(title).into_owned();
        if self.title.as_deref() != Some(title.as_str()) {
            self.title = Some(title);
            self.title_changed = true;
        }
    }
}

/// Colour of a cell as reported by the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellColor {
    /// The terminal's configured foreground or background
    Default,
    /// One of the 256 palette entries
    Indexed(u8),
    Rgb(u8, u8, u8),
}

impl From<vt100::Color> for CellColor {
    fn from(color: vt100::Color) -> Self {
        match color {
            vt100::Color::Default => CellColor::Default,
            vt100::Color::Idx(i) => CellColor::Indexed(i),
            vt100::Color::Rgb(r, g, b) => CellColor::Rgb(r, g, b),
        }
    }
}

/// One drawable cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenCell {
    pub text: String,
    pub fg: CellColor,
    pub bg: CellColor,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub inverse: bool,
}

/// Copy of the visible grid taken under the screen lock.
#[derive(Debug, Clone, Default)]
pub struct ScreenSnapshot {
    pub rows: Vec<Vec<ScreenCell>>,
    /// (row, col)
    pub cursor: (u16, u16),
    pub cursor_visible: bool,
}

impl ScreenSnapshot {
    pub(crate) fn capture(screen: &vt100::Screen) -> Self {
        let (rows, cols) = screen.size();
        let mut grid = Vec::with_capacity(rows as usize);

        for row in 0..rows {
            let mut cells = Vec::with_capacity(cols as usize);
            for col in 0..cols {
                let Some(cell) = screen.cell(row, col) else {
                    continue;
                };
                // The wide character in the previous column covers this one
                if cell.is_wide_continuation() {
                    continue;
                }
                let text = if cell.has_contents() {
                    cell.contents().to_string()
                } else {
                    " ".to_string()
                };
                cells.push(ScreenCell {
                    text,
                    fg: cell.fgcolor().into(),
                    bg: cell.bgcolor().into(),
                    bold: cell.bold(),
                    italic: cell.italic(),
                    underline: cell.underline(),
                    inverse: cell.inverse(),
                });
            }
            grid.push(cells);
        }

        Self {
            rows: grid,
            cursor: screen.cursor_position(),
            // The cursor is hidden while looking at scrollback
            cursor_visible: !screen.hide_cursor() && screen.scrollback() == 0,
        }
    }

    /// Plain text of one row with trailing blanks removed.
    #[cfg(test)]
    pub(crate) fn row_text(&self, row: usize) -> String {
        self.rows
            .get(row)
            .map(|cells| cells.iter().map(|c| c.text.as_str()).collect::<String>())
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default()
    }
}
