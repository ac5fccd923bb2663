/// Text selection in the visible terminal grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Cell where the drag started, (row, col)
    pub anchor: (u16, u16),
    /// Cell under the pointer, (row, col)
    pub head: (u16, u16),
}

impl Selection {
    /// Start a selection at a single cell
    pub fn new(at: (u16, u16)) -> Self {
        Self {
            anchor: at,
            head: at,
        }
    }

    /// Extend the selection to `to`
    pub fn extend(&mut self, to: (u16, u16)) {
        self.head = to;
    }

    /// Get normalized selection (ensures start is before end in reading order)
    pub fn normalized(&self) -> ((u16, u16), (u16, u16)) {
        if self.anchor <= self.head {
            (self.anchor, self.head)
        } else {
            (self.head, self.anchor)
        }
    }

    /// Whether the cell at (row, col) is inside the selection
    pub fn contains(&self, row: u16, col: u16) -> bool {
        let (start, end) = self.normalized();
        if row < start.0 || row > end.0 {
            return false;
        }
        let after_start = row > start.0 || col >= start.1;
        let before_end = row < end.0 || col <= end.1;
        after_start && before_end
    }

    /// A selection that never left its first cell
    pub fn is_single_cell(&self) -> bool {
        self.anchor == self.head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_normalization() {
        let mut sel = Selection::new((0, 10));
        sel.extend((0, 0));
        assert_eq!(sel.normalized(), ((0, 0), (0, 10)));

        let mut sel = Selection::new((1, 5));
        sel.extend((0, 10));
        assert_eq!(sel.normalized(), ((0, 10), (1, 5)));
    }

    #[test]
    fn test_contains_spans_rows() {
        let mut sel = Selection::new((0, 6));
        sel.extend((2, 3));
        assert!(!sel.contains(0, 5));
        assert!(sel.contains(0, 6));
        assert!(sel.contains(0, 79));
        assert!(sel.contains(1, 0));
        assert!(sel.contains(2, 3));
        assert!(!sel.contains(2, 4));
        assert!(!sel.contains(3, 0));
    }
}
