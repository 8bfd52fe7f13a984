//! Screen buffer types
//!
//! Provides a character-based screen buffer for the printer's display.

use heapless::String;

/// Number of character rows on the standard display
pub const SCREEN_ROWS: usize = 6;

/// Number of character columns on the standard display
pub const SCREEN_COLS: usize = 21;

/// Maximum characters per line
pub const LINE_LEN: usize = SCREEN_COLS;

/// Screen buffer for text-mode rendering
///
/// Holds the rows the renderer produced plus per-row selection highlights,
/// ready to hand to any `DisplayBackend` implementation.
#[derive(Clone)]
pub struct Screen {
    /// Current display content
    lines: [String<LINE_LEN>; SCREEN_ROWS],
    /// Selection/highlight state per row (start_col, end_col)
    highlights: [Option<(u8, u8)>; SCREEN_ROWS],
    /// Whether the screen needs to be redrawn
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new empty screen
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            highlights: [None; SCREEN_ROWS],
            dirty: true,
        }
    }

    /// Clear the entire screen
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        for highlight in &mut self.highlights {
            *highlight = None;
        }
        self.dirty = true;
    }

    /// Set the content of a specific row
    pub fn set_line(&mut self, row: usize, text: &str) {
        if row < SCREEN_ROWS {
            self.lines[row].clear();
            // Truncate if too long
            let text = if text.len() > LINE_LEN {
                &text[..LINE_LEN]
            } else {
                text
            };
            let _ = self.lines[row].push_str(text);
            self.dirty = true;
        }
    }

    /// Set a row from two parts, the second right-aligned
    ///
    /// Status rows pair a label with a value pushed to the right edge.
    pub fn set_line_split(&mut self, row: usize, left: &str, right: &str) {
        if row >= SCREEN_ROWS {
            return;
        }
        let mut buf: String<LINE_LEN> = String::new();
        let left_len = left.len().min(LINE_LEN);
        let _ = buf.push_str(&left[..left_len]);
        let right_len = right.len().min(LINE_LEN);
        let pad = LINE_LEN.saturating_sub(left_len + right_len);
        for _ in 0..pad {
            let _ = buf.push(' ');
        }
        let _ = buf.push_str(&right[..right_len]);
        self.lines[row].clear();
        let _ = self.lines[row].push_str(&buf);
        self.dirty = true;
    }

    /// Get the content of a specific row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Set highlight (invert) region for a row
    pub fn set_highlight(&mut self, row: usize, start_col: u8, end_col: u8) {
        if row < SCREEN_ROWS {
            self.highlights[row] = Some((start_col, end_col));
            self.dirty = true;
        }
    }

    /// Clear highlight for a row
    pub fn clear_highlight(&mut self, row: usize) {
        if row < SCREEN_ROWS {
            self.highlights[row] = None;
            self.dirty = true;
        }
    }

    /// Clear all highlights
    pub fn clear_all_highlights(&mut self) {
        for highlight in &mut self.highlights {
            *highlight = None;
        }
        self.dirty = true;
    }

    /// Get highlight region for a row
    pub fn get_highlight(&self, row: usize) -> Option<(u8, u8)> {
        self.highlights.get(row).copied().flatten()
    }

    /// Check if screen needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark screen as clean (after rendering)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Mark screen as dirty (needs redraw)
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_line_truncates() {
        let mut screen = Screen::new();
        screen.set_line(0, "a line that is much longer than the display");
        assert_eq!(screen.get_line(0).unwrap().len(), LINE_LEN);
    }

    #[test]
    fn test_set_line_out_of_range_is_ignored() {
        let mut screen = Screen::new();
        screen.set_line(SCREEN_ROWS, "nope");
        assert_eq!(screen.get_line(SCREEN_ROWS), None);
    }

    #[test]
    fn test_split_line_right_aligns() {
        let mut screen = Screen::new();
        screen.set_line_split(1, "Z", "12.5");
        let line = screen.get_line(1).unwrap();
        assert_eq!(line.len(), LINE_LEN);
        assert!(line.starts_with('Z'));
        assert!(line.ends_with("12.5"));
    }

    #[test]
    fn test_highlight_round_trip() {
        let mut screen = Screen::new();
        screen.set_highlight(2, 0, 10);
        assert_eq!(screen.get_highlight(2), Some((0, 10)));
        screen.clear_highlight(2);
        assert_eq!(screen.get_highlight(2), None);
    }

    #[test]
    fn test_dirty_tracking() {
        let mut screen = Screen::new();
        screen.mark_clean();
        assert!(!screen.is_dirty());
        screen.set_line(0, "x");
        assert!(screen.is_dirty());
    }
}
