//! Offset / line / column conversions for a whole buffer.
//!
//! The index is built once per buffer snapshot and backed by a rope, giving
//! O(log n) conversions in both directions. All offsets are char offsets;
//! lines and columns are 1-based, matching what the render surface and the
//! host shell expect.
//!
//! The index does not observe buffer mutations. A lookup against a stale
//! index is flagged explicitly: out-of-range inputs return `None`, and
//! [`LineIndex::is_synced_with`] lets callers verify the index still
//! describes the buffer they hold.

use ropey::Rope;

/// Rope-backed offset ↔ (line, column) mapping for one buffer snapshot.
#[derive(Debug, Clone)]
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Build an index for `text`.
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Convert a char offset to a 1-based `(line, column)` pair.
    ///
    /// The end-of-buffer offset is valid and maps to one past the last
    /// column of the last line. Offsets beyond it return `None` rather than
    /// clamping, so stale lookups surface instead of silently misplacing.
    ///
    /// # Example
    ///
    /// ```
    /// use officebasic_core::line_index::LineIndex;
    ///
    /// let index = LineIndex::new("Sub Main\nEnd Sub");
    /// assert_eq!(index.offset_to_line_col(0), Some((1, 1)));
    /// assert_eq!(index.offset_to_line_col(9), Some((2, 1)));
    /// assert_eq!(index.offset_to_line_col(99), None);
    /// ```
    pub fn offset_to_line_col(&self, offset: usize) -> Option<(usize, usize)> {
        if offset > self.rope.len_chars() {
            return None;
        }
        let line = self.rope.char_to_line(offset);
        let column = offset - self.rope.line_to_char(line);
        Some((line + 1, column + 1))
    }

    /// Convert a 1-based `(line, column)` pair back to a char offset.
    ///
    /// `column` may be one past the last character of the line (the caret
    /// position at end of line); anything further returns `None`.
    pub fn line_col_to_offset(&self, line: usize, column: usize) -> Option<usize> {
        if line == 0 || column == 0 || line > self.line_count() {
            return None;
        }
        let line_start = self.rope.line_to_char(line - 1);
        if column > self.line_len(line - 1) + 1 {
            return None;
        }
        Some(line_start + column - 1)
    }

    /// Char offset of the first character of a 1-based line.
    pub fn line_start_offset(&self, line: usize) -> Option<usize> {
        if line == 0 || line > self.line_count() {
            return None;
        }
        Some(self.rope.line_to_char(line - 1))
    }

    /// Text of a 1-based line, without its trailing line break.
    pub fn line_text(&self, line: usize) -> Option<String> {
        if line == 0 || line > self.line_count() {
            return None;
        }
        let mut text = self.rope.line(line - 1).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        if text.ends_with('\r') {
            text.pop();
        }
        Some(text)
    }

    /// Total number of lines. An empty buffer has one (empty) line.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total number of chars in the indexed buffer.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns `true` if the index was built from exactly this text.
    ///
    /// Cheap length comparison first, content comparison only on a length
    /// match. Callers that mutated their buffer use this to detect a stale
    /// index before trusting a conversion.
    pub fn is_synced_with(&self, text: &str) -> bool {
        self.rope.len_bytes() == text.len() && self.rope == text
    }

    /// Char length of a 0-based line, excluding the trailing line break.
    fn line_len(&self, line_idx: usize) -> usize {
        let start = self.rope.line_to_char(line_idx);
        let end = if line_idx + 1 < self.rope.len_lines() {
            self.rope.line_to_char(line_idx + 1) - 1
        } else {
            self.rope.len_chars()
        };
        end - start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_is_identity_over_all_offsets() {
        let text = "Dim x\nMsgBox \"héllo\"\n\nEnd Sub";
        let index = LineIndex::new(text);
        for offset in 0..=text.chars().count() {
            let (line, column) = index.offset_to_line_col(offset).unwrap();
            assert_eq!(
                index.line_col_to_offset(line, column),
                Some(offset),
                "offset {offset} must round-trip"
            );
        }
    }

    #[test]
    fn test_one_based_coordinates() {
        let index = LineIndex::new("abc\ndef");
        assert_eq!(index.offset_to_line_col(0), Some((1, 1)));
        assert_eq!(index.offset_to_line_col(2), Some((1, 3)));
        assert_eq!(index.offset_to_line_col(4), Some((2, 1)));
        assert_eq!(index.line_col_to_offset(2, 3), Some(6));
    }

    #[test]
    fn test_out_of_range_is_flagged_not_clamped() {
        let index = LineIndex::new("abc");
        assert_eq!(index.offset_to_line_col(3), Some((1, 4))); // caret at end
        assert_eq!(index.offset_to_line_col(4), None);
        assert_eq!(index.line_col_to_offset(1, 5), None);
        assert_eq!(index.line_col_to_offset(2, 1), None);
        assert_eq!(index.line_col_to_offset(0, 1), None);
    }

    #[test]
    fn test_line_text_strips_line_break() {
        let index = LineIndex::new("first\r\nsecond\nlast");
        assert_eq!(index.line_text(1).as_deref(), Some("first"));
        assert_eq!(index.line_text(2).as_deref(), Some("second"));
        assert_eq!(index.line_text(3).as_deref(), Some("last"));
        assert_eq!(index.line_text(4), None);
    }

    #[test]
    fn test_empty_buffer_has_one_line() {
        let index = LineIndex::new("");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.offset_to_line_col(0), Some((1, 1)));
        assert_eq!(index.line_col_to_offset(1, 1), Some(0));
    }

    #[test]
    fn test_staleness_check() {
        let index = LineIndex::new("a\nb");
        assert!(index.is_synced_with("a\nb"));
        assert!(!index.is_synced_with("a\nbc"));
        assert!(!index.is_synced_with("a\nc"));
    }

    #[test]
    fn test_non_ascii_columns_count_chars() {
        let index = LineIndex::new("héllo\nwörld");
        assert_eq!(index.offset_to_line_col(5), Some((1, 6)));
        assert_eq!(index.offset_to_line_col(6), Some((2, 1)));
        assert_eq!(index.line_col_to_offset(2, 2), Some(7));
    }
}
