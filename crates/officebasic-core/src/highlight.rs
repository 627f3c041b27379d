//! Highlight ranges and cursor coordinates for the render surface.
//!
//! The renderer works in 1-based `(line, column)` coordinates while the
//! engine works in char offsets; this module is the conversion layer. It
//! produces data, not pixels: what a range means visually is the
//! renderer's business.

use crate::line_index::LineIndex;
use crate::search::SearchMatch;

/// What a highlight range marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    /// The user's selection.
    Selection,
    /// A search match.
    SearchMatch,
    /// The active search match.
    ActiveSearchMatch,
}

/// A renderer-facing range in 1-based line/column coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightRange {
    /// 1-based start line.
    pub start_line: usize,
    /// 1-based start column.
    pub start_column: usize,
    /// 1-based end line.
    pub end_line: usize,
    /// 1-based column just past the range end.
    pub end_column: usize,
    /// What the range marks.
    pub kind: HighlightKind,
}

/// A renderer-facing caret position, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPosition {
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
}

/// Convert a char-offset range into a highlight range.
///
/// `None` when either end is out of range for the indexed buffer - the
/// caller is holding a stale index or stale offsets.
pub fn highlight_for_range(
    index: &LineIndex,
    start_offset: usize,
    end_offset: usize,
    kind: HighlightKind,
) -> Option<HighlightRange> {
    let (start_line, start_column) = index.offset_to_line_col(start_offset)?;
    let (end_line, end_column) = index.offset_to_line_col(end_offset)?;
    Some(HighlightRange {
        start_line,
        start_column,
        end_line,
        end_column,
        kind,
    })
}

/// A highlight range for a search match, using the coordinates the search
/// engine already resolved.
pub fn highlight_for_match(matched: &SearchMatch, kind: HighlightKind) -> HighlightRange {
    HighlightRange {
        start_line: matched.line,
        start_column: matched.start_column,
        end_line: matched.end_line,
        end_column: matched.end_column,
        kind,
    }
}

/// Convert a caret char offset into a renderer position. `None` past the
/// end of the indexed buffer.
pub fn cursor_position(index: &LineIndex, offset: usize) -> Option<CursorPosition> {
    let (line, column) = index.offset_to_line_col(offset)?;
    Some(CursorPosition { line, column })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{find_matches, SearchOptions};

    #[test]
    fn test_range_conversion() {
        let index = LineIndex::new("Dim x\nDim y");
        let range = highlight_for_range(&index, 6, 9, HighlightKind::Selection).unwrap();
        assert_eq!((range.start_line, range.start_column), (2, 1));
        assert_eq!((range.end_line, range.end_column), (2, 4));
    }

    #[test]
    fn test_stale_offsets_are_flagged() {
        let index = LineIndex::new("abc");
        assert!(highlight_for_range(&index, 0, 99, HighlightKind::Selection).is_none());
        assert!(cursor_position(&index, 99).is_none());
    }

    #[test]
    fn test_match_highlight_reuses_resolved_coordinates() {
        let text = "x = 1\ny = x";
        let matches = find_matches(text, "x", SearchOptions::default());
        let range = highlight_for_match(&matches[1], HighlightKind::ActiveSearchMatch);
        assert_eq!((range.start_line, range.start_column), (2, 5));
        assert_eq!(range.kind, HighlightKind::ActiveSearchMatch);
    }

    #[test]
    fn test_cursor_position_at_end_of_buffer() {
        let index = LineIndex::new("ab");
        let cursor = cursor_position(&index, 2).unwrap();
        assert_eq!((cursor.line, cursor.column), (1, 3));
    }
}
