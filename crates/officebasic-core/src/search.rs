//! Match finding over a single buffer.
//!
//! Queries are compiled to a regex whether or not the user asked for regex
//! mode: plain queries are escaped first, so one code path handles both.
//! All public offsets are char offsets; lines and columns are 1-based and
//! recomputed through [`LineIndex`] for both ends of a match, so multi-line
//! matches carry exact end coordinates.
//!
//! A malformed pattern is not an error the caller has to handle: it yields
//! an empty match list, the same as "no results". Zero-width matches are
//! skipped with a forced one-position advance so degenerate patterns
//! (`a*`) terminate, and a hard cap bounds pathological inputs.

use crate::line_index::LineIndex;
use regex::{Regex, RegexBuilder};

/// Upper bound on matches returned by one search.
pub const MATCH_LIMIT: usize = 10_000;

/// Options that control how a search is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// If `true`, performs a case-sensitive search.
    pub case_sensitive: bool,
    /// If `true`, matches only whole words (alphanumeric and `_`).
    pub whole_word: bool,
    /// If `true`, treats the query as a regex pattern.
    pub use_regex: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            whole_word: false,
            use_regex: false,
        }
    }
}

/// One match, with char offsets and 1-based line/column coordinates.
///
/// Offsets are valid only until the next buffer mutation; after a
/// replacement, the surviving matches are rebased by the replace session
/// rather than re-resolved from stale coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    /// Inclusive start char offset.
    pub start_offset: usize,
    /// Exclusive end char offset.
    pub end_offset: usize,
    /// 1-based line of the match start.
    pub line: usize,
    /// 1-based line of the match end (differs for multi-line matches).
    pub end_line: usize,
    /// 1-based column of the match start.
    pub start_column: usize,
    /// 1-based column just past the match end, on `end_line`.
    pub end_column: usize,
    /// The matched text.
    pub text: String,
}

impl SearchMatch {
    /// Length of the match in chars.
    pub fn len(&self) -> usize {
        self.end_offset - self.start_offset
    }

    /// Returns `true` for a zero-length match (never produced by
    /// [`find_matches`]).
    pub fn is_empty(&self) -> bool {
        self.start_offset >= self.end_offset
    }
}

/// Byte ↔ char offset mapping for one buffer snapshot.
///
/// The regex engine works in byte offsets; everything public here works in
/// char offsets. Built once per search.
#[derive(Debug)]
struct CharIndex {
    char_to_byte: Vec<usize>,
    text_len: usize,
}

impl CharIndex {
    fn new(text: &str) -> Self {
        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        char_to_byte.push(text.len());
        Self {
            char_to_byte,
            text_len: text.len(),
        }
    }

    fn char_count(&self) -> usize {
        self.char_to_byte.len() - 1
    }

    fn char_to_byte(&self, char_offset: usize) -> usize {
        self.char_to_byte
            .get(char_offset.min(self.char_count()))
            .copied()
            .unwrap_or(self.text_len)
    }

    fn byte_to_char(&self, byte_offset: usize) -> usize {
        let clamped = byte_offset.min(self.text_len);
        match self.char_to_byte.binary_search(&clamped) {
            Ok(idx) | Err(idx) => idx,
        }
    }

    fn char_at(&self, text: &str, char_offset: usize) -> Option<char> {
        if char_offset >= self.char_count() {
            return None;
        }
        let start = self.char_to_byte[char_offset];
        let end = self.char_to_byte[char_offset + 1];
        text.get(start..end)?.chars().next()
    }
}

/// Compile `query` under `options`; `None` for malformed patterns.
fn compile_query(query: &str, options: SearchOptions) -> Option<Regex> {
    let pattern = if options.use_regex {
        query.to_string()
    } else {
        regex::escape(query)
    };

    RegexBuilder::new(&pattern)
        .case_insensitive(!options.case_sensitive)
        .multi_line(true)
        .build()
        .ok()
}

fn is_word_char(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

fn is_whole_word(text: &str, index: &CharIndex, start: usize, end: usize) -> bool {
    let before = if start == 0 {
        None
    } else {
        index.char_at(text, start - 1)
    };
    let after = index.char_at(text, end);

    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// Find every occurrence of `query` in `text`.
///
/// - An empty query yields no matches.
/// - A malformed regex pattern yields no matches (soft failure).
/// - Results are ordered by start offset and capped at [`MATCH_LIMIT`].
///
/// # Example
///
/// ```
/// use officebasic_core::search::{find_matches, SearchOptions};
///
/// let options = SearchOptions {
///     case_sensitive: false,
///     ..SearchOptions::default()
/// };
/// let matches = find_matches("Hello World Hello", "hello", options);
/// assert_eq!(matches.len(), 2);
/// assert_eq!(matches[1].start_offset, 12);
/// ```
pub fn find_matches(text: &str, query: &str, options: SearchOptions) -> Vec<SearchMatch> {
    if query.is_empty() {
        return Vec::new();
    }
    let Some(re) = compile_query(query, options) else {
        return Vec::new();
    };

    let char_index = CharIndex::new(text);
    let line_index = LineIndex::new(text);
    let mut matches = Vec::new();
    let mut from_char = 0;

    while from_char <= char_index.char_count() {
        let from_byte = char_index.char_to_byte(from_char);
        let Some(m) = re.find_at(text, from_byte) else {
            break;
        };

        let start = char_index.byte_to_char(m.start());
        let end = char_index.byte_to_char(m.end());

        if start == end {
            // Zero-width: advance one position so the loop terminates.
            from_char = end + 1;
            continue;
        }
        from_char = end;

        if options.whole_word && !is_whole_word(text, &char_index, start, end) {
            continue;
        }

        matches.push(resolve_match(text, &line_index, m.as_str(), start, end));
        if matches.len() == MATCH_LIMIT {
            log::debug!("search hit the {MATCH_LIMIT}-match cap, truncating");
            break;
        }
    }

    matches
}

fn resolve_match(
    text: &str,
    line_index: &LineIndex,
    matched: &str,
    start: usize,
    end: usize,
) -> SearchMatch {
    debug_assert!(line_index.is_synced_with(text));
    // Both lookups are in range by construction: the regex matched inside
    // the same text the index was built from.
    let (line, start_column) = line_index.offset_to_line_col(start).unwrap_or((1, 1));
    let (end_line, end_column) = line_index.offset_to_line_col(end).unwrap_or((1, 1));
    SearchMatch {
        start_offset: start,
        end_offset: end,
        line,
        end_line,
        start_column,
        end_column,
        text: matched.to_string(),
    }
}
