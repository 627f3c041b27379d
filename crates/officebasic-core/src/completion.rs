//! Completion context detection.
//!
//! Before any provider runs, the engine decides whether the cursor is at a
//! completable position at all and, if so, what is being completed: the
//! trailing identifier prefix, and - for member access - the object name
//! before the dot. A context is never produced while the cursor sits inside
//! a string literal or a comment; "not applicable" is `None`, not an error.

use officebasic_lang as lang;

/// Interactive cause of a completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionTrigger {
    /// Explicit invocation (shortcut, menu).
    Manual,
    /// A member-access dot was typed.
    Dot,
    /// Ongoing typing.
    Typing,
}

/// Everything the providers need to know about one completion request.
///
/// Ephemeral: recomputed from the buffer and caret on every request and
/// discarded afterwards. `line`/`column` are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionContext {
    /// What caused the request. A detected member-access dot overrides the
    /// requested trigger.
    pub trigger: CompletionTrigger,
    /// The identifier run immediately before the cursor (may be empty for
    /// manual and dot requests).
    pub prefix: String,
    /// Char offset where `prefix` starts.
    pub prefix_start_offset: usize,
    /// 1-based line of the cursor.
    pub line: usize,
    /// 1-based column of the cursor.
    pub column: usize,
    /// The identifier before the member-access dot, for dot contexts.
    pub object_name: Option<String>,
}

/// Build a completion context for `cursor_offset` in `source`.
///
/// Returns `None` when completion is not applicable: offset 0 while typing,
/// cursor inside a string or comment, or a typing request with nothing
/// typed yet.
///
/// # Example
///
/// ```
/// use officebasic_core::completion::{detect_context, CompletionTrigger};
///
/// let ctx = detect_context("Dim x As In", 11, CompletionTrigger::Typing).unwrap();
/// assert_eq!(ctx.prefix, "In");
/// assert_eq!(ctx.prefix_start_offset, 9);
/// ```
pub fn detect_context(
    source: &str,
    cursor_offset: usize,
    requested: CompletionTrigger,
) -> Option<CompletionContext> {
    if cursor_offset == 0 && requested == CompletionTrigger::Typing {
        return None;
    }

    let chars: Vec<char> = source.chars().collect();
    let cursor = cursor_offset.min(chars.len());

    let line_start = line_start_before(&chars, cursor);
    if inside_string_or_comment(&chars[line_start..cursor]) {
        return None;
    }

    // Maximal trailing identifier run.
    let mut prefix_start = cursor;
    while prefix_start > line_start && is_identifier_char(chars[prefix_start - 1]) {
        prefix_start -= 1;
    }
    let prefix: String = chars[prefix_start..cursor].iter().collect();

    // Dot detection: skip whitespace backward from the prefix start; a
    // member-access dot forces the dot trigger whatever was requested.
    let mut trigger = requested;
    let mut object_name = None;
    let mut probe = prefix_start;
    while probe > line_start && chars[probe - 1].is_whitespace() {
        probe -= 1;
    }
    if probe > line_start && chars[probe - 1] == '.' {
        trigger = CompletionTrigger::Dot;
        let dot = probe - 1;
        let mut name_start = dot;
        while name_start > line_start && is_identifier_char(chars[name_start - 1]) {
            name_start -= 1;
        }
        if name_start < dot {
            object_name = Some(chars[name_start..dot].iter().collect());
        }
    }

    if trigger == CompletionTrigger::Typing && prefix.is_empty() {
        return None;
    }

    let line = chars[..cursor].iter().filter(|&&ch| ch == '\n').count() + 1;
    let column = cursor - line_start + 1;

    Some(CompletionContext {
        trigger,
        prefix,
        prefix_start_offset: prefix_start,
        line,
        column,
        object_name,
    })
}

fn is_identifier_char(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

/// Char offset of the start of the line containing `cursor`.
fn line_start_before(chars: &[char], cursor: usize) -> usize {
    chars[..cursor]
        .iter()
        .rposition(|&ch| ch == '\n')
        .map_or(0, |idx| idx + 1)
}

/// Scan the line up to the cursor: an odd count of quotes (with doubled
/// quotes collapsing to one escaped quote) means the cursor is inside a
/// string; an apostrophe or a word-boundary `Rem` outside a string means a
/// comment.
fn inside_string_or_comment(line_prefix: &[char]) -> bool {
    let mut in_string = false;
    let mut i = 0;

    while i < line_prefix.len() {
        let ch = line_prefix[i];
        if in_string {
            if ch == '"' {
                if line_prefix.get(i + 1) == Some(&'"') {
                    i += 2;
                    continue;
                }
                in_string = false;
            }
            i += 1;
            continue;
        }

        match ch {
            '"' => in_string = true,
            ch if ch == lang::COMMENT_CHAR => return true,
            ch if ch.eq_ignore_ascii_case(&'r') && is_comment_keyword_at(line_prefix, i) => {
                return true;
            }
            _ => {}
        }
        i += 1;
    }

    in_string
}

/// Word-boundary check for the `Rem` comment keyword at `pos`.
fn is_comment_keyword_at(line_prefix: &[char], pos: usize) -> bool {
    let keyword: Vec<char> = lang::COMMENT_KEYWORD.chars().collect();
    if pos > 0 && is_identifier_char(line_prefix[pos - 1]) {
        return false;
    }
    let end = pos + keyword.len();
    if end > line_prefix.len() {
        return false;
    }
    let matches_keyword = line_prefix[pos..end]
        .iter()
        .zip(&keyword)
        .all(|(a, b)| a.eq_ignore_ascii_case(b));
    // A cursor right after `Rem` (no separator yet) already sits in the
    // comment the keyword just opened.
    matches_keyword
        && line_prefix
            .get(end)
            .map_or(true, |ch| !is_identifier_char(*ch))
}
