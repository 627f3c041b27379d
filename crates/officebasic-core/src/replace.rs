//! Offset-safe replacement over a live match list.
//!
//! Match offsets go stale the moment the buffer mutates, so replacement is
//! owned by a session that rebases the surviving matches itself: after a
//! single replacement every later match shifts by the length delta, and a
//! replace-all applies from the highest offset down so earlier spans are
//! never disturbed. Callers never reuse offsets across a mutation.

use crate::search::{find_matches, SearchMatch, SearchOptions};

/// A find/replace session: the current match list plus the active match.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    matches: Vec<SearchMatch>,
    active: usize,
}

impl SearchSession {
    /// Start a session over a freshly computed match list.
    pub fn new(matches: Vec<SearchMatch>) -> Self {
        Self { matches, active: 0 }
    }

    /// Run [`find_matches`] and start a session over the result.
    pub fn search(text: &str, query: &str, options: SearchOptions) -> Self {
        Self::new(find_matches(text, query, options))
    }

    /// The live match list.
    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }

    /// Number of live matches.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Returns `true` if no matches remain.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Index of the active match, if any match remains.
    pub fn active_index(&self) -> Option<usize> {
        (!self.matches.is_empty()).then_some(self.active)
    }

    /// The active match, if any match remains.
    pub fn active_match(&self) -> Option<&SearchMatch> {
        self.matches.get(self.active)
    }

    /// Make the match at `index` active. Out-of-range indices are ignored.
    pub fn set_active(&mut self, index: usize) {
        if index < self.matches.len() {
            self.active = index;
        }
    }

    /// Advance to the next match, wrapping past the end.
    pub fn select_next(&mut self) -> Option<&SearchMatch> {
        if self.matches.is_empty() {
            return None;
        }
        self.active = (self.active + 1) % self.matches.len();
        self.active_match()
    }

    /// Step back to the previous match, wrapping before the start.
    pub fn select_prev(&mut self) -> Option<&SearchMatch> {
        if self.matches.is_empty() {
            return None;
        }
        self.active = self
            .active
            .checked_sub(1)
            .unwrap_or(self.matches.len() - 1);
        self.active_match()
    }

    /// Select the first match at or after `offset`, wrapping to the first
    /// match overall when none follows. Returns the newly active match.
    pub fn select_from_offset(&mut self, offset: usize) -> Option<&SearchMatch> {
        if self.matches.is_empty() {
            return None;
        }
        self.active = self
            .matches
            .iter()
            .position(|m| m.start_offset >= offset)
            .unwrap_or(0);
        self.active_match()
    }

    /// Replace the active match's span in `text` with `replacement`.
    ///
    /// The active match is dropped from the live list, every later match is
    /// shifted by the length delta between replacement and matched text, and
    /// the active index is clamped. Returns the new buffer, or `None` when
    /// no match is active.
    pub fn replace_current(&mut self, text: &str, replacement: &str) -> Option<String> {
        if self.active >= self.matches.len() {
            return None;
        }
        let replaced = self.matches.remove(self.active);
        let new_text = splice(text, replaced.start_offset, replaced.end_offset, replacement);

        let delta = replacement.chars().count() as isize - replaced.len() as isize;
        for m in &mut self.matches {
            if m.start_offset > replaced.start_offset {
                m.start_offset = shift(m.start_offset, delta);
                m.end_offset = shift(m.end_offset, delta);
            }
        }
        if self.active >= self.matches.len() && !self.matches.is_empty() {
            self.active = self.matches.len() - 1;
        }

        Some(new_text)
    }

    /// Replace every live match with `replacement` and clear the list.
    ///
    /// Matches are applied from the highest offset to the lowest, so no
    /// span is invalidated before it is used.
    pub fn replace_all(&mut self, text: &str, replacement: &str) -> String {
        let mut new_text = text.to_string();
        for m in self.matches.iter().rev() {
            new_text = splice(&new_text, m.start_offset, m.end_offset, replacement);
        }
        log::debug!("replace_all rewrote {} match(es)", self.matches.len());
        self.matches.clear();
        self.active = 0;
        new_text
    }
}

/// Replace the char range `start..end` of `text` with `replacement`.
fn splice(text: &str, start: usize, end: usize, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len() + replacement.len());
    out.extend(text.chars().take(start));
    out.push_str(replacement);
    out.extend(text.chars().skip(end));
    out
}

fn shift(offset: usize, delta: isize) -> usize {
    if delta >= 0 {
        offset + delta as usize
    } else {
        offset.saturating_sub((-delta) as usize)
    }
}

/// One-shot find and replace over a whole buffer.
///
/// In regex mode the replacement may use `$n` group references. Returns the
/// new buffer and the number of replacements; a malformed pattern replaces
/// nothing.
pub fn find_and_replace_all(
    text: &str,
    query: &str,
    replacement: &str,
    options: SearchOptions,
) -> (String, usize) {
    if options.use_regex {
        let pattern = if options.case_sensitive {
            query.to_string()
        } else {
            format!("(?i){query}")
        };
        match regex::Regex::new(&pattern) {
            Ok(re) => {
                let count = re.find_iter(text).count();
                (re.replace_all(text, replacement).into_owned(), count)
            }
            Err(_) => (text.to_string(), 0),
        }
    } else {
        let mut session = SearchSession::search(text, query, options);
        let count = session.len();
        (session.replace_all(text, replacement), count)
    }
}
