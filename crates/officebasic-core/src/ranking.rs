//! Completion ranking and filtering.
//!
//! All provider output is scored as a single pool. With no prefix the list
//! is a browse: fixed semantic-kind priority, then lexicographic. With a
//! prefix, items are scored case-insensitively - exact label, then prefix
//! (shorter labels first), then substring (earlier occurrence first) - and
//! anything that does not match at all is excluded.

use crate::providers::{CompletionItem, CompletionItemKind};
use std::cmp::Ordering;

const EXACT_SCORE: i32 = 1000;
const PREFIX_SCORE: i32 = 900;
const SUBSTRING_SCORE: i32 = 500;

/// Fixed priority of semantic kinds; lower sorts first.
fn kind_priority(kind: CompletionItemKind) -> u8 {
    match kind {
        CompletionItemKind::Variable => 0,
        CompletionItemKind::Procedure => 1,
        CompletionItemKind::Property => 2,
        CompletionItemKind::Keyword => 3,
        CompletionItemKind::Type => 4,
        CompletionItemKind::Builtin => 5,
        CompletionItemKind::Constant => 6,
        CompletionItemKind::Module => 7,
    }
}

/// Case-insensitive match score; `None` excludes the item.
fn score(label: &str, prefix: &str) -> Option<i32> {
    let label_lower = label.to_lowercase();
    let prefix_lower = prefix.to_lowercase();

    if label_lower == prefix_lower {
        return Some(EXACT_SCORE);
    }
    if label_lower.starts_with(&prefix_lower) {
        return Some(PREFIX_SCORE - label.chars().count() as i32);
    }
    label_lower
        .find(&prefix_lower)
        .map(|byte_index| SUBSTRING_SCORE - label_lower[..byte_index].chars().count() as i32)
}

fn lexicographic_key(item: &CompletionItem) -> String {
    item.sort_key
        .as_deref()
        .unwrap_or(&item.label)
        .to_lowercase()
}

/// Rank one pool of provider output against the typed prefix.
///
/// With an empty prefix every item survives; otherwise non-matching items
/// are dropped. The returned list is ordered best-first.
///
/// # Example
///
/// ```
/// use officebasic_core::providers::{CompletionItem, CompletionItemKind};
/// use officebasic_core::ranking::rank;
///
/// let pool = vec![
///     CompletionItem::new("Integer", CompletionItemKind::Type),
///     CompletionItem::new("In", CompletionItemKind::Keyword),
///     CompletionItem::new("Dim", CompletionItemKind::Keyword),
/// ];
/// let ranked = rank(pool, "In");
/// assert_eq!(ranked[0].label, "In"); // exact match wins
/// assert_eq!(ranked.len(), 2); // "Dim" does not match
/// ```
pub fn rank(items: Vec<CompletionItem>, prefix: &str) -> Vec<CompletionItem> {
    if prefix.is_empty() {
        let mut browsable = items;
        browsable.sort_by(|a, b| {
            kind_priority(a.kind)
                .cmp(&kind_priority(b.kind))
                .then_with(|| lexicographic_key(a).cmp(&lexicographic_key(b)))
        });
        return browsable;
    }

    let mut scored: Vec<(i32, CompletionItem)> = items
        .into_iter()
        .filter_map(|item| score(&item.label, prefix).map(|s| (s, item)))
        .collect();

    scored.sort_by(|(score_a, a), (score_b, b)| {
        match score_b.cmp(score_a) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
        kind_priority(a.kind)
            .cmp(&kind_priority(b.kind))
            .then_with(|| lexicographic_key(a).cmp(&lexicographic_key(b)))
    });

    scored.into_iter().map(|(_, item)| item).collect()
}
