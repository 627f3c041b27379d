//! Capacity-bounded token cache.
//!
//! Re-tokenizing every visible line on every keystroke is wasteful when most
//! lines did not change, so tokenization results are memoized in a strict LRU
//! cache keyed by the raw line text. Keying by text (not by line number)
//! makes a cached entry valid for any line with identical content, which is
//! also why the cache must be cleared wholesale when the active module
//! changes: stale entries would only cost performance, not correctness, but
//! the working set of another module should not occupy the capacity.

use crate::lexer::{tokenize, Token};
use lru::LruCache;
use std::num::NonZeroUsize;

/// Default number of cached lines.
pub const DEFAULT_TOKEN_CACHE_CAPACITY: usize = 512;

/// A strict-LRU memo of [`tokenize`] results, keyed by raw line text.
pub struct TokenCache {
    lines: LruCache<String, Vec<Token>>,
}

impl TokenCache {
    /// Create a cache holding at most `capacity` lines.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; a cache that can hold nothing is a
    /// caller bug, not a runtime condition.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).expect("token cache capacity must be non-zero");
        Self {
            lines: LruCache::new(capacity),
        }
    }

    /// Tokenize `line`, reusing the cached result when the exact text was
    /// seen before. A hit refreshes the entry's recency.
    pub fn tokens(&mut self, line: &str) -> Vec<Token> {
        if let Some(tokens) = self.lines.get(line) {
            return tokens.clone();
        }
        let tokens = tokenize(line);
        self.lines.put(line.to_string(), tokens.clone());
        tokens
    }

    /// Tokenize a whole buffer line by line, through the cache.
    pub fn tokenize_buffer(&mut self, text: &str) -> Vec<Vec<Token>> {
        text.lines().map(|line| self.tokens(line)).collect()
    }

    /// Drop every cached line.
    pub fn clear(&mut self) {
        log::trace!("token cache cleared ({} entries)", self.lines.len());
        self.lines.clear();
    }

    /// Number of cached lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Maximum number of cached lines.
    pub fn capacity(&self) -> usize {
        self.lines.cap().get()
    }

    /// Returns `true` if `line` currently has a cached entry, without
    /// refreshing its recency.
    pub fn contains(&self, line: &str) -> bool {
        self.lines.contains(line)
    }
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_CACHE_CAPACITY)
    }
}

impl std::fmt::Debug for TokenCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cached_result_matches_direct_tokenization() {
        let mut cache = TokenCache::new(4);
        let line = "Dim total As Long";
        assert_eq!(cache.tokens(line), tokenize(line));
        // Second call is a hit and must be structurally identical.
        assert_eq!(cache.tokens(line), tokenize(line));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_capacity_is_a_hard_bound() {
        let mut cache = TokenCache::new(2);
        cache.tokens("a = 1");
        cache.tokens("b = 2");
        cache.tokens("c = 3");
        assert_eq!(cache.len(), 2);
        // Least-recently-used entry was evicted.
        assert!(!cache.contains("a = 1"));
        assert!(cache.contains("c = 3"));
    }

    #[test]
    fn test_hit_refreshes_recency() {
        let mut cache = TokenCache::new(2);
        cache.tokens("a = 1");
        cache.tokens("b = 2");
        cache.tokens("a = 1"); // refresh
        cache.tokens("c = 3"); // evicts "b = 2"
        assert!(cache.contains("a = 1"));
        assert!(!cache.contains("b = 2"));
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut cache = TokenCache::new(8);
        cache.tokenize_buffer("x = 1\ny = 2\n");
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn test_zero_capacity_is_a_contract_violation() {
        let _ = TokenCache::new(0);
    }
}
