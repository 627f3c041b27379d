//! Undo/redo history over sparse module overlays.
//!
//! The document's pristine sources never mutate. Edits live in an overlay
//! map - module name to [`SourceEntry`] - populated only for modules that
//! diverge, and the history is a stack of whole-overlay snapshots:
//! `past` / `present` / `future`. Snapshots are values: pushing clones the
//! present map, so no reader ever observes a partially updated overlay.
//!
//! Rapid keystrokes are batched. The first edit of a batch pushes a
//! snapshot; further edits to the same module within the debounce window
//! replace the present entry in place - the one deliberate exception to
//! copy-on-write, confined to the entry being typed into. The window is
//! plain data (a deadline), driven by the host's clock; an explicit flush
//! cancels it without touching `present`.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// A module's modified source and caret, layered over its pristine text.
///
/// Created on the first edit to a module and kept until the module is
/// deleted or the whole document reloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// The full modified source.
    pub source: String,
    /// Char offset of the caret at the time of the edit.
    pub cursor_offset: usize,
}

/// Sparse record of modified modules, keyed by module name.
pub type ModuleOverlay = BTreeMap<String, SourceEntry>;

/// Debounce window closing a keystroke batch.
pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq)]
enum BatchState {
    Idle,
    Batching { module: String, deadline: Instant },
}

/// Undo/redo stack of overlay snapshots with debounced edit batching.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    past: Vec<ModuleOverlay>,
    present: ModuleOverlay,
    future: Vec<ModuleOverlay>,
    batch: BatchState,
    window: Duration,
}

impl HistoryStore {
    /// An empty history with the default debounce window.
    pub fn new() -> Self {
        Self::with_window(DEFAULT_DEBOUNCE_WINDOW)
    }

    /// An empty history with a custom debounce window.
    pub fn with_window(window: Duration) -> Self {
        Self {
            past: Vec::new(),
            present: ModuleOverlay::new(),
            future: Vec::new(),
            batch: BatchState::Idle,
            window,
        }
    }

    /// The current overlay snapshot.
    pub fn present(&self) -> &ModuleOverlay {
        &self.present
    }

    /// The present entry for `module`, if it diverges from pristine.
    pub fn entry(&self, module: &str) -> Option<&SourceEntry> {
        self.present.get(module)
    }

    /// Record one keystroke's worth of edit to `module`.
    ///
    /// Opens a new undo step unless a batch for the same module is still
    /// inside its debounce window, in which case the present entry is
    /// replaced in place. Either way the deadline extends to
    /// `now + window`.
    pub fn record_edit(
        &mut self,
        module: &str,
        source: impl Into<String>,
        cursor_offset: usize,
        now: Instant,
    ) {
        let entry = SourceEntry {
            source: source.into(),
            cursor_offset,
        };

        let continues_batch = matches!(
            &self.batch,
            BatchState::Batching { module: batching, deadline }
                if batching == module && now < *deadline
        );

        if continues_batch {
            self.present.insert(module.to_string(), entry);
        } else {
            log::trace!("history: new undo step for module {module:?}");
            self.past.push(self.present.clone());
            self.future.clear();
            self.present.insert(module.to_string(), entry);
        }

        self.batch = BatchState::Batching {
            module: module.to_string(),
            deadline: now + self.window,
        };
    }

    /// Push a full snapshot produced by a discrete action (module create,
    /// rename, delete, reorder). Never debounced: the pending batch is
    /// flushed first and the new overlay always becomes its own undo step.
    pub fn commit(&mut self, overlay: ModuleOverlay) {
        self.flush();
        self.past.push(std::mem::replace(&mut self.present, overlay));
        self.future.clear();
    }

    /// Close the pending batch without touching `present` (already
    /// current). The next edit opens a new undo step.
    pub fn flush(&mut self) {
        self.batch = BatchState::Idle;
    }

    /// Close the batch if its deadline has passed. Returns `true` when a
    /// batch was closed; the host calls this from its timer.
    pub fn flush_if_expired(&mut self, now: Instant) -> bool {
        match &self.batch {
            BatchState::Batching { deadline, .. } if now >= *deadline => {
                self.flush();
                true
            }
            _ => false,
        }
    }

    /// Step back one snapshot.
    ///
    /// Flushes the pending batch, moves `present` to `future`, and pops
    /// `past` into `present`. Returns the cursor offset to restore for
    /// `active_module`: the new present entry's offset, or 0 when the
    /// module reverted to pristine. `None` when there is nothing to undo.
    pub fn undo(&mut self, active_module: &str) -> Option<usize> {
        self.flush();
        let snapshot = self.past.pop()?;
        self.future.push(std::mem::replace(&mut self.present, snapshot));
        Some(self.restored_cursor(active_module))
    }

    /// Step forward one snapshot; the mirror of [`HistoryStore::undo`].
    pub fn redo(&mut self, active_module: &str) -> Option<usize> {
        self.flush();
        let snapshot = self.future.pop()?;
        self.past.push(std::mem::replace(&mut self.present, snapshot));
        Some(self.restored_cursor(active_module))
    }

    /// Whether an undo step exists.
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Whether a redo step exists.
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Depth of the undo stack.
    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    /// Depth of the redo stack.
    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    /// Drop all history and overlay state (whole-document reload).
    pub fn clear(&mut self) {
        self.past.clear();
        self.present.clear();
        self.future.clear();
        self.batch = BatchState::Idle;
    }

    fn restored_cursor(&self, active_module: &str) -> usize {
        self.present
            .get(active_module)
            .map_or(0, |entry| entry.cursor_offset)
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}
