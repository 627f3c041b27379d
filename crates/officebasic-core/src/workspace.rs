//! Multi-module workspace: the engine's integration surface.
//!
//! A [`MacroWorkspace`] owns the host-provided module list, the overlay
//! history, the active-module name, the selection, and the token cache, and
//! wires the pure engines (completion, signature help, search) to the
//! current state. Edits never touch the pristine module sources; reads go
//! through the overlay, so every feature - project search included -
//! reflects unsaved edits.
//!
//! Structural actions against a module that does not exist are no-ops that
//! report `false`, leaving all state untouched; callers detect "nothing
//! changed" from the return value alone.

use crate::cache::TokenCache;
use crate::completion::{detect_context, CompletionContext, CompletionTrigger};
use crate::history::HistoryStore;
use crate::lexer::Token;
use crate::modules::{MacroModule, ModuleKind, ProcedureInfo};
use crate::providers::{default_providers, CompletionItem, CompletionProvider};
use crate::ranking::rank;
use crate::search::{find_matches, SearchMatch, SearchOptions};
use crate::signature::{detect_signature_help, ParameterHint};
use std::time::Instant;

/// A selection as a half-open char-offset range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

/// One project-wide match: a buffer match plus its module and line text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSearchMatch {
    /// Name of the module the match is in.
    pub module_name: String,
    /// Full text of the line containing the match start.
    pub line_text: String,
    /// The underlying buffer match.
    pub matched: SearchMatch,
}

/// Matches of one module, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatches {
    /// Module name.
    pub module_name: String,
    /// All matches in that module's current source.
    pub matches: Vec<ProjectSearchMatch>,
}

/// Project-wide search output: per-module groups plus a total count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectSearchResults {
    /// Non-empty per-module match groups, in module order.
    pub groups: Vec<ModuleMatches>,
    /// Total number of matches across all groups.
    pub total: usize,
}

/// The engine state for one open document's macro modules.
pub struct MacroWorkspace {
    modules: Vec<MacroModule>,
    history: HistoryStore,
    active: Option<String>,
    selection: Option<Selection>,
    cache: TokenCache,
    providers: Vec<Box<dyn CompletionProvider>>,
}

impl std::fmt::Debug for MacroWorkspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MacroWorkspace")
            .field("module_count", &self.modules.len())
            .field("active", &self.active)
            .field("undo_depth", &self.history.undo_depth())
            .finish()
    }
}

impl MacroWorkspace {
    /// Create a workspace over the host's module list.
    pub fn new(modules: Vec<MacroModule>) -> Self {
        let active = modules.first().map(|m| m.name.clone());
        Self {
            modules,
            history: HistoryStore::new(),
            active,
            selection: None,
            cache: TokenCache::default(),
            providers: default_providers(),
        }
    }

    /// Replace the completion provider list (tests substitute subsets).
    pub fn set_providers(&mut self, providers: Vec<Box<dyn CompletionProvider>>) {
        self.providers = providers;
    }

    /// The host module list, in order.
    pub fn modules(&self) -> &[MacroModule] {
        &self.modules
    }

    /// Look up a module by name, case-insensitively.
    pub fn module(&self, name: &str) -> Option<&MacroModule> {
        self.modules
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    /// Name of the active module, if any module is open.
    pub fn active_module(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Switch the active module. The token cache is cleared wholesale so
    /// another module's working set never occupies it. Returns `false`
    /// (leaving everything untouched) for an unknown module.
    pub fn set_active_module(&mut self, name: &str) -> bool {
        let Some(module) = self.module(name) else {
            return false;
        };
        let canonical = module.name.clone();
        if self.active.as_deref() != Some(canonical.as_str()) {
            self.history.flush();
            self.cache.clear();
            self.selection = None;
            self.active = Some(canonical);
        }
        true
    }

    /// The module's current source: its overlay entry when it diverges,
    /// else its pristine source. `None` for an unknown module.
    pub fn effective_source(&self, name: &str) -> Option<&str> {
        let module = self.module(name)?;
        match self.history.entry(&module.name) {
            Some(entry) => Some(entry.source.as_str()),
            None => Some(module.source_code.as_str()),
        }
    }

    /// Returns `true` if the module has unsaved edits.
    pub fn is_modified(&self, name: &str) -> bool {
        self.module(name)
            .is_some_and(|m| self.history.entry(&m.name).is_some())
    }

    /// Every known procedure across all modules, in module order.
    pub fn all_procedures(&self) -> Vec<ProcedureInfo> {
        self.modules
            .iter()
            .flat_map(|m| m.procedures.iter().cloned())
            .collect()
    }

    /// The current selection, if any.
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Set or clear the selection.
    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection;
    }

    // ---- edits & history -------------------------------------------------

    /// Record one keystroke's worth of edit: the module's whole new source
    /// plus the caret after the edit. Debounced into undo steps by the
    /// history store. Returns `false` for an unknown module.
    pub fn record_edit(
        &mut self,
        name: &str,
        source: impl Into<String>,
        cursor_offset: usize,
        now: Instant,
    ) -> bool {
        let Some(module) = self.module(name) else {
            return false;
        };
        let canonical = module.name.clone();
        self.history
            .record_edit(&canonical, source, cursor_offset, now);
        true
    }

    /// Close the pending keystroke batch.
    pub fn flush_pending(&mut self) {
        self.history.flush();
    }

    /// Close the pending batch if its debounce deadline passed.
    pub fn flush_if_expired(&mut self, now: Instant) -> bool {
        self.history.flush_if_expired(now)
    }

    /// Undo one step. Returns the cursor offset to restore in the active
    /// module, or `None` when there is nothing to undo (or no module).
    pub fn undo(&mut self) -> Option<usize> {
        let active = self.active.clone()?;
        self.history.undo(&active)
    }

    /// Redo one step; the mirror of [`MacroWorkspace::undo`].
    pub fn redo(&mut self) -> Option<usize> {
        let active = self.active.clone()?;
        self.history.redo(&active)
    }

    /// Whether an undo step exists.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo step exists.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Depth of the undo stack.
    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    // ---- module lifecycle ------------------------------------------------

    /// Add a new empty module. Always a discrete undo step. Returns `false`
    /// (no state change) when a module with that name already exists.
    pub fn create_module(&mut self, name: &str, kind: ModuleKind) -> bool {
        if self.module(name).is_some() {
            return false;
        }
        self.history.commit(self.history.present().clone());
        self.modules.push(MacroModule::new(name, kind));
        if self.active.is_none() {
            self.active = Some(name.to_string());
        }
        log::debug!("created module {name:?}");
        true
    }

    /// Rename a module, moving its overlay entry with it. Returns `false`
    /// when the old name is unknown or the new name is taken.
    pub fn rename_module(&mut self, old_name: &str, new_name: &str) -> bool {
        if self.module(new_name).is_some() {
            return false;
        }
        let Some(index) = self.module_index(old_name) else {
            return false;
        };

        let canonical_old = self.modules[index].name.clone();
        let mut overlay = self.history.present().clone();
        if let Some(entry) = overlay.remove(&canonical_old) {
            overlay.insert(new_name.to_string(), entry);
        }
        self.history.commit(overlay);

        self.modules[index].name = new_name.to_string();
        if self.active.as_deref() == Some(canonical_old.as_str()) {
            self.active = Some(new_name.to_string());
        }
        log::debug!("renamed module {canonical_old:?} -> {new_name:?}");
        true
    }

    /// Delete a module and its overlay entry. Returns `false` for an
    /// unknown module.
    pub fn delete_module(&mut self, name: &str) -> bool {
        let Some(index) = self.module_index(name) else {
            return false;
        };

        let canonical = self.modules[index].name.clone();
        let mut overlay = self.history.present().clone();
        overlay.remove(&canonical);
        self.history.commit(overlay);

        self.modules.remove(index);
        if self.active.as_deref() == Some(canonical.as_str()) {
            self.active = self.modules.first().map(|m| m.name.clone());
            self.cache.clear();
            self.selection = None;
        }
        log::debug!("deleted module {canonical:?}");
        true
    }

    /// Move the module at `from` to position `to`. Returns `false` when
    /// either index is out of range.
    pub fn reorder_module(&mut self, from: usize, to: usize) -> bool {
        if from >= self.modules.len() || to >= self.modules.len() {
            return false;
        }
        if from != to {
            self.history.commit(self.history.present().clone());
            let module = self.modules.remove(from);
            self.modules.insert(to, module);
        }
        true
    }

    /// Replace the whole document: new module list, history and overlays
    /// dropped, caches cleared.
    pub fn reload(&mut self, modules: Vec<MacroModule>) {
        log::debug!("document reload with {} module(s)", modules.len());
        self.active = modules.first().map(|m| m.name.clone());
        self.modules = modules;
        self.history.clear();
        self.cache.clear();
        self.selection = None;
    }

    // ---- language features ----------------------------------------------

    /// Tokenize one line through the workspace's token cache.
    pub fn tokens_for_line(&mut self, line: &str) -> Vec<Token> {
        self.cache.tokens(line)
    }

    /// Tokenize the active module's current source, line by line.
    pub fn tokenize_active_module(&mut self) -> Vec<Vec<Token>> {
        let Some(source) = self
            .active
            .clone()
            .and_then(|name| self.effective_source(&name).map(str::to_string))
        else {
            return Vec::new();
        };
        self.cache.tokenize_buffer(&source)
    }

    /// Detect the completion context in a module's current source.
    pub fn completion_context(
        &self,
        name: &str,
        cursor_offset: usize,
        trigger: CompletionTrigger,
    ) -> Option<CompletionContext> {
        let source = self.effective_source(name)?;
        detect_context(source, cursor_offset, trigger)
    }

    /// Full completion pipeline for a module: detect the context, consult
    /// the provider list, rank the pooled output. An unapplicable position
    /// yields an empty list.
    pub fn complete(
        &self,
        name: &str,
        cursor_offset: usize,
        trigger: CompletionTrigger,
    ) -> Vec<CompletionItem> {
        let Some(source) = self.effective_source(name) else {
            return Vec::new();
        };
        let Some(context) = detect_context(source, cursor_offset, trigger) else {
            return Vec::new();
        };

        let procedures = self.all_procedures();
        let pool: Vec<CompletionItem> = self
            .providers
            .iter()
            .flat_map(|provider| provider.provide(&context, source, &procedures))
            .collect();
        rank(pool, &context.prefix)
    }

    /// Signature help for a module at a cursor position.
    pub fn signature_help(&self, name: &str, cursor_offset: usize) -> Option<ParameterHint> {
        let source = self.effective_source(name)?;
        detect_signature_help(source, cursor_offset, &self.all_procedures())
    }

    /// Search every module's *current* source (overlay-aware), grouping
    /// matches per module.
    pub fn search_project(&self, query: &str, options: SearchOptions) -> ProjectSearchResults {
        let mut results = ProjectSearchResults::default();

        for module in &self.modules {
            let source = self
                .history
                .entry(&module.name)
                .map(|entry| entry.source.as_str())
                .unwrap_or(module.source_code.as_str());

            let matches = find_matches(source, query, options);
            if matches.is_empty() {
                continue;
            }

            let lines: Vec<&str> = source.lines().collect();
            let group = ModuleMatches {
                module_name: module.name.clone(),
                matches: matches
                    .into_iter()
                    .map(|m| ProjectSearchMatch {
                        module_name: module.name.clone(),
                        line_text: lines
                            .get(m.line - 1)
                            .map(|l| l.to_string())
                            .unwrap_or_default(),
                        matched: m,
                    })
                    .collect(),
            };
            results.total += group.matches.len();
            results.groups.push(group);
        }

        log::debug!(
            "project search for {query:?}: {} match(es) in {} module(s)",
            results.total,
            results.groups.len()
        );
        results
    }

    fn module_index(&self, name: &str) -> Option<usize> {
        self.modules
            .iter()
            .position(|m| m.name.eq_ignore_ascii_case(name))
    }
}
