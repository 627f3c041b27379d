#![warn(missing_docs)]
//! OfficeBasic Core - the text-intelligence engine behind the macro editor
//! of a browser-based office-document suite.
//!
//! # Overview
//!
//! `officebasic-core` is the headless engine the editor shell calls on every
//! keystroke: it tokenizes lines, detects and ranks code completions,
//! resolves parameter hints, finds and replaces matches within one module or
//! across the whole project, and keeps a debounced multi-module undo/redo
//! history with cursor restoration. It renders nothing: the shell provides
//! the module list and the caret, and consumes tokens, items, hints,
//! matches and highlight ranges.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  MacroWorkspace (modules + overlay history)  │  ← integration surface
//! ├──────────────────────────────────────────────┤
//! │  Completion · Signature help · Search        │  ← pure engines
//! ├──────────────────────────────────────────────┤
//! │  Line Index · Token Cache                    │  ← per-buffer indexes
//! ├──────────────────────────────────────────────┤
//! │  Lexer (line-local, stateless)               │  ← lexical ground truth
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Everything runs synchronously on the caller's thread. The only deferred
//! piece of state is the debounce deadline inside the history store, and it
//! is plain data driven by the host's clock.
//!
//! # Quick start
//!
//! ```rust
//! use officebasic_core::{
//!     CompletionTrigger, MacroModule, MacroWorkspace, ModuleKind, SearchOptions,
//! };
//!
//! let module = MacroModule::with_source(
//!     "Module1",
//!     ModuleKind::Standard,
//!     "Dim counter As Long\nMsgBox cou",
//!     Vec::new(),
//! );
//! let ws = MacroWorkspace::new(vec![module]);
//!
//! // Completion at the end of the typed "cou" offers the declared variable.
//! let items = ws.complete("Module1", 30, CompletionTrigger::Typing);
//! assert_eq!(items[0].label, "counter");
//!
//! // Project-wide search sees the same buffers.
//! let results = ws.search_project("counter", SearchOptions::default());
//! assert_eq!(results.total, 1);
//! ```
//!
//! # Module description
//!
//! - [`lexer`] - stateless line tokenizer
//! - [`cache`] - LRU token cache keyed by line text
//! - [`line_index`] - offset ↔ (line, column) conversions
//! - [`completion`] - completion context detection
//! - [`providers`] - completion candidate providers
//! - [`ranking`] - scoring and ordering of the pooled candidates
//! - [`signature`] - parameter hint detection
//! - [`search`] / [`replace`] - match finding and offset-safe replacement
//! - [`history`] - overlay snapshots, undo/redo, debounced batching
//! - [`workspace`] - the multi-module integration surface
//! - [`modules`] - host-provided module/procedure metadata model
//! - [`highlight`] - renderer-facing ranges and cursor coordinates

pub mod cache;
pub mod completion;
pub mod highlight;
pub mod history;
pub mod lexer;
pub mod line_index;
pub mod modules;
pub mod providers;
pub mod ranking;
pub mod replace;
pub mod search;
pub mod signature;
pub mod workspace;

pub use cache::{TokenCache, DEFAULT_TOKEN_CACHE_CAPACITY};
pub use completion::{detect_context, CompletionContext, CompletionTrigger};
pub use highlight::{
    cursor_position, highlight_for_match, highlight_for_range, CursorPosition, HighlightKind,
    HighlightRange,
};
pub use history::{
    HistoryStore, ModuleOverlay, SourceEntry, DEFAULT_DEBOUNCE_WINDOW,
};
pub use lexer::{tokenize, Token, TokenKind};
pub use line_index::LineIndex;
pub use modules::{MacroModule, ModuleKind, ParameterInfo, ProcedureInfo, ProcedureKind};
pub use providers::{
    default_providers, BuiltinProvider, CompletionItem, CompletionItemKind, CompletionProvider,
    KeywordProvider, ProcedureProvider, VariableProvider,
};
pub use ranking::rank;
pub use replace::{find_and_replace_all, SearchSession};
pub use search::{find_matches, SearchMatch, SearchOptions, MATCH_LIMIT};
pub use signature::{detect_signature_help, ParameterHint};
pub use workspace::{
    MacroWorkspace, ModuleMatches, ProjectSearchMatch, ProjectSearchResults, Selection,
};
