//! Completion providers.
//!
//! Every request consults the same fixed, ordered provider list - variables,
//! procedures, keywords/types, builtins - and the outputs are concatenated
//! into one pool for [`crate::ranking::rank`]. The list is explicit rather
//! than a global registry so tests can run any subset.
//!
//! Dot contexts are locked down: member completion needs object type
//! information this engine does not have, so every provider stays silent on
//! a dot trigger - except the procedure provider when the object is the
//! self-reference keyword, where the module's own routines are the members.

use crate::completion::{CompletionContext, CompletionTrigger};
use crate::lexer::{tokenize, Token, TokenKind};
use crate::modules::ProcedureInfo;
use officebasic_lang as lang;
use std::collections::HashSet;

/// Semantic kind of a completion item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionItemKind {
    /// A declared variable or parameter.
    Variable,
    /// A user-defined Sub or Function.
    Procedure,
    /// An object property.
    Property,
    /// A statement keyword.
    Keyword,
    /// An intrinsic type.
    Type,
    /// A builtin routine.
    Builtin,
    /// A named constant.
    Constant,
    /// A module name.
    Module,
}

/// One ranked suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    /// Display label.
    pub label: String,
    /// Semantic kind, used for icons and rank tie-breaking.
    pub kind: CompletionItemKind,
    /// Short trailing text (a type, a signature).
    pub detail: Option<String>,
    /// Longer documentation, when curated.
    pub documentation: Option<String>,
    /// Text to insert instead of the label, when they differ.
    pub insert_text: Option<String>,
    /// Sort key overriding the label for lexicographic ordering.
    pub sort_key: Option<String>,
}

impl CompletionItem {
    /// A bare item with no detail, documentation, or overrides.
    pub fn new(label: impl Into<String>, kind: CompletionItemKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            documentation: None,
            insert_text: None,
            sort_key: None,
        }
    }

    /// Attach a detail string.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Attach documentation.
    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }
}

/// A source of completion candidates.
///
/// Providers are pure: everything they need arrives as arguments, nothing is
/// retained between requests.
pub trait CompletionProvider {
    /// Produce candidates for one request. Implementations must return an
    /// empty list when the context does not apply to them.
    fn provide(
        &self,
        context: &CompletionContext,
        source: &str,
        procedures: &[ProcedureInfo],
    ) -> Vec<CompletionItem>;
}

/// The fixed provider list used by default, in consultation order.
pub fn default_providers() -> Vec<Box<dyn CompletionProvider>> {
    vec![
        Box::new(VariableProvider),
        Box::new(ProcedureProvider),
        Box::new(KeywordProvider),
        Box::new(BuiltinProvider),
    ]
}

/// Extracts declared names from the buffer: declaration statements, loop
/// control variables, and procedure parameters.
pub struct VariableProvider;

impl CompletionProvider for VariableProvider {
    fn provide(
        &self,
        context: &CompletionContext,
        source: &str,
        _procedures: &[ProcedureInfo],
    ) -> Vec<CompletionItem> {
        if context.trigger == CompletionTrigger::Dot {
            return Vec::new();
        }
        extract_variables(source)
    }
}

/// One item per known routine, with its rendered signature as detail.
pub struct ProcedureProvider;

impl CompletionProvider for ProcedureProvider {
    fn provide(
        &self,
        context: &CompletionContext,
        _source: &str,
        procedures: &[ProcedureInfo],
    ) -> Vec<CompletionItem> {
        if context.trigger == CompletionTrigger::Dot {
            let is_self_reference = context
                .object_name
                .as_deref()
                .is_some_and(|name| name.eq_ignore_ascii_case(lang::SELF_KEYWORD));
            if !is_self_reference {
                return Vec::new();
            }
        }

        procedures
            .iter()
            .map(|procedure| {
                CompletionItem::new(&procedure.name, CompletionItemKind::Procedure)
                    .with_detail(procedure.signature())
            })
            .collect()
    }
}

/// Statement keywords and intrinsic types, from the static tables.
pub struct KeywordProvider;

impl CompletionProvider for KeywordProvider {
    fn provide(
        &self,
        context: &CompletionContext,
        _source: &str,
        _procedures: &[ProcedureInfo],
    ) -> Vec<CompletionItem> {
        if context.trigger == CompletionTrigger::Dot {
            return Vec::new();
        }

        let keywords = lang::KEYWORDS.iter().map(|(name, doc)| {
            CompletionItem::new(*name, CompletionItemKind::Keyword).with_documentation(*doc)
        });
        let types = lang::TYPES.iter().map(|(name, doc)| {
            CompletionItem::new(*name, CompletionItemKind::Type).with_documentation(*doc)
        });
        keywords.chain(types).collect()
    }
}

/// Builtin routines and named constants, from the static tables.
pub struct BuiltinProvider;

impl CompletionProvider for BuiltinProvider {
    fn provide(
        &self,
        context: &CompletionContext,
        _source: &str,
        _procedures: &[ProcedureInfo],
    ) -> Vec<CompletionItem> {
        if context.trigger == CompletionTrigger::Dot {
            return Vec::new();
        }

        let builtins = lang::BUILTINS.iter().map(|builtin| {
            CompletionItem::new(builtin.name, CompletionItemKind::Builtin)
                .with_detail(builtin.signature)
                .with_documentation(builtin.documentation)
        });
        let constants = lang::CONSTANTS.iter().map(|(name, doc)| {
            CompletionItem::new(*name, CompletionItemKind::Constant).with_documentation(*doc)
        });
        builtins.chain(constants).collect()
    }
}

/// Walk the buffer line by line and collect declared names, de-duplicated
/// case-insensitively with the first occurrence winning.
fn extract_variables(source: &str) -> Vec<CompletionItem> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut items = Vec::new();

    for line in source.lines() {
        let tokens = tokenize(line);
        let words: Vec<&Token> = tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Whitespace)
            .collect();
        if words.is_empty() {
            continue;
        }

        collect_declaration_names(&words, &mut seen, &mut items);
        collect_loop_variable(&words, &mut seen, &mut items);
        collect_parameters(&words, &mut seen, &mut items);
    }

    items
}

fn push_unique(
    name: &str,
    detail: Option<&str>,
    seen: &mut HashSet<String>,
    items: &mut Vec<CompletionItem>,
) {
    if !seen.insert(name.to_ascii_lowercase()) {
        return;
    }
    let mut item = CompletionItem::new(name, CompletionItemKind::Variable);
    if let Some(detail) = detail {
        item = item.with_detail(detail.to_string());
    }
    items.push(item);
}

fn is_word(token: &Token, expected: &str) -> bool {
    token.text.eq_ignore_ascii_case(expected)
}

/// `Dim a(10), b As Long` and friends: skip access modifiers, require a
/// declaration keyword (or a bare `Public`/`Private` declaration), then walk
/// the comma-separated name list, ignoring array subscripts and `As` types.
fn collect_declaration_names(
    words: &[&Token],
    seen: &mut HashSet<String>,
    items: &mut Vec<CompletionItem>,
) {
    let mut i = 0;
    let mut saw_access_modifier = false;
    while i < words.len() && (is_word(words[i], "Public") || is_word(words[i], "Private")) {
        saw_access_modifier = true;
        i += 1;
    }

    let saw_declaration_keyword = i < words.len()
        && (is_word(words[i], "Dim") || is_word(words[i], "Const") || is_word(words[i], "Static"));
    if saw_declaration_keyword {
        i += 1;
    } else if !saw_access_modifier {
        return;
    }

    // `Private Sub ...` is a procedure header, not a declaration.
    if i < words.len() && (is_word(words[i], "Sub") || is_word(words[i], "Function")) {
        return;
    }

    while i < words.len() {
        if words[i].kind != TokenKind::Identifier {
            return;
        }
        let name = words[i].text.clone();
        i += 1;

        // Array subscript: skip a balanced parenthesized group.
        if i < words.len() && words[i].text == "(" {
            let mut depth = 0;
            while i < words.len() {
                if words[i].text == "(" {
                    depth += 1;
                } else if words[i].text == ")" {
                    depth -= 1;
                    if depth == 0 {
                        i += 1;
                        break;
                    }
                }
                i += 1;
            }
        }

        // `As [New] TypeName`
        let mut declared_type = None;
        if i < words.len() && is_word(words[i], "As") {
            i += 1;
            if i < words.len() && is_word(words[i], "New") {
                i += 1;
            }
            if i < words.len()
                && matches!(words[i].kind, TokenKind::Type | TokenKind::Identifier)
            {
                declared_type = Some(words[i].text.clone());
                i += 1;
            }
        }

        // `Const x = 1`: skip everything up to the next comma.
        while i < words.len() && words[i].text != "," {
            i += 1;
        }

        push_unique(&name, declared_type.as_deref(), seen, items);

        if i < words.len() && words[i].text == "," {
            i += 1;
            continue;
        }
        return;
    }
}

/// `For i = ...` and `For Each x In ...`.
fn collect_loop_variable(
    words: &[&Token],
    seen: &mut HashSet<String>,
    items: &mut Vec<CompletionItem>,
) {
    if words.is_empty() || !is_word(words[0], "For") {
        return;
    }
    let candidate = if words.len() > 1 && is_word(words[1], "Each") {
        words.get(2)
    } else {
        words.get(1)
    };
    if let Some(token) = candidate {
        if token.kind == TokenKind::Identifier {
            push_unique(&token.text, None, seen, items);
        }
    }
}

/// Parameter lists of `Sub`/`Function` headers, with passing-mode and
/// optionality modifiers stripped.
fn collect_parameters(
    words: &[&Token],
    seen: &mut HashSet<String>,
    items: &mut Vec<CompletionItem>,
) {
    let Some(header) = words
        .iter()
        .position(|t| is_word(t, "Sub") || is_word(t, "Function"))
    else {
        return;
    };
    // Header shape: [modifiers] Sub Name ( ... )
    if words.get(header + 1).map(|t| t.kind) != Some(TokenKind::Identifier) {
        return;
    }
    if words.get(header + 2).map(|t| t.text.as_str()) != Some("(") {
        return;
    }

    let mut i = header + 3;
    let mut depth = 1;
    let mut expect_name = true;
    while i < words.len() && depth > 0 {
        let token = words[i];
        match token.text.as_str() {
            "(" => depth += 1,
            ")" => depth -= 1,
            "," if depth == 1 => expect_name = true,
            _ => {
                if depth == 1 && expect_name {
                    if lang::is_parameter_modifier(&token.text) {
                        // Still looking at modifiers before the name.
                    } else if token.kind == TokenKind::Identifier {
                        let declared_type = parameter_type(words, i);
                        push_unique(&token.text, declared_type.as_deref(), seen, items);
                        expect_name = false;
                    } else {
                        expect_name = false;
                    }
                }
            }
        }
        i += 1;
    }
}

/// The `As` type following a parameter name at `i`, if declared.
fn parameter_type(words: &[&Token], i: usize) -> Option<String> {
    let mut j = i + 1;
    // Skip an empty array-marker `()` after the name.
    if words.get(j).map(|t| t.text.as_str()) == Some("(")
        && words.get(j + 1).map(|t| t.text.as_str()) == Some(")")
    {
        j += 2;
    }
    if words.get(j).is_some_and(|t| is_word(t, "As")) {
        return words.get(j + 1).map(|t| t.text.clone());
    }
    None
}
