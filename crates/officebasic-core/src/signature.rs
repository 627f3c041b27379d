//! Parameter hint detection.
//!
//! Resolves the call surrounding the cursor and which argument the cursor
//! is on. The call site is found by scanning backward with paren-depth
//! tracking; the active parameter by scanning forward from the call's open
//! paren, counting only commas that sit outside string literals and outside
//! nested parens. An unresolved name is `None`, never an error: the user
//! may simply be typing a call to something that does not exist yet.

use crate::modules::ProcedureInfo;
use officebasic_lang as lang;

/// A resolved call and the argument position at the cursor. Ephemeral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterHint {
    /// The called routine's name as written at the call site.
    pub function_name: String,
    /// The full rendered signature.
    pub signature: String,
    /// One label per declared parameter.
    pub parameters: Vec<String>,
    /// 0-based index of the argument the cursor is on.
    pub active_parameter: usize,
    /// Declared return type, if the routine has one.
    pub return_type: Option<String>,
}

/// Detect the active call and argument at `cursor_offset`.
///
/// Resolution tries the builtin signature table first, then the known
/// procedures (case-insensitively). No enclosing call, no name before the
/// paren, or no resolution: `None`.
///
/// # Example
///
/// ```
/// use officebasic_core::signature::detect_signature_help;
///
/// let source = "MsgBox(\"Hello, World\", ";
/// let hint = detect_signature_help(source, source.chars().count(), &[]).unwrap();
/// assert_eq!(hint.function_name, "MsgBox");
/// assert_eq!(hint.active_parameter, 1);
/// ```
pub fn detect_signature_help(
    source: &str,
    cursor_offset: usize,
    procedures: &[ProcedureInfo],
) -> Option<ParameterHint> {
    let chars: Vec<char> = source.chars().collect();
    let cursor = cursor_offset.min(chars.len());

    let open_paren = find_call_site(&chars, cursor)?;
    let function_name = name_before(&chars, open_paren)?;
    let active_parameter = count_active_parameter(&chars, open_paren + 1, cursor);

    resolve(&function_name, procedures).map(|(signature, parameters, return_type)| ParameterHint {
        function_name,
        signature,
        parameters,
        active_parameter,
        return_type,
    })
}

/// Backward scan for the nearest unbalanced open paren: depth rises on a
/// close paren, falls on an open one; the first open paren seen at depth 0
/// is the call site.
fn find_call_site(chars: &[char], cursor: usize) -> Option<usize> {
    let mut depth = 0usize;
    for pos in (0..cursor).rev() {
        match chars[pos] {
            ')' => depth += 1,
            '(' => {
                if depth == 0 {
                    return Some(pos);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}

/// The identifier run immediately before `open_paren`, skipping whitespace.
/// Type suffixes stay attached (`Left$(`), resolution strips them.
fn name_before(chars: &[char], open_paren: usize) -> Option<String> {
    let mut end = open_paren;
    while end > 0 && chars[end - 1].is_whitespace() {
        end -= 1;
    }
    let mut start = end;
    if start > 0 && lang::TYPE_SUFFIXES.contains(&chars[start - 1]) {
        start -= 1;
    }
    while start > 0 && is_identifier_char(chars[start - 1]) {
        start -= 1;
    }
    if start == end {
        return None;
    }
    let name: String = chars[start..end].iter().collect();
    is_identifier_start(name.chars().next()?).then_some(name)
}

/// Count top-level commas between the open paren and the cursor. Quotes
/// toggle string state (so a comma inside a literal is not an argument
/// separator) and nested parens suspend counting.
fn count_active_parameter(chars: &[char], from: usize, cursor: usize) -> usize {
    let mut in_string = false;
    let mut depth = 0usize;
    let mut commas = 0;

    for &ch in &chars[from..cursor] {
        if ch == '"' {
            in_string = !in_string;
            continue;
        }
        if in_string {
            continue;
        }
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => commas += 1,
            _ => {}
        }
    }

    commas
}

/// Builtin table first, then known procedures, both case-insensitive.
fn resolve(
    name: &str,
    procedures: &[ProcedureInfo],
) -> Option<(String, Vec<String>, Option<String>)> {
    if let Some(builtin) = lang::builtin(name) {
        return Some((
            builtin.signature.to_string(),
            builtin.parameters.iter().map(|p| p.to_string()).collect(),
            builtin.return_type.map(str::to_string),
        ));
    }

    let bare = lang::strip_type_suffix(name);
    procedures
        .iter()
        .find(|procedure| procedure.name.eq_ignore_ascii_case(bare))
        .map(|procedure| {
            (
                procedure.signature(),
                procedure.parameter_labels(),
                procedure.return_type.clone(),
            )
        })
}

fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

fn is_identifier_char(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}
