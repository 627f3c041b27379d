#![warn(missing_docs)]
//! `officebasic-lang` - static language data for the OfficeBasic macro dialect.
//!
//! This crate intentionally stays lightweight and does **not** depend on any
//! lexing or completion machinery. It provides the fixed vocabulary of the
//! dialect - keywords, intrinsic types, builtin routines and constants - plus
//! small lookup helpers, so that the engine crate can classify identifiers and
//! render documentation without owning the tables itself.
//!
//! All lookups are case-insensitive: OfficeBasic, like every Basic dialect,
//! does not distinguish `msgbox` from `MsgBox`.

/// The self-reference keyword (`Me`), compared case-insensitively.
pub const SELF_KEYWORD: &str = "Me";

/// The apostrophe that starts a line comment.
pub const COMMENT_CHAR: char = '\'';

/// The comment keyword (`Rem`), only a comment at a word boundary.
pub const COMMENT_KEYWORD: &str = "Rem";

/// Type-declaration suffix characters an identifier may carry
/// (`count%`, `name$`).
pub const TYPE_SUFFIXES: &[char] = &['%', '&', '!', '#', '@', '$'];

/// Suffix characters valid on numeric literals (`$` is string-only).
pub const NUMERIC_SUFFIXES: &[char] = &['%', '&', '!', '#', '@'];

/// Parameter passing-mode and optionality modifiers.
pub const PARAMETER_MODIFIERS: &[&str] = &["ByVal", "ByRef", "Optional", "ParamArray"];

/// Statement keywords, with a one-line description each.
pub const KEYWORDS: &[(&str, &str)] = &[
    ("And", "Logical conjunction operator."),
    ("As", "Introduces the type in a declaration."),
    ("ByRef", "Passes an argument by reference (the default)."),
    ("ByVal", "Passes an argument by value."),
    ("Call", "Invokes a Sub or Function procedure."),
    ("Case", "One branch of a Select Case block."),
    ("Const", "Declares a named constant."),
    ("Dim", "Declares one or more variables."),
    ("Do", "Starts a Do...Loop block."),
    ("Each", "Iterates the elements of a collection in For Each."),
    ("Else", "Alternative branch of an If block."),
    ("ElseIf", "Conditional alternative branch of an If block."),
    ("End", "Closes a block (End If, End Sub, ...) or stops execution."),
    ("Exit", "Leaves a loop or procedure early (Exit For, Exit Sub)."),
    ("False", "Boolean false literal."),
    ("For", "Starts a counted or For Each loop."),
    ("Function", "Declares a procedure that returns a value."),
    ("GoTo", "Jumps to a line label."),
    ("If", "Starts a conditional block."),
    ("In", "Separates the loop variable from the collection in For Each."),
    ("Is", "Object identity comparison, or Select Case comparison clause."),
    ("Let", "Assigns a value to a variable (optional, legacy)."),
    ("Loop", "Closes a Do block."),
    ("Me", "Refers to the module the executing code belongs to."),
    ("Mod", "Remainder of an integer division."),
    ("New", "Creates a new object instance."),
    ("Next", "Closes a For block."),
    ("Not", "Logical negation operator."),
    ("Nothing", "The empty object reference."),
    ("On", "Starts an error-handling directive (On Error)."),
    ("Optional", "Marks a parameter that may be omitted."),
    ("Or", "Logical disjunction operator."),
    ("ParamArray", "Collects trailing arguments into an array parameter."),
    ("Private", "Restricts a declaration to the containing module."),
    ("Public", "Exposes a declaration to every module."),
    ("ReDim", "Resizes a dynamic array."),
    ("Resume", "Continues execution after an error handler."),
    ("Select", "Starts a Select Case block."),
    ("Set", "Assigns an object reference."),
    ("Static", "Declares variables that keep their value between calls."),
    ("Step", "Loop counter increment in a For statement."),
    ("Sub", "Declares a procedure with no return value."),
    ("Then", "Separates an If condition from its body."),
    ("To", "Range separator in For and Case statements."),
    ("True", "Boolean true literal."),
    ("Until", "Do/Loop condition that stops the loop when true."),
    ("Wend", "Closes a While block."),
    ("While", "Starts a While...Wend loop, or a Do While condition."),
    ("With", "Abbreviates repeated member access on one object."),
    ("Xor", "Logical exclusive-or operator."),
];

/// Intrinsic type names, with a one-line description each.
pub const TYPES: &[(&str, &str)] = &[
    ("Boolean", "True or False."),
    ("Byte", "Unsigned 8-bit integer (0 to 255)."),
    ("Currency", "Fixed-point number with four decimal places."),
    ("Date", "Date and time value."),
    ("Double", "64-bit floating point number."),
    ("Integer", "Signed 16-bit integer."),
    ("Long", "Signed 32-bit integer."),
    ("Object", "Late-bound object reference."),
    ("Single", "32-bit floating point number."),
    ("String", "Variable-length text."),
    ("Variant", "Holds a value of any type (the default)."),
];

/// A builtin routine: completion label, rendered signature, parameter list,
/// return type and one-line documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinFunction {
    /// Canonical name (`MsgBox`, `Left`).
    pub name: &'static str,
    /// Full rendered signature, as shown by signature help.
    pub signature: &'static str,
    /// Parameter labels, in order. Bracketed parameters are optional.
    pub parameters: &'static [&'static str],
    /// Return type, if the routine returns a value.
    pub return_type: Option<&'static str>,
    /// One-line description.
    pub documentation: &'static str,
}

/// Builtin routines of the dialect's runtime library.
pub const BUILTINS: &[BuiltinFunction] = &[
    BuiltinFunction {
        name: "Abs",
        signature: "Abs(Number) As Double",
        parameters: &["Number"],
        return_type: Some("Double"),
        documentation: "Returns the absolute value of a number.",
    },
    BuiltinFunction {
        name: "Array",
        signature: "Array(ParamArray Values()) As Variant",
        parameters: &["Values()"],
        return_type: Some("Variant"),
        documentation: "Builds a Variant array from its arguments.",
    },
    BuiltinFunction {
        name: "Asc",
        signature: "Asc(Text As String) As Integer",
        parameters: &["Text As String"],
        return_type: Some("Integer"),
        documentation: "Returns the character code of the first character.",
    },
    BuiltinFunction {
        name: "CDbl",
        signature: "CDbl(Expression) As Double",
        parameters: &["Expression"],
        return_type: Some("Double"),
        documentation: "Converts an expression to Double.",
    },
    BuiltinFunction {
        name: "Chr",
        signature: "Chr(CharCode As Integer) As String",
        parameters: &["CharCode As Integer"],
        return_type: Some("String"),
        documentation: "Returns the character for a character code.",
    },
    BuiltinFunction {
        name: "CInt",
        signature: "CInt(Expression) As Integer",
        parameters: &["Expression"],
        return_type: Some("Integer"),
        documentation: "Converts an expression to Integer, rounding to even.",
    },
    BuiltinFunction {
        name: "CLng",
        signature: "CLng(Expression) As Long",
        parameters: &["Expression"],
        return_type: Some("Long"),
        documentation: "Converts an expression to Long, rounding to even.",
    },
    BuiltinFunction {
        name: "CStr",
        signature: "CStr(Expression) As String",
        parameters: &["Expression"],
        return_type: Some("String"),
        documentation: "Converts an expression to its text form.",
    },
    BuiltinFunction {
        name: "Date",
        signature: "Date() As Date",
        parameters: &[],
        return_type: Some("Date"),
        documentation: "Returns the current system date.",
    },
    BuiltinFunction {
        name: "Fix",
        signature: "Fix(Number) As Double",
        parameters: &["Number"],
        return_type: Some("Double"),
        documentation: "Truncates a number toward zero.",
    },
    BuiltinFunction {
        name: "Format",
        signature: "Format(Expression, [Fmt As String]) As String",
        parameters: &["Expression", "[Fmt As String]"],
        return_type: Some("String"),
        documentation: "Formats a value using a format picture string.",
    },
    BuiltinFunction {
        name: "InputBox",
        signature: "InputBox(Prompt As String, [Title As String], [Default As String]) As String",
        parameters: &[
            "Prompt As String",
            "[Title As String]",
            "[Default As String]",
        ],
        return_type: Some("String"),
        documentation: "Shows a dialog asking the user for a line of text.",
    },
    BuiltinFunction {
        name: "InStr",
        signature: "InStr([Start As Long], Text As String, Find As String) As Long",
        parameters: &["[Start As Long]", "Text As String", "Find As String"],
        return_type: Some("Long"),
        documentation: "Returns the 1-based position of one string inside another, 0 if absent.",
    },
    BuiltinFunction {
        name: "Int",
        signature: "Int(Number) As Double",
        parameters: &["Number"],
        return_type: Some("Double"),
        documentation: "Rounds a number down to the nearest integer.",
    },
    BuiltinFunction {
        name: "IsEmpty",
        signature: "IsEmpty(Expression) As Boolean",
        parameters: &["Expression"],
        return_type: Some("Boolean"),
        documentation: "True if a Variant has never been initialised.",
    },
    BuiltinFunction {
        name: "IsNumeric",
        signature: "IsNumeric(Expression) As Boolean",
        parameters: &["Expression"],
        return_type: Some("Boolean"),
        documentation: "True if an expression can be evaluated as a number.",
    },
    BuiltinFunction {
        name: "LBound",
        signature: "LBound(ArrayName, [Dimension As Integer]) As Long",
        parameters: &["ArrayName", "[Dimension As Integer]"],
        return_type: Some("Long"),
        documentation: "Returns the lower bound of an array dimension.",
    },
    BuiltinFunction {
        name: "LCase",
        signature: "LCase(Text As String) As String",
        parameters: &["Text As String"],
        return_type: Some("String"),
        documentation: "Converts text to lower case.",
    },
    BuiltinFunction {
        name: "Left",
        signature: "Left(Text As String, Length As Long) As String",
        parameters: &["Text As String", "Length As Long"],
        return_type: Some("String"),
        documentation: "Returns the leftmost characters of a string.",
    },
    BuiltinFunction {
        name: "Len",
        signature: "Len(Text As String) As Long",
        parameters: &["Text As String"],
        return_type: Some("Long"),
        documentation: "Returns the length of a string in characters.",
    },
    BuiltinFunction {
        name: "LTrim",
        signature: "LTrim(Text As String) As String",
        parameters: &["Text As String"],
        return_type: Some("String"),
        documentation: "Removes leading spaces.",
    },
    BuiltinFunction {
        name: "Mid",
        signature: "Mid(Text As String, Start As Long, [Length As Long]) As String",
        parameters: &["Text As String", "Start As Long", "[Length As Long]"],
        return_type: Some("String"),
        documentation: "Returns a substring starting at a 1-based position.",
    },
    BuiltinFunction {
        name: "MsgBox",
        signature: "MsgBox(Prompt As String, [Buttons As Integer], [Title As String]) As Integer",
        parameters: &[
            "Prompt As String",
            "[Buttons As Integer]",
            "[Title As String]",
        ],
        return_type: Some("Integer"),
        documentation: "Shows a message dialog and returns the button the user chose.",
    },
    BuiltinFunction {
        name: "Now",
        signature: "Now() As Date",
        parameters: &[],
        return_type: Some("Date"),
        documentation: "Returns the current system date and time.",
    },
    BuiltinFunction {
        name: "Replace",
        signature: "Replace(Text As String, Find As String, ReplaceWith As String) As String",
        parameters: &["Text As String", "Find As String", "ReplaceWith As String"],
        return_type: Some("String"),
        documentation: "Replaces every occurrence of one substring with another.",
    },
    BuiltinFunction {
        name: "Right",
        signature: "Right(Text As String, Length As Long) As String",
        parameters: &["Text As String", "Length As Long"],
        return_type: Some("String"),
        documentation: "Returns the rightmost characters of a string.",
    },
    BuiltinFunction {
        name: "Rnd",
        signature: "Rnd([Seed As Single]) As Single",
        parameters: &["[Seed As Single]"],
        return_type: Some("Single"),
        documentation: "Returns a pseudo-random number in [0, 1).",
    },
    BuiltinFunction {
        name: "Round",
        signature: "Round(Number As Double, [Digits As Integer]) As Double",
        parameters: &["Number As Double", "[Digits As Integer]"],
        return_type: Some("Double"),
        documentation: "Rounds a number to a given number of decimal places.",
    },
    BuiltinFunction {
        name: "RTrim",
        signature: "RTrim(Text As String) As String",
        parameters: &["Text As String"],
        return_type: Some("String"),
        documentation: "Removes trailing spaces.",
    },
    BuiltinFunction {
        name: "Sqr",
        signature: "Sqr(Number As Double) As Double",
        parameters: &["Number As Double"],
        return_type: Some("Double"),
        documentation: "Returns the square root of a non-negative number.",
    },
    BuiltinFunction {
        name: "Str",
        signature: "Str(Number) As String",
        parameters: &["Number"],
        return_type: Some("String"),
        documentation: "Converts a number to text with a leading sign space.",
    },
    BuiltinFunction {
        name: "Time",
        signature: "Time() As Date",
        parameters: &[],
        return_type: Some("Date"),
        documentation: "Returns the current system time.",
    },
    BuiltinFunction {
        name: "Trim",
        signature: "Trim(Text As String) As String",
        parameters: &["Text As String"],
        return_type: Some("String"),
        documentation: "Removes leading and trailing spaces.",
    },
    BuiltinFunction {
        name: "UBound",
        signature: "UBound(ArrayName, [Dimension As Integer]) As Long",
        parameters: &["ArrayName", "[Dimension As Integer]"],
        return_type: Some("Long"),
        documentation: "Returns the upper bound of an array dimension.",
    },
    BuiltinFunction {
        name: "UCase",
        signature: "UCase(Text As String) As String",
        parameters: &["Text As String"],
        return_type: Some("String"),
        documentation: "Converts text to upper case.",
    },
    BuiltinFunction {
        name: "Val",
        signature: "Val(Text As String) As Double",
        parameters: &["Text As String"],
        return_type: Some("Double"),
        documentation: "Parses the leading numeric part of a string.",
    },
];

/// Builtin named constants, with a one-line description each.
pub const CONSTANTS: &[(&str, &str)] = &[
    ("vbCr", "Carriage-return character."),
    ("vbCrLf", "Carriage-return / line-feed pair."),
    ("vbLf", "Line-feed character."),
    ("vbNullString", "The empty string constant."),
    ("vbTab", "Horizontal tab character."),
];

/// Strip a trailing type-declaration suffix, if present.
///
/// `strip_type_suffix("name$")` is `"name"`; a bare `"name"` is unchanged.
pub fn strip_type_suffix(word: &str) -> &str {
    match word.chars().last() {
        Some(last) if TYPE_SUFFIXES.contains(&last) => &word[..word.len() - last.len_utf8()],
        _ => word,
    }
}

/// Case-insensitive keyword test. The word must already be suffix-free.
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.iter().any(|(k, _)| k.eq_ignore_ascii_case(word))
}

/// Case-insensitive intrinsic-type test.
pub fn is_type(word: &str) -> bool {
    TYPES.iter().any(|(t, _)| t.eq_ignore_ascii_case(word))
}

/// Case-insensitive builtin-routine test.
pub fn is_builtin(word: &str) -> bool {
    builtin(word).is_some()
}

/// Look up a builtin routine by name, ignoring case and any type suffix
/// (`left$` resolves to `Left`).
pub fn builtin(name: &str) -> Option<&'static BuiltinFunction> {
    let bare = strip_type_suffix(name);
    BUILTINS.iter().find(|b| b.name.eq_ignore_ascii_case(bare))
}

/// Documentation line for a keyword, if the word is one.
pub fn keyword_documentation(word: &str) -> Option<&'static str> {
    KEYWORDS
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(word))
        .map(|(_, doc)| *doc)
}

/// Documentation line for an intrinsic type, if the word is one.
pub fn type_documentation(word: &str) -> Option<&'static str> {
    TYPES
        .iter()
        .find(|(t, _)| t.eq_ignore_ascii_case(word))
        .map(|(_, doc)| *doc)
}

/// Returns `true` if `word` is a parameter passing-mode/optionality modifier.
pub fn is_parameter_modifier(word: &str) -> bool {
    PARAMETER_MODIFIERS
        .iter()
        .any(|m| m.eq_ignore_ascii_case(word))
}
