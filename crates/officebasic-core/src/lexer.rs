//! Line lexer for OfficeBasic source.
//!
//! Tokenization is stateless and line-local: one call classifies one line of
//! source into typed tokens. Each recognizer is an independent pure function
//! over `(chars, offset)`, combined by ordered dispatch, so a limitation in
//! one recognizer never aborts the rest of the line. The lexer never fails;
//! ambiguous input (an unterminated string, a `Rem` comment) degrades to a
//! single token running to the end of the line, and unknown characters come
//! out as one-character punctuation tokens.
//!
//! Token spans partition the line exactly: `tokens[i].end == tokens[i+1].start`
//! for every adjacent pair, and the concatenated token texts equal the input.

use officebasic_lang as lang;

/// Classification of a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Statement keyword (`Dim`, `If`, `Sub`).
    Keyword,
    /// Intrinsic type name (`Integer`, `String`).
    Type,
    /// Builtin routine (`MsgBox`, `Len`).
    Builtin,
    /// Double-quoted string literal, possibly unterminated.
    String,
    /// Line comment (`' ...` or `Rem ...`), always running to end of line.
    Comment,
    /// Numeric literal, including `&H`/`&O` radix forms.
    Number,
    /// One- or two-character operator.
    Operator,
    /// Identifier, possibly carrying a type suffix (`name$`).
    Identifier,
    /// A run of spaces and tabs.
    Whitespace,
    /// Bracket, separator, or any character nothing else claimed.
    Punctuation,
}

/// One classified lexical unit of a line.
///
/// `start`/`end` are char offsets within the line, half-open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token classification.
    pub kind: TokenKind,
    /// The exact source text of the token.
    pub text: String,
    /// Inclusive start char offset within the line.
    pub start: usize,
    /// Exclusive end char offset within the line.
    pub end: usize,
}

impl Token {
    /// Length of the token in chars.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` for a zero-length token (never produced by the lexer).
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Two-character operators, matched before one-character ones.
const TWO_CHAR_OPERATORS: &[[char; 2]] = &[['<', '='], ['>', '='], ['<', '>']];

/// One-character operators.
const ONE_CHAR_OPERATORS: &[char] = &['=', '<', '>', '+', '-', '*', '/', '\\', '^', '&'];

/// Punctuation characters with dedicated meaning.
const PUNCTUATION: &[char] = &['(', ')', ',', ';', ':', '.'];

/// Tokenize one line of OfficeBasic source.
///
/// The input must not contain line breaks; a `\n` would be classified as
/// punctuation rather than splitting the line.
///
/// # Example
///
/// ```
/// use officebasic_core::lexer::{tokenize, TokenKind};
///
/// let tokens = tokenize("Dim x As Integer");
/// assert_eq!(tokens[0].kind, TokenKind::Keyword);
/// assert_eq!(tokens[2].text, "x");
/// assert_eq!(tokens[6].kind, TokenKind::Type);
/// ```
pub fn tokenize(line: &str) -> Vec<Token> {
    let chars: Vec<char> = line.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let (kind, len) = next_token(&chars, pos);
        debug_assert!(len > 0, "recognizers must always consume");
        let end = pos + len;
        tokens.push(Token {
            kind,
            text: chars[pos..end].iter().collect(),
            start: pos,
            end,
        });
        pos = end;
    }

    tokens
}

/// Ordered dispatch over the recognizers. Always consumes at least one char.
fn next_token(chars: &[char], pos: usize) -> (TokenKind, usize) {
    if let Some(len) = scan_whitespace(chars, pos) {
        return (TokenKind::Whitespace, len);
    }
    if let Some(len) = scan_comment(chars, pos) {
        return (TokenKind::Comment, len);
    }
    if let Some(len) = scan_string(chars, pos) {
        return (TokenKind::String, len);
    }
    if let Some(len) = scan_number(chars, pos) {
        return (TokenKind::Number, len);
    }
    if let Some(len) = scan_operator(chars, pos) {
        return (TokenKind::Operator, len);
    }
    if PUNCTUATION.contains(&chars[pos]) {
        return (TokenKind::Punctuation, 1);
    }
    if let Some(len) = scan_identifier(chars, pos) {
        let word: String = chars[pos..pos + len].iter().collect();
        return (classify_word(&word), len);
    }
    // Anything unclaimed is a one-character punctuation token.
    (TokenKind::Punctuation, 1)
}

fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

fn is_identifier_char(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

fn scan_whitespace(chars: &[char], pos: usize) -> Option<usize> {
    let len = chars[pos..]
        .iter()
        .take_while(|ch| ch.is_whitespace())
        .count();
    (len > 0).then_some(len)
}

/// An apostrophe, or the `Rem` keyword at a word boundary, comments out the
/// rest of the line. The boundary check keeps identifiers that merely start
/// with the keyword (`Remainder`) out of this recognizer.
fn scan_comment(chars: &[char], pos: usize) -> Option<usize> {
    if chars[pos] == lang::COMMENT_CHAR {
        return Some(chars.len() - pos);
    }

    let keyword: Vec<char> = lang::COMMENT_KEYWORD.chars().collect();
    let end = pos + keyword.len();
    if end > chars.len() {
        return None;
    }
    let word_matches = chars[pos..end]
        .iter()
        .zip(&keyword)
        .all(|(a, b)| a.eq_ignore_ascii_case(b));
    if !word_matches {
        return None;
    }
    if chars.get(end).copied().is_some_and(is_identifier_char) {
        return None;
    }
    Some(chars.len() - pos)
}

/// Double-quoted string; a doubled quote is the only escape. Unterminated
/// strings consume to end of line.
fn scan_string(chars: &[char], pos: usize) -> Option<usize> {
    if chars[pos] != '"' {
        return None;
    }

    let mut i = pos + 1;
    while i < chars.len() {
        if chars[i] == '"' {
            if chars.get(i + 1) == Some(&'"') {
                i += 2;
                continue;
            }
            return Some(i + 1 - pos);
        }
        i += 1;
    }
    Some(chars.len() - pos)
}

/// Decimal literals with optional fraction/exponent, `&H`/`&O` radix
/// literals, and an optional single numeric type suffix.
fn scan_number(chars: &[char], pos: usize) -> Option<usize> {
    if chars[pos] == '&' {
        return scan_radix_number(chars, pos);
    }
    if !chars[pos].is_ascii_digit() {
        return None;
    }

    let mut i = pos;
    while chars.get(i).is_some_and(|ch| ch.is_ascii_digit()) {
        i += 1;
    }

    if chars.get(i) == Some(&'.') && chars.get(i + 1).is_some_and(|ch| ch.is_ascii_digit()) {
        i += 1;
        while chars.get(i).is_some_and(|ch| ch.is_ascii_digit()) {
            i += 1;
        }
    }

    if chars
        .get(i)
        .is_some_and(|ch| ch.eq_ignore_ascii_case(&'e'))
    {
        let mut j = i + 1;
        if matches!(chars.get(j), Some('+') | Some('-')) {
            j += 1;
        }
        if chars.get(j).is_some_and(|ch| ch.is_ascii_digit()) {
            i = j;
            while chars.get(i).is_some_and(|ch| ch.is_ascii_digit()) {
                i += 1;
            }
        }
    }

    if chars
        .get(i)
        .is_some_and(|ch| lang::NUMERIC_SUFFIXES.contains(ch))
    {
        i += 1;
    }

    Some(i - pos)
}

/// `&Hxx` (hex) and `&Oxx` (octal) literals. A bare `&` is the concatenation
/// operator and falls through to the operator recognizer.
fn scan_radix_number(chars: &[char], pos: usize) -> Option<usize> {
    let radix_char = chars.get(pos + 1)?;
    let digit_ok: fn(char) -> bool = match radix_char.to_ascii_uppercase() {
        'H' => |ch| ch.is_ascii_hexdigit(),
        'O' => |ch| ('0'..='7').contains(&ch),
        _ => return None,
    };

    let mut i = pos + 2;
    while chars.get(i).copied().is_some_and(digit_ok) {
        i += 1;
    }
    if i == pos + 2 {
        return None;
    }

    if chars
        .get(i)
        .is_some_and(|ch| lang::NUMERIC_SUFFIXES.contains(ch))
    {
        i += 1;
    }

    Some(i - pos)
}

/// Longest match: two-character operators win over one-character ones.
fn scan_operator(chars: &[char], pos: usize) -> Option<usize> {
    if let Some(&next) = chars.get(pos + 1) {
        let pair = [chars[pos], next];
        if TWO_CHAR_OPERATORS.contains(&pair) {
            return Some(2);
        }
    }
    ONE_CHAR_OPERATORS.contains(&chars[pos]).then_some(1)
}

/// Alphanumeric/underscore run, plus at most one trailing type suffix that
/// stays part of the token text (`name$`).
fn scan_identifier(chars: &[char], pos: usize) -> Option<usize> {
    if !is_identifier_start(chars[pos]) {
        return None;
    }

    let mut i = pos + 1;
    while chars.get(i).copied().is_some_and(is_identifier_char) {
        i += 1;
    }
    if chars
        .get(i)
        .is_some_and(|ch| lang::TYPE_SUFFIXES.contains(ch))
    {
        i += 1;
    }
    Some(i - pos)
}

/// Classify an identifier-shaped word against the static language tables.
/// The type suffix is stripped before classification, so `Left$` is a
/// builtin even though the table stores `Left`.
fn classify_word(word: &str) -> TokenKind {
    let bare = lang::strip_type_suffix(word);
    if lang::is_keyword(bare) {
        TokenKind::Keyword
    } else if lang::is_type(bare) {
        TokenKind::Type
    } else if lang::is_builtin(bare) {
        TokenKind::Builtin
    } else {
        TokenKind::Identifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(line: &str) -> Vec<TokenKind> {
        tokenize(line).into_iter().map(|t| t.kind).collect()
    }

    fn assert_partition(line: &str) {
        let tokens = tokenize(line);
        let rebuilt: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(rebuilt, line, "token texts must rebuild the line");
        let mut expected_start = 0;
        for token in &tokens {
            assert_eq!(token.start, expected_start, "no gaps or overlaps");
            assert!(token.end > token.start);
            expected_start = token.end;
        }
        assert_eq!(expected_start, line.chars().count());
    }

    #[test]
    fn test_declaration_line() {
        assert_eq!(
            kinds("Dim x As Integer"),
            vec![
                TokenKind::Keyword,
                TokenKind::Whitespace,
                TokenKind::Identifier,
                TokenKind::Whitespace,
                TokenKind::Keyword,
                TokenKind::Whitespace,
                TokenKind::Type,
            ]
        );
    }

    #[test]
    fn test_spans_partition_the_line() {
        assert_partition("Dim x As Integer");
        assert_partition("  MsgBox(\"hi, \"\"you\"\"\", 1+2) ' trailing");
        assert_partition("result = &HFF + 1.5E-3# \\ arr(i%)");
        assert_partition("");
        assert_partition("§¶±");
    }

    #[test]
    fn test_tokenize_is_idempotent() {
        let line = "For i = 1 To Len(name$) Step 2";
        assert_eq!(tokenize(line), tokenize(line));
    }

    #[test]
    fn test_apostrophe_comment_runs_to_end() {
        let tokens = tokenize("x = 1 ' set \"x\"");
        let comment = tokens.last().unwrap();
        assert_eq!(comment.kind, TokenKind::Comment);
        assert_eq!(comment.text, "' set \"x\"");
    }

    #[test]
    fn test_rem_comment_requires_word_boundary() {
        let tokens = tokenize("Rem whole line ignored");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Comment);

        // `Remainder` is an ordinary identifier.
        let tokens = tokenize("Remainder = 1");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].text, "Remainder");

        // Case-insensitive, and `REM` alone at end of line still comments.
        assert_eq!(kinds("REM"), vec![TokenKind::Comment]);
    }

    #[test]
    fn test_string_doubled_quote_escape() {
        let tokens = tokenize("s = \"say \"\"hi\"\"\"");
        let string = tokens.last().unwrap();
        assert_eq!(string.kind, TokenKind::String);
        assert_eq!(string.text, "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_unterminated_string_consumes_line() {
        let tokens = tokenize("s = \"no end");
        let string = tokens.last().unwrap();
        assert_eq!(string.kind, TokenKind::String);
        assert_eq!(string.text, "\"no end");
    }

    #[test]
    fn test_numeric_literals() {
        for literal in ["42", "3.25", "1.5E-3", "2E8", "10#", "&HFF", "&hff&", "&O17"] {
            let tokens = tokenize(literal);
            assert_eq!(tokens.len(), 1, "{literal} lexes as one token");
            assert_eq!(tokens[0].kind, TokenKind::Number, "{literal}");
        }

        // A bare `&` is the concatenation operator, not a radix prefix.
        let tokens = tokenize("a & b");
        assert_eq!(tokens[2].kind, TokenKind::Operator);

        // `&Hx` without hex digits falls back to operator + identifier.
        let tokens = tokenize("&Hz");
        assert_eq!(tokens[0].kind, TokenKind::Operator);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_two_char_operators_take_longest_match() {
        let tokens = tokenize("a<>b<=c>=d");
        let ops: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Operator)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(ops, vec!["<>", "<=", ">="]);
    }

    #[test]
    fn test_identifier_type_suffix_classification() {
        // Suffix stays in the token text but not in the classification.
        let tokens = tokenize("Left$(name$, 3)");
        assert_eq!(tokens[0].kind, TokenKind::Builtin);
        assert_eq!(tokens[0].text, "Left$");
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
        assert_eq!(tokens[2].text, "name$");
    }

    #[test]
    fn test_unknown_chars_become_punctuation() {
        let tokens = tokenize("a ? b");
        assert_eq!(tokens[2].kind, TokenKind::Punctuation);
        assert_eq!(tokens[2].text, "?");
    }

    #[test]
    fn test_member_access_dot_is_punctuation() {
        let tokens = tokenize("Debug.Print");
        assert_eq!(tokens[1].kind, TokenKind::Punctuation);
        assert_eq!(tokens[1].text, ".");
    }
}
