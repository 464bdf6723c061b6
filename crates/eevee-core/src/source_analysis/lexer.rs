// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for Eevee source code.
//!
//! This module converts source text into a stream of [`Token`]s. The lexer
//! is hand-written and line-structured: the source is split on `\n`, each
//! line's leading indentation is compared against an indentation stack
//! (the offside rule), and synthetic `INDENT`/`DEDENT`/`EOL`/`EOF` tokens
//! are interleaved with the conventional lexical tokens.
//!
//! # Design Principles
//!
//! - **Error recovery**: Never fail on malformed input; emit
//!   [`TokenKind::Illegal`] and keep scanning
//! - **Display columns**: Token columns are display columns, with tabs
//!   expanded to the next multiple of the configured tab size
//! - **Balanced blocks**: Every `INDENT` is eventually matched by a `DEDENT`
//!
//! # Example
//!
//! ```
//! use eevee_core::source_analysis::{TokenKind, lex};
//!
//! let tokens = lex("2 + 2", 4);
//! assert_eq!(tokens.len(), 4); // 2, +, 2, EOF
//! assert!(tokens.last().unwrap().kind().is_eof());
//! ```

use super::{Token, TokenKind, lookup_keyword};

/// Two-character operators, matched before any single-character token.
const TWO_CHAR_OPERATORS: &[(&str, TokenKind)] = &[
    ("&&", TokenKind::And),
    ("||", TokenKind::Or),
    ("==", TokenKind::Eq),
    ("!=", TokenKind::NotEq),
    ("<=", TokenKind::LtEq),
    (">=", TokenKind::GtEq),
    ("+=", TokenKind::PlusAssign),
    ("-=", TokenKind::MinusAssign),
    ("*=", TokenKind::StarAssign),
    ("/=", TokenKind::SlashAssign),
    ("%=", TokenKind::PercentAssign),
];

/// Single-character operators and punctuation.
const ONE_CHAR_OPERATORS: &[(&str, TokenKind)] = &[
    ("<", TokenKind::Lt),
    (">", TokenKind::Gt),
    (";", TokenKind::Semi),
    (",", TokenKind::Comma),
    (":", TokenKind::Colon),
    ("(", TokenKind::LParen),
    (")", TokenKind::RParen),
    ("{", TokenKind::LBrace),
    ("}", TokenKind::RBrace),
    ("[", TokenKind::LBracket),
    ("]", TokenKind::RBracket),
    ("!", TokenKind::Bang),
    ("=", TokenKind::Assign),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("/", TokenKind::Slash),
    ("%", TokenKind::Percent),
];

/// Matches an operator or punctuation token at the start of `rest`.
///
/// Two-character operators take priority so `<=` never lexes as `<`, `=`.
fn match_operator(rest: &str) -> Option<(TokenKind, &str)> {
    TWO_CHAR_OPERATORS
        .iter()
        .chain(ONE_CHAR_OPERATORS)
        .find(|(text, _)| rest.starts_with(text))
        .map(|&(text, kind)| (kind, &rest[..text.len()]))
}

/// A lexer that tokenizes Eevee source code.
///
/// Construction runs the whole tokenization; the result is available via
/// [`Lexer::into_tokens`]. Most callers should use the [`lex`] function.
///
/// # Error Recovery
///
/// The lexer never fails. An unrecognized character becomes a
/// [`TokenKind::Illegal`] token carrying that character, and scanning
/// continues one character later. An unterminated string falls through to
/// this rule on its opening quote.
#[derive(Debug)]
pub struct Lexer<'src> {
    /// The source text being lexed.
    source: &'src str,
    /// Configured tab size for display-column accounting.
    tab_size: usize,
    /// Stack of open indentation widths; the base level 0 is never popped.
    indent_stack: Vec<usize>,
    /// Accumulated output tokens.
    tokens: Vec<Token>,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer and tokenizes the given source text.
    #[must_use]
    pub fn new(source: &'src str, tab_size: usize) -> Self {
        let mut lexer = Self {
            source,
            tab_size: tab_size.max(1),
            indent_stack: vec![0],
            tokens: Vec::new(),
        };
        lexer.tokenize();
        lexer
    }

    /// Returns the token stream.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Consumes the lexer and returns the token stream.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    fn current_indent(&self) -> usize {
        self.indent_stack.last().copied().unwrap_or(0)
    }

    fn push_token(&mut self, kind: TokenKind, lexeme: &str, line: usize, column: usize) {
        self.tokens.push(Token::new(kind, lexeme, line, column));
    }

    /// Processes the source line by line.
    ///
    /// Per line: compare leading indentation against the stack and emit
    /// `DEDENT`/`INDENT` tokens, advance the column past the prefix with tab
    /// expansion, scan the trimmed content, then emit `EOL` for every line
    /// except the last. Remaining open indents are closed before the final
    /// `EOF`.
    fn tokenize(&mut self) {
        let lines: Vec<&str> = self.source.split('\n').collect();
        let line_count = lines.len();

        for (index, line) in lines.iter().enumerate() {
            let line_number = index + 1;
            let content = line.trim_start_matches([' ', '\t']);
            let prefix = &line[..line.len() - content.len()];
            let indent_width = prefix.len();

            while indent_width < self.current_indent() {
                self.push_token(TokenKind::Dedent, "", line_number, 1);
                self.indent_stack.pop();
            }
            if indent_width > self.current_indent() {
                self.push_token(TokenKind::Indent, "", line_number, 1);
                self.indent_stack.push(indent_width);
            }

            let mut column = 1;
            for c in prefix.chars() {
                column += self.column_width(c, column);
            }

            let column = self.scan_line(content.trim_end(), line_number, column);

            if line_number != line_count {
                self.push_token(TokenKind::Eol, "", line_number, column);
            }
        }

        while self.indent_stack.len() > 1 {
            self.push_token(TokenKind::Dedent, "", line_count + 1, 1);
            self.indent_stack.pop();
        }
        self.push_token(TokenKind::Eof, "", line_count + 1, 1);
    }

    /// Returns how many display columns `c` occupies at `column`.
    ///
    /// A tab advances to the next multiple of the tab size; everything else
    /// is one column wide.
    fn column_width(&self, c: char, column: usize) -> usize {
        if c == '\t' {
            self.tab_size - ((column - 1) % self.tab_size)
        } else {
            1
        }
    }

    /// Scans one line of indentation-stripped content.
    ///
    /// Matching order: whitespace, comment, two-character operators,
    /// single-character operators, identifiers (with keyword rewrite),
    /// numbers, strings. Anything else becomes a single-character `ILLEGAL`
    /// token. Returns the column after the last consumed character.
    fn scan_line(&mut self, content: &str, line_number: usize, mut column: usize) -> usize {
        let mut rest = content;

        while !rest.is_empty() {
            let trimmed = rest.trim_start_matches([' ', '\t']);
            if trimmed.len() != rest.len() {
                column += rest.len() - trimmed.len();
                rest = trimmed;
                continue;
            }

            if rest.starts_with('#') {
                // Comment runs to end of line; discarded but still counted
                // so the EOL token lands on the right column.
                column += rest.chars().count();
                break;
            }

            if let Some((kind, lexeme)) = match_operator(rest) {
                self.push_token(kind, lexeme, line_number, column);
                column += lexeme.len();
                rest = &rest[lexeme.len()..];
                continue;
            }

            let Some(first) = rest.chars().next() else {
                break;
            };

            if first.is_ascii_alphabetic() || first == '_' {
                let end = rest
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                    .unwrap_or(rest.len());
                let lexeme = &rest[..end];
                let kind = lookup_keyword(lexeme).unwrap_or(TokenKind::Ident);
                self.push_token(kind, lexeme, line_number, column);
                column += end;
                rest = &rest[end..];
                continue;
            }

            if first.is_ascii_digit() {
                let (kind, end) = scan_number(rest);
                self.push_token(kind, &rest[..end], line_number, column);
                column += end;
                rest = &rest[end..];
                continue;
            }

            if first == '"' {
                // Non-greedy: the string ends at the next quote on the line.
                if let Some(close) = rest[1..].find('"') {
                    let lexeme = &rest[..close + 2];
                    self.push_token(TokenKind::Str, lexeme, line_number, column);
                    column += lexeme.chars().count();
                    rest = &rest[close + 2..];
                    continue;
                }
            }

            let width = first.len_utf8();
            self.push_token(TokenKind::Illegal, &rest[..width], line_number, column);
            column += 1;
            rest = &rest[width..];
        }

        column
    }
}

/// Scans an integer or float at the start of `rest`, returning the kind and
/// byte length. A float requires digits on both sides of the dot, so `42.`
/// lexes as the integer `42` followed by an illegal `.`.
fn scan_number(rest: &str) -> (TokenKind, usize) {
    let int_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());

    if let Some(after_dot) = rest[int_end..].strip_prefix('.') {
        let fraction = after_dot
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(after_dot.len());
        if fraction > 0 {
            return (TokenKind::Float, int_end + 1 + fraction);
        }
    }

    (TokenKind::Int, int_end)
}

/// Tokenizes `source` with the given tab size.
///
/// The returned stream always ends with exactly one [`TokenKind::Eof`], and
/// every `INDENT` is matched by a `DEDENT`. Whitespace and comments never
/// appear in the output.
#[must_use]
pub fn lex(source: &str, tab_size: usize) -> Vec<Token> {
    Lexer::new(source, tab_size).into_tokens()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::make_input;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| *t.kind()).collect()
    }

    #[track_caller]
    fn assert_token(token: &Token, kind: TokenKind, lexeme: &str, line: usize, column: usize) {
        assert_eq!(*token.kind(), kind, "kind of {token}");
        assert_eq!(token.lexeme(), lexeme, "lexeme of {token}");
        assert_eq!(token.line(), line, "line of {token}");
        assert_eq!(token.column(), column, "column of {token}");
    }

    #[test]
    fn literals_and_indentation() {
        let input = make_input(&[
            "#This is a comment",
            "42",
            "3.14",
            "\"eevee\"",
            "\"\"",
            "\t\"flareon\"",
        ]);
        let tokens = lex(&input, 4);

        assert_token(&tokens[0], TokenKind::Eol, "", 1, 19);
        assert_token(&tokens[1], TokenKind::Int, "42", 2, 1);
        assert_token(&tokens[2], TokenKind::Eol, "", 2, 3);
        assert_token(&tokens[3], TokenKind::Float, "3.14", 3, 1);
        assert_token(&tokens[4], TokenKind::Eol, "", 3, 5);
        assert_token(&tokens[5], TokenKind::Str, "\"eevee\"", 4, 1);
        assert_token(&tokens[6], TokenKind::Eol, "", 4, 8);
        assert_token(&tokens[7], TokenKind::Str, "\"\"", 5, 1);
        assert_token(&tokens[8], TokenKind::Eol, "", 5, 3);
        assert_token(&tokens[9], TokenKind::Indent, "", 6, 1);
        assert_token(&tokens[10], TokenKind::Str, "\"flareon\"", 6, 5);
        assert_token(&tokens[11], TokenKind::Eol, "", 6, 14);
        assert_token(&tokens[12], TokenKind::Dedent, "", 7, 1);
        assert_token(&tokens[13], TokenKind::Eof, "", 7, 1);
        assert_eq!(tokens.len(), 14);
    }

    #[test]
    fn nested_blocks_balance() {
        let input = make_input(&["42", "\t\"eevee\"", "\t\t3.14", "\"flareon\""]);
        let tokens = lex(&input, 4);

        let kinds = kinds(&tokens);
        let indents = kinds.iter().filter(|k| **k == TokenKind::Indent).count();
        let dedents = kinds.iter().filter(|k| **k == TokenKind::Dedent).count();
        assert_eq!(indents, 2);
        assert_eq!(dedents, 2);

        // Both levels close on the return to column zero.
        assert_token(&tokens[8], TokenKind::Dedent, "", 4, 1);
        assert_token(&tokens[9], TokenKind::Dedent, "", 4, 1);
        assert_token(&tokens[10], TokenKind::Str, "\"flareon\"", 4, 1);
    }

    #[test]
    fn tab_expansion_follows_tab_size() {
        let tokens = lex("x\n\ty", 4);
        assert_token(&tokens[3], TokenKind::Ident, "y", 2, 5);

        let tokens = lex("x\n\ty", 2);
        assert_token(&tokens[3], TokenKind::Ident, "y", 2, 3);

        // A tab mid-prefix advances to the next stop, not by a fixed width.
        let tokens = lex("x\n \ty", 4);
        assert_token(&tokens[3], TokenKind::Ident, "y", 2, 5);
    }

    #[test]
    fn equal_indent_uses_display_columns() {
        let input = make_input(&["42", "\tx", "\ty"]);
        let tokens = lex(&input, 4);

        assert_token(&tokens[2], TokenKind::Indent, "", 2, 1);
        assert_token(&tokens[3], TokenKind::Ident, "x", 2, 5);
        // Same indentation: no synthetic token, same expanded column.
        assert_token(&tokens[5], TokenKind::Ident, "y", 3, 5);
    }

    #[test]
    fn mismatched_dedent_reindents() {
        // Dropping from width 4 to width 2 pops to the base level and then
        // opens a fresh block at width 2.
        let input = make_input(&["a", "    b", "  c"]);
        let tokens = lex(&input, 4);

        assert_token(&tokens[5], TokenKind::Dedent, "", 3, 1);
        assert_token(&tokens[6], TokenKind::Indent, "", 3, 1);
        assert_token(&tokens[7], TokenKind::Ident, "c", 3, 3);
    }

    #[test]
    fn operators_two_char_before_one_char() {
        let tokens = lex("a <= b >= c == d != e && f || g += 1 -= 2 *= 3 /= 4 %= 5", 4);
        let expected = [
            TokenKind::Ident,
            TokenKind::LtEq,
            TokenKind::Ident,
            TokenKind::GtEq,
            TokenKind::Ident,
            TokenKind::Eq,
            TokenKind::Ident,
            TokenKind::NotEq,
            TokenKind::Ident,
            TokenKind::And,
            TokenKind::Ident,
            TokenKind::Or,
            TokenKind::Ident,
            TokenKind::PlusAssign,
            TokenKind::Int,
            TokenKind::MinusAssign,
            TokenKind::Int,
            TokenKind::StarAssign,
            TokenKind::Int,
            TokenKind::SlashAssign,
            TokenKind::Int,
            TokenKind::PercentAssign,
            TokenKind::Int,
            TokenKind::Eof,
        ];
        assert_eq!(kinds(&tokens), expected);
    }

    #[test]
    fn punctuation_and_math() {
        let tokens = lex("(1 + 2) * [3] / {4} % 5; x, y: !z < w > v", 4);
        let expected = [
            TokenKind::LParen,
            TokenKind::Int,
            TokenKind::Plus,
            TokenKind::Int,
            TokenKind::RParen,
            TokenKind::Star,
            TokenKind::LBracket,
            TokenKind::Int,
            TokenKind::RBracket,
            TokenKind::Slash,
            TokenKind::LBrace,
            TokenKind::Int,
            TokenKind::RBrace,
            TokenKind::Percent,
            TokenKind::Int,
            TokenKind::Semi,
            TokenKind::Ident,
            TokenKind::Comma,
            TokenKind::Ident,
            TokenKind::Colon,
            TokenKind::Bang,
            TokenKind::Ident,
            TokenKind::Lt,
            TokenKind::Ident,
            TokenKind::Gt,
            TokenKind::Ident,
            TokenKind::Eof,
        ];
        assert_eq!(kinds(&tokens), expected);
    }

    #[test]
    fn keywords_rewrite_identifiers() {
        let tokens = lex("let fn if then else while for do return true false null", 4);
        let expected = [
            TokenKind::Let,
            TokenKind::Function,
            TokenKind::If,
            TokenKind::Then,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::For,
            TokenKind::Do,
            TokenKind::Return,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Null,
            TokenKind::Eof,
        ];
        assert_eq!(kinds(&tokens), expected);
    }

    #[test]
    fn keyword_aliases_lex_as_operators() {
        let tokens = lex("a is b not c and d or e", 4);
        let expected = [
            TokenKind::Ident,
            TokenKind::Eq,
            TokenKind::Ident,
            TokenKind::NotEq,
            TokenKind::Ident,
            TokenKind::And,
            TokenKind::Ident,
            TokenKind::Or,
            TokenKind::Ident,
            TokenKind::Eof,
        ];
        assert_eq!(kinds(&tokens), expected);
    }

    #[test]
    fn illegal_characters_recover() {
        let tokens = lex("a @ b", 4);
        assert_token(&tokens[0], TokenKind::Ident, "a", 1, 1);
        assert_token(&tokens[1], TokenKind::Illegal, "@", 1, 3);
        assert_token(&tokens[2], TokenKind::Ident, "b", 1, 5);

        // Lone halves of two-character operators are illegal.
        let tokens = lex("a & b | c", 4);
        assert_token(&tokens[1], TokenKind::Illegal, "&", 1, 3);
        assert_token(&tokens[3], TokenKind::Illegal, "|", 1, 7);
    }

    #[test]
    fn unterminated_string_is_illegal_quote() {
        let tokens = lex("\"eevee", 4);
        assert_token(&tokens[0], TokenKind::Illegal, "\"", 1, 1);
        assert_token(&tokens[1], TokenKind::Ident, "eevee", 1, 2);
    }

    #[test]
    fn integer_dot_without_fraction() {
        let tokens = lex("42.", 4);
        assert_token(&tokens[0], TokenKind::Int, "42", 1, 1);
        assert_token(&tokens[1], TokenKind::Illegal, ".", 1, 3);
    }

    #[test]
    fn comment_consumes_rest_of_line() {
        let input = make_input(&["42 # the answer", "7"]);
        let tokens = lex(&input, 4);

        assert_token(&tokens[0], TokenKind::Int, "42", 1, 1);
        assert_token(&tokens[1], TokenKind::Eol, "", 1, 16);
        assert_token(&tokens[2], TokenKind::Int, "7", 2, 1);
    }

    #[test]
    fn empty_source_lexes_to_eof() {
        let tokens = lex("", 4);
        assert_eq!(tokens.len(), 1);
        assert_token(&tokens[0], TokenKind::Eof, "", 2, 1);
    }

    #[test]
    fn eol_for_every_nonfinal_line() {
        let input = make_input(&["1", "2", "3"]);
        let tokens = lex(&input, 4);
        let eol_lines: Vec<usize> = tokens
            .iter()
            .filter(|t| *t.kind() == TokenKind::Eol)
            .map(Token::line)
            .collect();
        // make_input appends a trailing newline, so the final (empty) line
        // is line 4 and lines 1-3 each get exactly one EOL.
        assert_eq!(eol_lines, vec![1, 2, 3]);
    }
}
