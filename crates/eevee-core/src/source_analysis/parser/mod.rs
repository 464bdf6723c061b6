// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent parser for Eevee token streams.
//!
//! The parser builds a [`Program`] from the lexer's output. It is designed
//! around error recovery rather than fail-fast parsing.
//!
//! # Design Philosophy
//!
//! - **Error recovery is mandatory** — the parser always produces an AST
//! - **Multiple errors** — all errors are collected, not just the first
//! - **Panic mode** — after one error, further reports are suppressed until
//!   the next token is consumed, preventing cascades from a single bad token
//! - **Synchronization points** — recovery happens at `EOL`/`EOF` boundaries
//!
//! # Precedence
//!
//! Expressions are parsed with a precedence ladder, lowest to highest:
//!
//! | Level | Operators | Associativity |
//! |-------|-----------|---------------|
//! | assignment | `=` `+=` `-=` `*=` `/=` `%=` | Right |
//! | logical or | `\|\|` | Left |
//! | logical and | `&&` | Left |
//! | equality | `==` `!=` | Left |
//! | relational | `<` `<=` `>` `>=` | Left |
//! | additive | `+` `-` | Left |
//! | multiplicative | `*` `/` `%` | Left |
//! | unary | `+` `-` `!` | Prefix |
//!
//! The keyword aliases `is`/`not`/`and`/`or` are normalized to their
//! symbolic spellings when a node is built.
//!
//! # Usage
//!
//! ```
//! use eevee_core::source_analysis::{lex, parse};
//!
//! let tokens = lex("2 * 2 + 2", 4);
//! let (program, errors) = parse(tokens, false);
//!
//! assert!(errors.is_empty());
//! assert_eq!(program.statements.len(), 1);
//! ```

use ecow::EcoString;
use thiserror::Error;

use crate::ast::Program;
use crate::source_analysis::{Token, TokenKind};

// Submodules with additional impl blocks for Parser
mod expressions;
mod statements;

/// A parse error with its 1-based source position.
///
/// The parser never aborts; it accumulates these and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{line}:{column}] {message}")]
pub struct ParseError {
    /// 1-based source line.
    pub line: usize,
    /// 1-based display column.
    pub column: usize,
    /// Human-readable description of what went wrong.
    pub message: EcoString,
}

/// Parses a token stream into a program.
///
/// This is the main entry point for parsing. It always returns a
/// [`Program`], even when the input is malformed; check the returned error
/// list. An empty token stream yields an empty program without error.
///
/// `repl_mode` enables the interactive shortcut: a bare trailing literal or
/// identifier parses as a primary expression instead of entering the full
/// assignment ladder, and synchronization does not demand a final `EOL`.
///
/// # Examples
///
/// ```
/// use eevee_core::source_analysis::{lex, parse};
///
/// let tokens = lex("let level = 42", 4);
/// let (program, errors) = parse(tokens, false);
///
/// assert!(errors.is_empty());
/// assert_eq!(
///     program.to_string(),
///     "(Program (VariableStatement (VariableDeclaration (Identifier level) (IntegerLiteral 42))))",
/// );
/// ```
#[must_use]
pub fn parse(tokens: Vec<Token>, repl_mode: bool) -> (Program, Vec<ParseError>) {
    if tokens.is_empty() {
        return (Program::default(), Vec::new());
    }

    let mut parser = Parser::new(tokens, repl_mode);
    let program = parser.parse_program();
    (program, parser.errors)
}

/// The parser state.
pub(super) struct Parser {
    /// The tokens being parsed.
    tokens: Vec<Token>,
    /// Current token index.
    current: usize,
    /// Accumulated errors.
    errors: Vec<ParseError>,
    /// Whether the parser is recovering from an error. While set, further
    /// error reports are suppressed; any forward move clears it.
    panicking: bool,
    /// Whether the interactive shortcut is enabled.
    repl_mode: bool,
}

impl Parser {
    /// Creates a new parser for the given tokens.
    fn new(tokens: Vec<Token>, repl_mode: bool) -> Self {
        Self {
            tokens,
            current: 0,
            errors: Vec::new(),
            panicking: false,
            repl_mode,
        }
    }

    fn parse_program(&mut self) -> Program {
        Program::new(self.parse_statements(&TokenKind::Eof))
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Returns the current token.
    pub(super) fn current_token(&self) -> &Token {
        self.tokens.get(self.current).unwrap_or_else(|| {
            // Past the end of the stream, fall back to the last token (EOF
            // in well-formed input) rather than panicking.
            self.tokens
                .last()
                .expect("Parser has no tokens; expected at least an EOF token")
        })
    }

    /// Returns the current token kind.
    pub(super) fn current_kind(&self) -> &TokenKind {
        self.current_token().kind()
    }

    /// Peeks at the next token kind without consuming.
    pub(super) fn peek_kind(&self) -> Option<&TokenKind> {
        self.tokens.get(self.current + 1).map(Token::kind)
    }

    /// Checks if we're at the end of input.
    pub(super) fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len() || self.current_kind().is_eof()
    }

    /// Consumes the current token and returns it.
    ///
    /// Moving forward ends panic mode: the parser has found new ground to
    /// report errors from.
    pub(super) fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        self.panicking = false;
        token
    }

    /// Checks if the current token matches the given kind.
    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Consumes the current token if it matches the given kind.
    pub(super) fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects the current token to match the given kind and consumes it.
    ///
    /// On a mismatch, reports an error and returns a synthetic
    /// [`TokenKind::Illegal`] token at the current position without
    /// consuming anything, so the offending token is still available as a
    /// synchronization anchor.
    pub(super) fn eat(&mut self, kind: &TokenKind) -> Token {
        if self.check(kind) {
            return self.advance();
        }

        let message = format!("Expected \"{kind}\", but got \"{}\"", self.current_kind());
        self.error(message);

        let token = self.current_token();
        Token::new(TokenKind::Illegal, "", token.line(), token.column())
    }

    // ========================================================================
    // Error Handling & Recovery
    // ========================================================================

    /// Reports an error at the current token and enters panic mode.
    ///
    /// While panicking, reports are suppressed so one bad token does not
    /// cascade into a wall of errors.
    pub(super) fn error(&mut self, message: impl Into<EcoString>) {
        if self.panicking {
            return;
        }
        self.panicking = true;

        let (line, column) = {
            let token = self.current_token();
            (token.line(), token.column())
        };
        self.errors.push(ParseError {
            line,
            column,
            message: message.into(),
        });
    }

    /// Synchronizes the parser to the next statement boundary.
    ///
    /// Advances until `EOL` or `EOF`. In batch mode a statement must end in
    /// `EOL`, so hitting `EOF` here eats the missing `EOL`, which may record
    /// one more error.
    pub(super) fn synchronize(&mut self) {
        while !self.is_at_end() && !self.check(&TokenKind::Eol) {
            self.advance();
        }

        if !self.repl_mode && self.is_at_end() {
            self.eat(&TokenKind::Eol);
        }
    }
}
