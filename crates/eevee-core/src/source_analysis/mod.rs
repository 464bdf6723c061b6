// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Parsing infrastructure for Eevee source code.
//!
//! This module contains the lexer, the parser, and the token model.
//!
//! # Lexical Analysis
//!
//! The [`lex`] function converts source text into a stream of [`Token`]s.
//! Eevee is indentation-sensitive, so the stream interleaves synthetic
//! `INDENT`/`DEDENT`/`EOL`/`EOF` tokens with the lexical ones, and token
//! columns are display columns after tab expansion.
//!
//! ```
//! use eevee_core::source_analysis::{TokenKind, lex};
//!
//! let tokens = lex("let level = 42", 4);
//! assert_eq!(*tokens[0].kind(), TokenKind::Let);
//! ```
//!
//! # Parsing
//!
//! The [`parse`] function converts tokens into a
//! [`Program`](crate::ast::Program). It never aborts: errors are collected
//! into [`ParseError`]s while panic-mode recovery re-synchronizes at line
//! ends and keeps building the tree.
//!
//! # Error Handling
//!
//! The lexer uses error recovery: invalid input becomes
//! [`TokenKind::Illegal`] tokens rather than stopping the scan. The parser
//! reports those tokens when it meets them in expression position.

mod lexer;
mod parser;
mod token;


pub use lexer::{Lexer, lex};
pub use parser::{ParseError, parse};
pub use token::{Token, TokenKind, lookup_keyword};
