// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The `eevee run` command.
//!
//! Reads a source file, lexes it with the configured tab size, parses in
//! batch mode, and prints the source, the token stream, the AST as
//! indented JSON, and finally any parse errors.
//!
//! An unreadable path is a hard error (exit code 1); parse errors are
//! reported but leave the exit code at 0, since the AST and error list are
//! the command's output.

use std::fs;

use miette::{IntoDiagnostic, Result, WrapErr};

use eevee_core::source_analysis::{ParseError, lex, parse};

use crate::config::Config;

pub(crate) fn run(path: &str) -> Result<()> {
    let config = Config::load()?;

    let source = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Invalid filepath. got={path:?}"))?;
    let source = source.trim();

    println!("{source}");

    let tokens = lex(source, config.tab_size);
    tracing::debug!(count = tokens.len(), "lexed source");
    for token in &tokens {
        println!("{token}");
    }

    let (program, errors) = parse(tokens, false);
    let json = serde_json::to_string_pretty(&program).into_diagnostic()?;
    println!("{json}");

    print_parse_errors(&errors);

    Ok(())
}

/// Prints parser errors after the AST, one per line.
pub(crate) fn print_parse_errors(errors: &[ParseError]) {
    if errors.is_empty() {
        return;
    }

    println!("parser errors:");
    for error in errors {
        println!("\t{error}");
    }
}
