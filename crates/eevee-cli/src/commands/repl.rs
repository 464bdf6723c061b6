// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The Eevee REPL.
//!
//! A read-print loop over the front-end: each line is lexed and parsed in
//! REPL mode, then the token stream, any parse errors, and the AST as JSON
//! are printed. Unlike batch `run` output, errors come before the JSON so
//! they sit next to the input that caused them. There is no evaluation
//! yet; the REPL is a front-end inspector.
//!
//! Uses rustyline for line editing and in-memory history. The tab size is
//! hard-coded to 4; interactive input is not worth a config file read per
//! line.

use miette::{IntoDiagnostic, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use eevee_core::source_analysis::{lex, parse};

use super::run::print_parse_errors;

const PROMPT: &str = "> ";

/// Tab size for interactive input.
const REPL_TAB_SIZE: usize = 4;

pub(crate) fn run() -> Result<()> {
    println!("Eevee REPL {}", env!("CARGO_PKG_VERSION"));

    let mut editor = DefaultEditor::new().into_diagnostic()?;

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());
                print_line(&line)?;
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e).into_diagnostic(),
        }
    }

    Ok(())
}

/// Lexes and parses one line of input, printing tokens, errors, and AST.
fn print_line(line: &str) -> Result<()> {
    let tokens = lex(line, REPL_TAB_SIZE);
    for token in &tokens {
        println!("{token}");
    }

    let (program, errors) = parse(tokens, true);
    print_parse_errors(&errors);

    let json = serde_json::to_string_pretty(&program).into_diagnostic()?;
    println!("{json}");

    Ok(())
}
