// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Eevee command-line interface.
//!
//! This is the main entry point for the `eevee` command. `eevee run <path>`
//! lexes and parses a source file; bare `eevee` starts the REPL.

use clap::{Parser, Subcommand};
use miette::Result;

mod commands;
mod config;

/// Eevee: a small indentation-sensitive expression language
#[derive(Debug, Parser)]
#[command(name = "eevee")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Lex and parse a source file, printing tokens, AST, and errors
    Run {
        /// Source file to process
        path: String,
    },
}

fn main() -> Result<()> {
    // Initialize tracing subscriber only if RUST_LOG is explicitly set.
    // This keeps stderr clean for normal runs and REPL sessions.
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .try_init();
    }

    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Run { path }) => commands::run::run(&path),
        None => commands::repl::run(),
    };

    // Exit with appropriate code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("{e:?}");
            std::process::exit(1);
        }
    }
}
