// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Configuration loading for the `eevee` CLI.
//!
//! Configuration lives in an `eevee.toml` file in the working directory
//! with a single key:
//!
//! ```toml
//! tab_size = 4
//! ```
//!
//! A missing file yields the default configuration; a malformed file is an
//! error. The REPL does not consult the file at all and hard-codes its tab
//! size.

use std::fs;

use miette::{IntoDiagnostic, Result, WrapErr};
use serde::Deserialize;

/// The configuration file read from the working directory.
pub(crate) const CONFIG_FILE: &str = "eevee.toml";

/// Tab size used when no configuration file is present.
pub(crate) const DEFAULT_TAB_SIZE: usize = 4;

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct Config {
    /// Display width of a tab stop, used for column accounting.
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,
}

fn default_tab_size() -> usize {
    DEFAULT_TAB_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_size: DEFAULT_TAB_SIZE,
        }
    }
}

impl Config {
    /// Loads `eevee.toml` from the working directory.
    pub(crate) fn load() -> Result<Self> {
        match fs::read_to_string(CONFIG_FILE) {
            Ok(text) => toml::from_str(&text)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to parse {CONFIG_FILE}")),
            Err(_) => {
                tracing::debug!("{CONFIG_FILE} not found, using default configuration");
                Ok(Self::default())
            }
        }
    }
}
