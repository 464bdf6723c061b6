// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! CLI command implementations.

pub(crate) mod repl;
pub(crate) mod run;
