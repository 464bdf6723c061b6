// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Shared helpers for tests that feed multi-line source to the lexer.
//!
//! Kept in the library (rather than duplicated per test module) so unit
//! tests, integration tests, and doctests can all build the same inputs.

/// Joins code lines into one source string, each line terminated by `\n`.
///
/// Indentation is written literally, so tests spell tabs as `\t`:
///
/// ```
/// use eevee_core::test_support::make_input;
///
/// let source = make_input(&["42", "\t\"eevee\""]);
/// assert_eq!(source, "42\n\t\"eevee\"\n");
/// ```
#[must_use]
pub fn make_input(lines: &[&str]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_lines_with_trailing_newline() {
        assert_eq!(make_input(&["a", "b"]), "a\nb\n");
        assert_eq!(make_input(&[]), "");
        assert_eq!(make_input(&[""]), "\n");
    }
}
