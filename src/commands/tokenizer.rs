//! Line tokenization for dispatch and completion.
//!
//! Lines are split on single spaces, with no quoting:
//! - Interior empty tokens are kept (`"a  b"` → `["a", "", "b"]`)
//! - Trailing empty tokens are dropped (`"a b "` → `["a", "b"]`)
//! - The empty line is a single empty token

/// Splits an input line into tokens.
///
/// Consecutive spaces produce empty tokens, which take part in argument
/// counting like any other token.
pub fn split_line(line: &str) -> Vec<&str> {
    if line.is_empty() {
        return vec![""];
    }

    let mut tokens: Vec<&str> = line.split(' ').collect();
    while tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }
    tokens
}

/// Splits a partially typed line for completion.
///
/// Same as [`split_line`], plus an empty trailing token when the line ends
/// with a space, marking that a new token has been started. Never empty.
pub fn completion_tokens(line: &str) -> Vec<&str> {
    let mut tokens = split_line(line);
    if line.ends_with(' ') || tokens.is_empty() {
        tokens.push("");
    }
    tokens
}
