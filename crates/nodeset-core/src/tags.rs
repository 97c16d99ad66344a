//! Tag list syntax: `a, b,c`.

use std::sync::LazyLock;

use regex::Regex;

static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    // ASCII `\s`: space, tab, newline, vertical tab, form feed, carriage return
    Regex::new(r",(?-u:\s)*").expect("BUG: invalid tag separator regex literal")
});

/// Split a tag list on a comma followed by any run of whitespace.
///
/// Tokens are not trimmed otherwise, so leading whitespace on the first
/// token and trailing whitespace before a comma survive. When at least one
/// separator is present, empty tokens at the end of the list are dropped; a
/// list without separators is returned as its single token, even if empty.
pub fn split_tags(list: &str) -> Vec<String> {
    let mut tokens: Vec<String> = SEPARATOR.split(list).map(str::to_string).collect();
    if tokens.len() > 1 {
        while tokens.last().is_some_and(|token| token.is_empty()) {
            tokens.pop();
        }
    }
    tokens
}
