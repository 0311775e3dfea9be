//! Token-set similarity used to thread replies onto resolved comments.

use similar::TextDiff;
use std::collections::BTreeSet;

/// Lowest token-set score at which two comments count as the same thread.
pub const MIN_THREAD_SIMILARITY: u8 = 90;

fn tokens(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn sequence_ratio(a: &str, b: &str) -> f32 {
    TextDiff::from_chars(a, b).ratio()
}

fn join_tokens<'a>(head: &str, tail: impl Iterator<Item = &'a String>) -> String {
    let tail: Vec<&str> = tail.map(String::as_str).collect();
    match (head.is_empty(), tail.is_empty()) {
        (_, true) => head.to_string(),
        (true, false) => tail.join(" "),
        (false, false) => format!("{} {}", head, tail.join(" ")),
    }
}

/// Case-insensitive token-set similarity, 0..=100.
///
/// Both inputs are reduced to sorted sets of word tokens. The shared tokens
/// are compared against each side's full token string and the two full
/// strings against each other; the best sequence ratio wins. Token order and
/// repetition do not matter, and one side being a superset of the other
/// scores 100.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let left = tokens(a);
    let right = tokens(b);
    if left.is_empty() || right.is_empty() {
        return 0;
    }

    let shared = join_tokens("", left.intersection(&right));
    let left_full = join_tokens(&shared, left.difference(&right));
    let right_full = join_tokens(&shared, right.difference(&left));

    let best = [
        sequence_ratio(&shared, &left_full),
        sequence_ratio(&shared, &right_full),
        sequence_ratio(&left_full, &right_full),
    ]
    .into_iter()
    .fold(0.0f32, f32::max);

    (best * 100.0).round().clamp(0.0, 100.0) as u8
}
