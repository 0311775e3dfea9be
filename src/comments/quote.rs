//! Splits a plain-text mail reply into inline comments.

use regex::Regex;
use std::sync::LazyLock;

use super::types::InlineComment;

static QUOTED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^>[\s>]*(.*)").expect("Invalid quoted line regex"));

/// Parse a reply body into inline comments.
///
/// Quoted lines (`> ...`, any nesting) become context, other non-blank lines
/// become the reply. A quoted line after a reply starts the next comment.
/// Replies without any quoted context (top-posts) are dropped.
pub fn parse_inline_comments(content: &str) -> Vec<InlineComment> {
    let mut comments = Vec::new();
    let mut current = InlineComment::new();

    for line in content.split('\n') {
        let quoted = QUOTED_LINE
            .captures(line)
            .map(|caps| caps.get(1).map_or("", |m| m.as_str()));

        if line.is_empty() || quoted == Some("") {
            continue;
        }

        if quoted.is_some() && current.has_body() {
            if current.has_context() {
                comments.push(current);
            }
            current = InlineComment::new();
        }

        match quoted {
            Some(text) => current.push_context(text),
            None if !line.trim().is_empty() => current.push_body(line),
            None => {}
        }
    }

    if current.has_context() && current.has_body() {
        comments.push(current);
    }

    comments
}
