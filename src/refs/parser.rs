//! Footer grammars in commit messages.

use regex::Regex;
use std::sync::LazyLock;

use super::commit_ref::CommitRef;

/// `(cherry picked from commit <sha> [<filler> <scheme>://<remote> [<branch>|tag <tag>]])`
///
/// Case-insensitive and newline tolerant. The filler between the sha and the
/// remote is non-greedy and may not cross a closing paren, so it never runs
/// into the patch body looking for a URL.
static CHERRY_PICK_FOOTER: LazyLock<Regex> = LazyLock::new(|| {
    let non_ws = r"[^)^\s]";
    let pattern = format!(
        concat!(
            r"(?is)\(\s*",
            r"cherry.picked from commit\s*",
            r"([0-9a-f]*)",
            r"(",
            r"[^)]*?",
            r"([a-z]*://{nws}*)",
            r"\s*",
            r"({nws}*)?",
            r"\s*",
            r"({nws}*)?",
            r")?",
            r"\s*\)",
        ),
        nws = non_ws
    );
    Regex::new(&pattern).expect("Invalid cherry-pick footer regex")
});

static LINK_FOOTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*Link:\s+(\S+)").expect("Invalid Link footer regex"));

static AM_FROM_FOOTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(am from (http.*)\)").expect("Invalid am-from regex"));

/// Extract every cherry-pick footer, in document order.
///
/// Branch and tag are left unset when the footer omits them; defaulting is
/// the caller's policy.
pub fn parse_commit_refs(text: &str) -> Vec<CommitRef> {
    CHERRY_PICK_FOOTER
        .captures_iter(text)
        .map(|caps| {
            let group = |idx: usize| {
                caps.get(idx)
                    .map(|m| m.as_str())
                    .filter(|s| !s.is_empty())
            };

            let mut commit = CommitRef::new(group(1).unwrap_or_default());
            if let Some(remote) = group(3) {
                commit.set_remote(remote);
            }

            match (group(4), group(5)) {
                (Some(scope), Some(tag)) if scope.eq_ignore_ascii_case("tag") => {
                    commit.with_tag(tag)
                }
                (Some(branch), _) => commit.with_branch(branch),
                (None, _) => commit,
            }
        })
        .collect()
}

/// The most recently applied footer (the last one in the message).
pub fn last_commit_ref(text: &str) -> Option<CommitRef> {
    parse_commit_refs(text).pop()
}

/// Extract every `Link: <url>` footer, in document order.
pub fn links_from_patch(text: &str) -> Vec<String> {
    LINK_FOOTER
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Extract every `(am from <url>)` provenance footer, in document order.
pub fn am_from_urls(text: &str) -> Vec<String> {
    AM_FROM_FOOTER
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}
