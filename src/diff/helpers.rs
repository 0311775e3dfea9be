//! Helper functions for patch comparison.

/// Marker that starts the diff portion of a patch.
const DIFF_MARKER: &str = "diff --git ";

/// Room left in a review message for boilerplate around the diff.
const MESSAGE_OVERHEAD: usize = 4096;

const TRUNCATION_NOTICE: &str = "\n\n  !!!! Diff truncated !!!!";

/// Drop the commit message, keeping lines from the first `diff --git ` on.
///
/// A patch with no diff marker yields an empty sequence.
pub(super) fn strip_commit_message(patch: &str) -> Vec<&str> {
    let lines: Vec<&str> = patch.lines().collect();
    match lines.iter().position(|l| l.starts_with(DIFF_MARKER)) {
        Some(start) => lines[start..].to_vec(),
        None => Vec::new(),
    }
}

/// Render a delta for inclusion in a review message.
///
/// Each line is indented by four spaces so it is shown as code. The result is
/// capped at `msg_limit` minus the boilerplate overhead, counted in characters.
pub fn format_diff(diff: &[String], msg_limit: usize) -> String {
    let max_size = msg_limit.saturating_sub(MESSAGE_OVERHEAD);

    let mut msg = String::new();
    for line in diff {
        msg.push_str("    ");
        msg.push_str(line);
        msg.push('\n');
    }

    if msg.chars().count() > max_size {
        let keep = max_size.saturating_sub(TRUNCATION_NOTICE.chars().count());
        msg = msg.chars().take(keep).collect();
        msg.push_str(TRUNCATION_NOTICE);
    }

    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_message_up_to_first_diff() {
        let patch = "Subject line\n\nBody text\n\ndiff --git a/a b/a\n--- a/a\n+++ b/a";
        assert_eq!(
            strip_commit_message(patch),
            vec!["diff --git a/a b/a", "--- a/a", "+++ b/a"]
        );
    }

    #[test]
    fn patch_without_marker_is_empty() {
        assert!(strip_commit_message("just a message\n--- a/a\n+x").is_empty());
        assert!(strip_commit_message("").is_empty());
    }

    #[test]
    fn format_indents_lines() {
        let diff = vec!["--- a/a.c".to_string(), "- +bar();".to_string()];
        assert_eq!(format_diff(&diff, 16384), "    --- a/a.c\n    - +bar();\n");
    }

    #[test]
    fn format_truncates_to_limit() {
        let diff: Vec<String> = (0..500).map(|i| format!("+ +line {}", i)).collect();
        let msg = format_diff(&diff, 4096 + 200);
        assert_eq!(msg.chars().count(), 200);
        assert!(msg.ends_with("!!!! Diff truncated !!!!"));
    }
}
