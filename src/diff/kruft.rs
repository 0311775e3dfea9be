//! Structural noise removal ahead of comparison.

use crate::telemetry::Telemetry;

use super::classify::{classify_line, LineKind};

/// Largest context budget the stripper and comparator accept.
pub const MAX_CONTEXT: usize = 5;

/// Filters a patch body down to the lines that matter for comparison.
///
/// File markers and `+`/`-` content are always kept. Context lines are kept
/// only for the first `context` lines of each run. Everything else (hunk
/// headers, index lines, mode/rename/similarity markers, blank lines) is
/// dropped.
#[derive(Debug, Clone)]
pub struct KruftStripper {
    context: usize,
    log: Telemetry,
}

impl KruftStripper {
    pub fn new(context: usize, log: Telemetry) -> Self {
        Self { context, log }
    }

    pub fn strip<'a, I>(&self, lines: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut kept = Vec::new();
        let mut run = 0usize;

        for line in lines {
            let Some(classified) = classify_line(line) else {
                log::error!(target: self.log.target(), "could not classify line \"{}\"", line);
                run = 0;
                continue;
            };

            if self.log.chatty() {
                log::trace!(target: self.log.target(), "{:?} - \"{}\"", classified.kind, line);
            }

            match classified.kind {
                LineKind::Context => {
                    if run < self.context {
                        kept.push(line);
                    }
                    run += 1;
                }
                LineKind::OldFile | LineKind::NewFile | LineKind::Content => {
                    kept.push(line);
                    run = 0;
                }
                LineKind::GitDiffHeader
                | LineKind::Index
                | LineKind::DeletedFile
                | LineKind::AddedFile
                | LineKind::HunkHeader
                | LineKind::Similarity
                | LineKind::Rename
                | LineKind::Empty => {
                    run = 0;
                }
            }
        }

        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::classify::line_kind;

    const HUNK: &str = "diff --git a/a.c b/a.c
index 1111111..2222222 100644
--- a/a.c
+++ b/a.c
@@ -1,9 +1,9 @@
 one
 two
 three
 four
-foo();
+bar();
 five
 six

 seven";

    fn strip(text: &str, context: usize) -> Vec<&str> {
        KruftStripper::new(context, Telemetry::default()).strip(text.lines())
    }

    #[test]
    fn zero_context_keeps_headers_and_content_only() {
        let kept = strip(HUNK, 0);
        assert_eq!(kept, vec!["--- a/a.c", "+++ b/a.c", "-foo();", "+bar();"]);
        assert!(kept.iter().all(|l| line_kind(l) != Some(LineKind::Context)));
    }

    #[test]
    fn context_keeps_first_lines_of_each_run() {
        let kept = strip(HUNK, 2);
        assert_eq!(
            kept,
            vec![
                "--- a/a.c",
                "+++ b/a.c",
                " one",
                " two",
                "-foo();",
                "+bar();",
                " five",
                " six",
                " seven",
            ]
        );
    }

    #[test]
    fn noise_resets_the_context_run() {
        // The blank line after " six" is noise and starts a new run.
        let kept = strip(HUNK, 1);
        assert!(kept.contains(&" one"));
        assert!(!kept.contains(&" two"));
        assert!(kept.contains(&" five"));
        assert!(!kept.contains(&" six"));
        assert!(kept.contains(&" seven"));
    }

    #[test]
    fn unclassified_line_does_not_stop_the_stream() {
        let text = "--- a/a.c\n+++ b/a.c\n-x\n\\ No newline at end of file\n+y";
        assert_eq!(strip(text, 0), vec!["--- a/a.c", "+++ b/a.c", "-x", "+y"]);
    }

    #[test]
    fn unclassified_line_resets_context_run() {
        let text = " a\n b\ngarbage\n c\n d";
        assert_eq!(strip(text, 1), vec![" a", " c"]);
    }

    #[test]
    fn rename_and_similarity_markers_are_dropped() {
        let text = "diff --git a/old.c b/new.c
similarity index 90%
rename from old.c
rename to new.c
--- a/old.c
+++ b/new.c
+added";
        assert_eq!(strip(text, 3), vec!["--- a/old.c", "+++ b/new.c", "+added"]);
    }
}
