//! Places archive comments on lines of the rendered backport.

use crate::diff::{classify_line, LineKind};
use crate::telemetry::Telemetry;

use super::similarity::{token_set_ratio, MIN_THREAD_SIMILARITY};
use super::types::InlineComment;

/// Pseudo-file the review system uses for the commit message.
pub const COMMIT_MSG: &str = "/COMMIT_MSG";

/// Header lines the review system prepends to the commit message pseudo-file.
pub const COMMIT_MSG_HEADER_LINES: usize = 6;

fn strip_margin(line: &str) -> &str {
    line.trim_matches(|c| matches!(c, '+' | '-' | ' ' | '\t'))
}

/// Maps quoted context of each comment onto a file and line of the candidate
/// patch, then threads remaining replies onto comments they quote.
#[derive(Debug, Clone, Default)]
pub struct CommentPositionResolver {
    log: Telemetry,
}

impl CommentPositionResolver {
    pub fn new(log: Telemetry) -> Self {
        Self { log }
    }

    /// Resolve as many comments as possible.
    ///
    /// `patch_lines` is the candidate patch as shown by the review system:
    /// commit message first, then the diff. Comments that stay unresolved keep
    /// `file`/`line` unset (or on `/dev/null`) and must not be posted.
    pub fn resolve(&self, patch_lines: &[&str], comments: &mut [InlineComment]) {
        for comment in comments.iter_mut() {
            if let Some((file, line)) = self.locate(patch_lines, comment) {
                comment.set_position(file, line);
            }
        }

        // Pass one results are ground truth for threading.
        for idx in 0..comments.len() {
            if comments[idx].is_resolved() {
                continue;
            }

            let probe = comments[idx].joined_context();
            let parent = comments
                .iter()
                .enumerate()
                .filter(|(other, c)| *other != idx && c.is_resolved())
                .find(|(_, c)| {
                    token_set_ratio(&probe, &c.joined_body()) >= MIN_THREAD_SIMILARITY
                        || token_set_ratio(&probe, &c.joined_context()) >= MIN_THREAD_SIMILARITY
                })
                .and_then(|(other, c)| Some((other, c.file()?.to_string(), c.line()?)));

            if let Some((other, file, line)) = parent {
                log::debug!(
                    target: self.log.target(),
                    "threaded comment {} onto comment {} at {}:{}",
                    idx,
                    other,
                    file,
                    line
                );
                comments[idx].set_position(file, line);
            }
        }

        let unresolved = comments.iter().filter(|c| !c.is_resolved()).count();
        if unresolved > 0 {
            log::debug!(
                target: self.log.target(),
                "{} of {} comments could not be placed",
                unresolved,
                comments.len()
            );
        }
    }

    /// Exact pass for one comment.
    ///
    /// Walks the patch tracking the current file and new-side line number.
    /// Each patch line is compared with the comment's next unmatched context
    /// line; the first non-empty match records the position, and the walk
    /// stops once every context line has been seen.
    fn locate(&self, patch_lines: &[&str], comment: &InlineComment) -> Option<(String, usize)> {
        let wanted: Vec<&str> = comment.context().iter().map(|l| strip_margin(l)).collect();
        if wanted.is_empty() {
            return None;
        }

        let mut file = COMMIT_MSG.to_string();
        let mut line = COMMIT_MSG_HEADER_LINES;
        let mut matched = 0;
        let mut position = None;

        for raw in patch_lines {
            let classified = classify_line(raw);

            match classified.as_ref() {
                Some(c) if c.kind == LineKind::NewFile => {
                    // `/dev/null` is kept so comments on deleted files stay unresolved.
                    file = c.path().unwrap_or_default().to_string();
                    line = 0;
                }
                Some(c) if c.kind == LineKind::HunkHeader => {
                    if let Some(hunk) = c.hunk() {
                        line = hunk.new_start.saturating_sub(1);
                    }
                }
                Some(c) if c.kind == LineKind::Context || c.is_addition() => line += 1,
                _ if file == COMMIT_MSG => line += 1,
                _ => {}
            }

            if self.log.chatty() {
                log::trace!(target: self.log.target(), "{}:{} {:?}", file, line, raw);
            }

            if strip_margin(raw) == wanted[matched] {
                if position.is_none() && !wanted[matched].is_empty() {
                    position = Some((file.clone(), line));
                }
                matched += 1;
                if matched == wanted.len() {
                    break;
                }
            }
        }

        position
    }
}

/// Resolve comment positions against a full candidate patch text.
pub fn resolve_comment_positions(patch: &str, comments: &mut [InlineComment]) {
    let lines: Vec<&str> = patch.split('\n').collect();
    CommentPositionResolver::default().resolve(&lines, comments);
}
