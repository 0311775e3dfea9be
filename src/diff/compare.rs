//! Canonical delta between an upstream patch and a candidate backport.

use crate::error::{AuditError, Result};
use crate::telemetry::Telemetry;
use similar::{Algorithm, ChangeTag, TextDiff};

use super::classify::{line_kind, LineKind};
use super::helpers::strip_commit_message;
use super::kruft::{KruftStripper, MAX_CONTEXT};

/// Compares two full patch texts (commit message plus diff).
#[derive(Debug, Clone, Default)]
pub struct DiffComparator {
    log: Telemetry,
}

impl DiffComparator {
    pub fn new(log: Telemetry) -> Self {
        Self { log }
    }

    /// Compute the display delta between `upstream` and `candidate`.
    ///
    /// Lines only in the upstream patch are prefixed `"- "`, lines only in the
    /// candidate `"+ "`. The file header pair for a file is printed once,
    /// right before the first difference in that file. An empty result means
    /// the patches are equivalent at the given context.
    ///
    /// # Errors
    ///
    /// * `AuditError::InvalidContext` - `context` exceeds [`MAX_CONTEXT`]
    pub fn compare(&self, upstream: &str, candidate: &str, context: usize) -> Result<Vec<String>> {
        if context > MAX_CONTEXT {
            return Err(AuditError::InvalidContext {
                given: context,
                max: MAX_CONTEXT,
            });
        }

        let stripper = KruftStripper::new(context, self.log.clone());
        let left = stripper.strip(strip_commit_message(upstream));
        let right = stripper.strip(strip_commit_message(candidate));

        let diff = TextDiff::configure()
            .algorithm(Algorithm::Myers)
            .diff_slices(left.as_slice(), right.as_slice());

        let mut out = Vec::new();
        let mut headers = FileHeaders::default();

        for change in diff.iter_all_changes() {
            let line = change.value();
            let tag = change.tag();
            let (side, idx) = match change.old_index() {
                Some(idx) => (left.as_slice(), idx),
                None => (right.as_slice(), change.new_index().unwrap_or_default()),
            };

            match marker_kind(side, idx) {
                Some(LineKind::OldFile) => {
                    // old always precedes new; wait for the new marker
                    let pending = headers.open && headers.old_differs;
                    headers.old = Some(line);
                    headers.old_differs = pending || tag != ChangeTag::Equal;
                    headers.open = true;
                    continue;
                }
                Some(LineKind::NewFile) => {
                    headers.new = Some(line);
                    headers.printed = false;
                    if tag != ChangeTag::Equal || headers.old_differs {
                        headers.emit(&mut out);
                    }
                    headers.old_differs = false;
                    headers.open = false;
                    continue;
                }
                _ => {}
            }

            let sign = match tag {
                ChangeTag::Equal => continue,
                ChangeTag::Delete => '-',
                ChangeTag::Insert => '+',
            };

            headers.emit(&mut out);
            out.push(format!("{} {}", sign, line));
        }

        // An old-file marker that differed but was never followed by a new one.
        if headers.old_differs {
            headers.emit(&mut out);
        }

        log::debug!(
            target: self.log.target(),
            "compared {} upstream lines against {} candidate lines at context {}: {} delta lines",
            left.len(),
            right.len(),
            context,
            out.len()
        );

        Ok(out)
    }
}

/// File marker role of `lines[idx]` within its own stripped sequence.
///
/// A `---`/`+++` pair only counts as markers when adjacent; a lone line of
/// either shape is content whose text happens to start with `--` or `++`.
fn marker_kind(lines: &[&str], idx: usize) -> Option<LineKind> {
    let kind_at = |i: usize| lines.get(i).and_then(|l| line_kind(l));
    match kind_at(idx) {
        Some(LineKind::OldFile) if kind_at(idx + 1) == Some(LineKind::NewFile) => {
            Some(LineKind::OldFile)
        }
        Some(LineKind::NewFile)
            if idx > 0 && kind_at(idx - 1) == Some(LineKind::OldFile) =>
        {
            Some(LineKind::NewFile)
        }
        _ => None,
    }
}

/// Buffered file marker pair for the file currently being compared.
#[derive(Debug, Default)]
struct FileHeaders<'a> {
    old: Option<&'a str>,
    new: Option<&'a str>,
    old_differs: bool,
    /// An old marker was seen and its new marker has not arrived yet.
    open: bool,
    printed: bool,
}

impl FileHeaders<'_> {
    fn emit(&mut self, out: &mut Vec<String>) {
        if self.printed {
            return;
        }
        out.extend(self.old.iter().map(|l| l.to_string()));
        out.extend(self.new.iter().map(|l| l.to_string()));
        self.printed = true;
    }
}

/// Compare two patches with a default telemetry handle.
///
/// See [`DiffComparator::compare`].
pub fn compare_diffs(upstream: &str, candidate: &str, context: usize) -> Result<Vec<String>> {
    DiffComparator::default().compare(upstream, candidate, context)
}
