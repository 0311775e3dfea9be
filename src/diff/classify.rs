//! Line classification for patch text.
//!
//! The pattern table is ordered: the first matching entry wins, so specific
//! markers (`--- a/...`, `+++ b/...`) must precede the generic `[+-]` content
//! pattern that would otherwise shadow them.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Semantic kind of a single patch line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// `diff --git a/... b/...`
    GitDiffHeader,
    /// `index abc..def 100644`
    Index,
    /// `deleted file mode ...`
    DeletedFile,
    /// `new file mode ...`
    AddedFile,
    /// `--- a/<path>` or `--- <path>`
    OldFile,
    /// `+++ b/<path>` or `+++ <path>`
    NewFile,
    /// `@@ -old,count +new,count @@ trailer`
    HunkHeader,
    /// `similarity index NN%`
    Similarity,
    /// `rename from <path>` / `rename to <path>`
    Rename,
    /// Added or removed line.
    Content,
    /// Unchanged line (single leading space).
    Context,
    /// Zero-length line.
    Empty,
}

/// Ordered (kind, pattern) table. Order is significant.
const LINE_PATTERNS: &[(LineKind, &str)] = &[
    (LineKind::GitDiffHeader, r"^diff --git "),
    (LineKind::Index, r"^index "),
    (LineKind::DeletedFile, r"^deleted "),
    (LineKind::AddedFile, r"^new file mode "),
    (LineKind::OldFile, r"^--- (?:a/)?(.*)"),
    (LineKind::NewFile, r"^\+\+\+ (?:b/)?(.*)"),
    (
        LineKind::HunkHeader,
        r"^@@ -?([0-9]+),?([0-9]+)? \+?([0-9]+),?([0-9]+)? @@(.*)",
    ),
    (LineKind::Similarity, r"^similarity index ([0-9]+)%"),
    (LineKind::Rename, r"^rename (from|to) (.*)"),
    (LineKind::Content, r"^[+-]"),
    (LineKind::Context, r"^ "),
    (LineKind::Empty, r"^$"),
];

static COMPILED_PATTERNS: LazyLock<Vec<(LineKind, Regex)>> = LazyLock::new(|| {
    LINE_PATTERNS
        .iter()
        .map(|(kind, pattern)| (*kind, Regex::new(pattern).expect("Invalid line pattern")))
        .collect()
});

/// A classified patch line with its captured fields.
///
/// `groups` holds the pattern's capture groups in order; optional groups that
/// did not participate are stored as empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub kind: LineKind,
    pub raw: String,
    pub groups: Vec<String>,
}

impl DiffLine {
    fn from_captures(kind: LineKind, raw: &str, caps: &Captures<'_>) -> Self {
        let groups = caps
            .iter()
            .skip(1)
            .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
            .collect();

        Self {
            kind,
            raw: raw.to_string(),
            groups,
        }
    }

    /// Path captured by an `OldFile`/`NewFile` marker.
    pub fn path(&self) -> Option<&str> {
        match self.kind {
            LineKind::OldFile | LineKind::NewFile => self.groups.first().map(String::as_str),
            _ => None,
        }
    }

    /// Hunk ranges for a `HunkHeader` line.
    pub fn hunk(&self) -> Option<HunkRange> {
        if self.kind != LineKind::HunkHeader {
            return None;
        }

        let number = |idx: usize| self.groups.get(idx).and_then(|g| g.parse::<usize>().ok());

        Some(HunkRange {
            old_start: number(0)?,
            old_count: number(1),
            new_start: number(2)?,
            new_count: number(3),
        })
    }

    /// True for an added (`+`) content line.
    pub fn is_addition(&self) -> bool {
        self.kind == LineKind::Content && self.raw.starts_with('+')
    }
}

/// Parsed ranges of a hunk header. Counts are absent when the header omits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunkRange {
    pub old_start: usize,
    pub old_count: Option<usize>,
    pub new_start: usize,
    pub new_count: Option<usize>,
}

/// Classify one line of patch text.
///
/// Returns `None` when no pattern matches; callers treat that as an error to
/// log, never as a silent default.
pub fn classify_line(line: &str) -> Option<DiffLine> {
    COMPILED_PATTERNS.iter().find_map(|(kind, regex)| {
        regex
            .captures(line)
            .map(|caps| DiffLine::from_captures(*kind, line, &caps))
    })
}

/// Classify a line, returning only its kind.
pub fn line_kind(line: &str) -> Option<LineKind> {
    COMPILED_PATTERNS
        .iter()
        .find(|(_, regex)| regex.is_match(line))
        .map(|(kind, _)| *kind)
}
