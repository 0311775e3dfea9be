//! Review findings and the change under review.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a review finding. One verdict holds at most one message per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewType {
    FixesRef,
    MissingFields,
    MissingHash,
    MissingAm,
    InvalidHash,
    IncorrectPrefix,
    AlteredUpstream,
    Backport,
    Success,
    ClearVotes,
    KconfigChange,
    InMainline,
    UpstreamComments,
    NotInMainline,
}

impl ReviewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewType::FixesRef => "fixes_ref",
            ReviewType::MissingFields => "missing_fields",
            ReviewType::MissingHash => "missing_hash",
            ReviewType::MissingAm => "missing_am",
            ReviewType::InvalidHash => "invalid_hash",
            ReviewType::IncorrectPrefix => "incorrect_prefix",
            ReviewType::AlteredUpstream => "altered_upstream",
            ReviewType::Backport => "backport",
            ReviewType::Success => "success",
            ReviewType::ClearVotes => "clear_votes",
            ReviewType::KconfigChange => "kconfig_change",
            ReviewType::InMainline => "in_mainline",
            ReviewType::UpstreamComments => "upstream_comments",
            ReviewType::NotInMainline => "not_in_mainline",
        }
    }
}

impl fmt::Display for ReviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observation about a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub kind: ReviewType,
    pub message: String,
    /// -1, 0 or +1.
    pub vote: i8,
    /// Whether the change owner should be emailed.
    pub notify: bool,
}

impl Finding {
    /// Feedback finding: no vote, no notification.
    pub fn new(kind: ReviewType, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            vote: 0,
            notify: false,
        }
    }

    /// Set the vote; values outside -1..=1 are clamped to their sign.
    pub fn with_vote(mut self, vote: i8) -> Self {
        self.vote = vote.signum();
        self
    }

    pub fn notifying(mut self) -> Self {
        self.notify = true;
        self
    }
}

/// A change as reported by the review system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    pub number: u64,
    pub revision: u32,
    pub subject: String,
    /// Commit message of the current revision. When absent, the message part
    /// of the fetched candidate patch is used.
    pub commit_message: Option<String>,
    pub uploader_name: String,
    pub uploader_email: String,
    /// Review-system ref of the current revision, e.g. `refs/changes/34/1234/2`.
    pub revision_ref: String,
}

impl Change {
    /// BACKPORT changes are expected to differ from their source.
    pub fn is_backport(&self) -> bool {
        self.subject.contains("BACKPORT")
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "change {} (revision {})", self.number, self.revision)
    }
}
