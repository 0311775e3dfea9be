//! Aggregated review outcome for one change.

use serde::Serialize;
use std::collections::BTreeMap;

use super::strings;
use super::types::{Finding, ReviewType};

/// Inline comment as posted to the review system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineNote {
    pub line: usize,
    pub message: String,
}

/// Payload accepted by the review system's "set review" endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewInput {
    pub message: String,
    pub labels: BTreeMap<String, i8>,
    pub notify: &'static str,
    pub comments: BTreeMap<String, Vec<InlineNote>>,
}

/// Findings merged into a single vote and message bundle.
///
/// Issues (negative findings) and feedback keep the order in which their
/// kinds were first added; adding a kind again replaces its message in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verdict {
    vote: i8,
    notify: bool,
    issues: Vec<(ReviewType, String)>,
    feedback: Vec<(ReviewType, String)>,
    inline_comments: BTreeMap<String, Vec<InlineNote>>,
    web_link: Option<String>,
}

fn upsert(entries: &mut Vec<(ReviewType, String)>, kind: ReviewType, message: String) {
    match entries.iter_mut().find(|(k, _)| *k == kind) {
        Some(entry) => entry.1 = message,
        None => entries.push((kind, message)),
    }
}

impl Verdict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a finding.
    ///
    /// Any negative vote pins the aggregate to the lowest vote seen; otherwise
    /// the highest positive vote wins. Zero votes leave the aggregate alone.
    pub fn add_finding(&mut self, finding: Finding) {
        let Finding {
            kind,
            message,
            vote,
            notify,
        } = finding;

        if vote < 0 || self.vote < 0 {
            self.vote = self.vote.min(vote);
        } else if vote > 0 || self.vote > 0 {
            self.vote = self.vote.max(vote);
        }

        if vote < 0 {
            upsert(&mut self.issues, kind, message);
        } else {
            upsert(&mut self.feedback, kind, message);
        }

        self.notify |= notify;
    }

    pub fn add_inline_comment(
        &mut self,
        file: impl Into<String>,
        line: usize,
        message: impl Into<String>,
    ) {
        self.inline_comments.entry(file.into()).or_default().push(InlineNote {
            line,
            message: message.into(),
        });
    }

    pub fn set_web_link(&mut self, link: impl Into<String>) {
        self.web_link = Some(link.into());
    }

    pub fn vote(&self) -> i8 {
        self.vote
    }

    pub fn notify(&self) -> bool {
        self.notify
    }

    pub fn issues(&self) -> &[(ReviewType, String)] {
        &self.issues
    }

    pub fn feedback(&self) -> &[(ReviewType, String)] {
        &self.feedback
    }

    pub fn inline_comments(&self) -> &BTreeMap<String, Vec<InlineNote>> {
        &self.inline_comments
    }

    pub fn web_link(&self) -> Option<&str> {
        self.web_link.as_deref()
    }

    /// True when nothing was found worth posting.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty() && self.feedback.is_empty()
    }

    pub fn has_finding(&self, kind: ReviewType) -> bool {
        self.issues
            .iter()
            .chain(self.feedback.iter())
            .any(|(k, _)| *k == kind)
    }

    fn render_issues(&self) -> String {
        let mut msg = String::new();
        match self.issues.len() {
            0 => return msg,
            1 => msg.push_str(strings::FOUND_ISSUES_HEADER_SINGLE),
            _ => msg.push_str(strings::FOUND_ISSUES_HEADER_MULTIPLE),
        }

        let numbered = self.issues.len() > 1;
        for (idx, (_, issue)) in self.issues.iter().enumerate() {
            if numbered {
                msg.push_str(&strings::issue_separator(idx + 1));
            }
            msg.push_str(issue);
        }
        msg
    }

    fn render_feedback(&self, swag_seed: u64) -> String {
        if self.feedback.is_empty() {
            return String::new();
        }

        let mut msg = if !self.issues.is_empty() {
            strings::FEEDBACK_AFTER_ISSUES.to_string()
        } else if self.vote > 0 {
            strings::positive_vote(strings::swag_word(swag_seed))
        } else {
            String::new()
        };

        let numbered = self.feedback.len() > 1;
        for (idx, (_, feedback)) in self.feedback.iter().enumerate() {
            if numbered {
                msg.push_str(&strings::feedback_separator(idx + 1));
            }
            msg.push_str(feedback);
        }
        msg
    }

    /// Render the review message.
    pub fn render(&self, swag_seed: u64) -> String {
        let mut msg = strings::HEADER.to_string();
        msg.push_str(&self.render_issues());
        if !self.issues.is_empty() && !self.feedback.is_empty() {
            msg.push_str(strings::REVIEW_SEPARATOR);
        }
        msg.push_str(&self.render_feedback(swag_seed));
        msg.push_str(strings::REVIEW_SEPARATOR);
        if let Some(link) = &self.web_link {
            msg.push_str(&strings::web_link(link));
        }
        msg.push_str(strings::FOOTER);
        msg
    }

    /// Build the payload posted to the review system.
    pub fn to_review_input(&self, swag_seed: u64) -> ReviewInput {
        let mut labels = BTreeMap::new();
        labels.insert("Code-Review".to_string(), self.vote);

        ReviewInput {
            message: self.render(swag_seed),
            labels,
            notify: if self.notify { "OWNER" } else { "NONE" },
            comments: self.inline_comments.clone(),
        }
    }
}
