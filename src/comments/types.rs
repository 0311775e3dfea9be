//! Comment data carried from a patch archive onto a review.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::quote::parse_inline_comments;

/// How many quoted lines are kept as a comment's context.
pub const MAX_CONTEXT_LINES: usize = 3;

/// Target file that cannot carry a review comment.
pub const DEV_NULL: &str = "/dev/null";

/// One reply to a quoted block of a patch.
///
/// `context` holds the last quoted lines before the reply (at most
/// [`MAX_CONTEXT_LINES`]). `file`/`line` are filled in by the position
/// resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InlineComment {
    context: VecDeque<String>,
    body: Vec<String>,
    file: Option<String>,
    line: Option<usize>,
}

impl InlineComment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a comment from quoted context and reply lines.
    pub fn from_parts<C, B>(context: C, body: B) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        B: IntoIterator,
        B::Item: Into<String>,
    {
        let mut comment = Self::new();
        for line in context {
            comment.push_context(line);
        }
        for line in body {
            comment.push_body(line);
        }
        comment
    }

    /// Append a quoted line, evicting the oldest beyond the ring size.
    pub fn push_context(&mut self, line: impl Into<String>) {
        if self.context.len() == MAX_CONTEXT_LINES {
            self.context.pop_front();
        }
        self.context.push_back(line.into());
    }

    pub fn push_body(&mut self, line: impl Into<String>) {
        self.body.push(line.into());
    }

    pub fn context(&self) -> &VecDeque<String> {
        &self.context
    }

    pub fn body(&self) -> &[String] {
        &self.body
    }

    pub fn has_context(&self) -> bool {
        !self.context.is_empty()
    }

    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// True when the comment points at a real file and line.
    pub fn is_resolved(&self) -> bool {
        self.line.is_some() && self.file.as_deref().is_some_and(|f| !f.is_empty() && f != DEV_NULL)
    }

    pub(super) fn set_position(&mut self, file: impl Into<String>, line: usize) {
        self.file = Some(file.into());
        self.line = Some(line);
    }

    pub(super) fn joined_context(&self) -> String {
        join_lower(self.context.iter())
    }

    pub(super) fn joined_body(&self) -> String {
        join_lower(self.body.iter())
    }
}

fn join_lower<'a>(lines: impl Iterator<Item = &'a String>) -> String {
    lines
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Comment record as served by the patch archive's REST interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub id: u64,
    pub web_url: String,
    pub submitter: Submitter,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submitter {
    pub name: String,
    pub email: String,
}

/// A mailing-list reply to a patch, split into inline comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpstreamComment {
    pub id: u64,
    pub url: String,
    pub author_name: String,
    pub author_email: String,
    pub inline: Vec<InlineComment>,
}

impl From<CommentRecord> for UpstreamComment {
    fn from(record: CommentRecord) -> Self {
        Self {
            id: record.id,
            inline: parse_inline_comments(&record.content),
            url: record.web_url,
            author_name: record.submitter.name,
            author_email: record.submitter.email,
        }
    }
}
