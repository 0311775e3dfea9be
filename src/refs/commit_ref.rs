//! Upstream commit reference descriptor.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

static SCHEME_OR_NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([a-z]*://)|\W").expect("Invalid remote name regex"));

/// Strip a URL scheme and every non-word character.
///
/// `git://git.kernel.org/pub/scm/linux.git` becomes
/// `gitkernelorgpubscmlinuxgit`.
pub fn strip_special(value: &str) -> String {
    SCHEME_OR_NON_WORD.replace_all(value, "").into_owned()
}

/// A commit a change claims to be derived from.
///
/// A ref is scoped by a branch or a tag, never both. Neither means "the
/// default branch of the remote", which the orchestration layer fills in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRef {
    sha: String,
    remote: Option<String>,
    branch: Option<String>,
    tag: Option<String>,
    remote_name: Option<String>,
}

impl CommitRef {
    /// A bare sha with no remote, branch or tag.
    pub fn new(sha: impl Into<String>) -> Self {
        Self {
            sha: sha.into(),
            remote: None,
            branch: None,
            tag: None,
            remote_name: None,
        }
    }

    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.set_remote(remote);
        self
    }

    /// Scope the ref to a branch, clearing any tag.
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self.tag = None;
        self
    }

    /// Scope the ref to a tag, clearing any branch.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self.branch = None;
        self
    }

    /// Set the remote URL and recompute the derived remote name.
    pub fn set_remote(&mut self, remote: impl Into<String>) {
        let remote = remote.into();
        self.remote_name = Some(strip_special(&remote));
        self.remote = Some(remote);
    }

    /// Use `branch` when the ref names neither a branch nor a tag.
    pub fn set_default_branch(&mut self, branch: impl Into<String>) {
        if self.branch.is_none() && self.tag.is_none() {
            self.branch = Some(branch.into());
        }
    }

    pub fn sha(&self) -> &str {
        &self.sha
    }

    pub fn remote(&self) -> Option<&str> {
        self.remote.as_deref()
    }

    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Name under which the remote is registered locally.
    pub fn remote_name(&self) -> Option<&str> {
        self.remote_name.as_deref()
    }

    /// Ref to fetch or test ancestry against.
    ///
    /// With `use_remote`, a branch resolves to its remote-tracking ref
    /// `<remote_name>/<branch>`. Branches already spelled as full refs (for
    /// example review-system change refs) are returned as-is.
    pub fn refs(&self, use_remote: bool) -> Option<String> {
        if let Some(branch) = &self.branch {
            if branch.starts_with("refs/") {
                return Some(branch.clone());
            }
            if use_remote && let Some(name) = &self.remote_name {
                return Some(format!("{}/{}", name, branch));
            }
            return Some(format!("refs/heads/{}", branch));
        }

        self.tag.as_ref().map(|tag| format!("refs/tags/{}", tag))
    }

    /// First 12 characters of the sha.
    pub fn short_sha(&self) -> String {
        self.sha.chars().take(12).collect()
    }
}

impl fmt::Display for CommitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sha={}", self.short_sha())?;
        if let Some(branch) = &self.branch {
            write!(f, " branch={}", branch)?;
        }
        if let Some(tag) = &self.tag {
            write!(f, " tag={}", tag)?;
        }
        if let Some(remote) = &self.remote {
            write!(f, " remote={}", remote)?;
        }
        Ok(())
    }
}
