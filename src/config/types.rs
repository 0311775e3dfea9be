//! Project and patch-archive settings plus default values.

use serde::Deserialize;

/// A patch archive (patchwork instance) a project accepts FROMLIST patches from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PatchworkConfig {
    /// Short name used in logs.
    pub name: String,

    /// Host name, matched against the host of `(am from ...)` urls.
    pub host: String,

    /// Path prefix of the archive on the host (may be empty).
    #[serde(default)]
    pub path: String,

    /// Whether the archive serves reply comments for its patches.
    #[serde(default)]
    pub has_comments: bool,
}

impl PatchworkConfig {
    /// Whether this archive is the one at `host`; host names are case-insensitive.
    pub fn serves(&self, host: &str) -> bool {
        self.host.eq_ignore_ascii_case(host)
    }
}

/// Per-project review settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectConfig {
    /// Name used to select the project on the command line.
    pub name: String,

    /// Project name in the review system.
    #[serde(default)]
    pub gerrit_project: String,

    /// Git url of the review system, where candidate revisions are fetched from.
    pub gerrit_remote: String,

    /// Git url of the mainline tree.
    pub mainline_repo: String,

    /// Mainline branch used when a footer names no branch or tag.
    #[serde(default = "default_mainline_branch")]
    pub mainline_branch: String,

    /// Local repository used for git operations (overridden by `--repo`).
    #[serde(default)]
    pub local_repo: Option<String>,

    /// Subject prefixes this project reviews.
    #[serde(default = "default_prefixes")]
    pub prefixes: Vec<String>,

    /// Patch archives FROMLIST patches may come from.
    #[serde(default)]
    pub patchworks: Vec<PatchworkConfig>,

    /// Do not require an uploader Signed-off-by.
    #[serde(default)]
    pub ignore_sob: bool,

    /// Post diffs for altered FROMLIST patches instead of clearing votes.
    #[serde(default = "default_true")]
    pub review_fromlist_backports: bool,
}

impl ProjectConfig {
    /// Whether `prefix` is one of the project's reviewed subject prefixes.
    pub fn allows(&self, prefix: &str) -> bool {
        self.prefixes.iter().any(|p| p == prefix)
    }
}

// Default value functions for serde
pub(crate) fn default_msg_limit() -> usize {
    16384
}
pub(crate) fn default_fetch_attempts() -> u32 {
    4
}
pub(crate) fn default_mainline_branch() -> String {
    "master".to_string()
}
pub(crate) fn default_prefixes() -> Vec<String> {
    ["UPSTREAM", "BACKPORT", "FROMGIT", "FROMLIST"]
        .iter()
        .map(|p| p.to_string())
        .collect()
}
pub(crate) fn default_true() -> bool {
    true
}
