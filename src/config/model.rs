//! ReviewConfig struct definition and default implementation.

use super::types::*;
use serde::Deserialize;

/// Configuration for backport-audit.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Upper bound on the size of a posted review message, in characters.
    /// Embedded diffs are truncated to leave 4096 characters for the rest.
    #[serde(default = "default_msg_limit")]
    pub msg_limit: usize,

    /// Attempts made to fetch a candidate revision before giving up.
    #[serde(default = "default_fetch_attempts")]
    pub fetch_attempts: u32,

    /// Reviewed projects.
    #[serde(default)]
    pub projects: Vec<ProjectConfig>,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            msg_limit: default_msg_limit(),
            fetch_attempts: default_fetch_attempts(),
            projects: Vec::new(),
        }
    }
}
