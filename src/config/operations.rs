//! Config loading, validation, and lookup.

use super::model::ReviewConfig;
use super::types::ProjectConfig;
use crate::error::{AuditError, Result};
use std::path::Path;

/// Room kept free in a review message for everything but the diff.
const MIN_MSG_LIMIT: usize = 4096;

impl ReviewConfig {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(ReviewConfig)` - Successfully loaded and validated config
    /// * `Err(AuditError::UserError)` - Read or parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            AuditError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: ReviewConfig = serde_yaml::from_str(yaml)
            .map_err(|e| AuditError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `msg_limit` must exceed the 4096 characters reserved for boilerplate
    /// - `fetch_attempts` must be positive
    /// - project names must be unique and non-empty
    /// - every project needs a `mainline_repo`, `gerrit_remote` and prefixes
    /// - patchwork hosts must be non-empty
    pub fn validate(&self) -> Result<()> {
        if self.msg_limit <= MIN_MSG_LIMIT {
            return Err(AuditError::UserError(format!(
                "config validation failed: msg_limit must be greater than {}",
                MIN_MSG_LIMIT
            )));
        }

        if self.fetch_attempts == 0 {
            return Err(AuditError::UserError(
                "config validation failed: fetch_attempts must be greater than 0".to_string(),
            ));
        }

        for (idx, project) in self.projects.iter().enumerate() {
            if project.name.is_empty() {
                return Err(AuditError::UserError(format!(
                    "config validation failed: project #{} has no name",
                    idx + 1
                )));
            }
            if self.projects[..idx].iter().any(|p| p.name == project.name) {
                return Err(AuditError::UserError(format!(
                    "config validation failed: duplicate project '{}'",
                    project.name
                )));
            }
            validate_project(project)?;
        }

        Ok(())
    }

    /// Look up a project by name.
    pub fn project(&self, name: &str) -> Result<&ProjectConfig> {
        self.projects.iter().find(|p| p.name == name).ok_or_else(|| {
            let known: Vec<&str> = self.projects.iter().map(|p| p.name.as_str()).collect();
            AuditError::UserError(format!(
                "unknown project '{}' (configured: {})",
                name,
                if known.is_empty() {
                    "none".to_string()
                } else {
                    known.join(", ")
                }
            ))
        })
    }
}

fn validate_project(project: &ProjectConfig) -> Result<()> {
    let fail = |what: &str| {
        Err(AuditError::UserError(format!(
            "config validation failed: project '{}' {}",
            project.name, what
        )))
    };

    if project.mainline_repo.is_empty() {
        return fail("has an empty mainline_repo");
    }
    if project.gerrit_remote.is_empty() {
        return fail("has an empty gerrit_remote");
    }
    if project.mainline_branch.is_empty() {
        return fail("has an empty mainline_branch");
    }
    if project.prefixes.is_empty() {
        return fail("reviews no prefixes");
    }
    if project.patchworks.iter().any(|p| p.host.is_empty()) {
        return fail("has a patchwork entry with an empty host");
    }
    Ok(())
}
