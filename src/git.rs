//! Git access for backport-audit.
//!
//! `run_git` wraps the git binary with captured stdout/stderr and structured
//! errors. [`GitCli`] implements the [`VersionControl`] operations a review
//! needs on top of it: fetching remotes and review-system revisions, showing
//! commits, and ancestry queries.

use crate::diff::MAX_CONTEXT;
use crate::error::{AuditError, Result};
use crate::refs::{strip_special, CommitRef};
use crate::telemetry::Telemetry;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Namespace for refs that only live for the duration of one fetch.
const TEMP_REF_PREFIX: &str = "refs/backport-audit";

/// Result of a successful git command execution.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output, without trailing line breaks.
    pub stdout: String,
    /// Standard error (trimmed).
    pub stderr: String,
}

impl GitOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout)
                .trim_end_matches(['\n', '\r'])
                .to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }

    /// Returns true if stdout is empty.
    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty()
    }

    /// Returns stdout lines as a vector.
    pub fn lines(&self) -> Vec<&str> {
        if self.stdout.is_empty() {
            Vec::new()
        } else {
            self.stdout.lines().collect()
        }
    }
}

fn spawn_git(cwd: &Path, args: &[&str]) -> Result<Output> {
    Command::new("git")
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|e| {
            AuditError::GitError(format!(
                "failed to execute git {}: {}",
                args.first().unwrap_or(&""),
                e
            ))
        })
}

/// Run a git command with the specified working directory.
///
/// # Returns
///
/// * `Ok(GitOutput)` - On successful execution (exit code 0)
/// * `Err(AuditError::GitError)` - On non-zero exit code (mapped to exit code 3)
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    let output = spawn_git(cwd.as_ref(), args)?;
    let git_output = GitOutput::from_output(&output);

    if output.status.success() {
        Ok(git_output)
    } else {
        let exit_code = output.status.code().unwrap_or(-1);
        let error_msg = if git_output.stderr.is_empty() {
            git_output.stdout.clone()
        } else {
            git_output.stderr.clone()
        };

        Err(AuditError::GitError(format!(
            "git {} failed (exit code {}): {}",
            args.first().unwrap_or(&""),
            exit_code,
            error_msg
        )))
    }
}

/// Repository operations a review depends on.
///
/// Every method may fail with a transient [`AuditError::GitError`].
pub trait VersionControl {
    /// Register (or re-point) the commit's remote and fetch its branch or tag.
    fn fetch_remote(&self, commit: &CommitRef) -> Result<()>;

    /// Fetch a single review-system ref from `remote` and return the commit
    /// it points to, as [`show_commit`](Self::show_commit) renders it.
    fn fetch_change(&self, remote: &str, change_ref: &str) -> Result<String>;

    /// Commit message followed by the patch, with enough context for any
    /// comparison.
    fn show_commit(&self, rev: &str) -> Result<String>;

    /// Whether `sha` is reachable from `branch_ref`.
    fn is_ancestor(&self, sha: &str, branch_ref: &str) -> Result<bool>;

    /// One-line summaries of later commits on the commit's branch whose
    /// message carries a `Fixes:` tag naming it.
    fn fixes_references(&self, commit: &CommitRef) -> Result<Vec<String>>;
}

/// [`VersionControl`] backed by the git command line in a local repository.
#[derive(Debug, Clone)]
pub struct GitCli {
    repo: PathBuf,
    log: Telemetry,
}

impl GitCli {
    pub fn new<P: Into<PathBuf>>(repo: P, log: Telemetry) -> Self {
        Self {
            repo: repo.into(),
            log,
        }
    }

    fn git(&self, args: &[&str]) -> Result<GitOutput> {
        log::debug!(target: self.log.target(), "GIT: git {}", args.join(" "));
        run_git(&self.repo, args)
    }

    fn add_or_update_remote(&self, name: &str, url: &str) -> Result<()> {
        if self.git(&["remote", "set-url", name, url]).is_ok() {
            return Ok(());
        }
        self.git(&["remote", "add", name, url]).map(|_| ())
    }
}

impl VersionControl for GitCli {
    fn fetch_remote(&self, commit: &CommitRef) -> Result<()> {
        let (Some(url), Some(name)) = (commit.remote(), commit.remote_name()) else {
            return Err(AuditError::UserError(format!(
                "cannot fetch {}: no remote",
                commit
            )));
        };
        log::debug!(target: self.log.target(), "Fetching {}", commit);

        self.add_or_update_remote(name, url)?;

        let refs = commit.refs(false);
        let mut args = vec!["fetch", "--prune", "--tags", name];
        if let Some(refs) = refs.as_deref() {
            args.push(refs);
        }
        self.git(&args).map(|_| ())
    }

    fn fetch_change(&self, remote: &str, change_ref: &str) -> Result<String> {
        let temp_ref = format!(
            "{}/{}_{}",
            TEMP_REF_PREFIX,
            strip_special(remote),
            strip_special(change_ref)
        );
        let refspec = format!("+{}:{}", change_ref, temp_ref);
        self.git(&["fetch", remote, &refspec])?;

        let patch = self.show_commit(&temp_ref);

        if let Err(e) = self.git(&["update-ref", "-d", &temp_ref]) {
            log::warn!(target: self.log.target(), "failed to delete {}: {}", temp_ref, e);
        }
        patch
    }

    fn show_commit(&self, rev: &str) -> Result<String> {
        let context = format!("-U{}", MAX_CONTEXT);
        self.git(&["show", "--minimal", &context, "--format=%B", rev])
            .map(|out| out.stdout)
    }

    fn is_ancestor(&self, sha: &str, branch_ref: &str) -> Result<bool> {
        let args = ["merge-base", "--is-ancestor", sha, branch_ref];
        log::debug!(target: self.log.target(), "GIT: git {}", args.join(" "));

        let output = spawn_git(&self.repo, &args)?;
        match output.status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            code => Err(AuditError::GitError(format!(
                "git merge-base failed (exit code {}): {}",
                code.unwrap_or(-1),
                GitOutput::from_output(&output).stderr
            ))),
        }
    }

    fn fixes_references(&self, commit: &CommitRef) -> Result<Vec<String>> {
        let Some(branch_ref) = commit.refs(true) else {
            return Ok(Vec::new());
        };
        let short: String = commit.sha().chars().take(8).collect();
        let grep = format!("Fixes:.*{}", short);
        let range = format!("{}..{}", commit.sha(), branch_ref);

        let output = self.git(&[
            "log",
            "--format=oneline",
            "--abbrev-commit",
            "-i",
            "--grep",
            &grep,
            &range,
        ])?;
        Ok(output.lines().into_iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{create_local_repo, create_upstream_repo};
    use tempfile::TempDir;

    #[test]
    fn test_run_git_success() {
        let fixture = create_upstream_repo();
        let result = run_git(fixture.dir.path(), &["status", "--porcelain"]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_run_git_failure_returns_git_error() {
        let fixture = create_upstream_repo();
        let err = run_git(fixture.dir.path(), &["checkout", "nonexistent-branch"]).unwrap_err();
        assert!(matches!(err, AuditError::GitError(_)));
        assert!(err.is_transient());
    }

    #[test]
    fn test_run_git_outside_repo_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = run_git(temp_dir.path(), &["rev-parse", "HEAD"]);
        assert!(matches!(result, Err(AuditError::GitError(_))));
    }

    #[test]
    fn test_fetch_remote_and_ancestry() {
        let fixture = create_upstream_repo();
        let local = create_local_repo();
        let git = GitCli::new(local.path(), Telemetry::default());

        let commit = CommitRef::new(&fixture.change_sha)
            .with_remote(fixture.url())
            .with_branch("main");
        git.fetch_remote(&commit).unwrap();

        let branch_ref = commit.refs(true).unwrap();
        assert!(git.is_ancestor(&fixture.change_sha, &branch_ref).unwrap());
        assert!(git.is_ancestor(&fixture.base_sha, &branch_ref).unwrap());

        // Fetching again re-points the existing remote.
        git.fetch_remote(&commit).unwrap();
    }

    #[test]
    fn test_is_ancestor_false_for_side_branch() {
        let fixture = create_upstream_repo();
        let local = create_local_repo();
        let git = GitCli::new(local.path(), Telemetry::default());

        let main = CommitRef::new(&fixture.change_sha)
            .with_remote(fixture.url())
            .with_branch("main");
        let side = CommitRef::new(&fixture.backport_sha)
            .with_remote(fixture.url())
            .with_branch("chromeos");
        git.fetch_remote(&main).unwrap();
        git.fetch_remote(&side).unwrap();

        assert!(!git.is_ancestor(&fixture.backport_sha, &main.refs(true).unwrap()).unwrap());
    }

    #[test]
    fn test_is_ancestor_unknown_sha_is_error() {
        let fixture = create_upstream_repo();
        let git = GitCli::new(fixture.dir.path(), Telemetry::default());
        let result = git.is_ancestor("0123456789abcdef0123456789abcdef01234567", "main");
        assert!(matches!(result, Err(AuditError::GitError(_))));
    }

    #[test]
    fn test_show_commit_has_message_and_patch() {
        let fixture = create_upstream_repo();
        let git = GitCli::new(fixture.dir.path(), Telemetry::default());

        let patch = git.show_commit(&fixture.change_sha).unwrap();
        assert!(patch.starts_with("drm: use bar"));
        assert!(patch.contains("diff --git a/a.c b/a.c"));
        assert!(patch.contains("-\tfoo();"));
        assert!(patch.contains("+\tbar();"));
    }

    #[test]
    fn test_fetch_change_cleans_up_temp_ref() {
        let fixture = create_upstream_repo();
        let local = create_local_repo();
        let git = GitCli::new(local.path(), Telemetry::default());

        let patch = git.fetch_change(&fixture.url(), fixture.change_ref).unwrap();
        assert!(patch.contains("(cherry picked from commit"));
        assert!(patch.contains(&fixture.change_sha));

        let refs = run_git(local.path(), &["for-each-ref", TEMP_REF_PREFIX]).unwrap();
        assert!(refs.is_empty());
    }

    #[test]
    fn test_fetch_change_missing_ref_is_git_error() {
        let fixture = create_upstream_repo();
        let local = create_local_repo();
        let git = GitCli::new(local.path(), Telemetry::default());

        let result = git.fetch_change(&fixture.url(), "refs/changes/99/99/9");
        assert!(matches!(result, Err(AuditError::GitError(_))));
    }

    #[test]
    fn test_fixes_references() {
        let fixture = create_upstream_repo();
        let local = create_local_repo();
        let git = GitCli::new(local.path(), Telemetry::default());

        let commit = CommitRef::new(&fixture.change_sha)
            .with_remote(fixture.url())
            .with_branch("main");
        git.fetch_remote(&commit).unwrap();

        let fixes = git.fixes_references(&commit).unwrap();
        assert_eq!(fixes.len(), 1);
        assert!(fixes[0].contains("drm: check bar() result"));
    }

    #[test]
    fn test_fetch_remote_without_remote_is_user_error() {
        let local = create_local_repo();
        let git = GitCli::new(local.path(), Telemetry::default());
        let err = git.fetch_remote(&CommitRef::new("abc123")).unwrap_err();
        assert!(matches!(err, AuditError::UserError(_)));
    }
}
