use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

pub(crate) const BASE_SOURCE: &str = "int probe(void)
{
\tint ret;
\tret = setup();
\tfoo();
\treturn ret;
}
";

/// Upstream-like repository with a mainline `main` and a downstream
/// `chromeos` branch carrying a cherry-pick.
pub(crate) struct UpstreamFixture {
    pub dir: TempDir,
    /// Initial commit, shared by both branches.
    pub base_sha: String,
    /// `drm: use bar` on main.
    pub change_sha: String,
    /// Cherry-pick of `change_sha` on `chromeos`, also published as `change_ref`.
    pub backport_sha: String,
    /// Review-system style ref pointing at `backport_sha`.
    pub change_ref: &'static str,
}

impl UpstreamFixture {
    pub fn url(&self) -> String {
        self.dir.path().to_string_lossy().to_string()
    }
}

pub(crate) fn create_upstream_repo() -> UpstreamFixture {
    let dir = TempDir::new().unwrap();
    let path = dir.path();

    init_repo(path);
    // Deterministic default branch name across environments.
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);

    std::fs::write(path.join("a.c"), BASE_SOURCE).unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "-m", "Initial commit"]);
    let base_sha = rev_parse(path, "HEAD");

    std::fs::write(path.join("a.c"), BASE_SOURCE.replace("foo();", "bar();")).unwrap();
    git(path, &["commit", "-am", "drm: use bar"]);
    let change_sha = rev_parse(path, "HEAD");

    std::fs::write(path.join("b.c"), "int checked;\n").unwrap();
    git(path, &["add", "."]);
    let fix_msg = format!(
        "drm: check bar() result\n\nFixes: {} (\"drm: use bar\")",
        &change_sha[..12]
    );
    git(path, &["commit", "-m", &fix_msg]);

    git(path, &["checkout", "-b", "chromeos", &base_sha]);
    git(path, &["cherry-pick", "-x", &change_sha]);
    let backport_sha = rev_parse(path, "HEAD");
    git(path, &["checkout", "main"]);

    let change_ref = "refs/changes/01/1/1";
    git(path, &["update-ref", change_ref, &backport_sha]);

    UpstreamFixture {
        dir,
        base_sha,
        change_sha,
        backport_sha,
        change_ref,
    }
}

/// Empty repository to run fetches in.
pub(crate) fn create_local_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    init_repo(dir.path());
    dir
}

fn init_repo(path: &Path) {
    git(path, &["init", "--quiet"]);
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);
}

fn rev_parse(path: &Path, rev: &str) -> String {
    let output = Command::new("git")
        .current_dir(path)
        .args(["rev-parse", rev])
        .output()
        .unwrap();
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn git(repo_dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            stdout,
            stderr
        );
    }
}
