//! Tests for the command implementations.

use super::compare::compare_files;
use super::refs::RefsReport;
use super::resolve_comments::resolve;
use super::review::{run_review, Skipped};
use crate::cli::ReviewArgs;
use crate::error::AuditError;
use crate::memo::ReviewMemo;
use crate::review::strings;
use crate::telemetry::Telemetry;
use crate::test_support::{create_local_repo, create_upstream_repo, UpstreamFixture};
use std::path::Path;
use tempfile::TempDir;

const UPSTREAM: &str = "drm: use bar

diff --git a/a.c b/a.c
index 1111111..2222222 100644
--- a/a.c
+++ b/a.c
@@ -3,4 +3,4 @@ int probe(void)
 \tint ret;
 \tret = setup();
-\tfoo();
+\tbar();
 \treturn ret;
";

// =========================================================================
// compare
// =========================================================================

#[test]
fn test_compare_clean_and_altered() {
    let log = Telemetry::default();
    assert!(compare_files(UPSTREAM, UPSTREAM, 0, &log).unwrap().is_empty());

    let altered = UPSTREAM.replace("+\tbar();", "+\tbar(1);");
    let delta = compare_files(UPSTREAM, &altered, 0, &log).unwrap();
    assert_eq!(
        delta,
        vec!["--- a/a.c", "+++ b/a.c", "- +\tbar();", "+ +\tbar(1);"]
    );
}

#[test]
fn test_compare_rejects_large_context() {
    let err = compare_files(UPSTREAM, UPSTREAM, 6, &Telemetry::default()).unwrap_err();
    assert!(matches!(err, AuditError::InvalidContext { given: 6, max: 5 }));
}

// =========================================================================
// refs
// =========================================================================

const FOOTERS: &str = "UPSTREAM: drm: use bar

Link: https://lore.kernel.org/r/20200106.1@example.com
(cherry picked from commit 0123456789abcdef
 git://git.kernel.org/pub/scm/linux/kernel/git/stable/linux.git linux-5.4.y)
(am from https://patchwork.kernel.org/patch/11223/)
";

#[test]
fn test_refs_report_collects_every_footer() {
    let report = RefsReport::from_text(FOOTERS);

    assert_eq!(report.cherry_picks.len(), 1);
    let entry = &report.cherry_picks[0];
    assert_eq!(entry.commit.sha(), "0123456789abcdef");
    assert_eq!(entry.commit.branch(), Some("linux-5.4.y"));
    assert!(entry.web_link.as_deref().unwrap().contains("head=linux-5.4.y"));
    assert_eq!(report.links, vec!["https://lore.kernel.org/r/20200106.1@example.com"]);
    assert_eq!(report.am_from, vec!["https://patchwork.kernel.org/patch/11223/"]);

    let text = report.render_text();
    assert!(text.contains("Cherry-picked from:"));
    assert!(text.contains("remote name: gitkernelorgpubscmlinuxkernelgitstablelinuxgit"));
    assert!(text.contains("Applied from:"));
}

#[test]
fn test_refs_report_json_shape() {
    let json = serde_json::to_value(RefsReport::from_text(FOOTERS)).unwrap();
    assert_eq!(json["cherry_picks"][0]["sha"], "0123456789abcdef");
    assert_eq!(json["cherry_picks"][0]["branch"], "linux-5.4.y");
    assert!(json["cherry_picks"][0]["web_link"].is_string());
    assert_eq!(json["am_from"][0], "https://patchwork.kernel.org/patch/11223/");
}

#[test]
fn test_refs_report_empty() {
    let report = RefsReport::from_text("drm: local change\n");
    assert!(report.is_empty());
    assert_eq!(report.render_text(), "No provenance footers found.\n");
}

// =========================================================================
// resolve-comments
// =========================================================================

#[test]
fn test_resolve_comments_from_records() {
    let records = r#"[{"id": 9, "web_url": "https://patchwork.kernel.org/comment/9/",
        "submitter": {"name": "Reviewer", "email": "r@example.com"},
        "content": "> \tret = setup();\n> -\tfoo();\n> +\tbar();\n\nWhy bar()?\n\n> unrelated text\nAnd this?"}]"#;

    let resolved = resolve(UPSTREAM, records, &Telemetry::default()).unwrap();

    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved[0].comment_id, 9);
    assert_eq!(resolved[0].author, "Reviewer <r@example.com>");
    assert!(resolved[0].resolved);
    assert_eq!(resolved[0].file.as_deref(), Some("a.c"));
    assert_eq!(resolved[0].body, vec!["Why bar()?".to_string()]);
    assert!(!resolved[1].resolved);
}

#[test]
fn test_resolve_comments_rejects_bad_json() {
    let err = resolve(UPSTREAM, "{not json", &Telemetry::default()).unwrap_err();
    assert!(matches!(err, AuditError::UserError(_)));
}

// =========================================================================
// review
// =========================================================================

fn write_config(dir: &Path, fixture: &UpstreamFixture) -> std::path::PathBuf {
    let path = dir.join("audit.yaml");
    let yaml = format!(
        "projects:\n  - name: test\n    gerrit_remote: {url}\n    mainline_repo: {url}\n    mainline_branch: main\n",
        url = fixture.url()
    );
    std::fs::write(&path, yaml).unwrap();
    path
}

fn review_args(dir: &TempDir, fixture: &UpstreamFixture, local: &TempDir, subject: &str) -> ReviewArgs {
    ReviewArgs {
        config: write_config(dir.path(), fixture),
        project: "test".to_string(),
        number: 1,
        revision: 1,
        revision_ref: fixture.change_ref.to_string(),
        subject: subject.to_string(),
        uploader_name: "Test User".to_string(),
        uploader_email: "test@example.com".to_string(),
        repo: Some(local.path().to_path_buf()),
        archive: dir.path().join("archive"),
        memo: Some(dir.path().join("memo.json")),
        dry_run: false,
    }
}

#[test]
fn test_review_against_real_repository() {
    let fixture = create_upstream_repo();
    let local = create_local_repo();
    let dir = TempDir::new().unwrap();
    let args = review_args(&dir, &fixture, &local, "UPSTREAM: drm: use bar");
    let log = Telemetry::default();

    let input = run_review(&args, &log).unwrap().expect("review input expected");

    // The cherry-pick is clean, but the message lacks BUG=/TEST=/sign-off.
    assert_eq!(input.labels["Code-Review"], -1);
    assert_eq!(input.notify, "OWNER");
    assert!(input.message.contains(strings::SUCCESS));
    assert!(input.message.contains("BUG=, TEST="));
    assert!(input.message.contains("drm: check bar() result"));

    let memo = ReviewMemo::load(dir.path().join("memo.json")).unwrap();
    assert_eq!(memo.entry(1).map(|e| e.vote), Some(-1));

    // Polling again is a no-op.
    assert_eq!(run_review(&args, &log).unwrap(), Err(Skipped::AlreadyJudged));
}

#[test]
fn test_review_dry_run_leaves_memo_alone() {
    let fixture = create_upstream_repo();
    let local = create_local_repo();
    let dir = TempDir::new().unwrap();
    let mut args = review_args(&dir, &fixture, &local, "UPSTREAM: drm: use bar");
    args.dry_run = true;

    assert!(run_review(&args, &Telemetry::default()).unwrap().is_ok());
    assert!(!dir.path().join("memo.json").exists());
}

#[test]
fn test_review_skips_unprefixed_change() {
    let fixture = create_upstream_repo();
    let local = create_local_repo();
    let dir = TempDir::new().unwrap();
    let args = review_args(&dir, &fixture, &local, "drm: local change");

    assert_eq!(
        run_review(&args, &Telemetry::default()).unwrap(),
        Err(Skipped::NoStrategy)
    );
}

#[test]
fn test_review_unknown_project_is_user_error() {
    let fixture = create_upstream_repo();
    let local = create_local_repo();
    let dir = TempDir::new().unwrap();
    let mut args = review_args(&dir, &fixture, &local, "UPSTREAM: drm: use bar");
    args.project = "missing".to_string();

    let err = run_review(&args, &Telemetry::default()).unwrap_err();
    assert!(matches!(err, AuditError::UserError(_)));
    assert!(err.to_string().contains("test"));
}
