//! Tests for comment parsing and placement.

use super::*;

const CANDIDATE: &str = "UPSTREAM: drm: use bar

(cherry picked from commit abc123)

diff --git a/a.c b/a.c
index 1111111..2222222 100644
--- a/a.c
+++ b/a.c
@@ -8,5 +8,5 @@ static int probe(void)
 \tint ret;
 \tret = setup();
-\tfoo();
+\tbar();
 \treturn ret;
diff --git a/old.c b/old.c
deleted file mode 100644
index 3333333..0000000
--- a/old.c
+++ /dev/null
@@ -1,2 +0,0 @@
-int legacy;
-int legacy_count;";

const REPLY: &str = "On Mon, Jan 6, 2020 at 10:00 AM Dev <dev@example.com> wrote:
> diff --git a/a.c b/a.c
> @@ -8,5 +8,5 @@
>  \tint ret;
>  \tret = setup();
> -\tfoo();
> +\tbar();

Why bar() and not baz()?

>  \treturn ret;
>

Missing an error check here.

Thanks,
Reviewer";

fn record(id: u64, content: &str) -> CommentRecord {
    CommentRecord {
        id,
        web_url: format!("https://patchwork.kernel.org/comment/{}/", id),
        submitter: Submitter {
            name: "Reviewer".to_string(),
            email: "reviewer@example.com".to_string(),
        },
        content: content.to_string(),
    }
}

// =========================================================================
// Reply parsing
// =========================================================================

#[test]
fn test_parse_reply_into_inline_comments() {
    let comments = parse_inline_comments(REPLY);

    assert_eq!(comments.len(), 2);

    let first = &comments[0];
    assert_eq!(
        first.context().iter().collect::<Vec<_>>(),
        vec!["ret = setup();", "-\tfoo();", "+\tbar();"]
    );
    assert_eq!(first.body(), ["Why bar() and not baz()?".to_string()]);

    let second = &comments[1];
    assert_eq!(second.context().iter().collect::<Vec<_>>(), vec!["return ret;"]);
    assert_eq!(
        second.body(),
        [
            "Missing an error check here.".to_string(),
            "Thanks,".to_string(),
            "Reviewer".to_string(),
        ]
    );
}

#[test]
fn test_top_post_is_dropped() {
    assert!(parse_inline_comments("Looks good to me.\n\nThanks").is_empty());
    assert!(parse_inline_comments("> only quotes\n> more quotes").is_empty());
}

#[test]
fn test_context_ring_keeps_last_three() {
    let mut comment = InlineComment::new();
    for line in ["a", "b", "c", "d"] {
        comment.push_context(line);
    }
    assert_eq!(comment.context().len(), MAX_CONTEXT_LINES);
    assert_eq!(comment.context().front().map(String::as_str), Some("b"));
}

#[test]
fn test_record_conversion() {
    let comment = UpstreamComment::from(record(7, REPLY));
    assert_eq!(comment.id, 7);
    assert_eq!(comment.author_name, "Reviewer");
    assert_eq!(comment.url, "https://patchwork.kernel.org/comment/7/");
    assert_eq!(comment.inline.len(), 2);
}

#[test]
fn test_record_deserializes_from_archive_json() {
    let json = r#"[{"id": 3, "web_url": "https://pw/comment/3/",
        "submitter": {"id": 1, "name": "R", "email": "r@x"}, "content": "> a\nb"}]"#;
    let records: Vec<CommentRecord> = serde_json::from_str(json).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].submitter.email, "r@x");
}

// =========================================================================
// Exact placement
// =========================================================================

#[test]
fn test_consecutive_context_resolves_to_first_line() {
    let mut comments = vec![InlineComment::from_parts(
        ["ret = setup();", "-\tfoo();", "+\tbar();"],
        ["why?"],
    )];

    resolve_comment_positions(CANDIDATE, &mut comments);

    assert!(comments[0].is_resolved());
    assert_eq!(comments[0].file(), Some("a.c"));
    assert_eq!(comments[0].line(), Some(9));
}

#[test]
fn test_parsed_reply_resolves() {
    let mut comments = parse_inline_comments(REPLY);

    resolve_comment_positions(CANDIDATE, &mut comments);

    assert_eq!(comments[0].file(), Some("a.c"));
    assert_eq!(comments[0].line(), Some(9));
    assert_eq!(comments[1].file(), Some("a.c"));
    assert_eq!(comments[1].line(), Some(11));
}

#[test]
fn test_commit_message_lines_use_pseudo_file() {
    let mut comments = vec![InlineComment::from_parts(
        ["UPSTREAM: drm: use bar"],
        ["Subject is too vague"],
    )];

    resolve_comment_positions(CANDIDATE, &mut comments);

    assert_eq!(comments[0].file(), Some(COMMIT_MSG));
    assert_eq!(comments[0].line(), Some(COMMIT_MSG_HEADER_LINES + 1));
}

#[test]
fn test_deleted_file_comment_is_not_resolved() {
    let mut comments = vec![InlineComment::from_parts(
        ["-int legacy;", "-int legacy_count;"],
        ["Is anything still using this?"],
    )];

    resolve_comment_positions(CANDIDATE, &mut comments);

    assert_eq!(comments[0].file(), Some(DEV_NULL));
    assert!(!comments[0].is_resolved());
}

#[test]
fn test_unmatched_context_stays_unresolved() {
    let mut comments = vec![InlineComment::from_parts(
        ["this line is not in the patch"],
        ["comment"],
    )];

    resolve_comment_positions(CANDIDATE, &mut comments);

    assert_eq!(comments[0].file(), None);
    assert_eq!(comments[0].line(), None);
}

// =========================================================================
// Threading
// =========================================================================

#[test]
fn test_reply_to_reviewer_threads_onto_parent() {
    let parent = InlineComment::from_parts(["\treturn ret;"], ["Missing an error check here."]);
    let child = InlineComment::from_parts(
        ["Missing an error check here."],
        ["setup() cannot fail, so none is needed."],
    );
    let mut comments = vec![parent, child];

    resolve_comment_positions(CANDIDATE, &mut comments);

    assert_eq!(comments[1].file(), Some("a.c"));
    assert_eq!(comments[1].line(), Some(11));
}

#[test]
fn test_threading_ignores_unrelated_parents() {
    let parent = InlineComment::from_parts(["\treturn ret;"], ["Missing an error check here."]);
    let child = InlineComment::from_parts(["Completely different remark"], ["Agreed."]);
    let mut comments = vec![parent, child];

    resolve_comment_positions(CANDIDATE, &mut comments);

    assert!(comments[0].is_resolved());
    assert!(!comments[1].is_resolved());
}

#[test]
fn test_threading_never_uses_unresolved_parents() {
    let orphan = InlineComment::from_parts(["not in the patch"], ["Missing an error check."]);
    let child = InlineComment::from_parts(["Missing an error check."], ["Agreed."]);
    let mut comments = vec![orphan, child];

    resolve_comment_positions(CANDIDATE, &mut comments);

    assert!(!comments[0].is_resolved());
    assert!(!comments[1].is_resolved());
}
