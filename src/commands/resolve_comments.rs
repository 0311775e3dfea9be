//! Implementation of the `backport-audit resolve-comments` command.

use super::{read_input, to_json};
use crate::cli::ResolveCommentsArgs;
use crate::comments::{CommentPositionResolver, CommentRecord, InlineComment, UpstreamComment};
use crate::error::{AuditError, Result};
use crate::exit_codes;
use crate::telemetry::Telemetry;
use serde::Serialize;

/// One reply placed (or not) on the candidate patch.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub(super) struct ResolvedComment {
    pub comment_id: u64,
    pub author: String,
    pub file: Option<String>,
    pub line: Option<usize>,
    pub resolved: bool,
    pub body: Vec<String>,
}

pub(super) fn resolve(
    candidate: &str,
    records_json: &str,
    log: &Telemetry,
) -> Result<Vec<ResolvedComment>> {
    let records: Vec<CommentRecord> = serde_json::from_str(records_json)
        .map_err(|e| AuditError::UserError(format!("failed to parse comment records: {}", e)))?;
    let comments: Vec<UpstreamComment> = records.into_iter().map(UpstreamComment::from).collect();

    let mut inline: Vec<InlineComment> = Vec::new();
    let mut owners: Vec<&UpstreamComment> = Vec::new();
    for comment in &comments {
        for entry in &comment.inline {
            inline.push(entry.clone());
            owners.push(comment);
        }
    }

    let lines: Vec<&str> = candidate.split('\n').collect();
    CommentPositionResolver::new(log.component("comments")).resolve(&lines, &mut inline);

    Ok(inline
        .into_iter()
        .zip(owners)
        .map(|(entry, owner)| ResolvedComment {
            comment_id: owner.id,
            author: format!("{} <{}>", owner.author_name, owner.author_email),
            file: entry.file().map(str::to_string),
            line: entry.line(),
            resolved: entry.is_resolved(),
            body: entry.body().to_vec(),
        })
        .collect())
}

/// Resolve reply positions on a candidate patch and print them as JSON.
pub fn cmd_resolve_comments(args: ResolveCommentsArgs, log: &Telemetry) -> Result<i32> {
    let candidate = read_input(&args.candidate)?;
    let records = read_input(&args.comments)?;

    let resolved = resolve(&candidate, &records, log)?;
    println!("{}", to_json(&resolved)?);
    Ok(exit_codes::SUCCESS)
}
