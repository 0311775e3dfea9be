//! Implementation of the `backport-audit review` command.
//!
//! Loads the configuration and memo, picks a strategy for the change, runs
//! the reviewer against the local repository and patch archive mirror, and
//! prints the review input the review system would receive.

use super::to_json;
use crate::cli::ReviewArgs;
use crate::config::ReviewConfig;
use crate::error::Result;
use crate::exit_codes;
use crate::git::GitCli;
use crate::memo::ReviewMemo;
use crate::patch_source::ArchivePatchSource;
use crate::review::{select_strategy, Change, ChangeReviewer, ReviewInput};
use crate::telemetry::Telemetry;
use std::path::PathBuf;

/// Why a change produced no review input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Skipped {
    AlreadyJudged,
    NoStrategy,
    NothingToReport,
}

pub(super) type ReviewOutcome = std::result::Result<ReviewInput, Skipped>;

fn change_from_args(args: &ReviewArgs) -> Change {
    Change {
        number: args.number,
        revision: args.revision,
        subject: args.subject.clone(),
        commit_message: None,
        uploader_name: args.uploader_name.clone(),
        uploader_email: args.uploader_email.clone(),
        revision_ref: args.revision_ref.clone(),
    }
}

pub(super) fn run_review(args: &ReviewArgs, log: &Telemetry) -> Result<ReviewOutcome> {
    let config = ReviewConfig::load(&args.config)?;
    let project = config.project(&args.project)?;
    let change = change_from_args(args);

    let mut memo = match &args.memo {
        Some(path) => ReviewMemo::load(path)?,
        None => ReviewMemo::new(),
    };

    if memo.already_judged(change.number, change.revision) {
        log::info!(target: log.target(), "{} already judged, skipping", change);
        return Ok(Err(Skipped::AlreadyJudged));
    }

    let days = memo.days_since_last_review(change.number);
    let Some(strategy) = select_strategy(project, &change, days) else {
        log::info!(target: log.target(), "no reviewer for {} ({})", change, change.subject);
        return Ok(Err(Skipped::NoStrategy));
    };

    let repo = args
        .repo
        .clone()
        .or_else(|| project.local_repo.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    let vcs = GitCli::new(repo, log.component("git"));
    let patches = ArchivePatchSource::new(
        &args.archive,
        project.patchworks.clone(),
        log.component("patchwork"),
    );

    let verdict = ChangeReviewer::new(project, &change, strategy, &vcs, &patches)
        .msg_limit(config.msg_limit)
        .fetch_attempts(config.fetch_attempts)
        .telemetry(log.component("review"))
        .review()?;

    let vote = verdict.as_ref().map_or(0, |v| v.vote());
    if !args.dry_run
        && let Some(path) = &args.memo
    {
        memo.record(change.number, change.revision, vote);
        memo.save(path)?;
    }

    match verdict {
        Some(verdict) => Ok(Ok(verdict.to_review_input(change.number))),
        None => Ok(Err(Skipped::NothingToReport)),
    }
}

/// Review one change and print the review input.
pub fn cmd_review(args: ReviewArgs, log: &Telemetry) -> Result<i32> {
    match run_review(&args, log)? {
        Ok(input) => {
            println!("{}", to_json(&input)?);
            let vote = input.labels.values().copied().min().unwrap_or(0);
            Ok(if vote < 0 {
                exit_codes::ALTERED
            } else {
                exit_codes::SUCCESS
            })
        }
        Err(skipped) => {
            let reason = match skipped {
                Skipped::AlreadyJudged => "revision already reviewed",
                Skipped::NoStrategy => "no reviewer handles this change",
                Skipped::NothingToReport => "nothing to report",
            };
            println!("Skipped change {}: {}.", args.number, reason);
            Ok(exit_codes::SUCCESS)
        }
    }
}
