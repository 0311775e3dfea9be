//! CLI argument parsing for backport-audit.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// backport-audit: checks backported patches against their upstream source.
///
/// Compares a candidate backport with the commit or mailing-list patch it
/// claims to come from and drafts a review verdict:
/// - cherry-pick and `(am from ...)` footers locate the upstream source
/// - the two patches are compared after stripping structural noise
/// - mailing-list replies are carried over as inline comments
#[derive(Parser, Debug)]
#[command(name = "backport-audit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log progress (info level).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Trace every line the diff engine and comment resolver look at.
    #[arg(long, global = true)]
    pub chatty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for backport-audit.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compare an upstream patch with a candidate backport.
    ///
    /// Prints the delta and exits with status 2 when the patches differ.
    Compare(CompareArgs),

    /// List the provenance footers of a commit message or patch.
    ///
    /// Prints cherry-pick refs with their derived remote names and web
    /// links, `Link:` urls and `(am from ...)` urls.
    Refs(RefsArgs),

    /// Place mailing-list replies on lines of a candidate patch.
    ///
    /// Reads comment records as served by the patch archive and prints the
    /// resolved positions as JSON.
    ResolveComments(ResolveCommentsArgs),

    /// Review one change and print the review input as JSON.
    ///
    /// Exits with status 2 when the verdict votes against the change.
    Review(ReviewArgs),
}

/// Arguments for the `compare` command.
#[derive(Parser, Debug)]
pub struct CompareArgs {
    /// Upstream patch file.
    pub upstream: PathBuf,

    /// Candidate backport patch file.
    pub candidate: PathBuf,

    /// Context lines kept around each change (0-5).
    #[arg(short = 'C', long, default_value_t = 0)]
    pub context: usize,
}

/// Arguments for the `refs` command.
#[derive(Parser, Debug)]
pub struct RefsArgs {
    /// Commit message or patch file.
    pub file: PathBuf,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `resolve-comments` command.
#[derive(Parser, Debug)]
pub struct ResolveCommentsArgs {
    /// Candidate patch file.
    pub candidate: PathBuf,

    /// Comment records (JSON array).
    pub comments: PathBuf,
}

/// Arguments for the `review` command.
#[derive(Parser, Debug)]
pub struct ReviewArgs {
    /// Review configuration (YAML).
    #[arg(long)]
    pub config: PathBuf,

    /// Project name from the configuration.
    #[arg(long)]
    pub project: String,

    /// Change number.
    #[arg(long)]
    pub number: u64,

    /// Revision (patchset) number.
    #[arg(long)]
    pub revision: u32,

    /// Review-system ref of the revision, e.g. refs/changes/34/1234/2.
    #[arg(long)]
    pub revision_ref: String,

    /// Change subject.
    #[arg(long)]
    pub subject: String,

    /// Uploader name, expected in a Signed-off-by.
    #[arg(long)]
    pub uploader_name: String,

    /// Uploader email, expected in a Signed-off-by.
    #[arg(long)]
    pub uploader_email: String,

    /// Local git repository used for fetches (default: the project's
    /// `local_repo`, else the current directory).
    #[arg(long)]
    pub repo: Option<PathBuf>,

    /// Root of the local patch archive mirror.
    #[arg(long, default_value = "archive")]
    pub archive: PathBuf,

    /// Memo of changes already judged.
    #[arg(long)]
    pub memo: Option<PathBuf>,

    /// Do not record the verdict in the memo.
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
