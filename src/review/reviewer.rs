//! One review of one change.
//!
//! The reviewer fetches the candidate revision, locates its upstream source
//! according to the selected [`Strategy`], checks the commit message, compares
//! the two patches and, for mailing-list patches, carries the list's review
//! comments over. Everything it learns is recorded as findings on a
//! [`Verdict`].

use crate::comments::{CommentPositionResolver, InlineComment, UpstreamComment};
use crate::config::ProjectConfig;
use crate::diff::{format_diff, DiffComparator};
use crate::error::{AuditError, Result};
use crate::git::VersionControl;
use crate::patch_source::PatchSource;
use crate::refs::{am_from_urls, parse_commit_refs, web_link, CommitRef};
use crate::retry::retry;
use crate::telemetry::Telemetry;

use super::message::{check_fields, commit_message_of};
use super::strategy::Strategy;
use super::strings::{self, ReviewStrings};
use super::types::{Change, Finding, ReviewType};
use super::verdict::Verdict;

/// Context used to double-check a BACKPORT that compares clean.
const BACKPORT_RECHECK_CONTEXT: usize = 3;

/// Upstream side of a comparison.
struct UpstreamSource {
    patch: String,
    /// Commit the patch was taken from (git strategies).
    commit: Option<CommitRef>,
    /// Mailing-list replies (fromlist).
    comments: Vec<UpstreamComment>,
}

impl UpstreamSource {
    fn from_commit(patch: String, commit: CommitRef) -> Self {
        Self {
            patch,
            commit: Some(commit),
            comments: Vec::new(),
        }
    }
}

/// Reviews a single change against its upstream source.
pub struct ChangeReviewer<'a> {
    project: &'a ProjectConfig,
    change: &'a Change,
    strategy: Strategy,
    strings: ReviewStrings,
    vcs: &'a dyn VersionControl,
    patches: &'a dyn PatchSource,
    msg_limit: usize,
    fetch_attempts: u32,
    log: Telemetry,
}

impl<'a> ChangeReviewer<'a> {
    pub fn new(
        project: &'a ProjectConfig,
        change: &'a Change,
        strategy: Strategy,
        vcs: &'a dyn VersionControl,
        patches: &'a dyn PatchSource,
    ) -> Self {
        Self {
            project,
            change,
            strategy,
            strings: ReviewStrings::for_strategy(strategy),
            vcs,
            patches,
            msg_limit: 16384,
            fetch_attempts: 4,
            log: Telemetry::default().component("review"),
        }
    }

    /// Upper bound on the review message size.
    pub fn msg_limit(mut self, msg_limit: usize) -> Self {
        self.msg_limit = msg_limit;
        self
    }

    /// Attempts made to fetch the candidate revision.
    pub fn fetch_attempts(mut self, attempts: u32) -> Self {
        self.fetch_attempts = attempts;
        self
    }

    pub fn telemetry(mut self, log: Telemetry) -> Self {
        self.log = log;
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Review the change.
    ///
    /// Returns `Ok(None)` when there is nothing to say. Errors are reserved
    /// for failures to obtain the candidate or upstream commit; everything
    /// wrong with the change itself is a finding.
    pub fn review(&self) -> Result<Option<Verdict>> {
        log::info!(
            target: self.log.target(),
            "{} reviewer handling {}",
            self.strategy,
            self.change
        );

        let mut verdict = Verdict::new();
        let candidate = self.fetch_candidate()?;

        let upstream = match self.strategy {
            Strategy::Upstream | Strategy::Fromgit => self.git_upstream(&candidate, &mut verdict)?,
            Strategy::Fromlist => self.fromlist_upstream(&candidate, &mut verdict),
            Strategy::Chromium => None,
        };

        self.check_commit_message(&candidate, &mut verdict);

        if let Some(upstream) = &upstream {
            self.compare(&upstream.patch, &candidate, &mut verdict)?;

            if !upstream.comments.is_empty() {
                self.carry_comments(&candidate, &upstream.comments, &mut verdict);
            }

            if let Some(commit) = &upstream.commit {
                match web_link(commit) {
                    Some(link) => verdict.set_web_link(link),
                    None => log::warn!(
                        target: self.log.target(),
                        "Could not derive web link for {}",
                        commit
                    ),
                }
            }
        }

        if verdict.is_empty() {
            log::info!(target: self.log.target(), "nothing to report for {}", self.change);
            return Ok(None);
        }
        Ok(Some(verdict))
    }

    fn fetch_candidate(&self) -> Result<String> {
        retry(self.fetch_attempts, &self.log, |attempt| {
            log::debug!(
                target: self.log.target(),
                "fetching {} from {} (attempt {})",
                self.change.revision_ref,
                self.project.gerrit_remote,
                attempt
            );
            self.vcs
                .fetch_change(&self.project.gerrit_remote, &self.change.revision_ref)
        })
    }

    // =========================================================================
    // Git strategies
    // =========================================================================

    fn git_upstream(&self, candidate: &str, verdict: &mut Verdict) -> Result<Option<UpstreamSource>> {
        let refs = parse_commit_refs(candidate);
        if refs.is_empty() {
            log::warn!(target: self.log.target(), "no upstream hash in {}", self.change);
            verdict.add_finding(self.missing_hash());
            return Ok(None);
        }

        let mut tried = Vec::with_capacity(refs.len());
        let mut found = None;
        for mut commit in refs.into_iter().rev() {
            if commit.remote().is_none() {
                commit.set_remote(&self.project.mainline_repo);
            }
            commit.set_default_branch(&self.project.mainline_branch);

            if let Err(e) = self.vcs.fetch_remote(&commit) {
                log::error!(target: self.log.target(), "Fetch remote ({}) failed: {}", commit, e);
            }

            if self.is_reachable(&commit) {
                found = Some(commit);
                break;
            }
            tried.push(commit);
        }

        let Some(commit) = found else {
            tried.reverse();
            verdict.add_finding(self.invalid_hash(&tried));
            return Ok(None);
        };

        let patch = self.vcs.show_commit(commit.sha())?;

        match self.strategy {
            Strategy::Upstream if !self.is_in_mainline(&commit) => {
                verdict.add_finding(
                    Finding::new(
                        ReviewType::NotInMainline,
                        strings::patch_not_in_mainline(self.change.is_backport()),
                    )
                    .with_vote(-1)
                    .notifying(),
                );
            }
            Strategy::Fromgit if self.is_in_mainline(&commit) => {
                verdict.add_finding(
                    Finding::new(ReviewType::InMainline, strings::PATCH_IN_MAINLINE)
                        .with_vote(-1)
                        .notifying(),
                );
            }
            _ => {}
        }

        match self.vcs.fixes_references(&commit) {
            Ok(fixes) if !fixes.is_empty() => verdict.add_finding(self.fixes_ref(&fixes)),
            Ok(_) => {}
            Err(e) => log::warn!(
                target: self.log.target(),
                "Fixes: lookup for {} failed: {}",
                commit,
                e
            ),
        }

        Ok(Some(UpstreamSource::from_commit(patch, commit)))
    }

    fn is_reachable(&self, commit: &CommitRef) -> bool {
        let Some(branch_ref) = commit.refs(true) else {
            return false;
        };
        self.vcs
            .is_ancestor(commit.sha(), &branch_ref)
            .unwrap_or_else(|e| {
                log::warn!(target: self.log.target(), "ancestry check for {} failed: {}", commit, e);
                false
            })
    }

    fn is_in_mainline(&self, commit: &CommitRef) -> bool {
        let mainline = CommitRef::new(commit.sha())
            .with_remote(&self.project.mainline_repo)
            .with_branch(&self.project.mainline_branch);

        if mainline.remote_name() != commit.remote_name()
            && let Err(e) = self.vcs.fetch_remote(&mainline)
        {
            log::error!(target: self.log.target(), "Fetch remote ({}) failed: {}", mainline, e);
        }

        self.is_reachable(&mainline)
    }

    fn missing_hash(&self) -> Finding {
        let msg = [
            strings::MISSING_HASH_HEADER,
            self.strings.hash_example,
            strings::MISSING_HASH_FOOTER,
        ]
        .concat();
        Finding::new(ReviewType::MissingHash, msg)
            .with_vote(-1)
            .notifying()
    }

    fn invalid_hash(&self, tried: &[CommitRef]) -> Finding {
        let mut msg = strings::INVALID_HASH_HEADER.to_string();
        for commit in tried {
            msg.push_str(&strings::invalid_hash_line(&commit.to_string()));
        }
        msg.push_str(self.strings.invalid_hash_footer);
        msg.push_str(self.strings.hash_example);
        Finding::new(ReviewType::InvalidHash, msg)
            .with_vote(-1)
            .notifying()
    }

    fn fixes_ref(&self, fixes: &[String]) -> Finding {
        let mut msg = strings::FOUND_FIXES_REF_HEADER.to_string();
        for line in fixes {
            msg.push_str(&strings::fixes_ref_line(line));
        }
        msg.push_str(strings::FIXES_REF_FOOTER);
        Finding::new(ReviewType::FixesRef, msg).notifying()
    }

    // =========================================================================
    // Fromlist strategy
    // =========================================================================

    fn fromlist_upstream(&self, candidate: &str, verdict: &mut Verdict) -> Option<UpstreamSource> {
        let urls = am_from_urls(candidate);
        if urls.is_empty() {
            verdict.add_finding(
                Finding::new(ReviewType::MissingAm, strings::MISSING_AM)
                    .with_vote(-1)
                    .notifying(),
            );
            return None;
        }

        let found = urls.iter().rev().find_map(|url| {
            match self.patches.fetch_raw_patch(url) {
                Ok(patch) => Some((url, patch)),
                Err(e) => {
                    log::debug!(target: self.log.target(), "cannot use {}: {}", url, e);
                    None
                }
            }
        });

        let Some((url, patch)) = found else {
            log::warn!(
                target: self.log.target(),
                "patch missing from archive, or archive host not allowed for {} ({})",
                self.change,
                urls.join(", ")
            );
            return None;
        };

        let comments = match self.patches.fetch_comments(url) {
            Ok(comments) => comments,
            Err(AuditError::Unsupported(msg)) => {
                log::debug!(target: self.log.target(), "no comments: {}", msg);
                Vec::new()
            }
            Err(e) => {
                log::warn!(target: self.log.target(), "Exception fetching comments: {}", e);
                Vec::new()
            }
        };

        Some(UpstreamSource {
            patch,
            commit: None,
            comments,
        })
    }

    /// Post every placeable list reply inline and summarize all of them.
    fn carry_comments(&self, candidate: &str, comments: &[UpstreamComment], verdict: &mut Verdict) {
        // Resolve across all replies at once so answers can thread onto
        // comments from a different mail.
        let mut inline: Vec<InlineComment> = Vec::new();
        let mut authors: Vec<&UpstreamComment> = Vec::new();
        for comment in comments {
            for entry in &comment.inline {
                inline.push(entry.clone());
                authors.push(comment);
            }
        }

        let lines: Vec<&str> = candidate.split('\n').collect();
        CommentPositionResolver::new(self.log.component("comments")).resolve(&lines, &mut inline);

        for (entry, author) in inline.iter().zip(authors) {
            let (Some(file), Some(line)) = (entry.file(), entry.line()) else {
                continue;
            };
            if !entry.is_resolved() {
                continue;
            }

            let quoted: String = entry.body().iter().map(|l| format!("> {}\n", l)).collect();
            verdict.add_inline_comment(
                file,
                line,
                strings::upstream_inline_comment(
                    &author.author_name,
                    &author.author_email,
                    &quoted,
                    &author.url,
                ),
            );
        }

        let mut msg = strings::UPSTREAM_COMMENT_HEADER.to_string();
        for comment in comments {
            msg.push_str(&strings::upstream_comment_line(
                &comment.author_name,
                &comment.author_email,
                &comment.url,
            ));
        }
        verdict.add_finding(Finding::new(ReviewType::UpstreamComments, msg));
    }

    // =========================================================================
    // Shared checks
    // =========================================================================

    fn check_commit_message(&self, candidate: &str, verdict: &mut Verdict) {
        let message = self
            .change
            .commit_message
            .as_deref()
            .unwrap_or_else(|| commit_message_of(candidate));

        let missing = check_fields(
            message,
            &self.change.uploader_name,
            &self.change.uploader_email,
            self.project.ignore_sob,
        );
        if !missing.is_empty() {
            verdict.add_finding(
                Finding::new(ReviewType::MissingFields, strings::missing_fields(&missing))
                    .with_vote(-1)
                    .notifying(),
            );
        }
    }

    fn compare(&self, upstream: &str, candidate: &str, verdict: &mut Verdict) -> Result<()> {
        let comparator = DiffComparator::new(self.log.component("compare"));
        let is_backport = self.change.is_backport();

        let mut diff = comparator.compare(upstream, candidate, 0)?;
        if is_backport && diff.is_empty() {
            // A clean BACKPORT gets a second look with context before the
            // prefix is called out.
            diff = comparator.compare(upstream, candidate, BACKPORT_RECHECK_CONTEXT)?;
        }

        log::debug!(
            target: self.log.target(),
            "{} differs from upstream in {} line(s)",
            self.change,
            diff.len()
        );

        verdict.add_finding(self.diff_finding(&diff, is_backport));
        Ok(())
    }

    fn diff_finding(&self, diff: &[String], is_backport: bool) -> Finding {
        if diff.is_empty() {
            return if is_backport {
                let msg = [strings::CLEAN_BACKPORT_HEADER, self.strings.clean_backport_footer].concat();
                Finding::new(ReviewType::IncorrectPrefix, msg)
                    .with_vote(-1)
                    .notifying()
            } else {
                Finding::new(ReviewType::Success, strings::SUCCESS).with_vote(1)
            };
        }

        let formatted = format_diff(diff, self.msg_limit);

        if self.strategy.is_git() {
            return if is_backport {
                let msg = [strings::DIFFERS_HEADER, strings::BACKPORT_DIFF, formatted.as_str()].concat();
                Finding::new(ReviewType::Backport, msg)
            } else {
                let msg = [strings::DIFFERS_HEADER, strings::ALTERED_UPSTREAM, formatted.as_str()].concat();
                Finding::new(ReviewType::AlteredUpstream, msg)
                    .with_vote(-1)
                    .notifying()
            };
        }

        if !self.project.review_fromlist_backports {
            return Finding::new(ReviewType::ClearVotes, strings::CLEAR_VOTES);
        }
        if is_backport {
            Finding::new(ReviewType::Backport, [strings::BACKPORT_FROMLIST, formatted.as_str()].concat())
        } else {
            Finding::new(ReviewType::AlteredUpstream, [strings::ALTERED_FROMLIST, formatted.as_str()].concat())
        }
    }
}
