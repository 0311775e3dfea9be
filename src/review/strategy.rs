//! Which reviewer handles a change.

use serde::Serialize;
use std::fmt;

use super::types::Change;
use crate::config::ProjectConfig;

/// How the upstream source of a change is located and judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Cherry-pick of a mainline commit.
    Upstream,
    /// Cherry-pick from a maintainer tree, not yet in mainline.
    Fromgit,
    /// Patch taken from a mailing-list archive.
    Fromlist,
    /// Downstream-only change.
    Chromium,
}

impl Strategy {
    /// Strategies whose upstream source is a git commit.
    pub fn is_git(self) -> bool {
        matches!(self, Strategy::Upstream | Strategy::Fromgit)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Upstream => "upstream",
            Strategy::Fromgit => "fromgit",
            Strategy::Fromlist => "fromlist",
            Strategy::Chromium => "chromium",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `days_since_last_review` is `None` when the change was never reviewed.
type Predicate = fn(&ProjectConfig, &Change, Option<i64>) -> bool;

const BLOCKED_PREFIXES: &[&str] = &["Revert ", "PRE-UPSTREAM", "TO-UPSTREAM", "WIP"];

fn is_blocked(change: &Change) -> bool {
    change.subject.contains("FIXUP")
        || BLOCKED_PREFIXES
            .iter()
            .any(|p| change.subject.starts_with(p))
}

fn tagged(project: &ProjectConfig, change: &Change, prefix: &str) -> bool {
    project.allows(prefix) && change.subject.contains(prefix)
}

fn fromgit(project: &ProjectConfig, change: &Change, _days: Option<i64>) -> bool {
    tagged(project, change, "FROMGIT")
}

fn fromlist(project: &ProjectConfig, change: &Change, days: Option<i64>) -> bool {
    days.is_none() && tagged(project, change, "FROMLIST")
}

fn upstream(project: &ProjectConfig, change: &Change, days: Option<i64>) -> bool {
    if days.is_some() {
        return false;
    }
    let subject = &change.subject;
    tagged(project, change, "UPSTREAM")
        || (tagged(project, change, "BACKPORT")
            && !subject.contains("FROMGIT")
            && !subject.contains("FROMLIST"))
}

fn chromium(project: &ProjectConfig, change: &Change, days: Option<i64>) -> bool {
    days.is_none() && tagged(project, change, "CHROMIUM")
}

/// Evaluated top to bottom; the first match wins.
const STRATEGIES: &[(Predicate, Strategy)] = &[
    (fromgit, Strategy::Fromgit),
    (fromlist, Strategy::Fromlist),
    (upstream, Strategy::Upstream),
    (chromium, Strategy::Chromium),
];

/// Pick the strategy for a change, or `None` when it should not be reviewed.
pub fn select_strategy(
    project: &ProjectConfig,
    change: &Change,
    days_since_last_review: Option<i64>,
) -> Option<Strategy> {
    if is_blocked(change) {
        return None;
    }

    STRATEGIES
        .iter()
        .find(|(matches, _)| matches(project, change, days_since_last_review))
        .map(|(_, strategy)| *strategy)
}
