//! Upstream provenance references embedded in commit messages.
//!
//! Three footers are understood:
//! - `(cherry picked from commit <sha> [<remote> [<branch>|tag <tag>]])`
//! - `(am from <url>)` for patches taken from a mailing-list archive
//! - `Link: <url>` for mailing-list discovery

mod commit_ref;
mod parser;
mod web_link;


// Re-export public API
pub use commit_ref::{strip_special, CommitRef};
pub use parser::{am_from_urls, last_commit_ref, links_from_patch, parse_commit_refs};
pub use web_link::web_link;
