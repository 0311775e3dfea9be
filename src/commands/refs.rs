//! Implementation of the `backport-audit refs` command.

use super::{read_input, to_json};
use crate::cli::RefsArgs;
use crate::error::Result;
use crate::exit_codes;
use crate::refs::{am_from_urls, links_from_patch, parse_commit_refs, web_link, CommitRef};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(super) struct RefEntry {
    #[serde(flatten)]
    pub commit: CommitRef,
    pub web_link: Option<String>,
}

/// Provenance footers found in one commit message.
#[derive(Debug, Serialize)]
pub(super) struct RefsReport {
    pub cherry_picks: Vec<RefEntry>,
    pub links: Vec<String>,
    pub am_from: Vec<String>,
}

impl RefsReport {
    pub fn from_text(text: &str) -> Self {
        let cherry_picks = parse_commit_refs(text)
            .into_iter()
            .map(|commit| RefEntry {
                web_link: web_link(&commit),
                commit,
            })
            .collect();

        Self {
            cherry_picks,
            links: links_from_patch(text),
            am_from: am_from_urls(text),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cherry_picks.is_empty() && self.links.is_empty() && self.am_from.is_empty()
    }

    pub fn render_text(&self) -> String {
        if self.is_empty() {
            return "No provenance footers found.\n".to_string();
        }

        let mut out = String::new();
        if !self.cherry_picks.is_empty() {
            out.push_str("Cherry-picked from:\n");
            for entry in &self.cherry_picks {
                out.push_str(&format!("  {}\n", entry.commit));
                if let Some(name) = entry.commit.remote_name() {
                    out.push_str(&format!("    remote name: {}\n", name));
                }
                if let Some(link) = &entry.web_link {
                    out.push_str(&format!("    web: {}\n", link));
                }
            }
        }
        if !self.links.is_empty() {
            out.push_str("Links:\n");
            for link in &self.links {
                out.push_str(&format!("  {}\n", link));
            }
        }
        if !self.am_from.is_empty() {
            out.push_str("Applied from:\n");
            for url in &self.am_from {
                out.push_str(&format!("  {}\n", url));
            }
        }
        out
    }
}

/// Print the footers of a commit message or patch file.
pub fn cmd_refs(args: RefsArgs) -> Result<i32> {
    let text = read_input(&args.file)?;
    let report = RefsReport::from_text(&text);

    if args.json {
        println!("{}", to_json(&report)?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(exit_codes::SUCCESS)
}
