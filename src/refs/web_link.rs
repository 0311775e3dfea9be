//! Browsable links for upstream commits.

use regex::Regex;
use std::sync::LazyLock;

use super::commit_ref::CommitRef;

static URL_PARTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z][a-z0-9+.-]*://([^/]*)(.*)$").expect("Invalid URL regex")
});

static W1_TREE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/srv/git/(.*)\.git$").expect("Invalid w1.fi regex"));

fn cgit_commit_path(commit: &CommitRef) -> String {
    let path = format!("/commit/?id={}", commit.sha());
    if let Some(branch) = commit.branch() {
        return format!("{}&head={}", path, branch);
    }
    if let Some(tag) = commit.tag() {
        return format!("{}&tag={}", path, tag);
    }
    path
}

/// Web URL showing `commit` on its remote's frontend.
///
/// Known hosts are kernel.org/cgit style trees, GitHub, infradead, linuxtv and
/// w1.fi. Returns `None` for a missing remote or an unknown host.
pub fn web_link(commit: &CommitRef) -> Option<String> {
    let remote = commit.remote()?;
    let caps = URL_PARTS.captures(remote)?;
    let host = caps.get(1).map_or("", |m| m.as_str());
    let path = caps.get(2).map_or("", |m| m.as_str());

    if host == "git.kernel.org" {
        Some(format!("https://{}{}{}", host, path, cgit_commit_path(commit)))
    } else if host.contains("github.com") {
        let path = path.strip_suffix(".git").unwrap_or(path);
        Some(format!("https://{}{}/commit/{}", host, path, commit.sha()))
    } else if host.contains("anongit") {
        Some(format!(
            "https://{}{}{}",
            host.replace("anongit", "cgit"),
            path,
            cgit_commit_path(commit)
        ))
    } else if host.contains("git.infradead.org") {
        Some(format!("http://{}{}/commit/{}", host, path, commit.sha()))
    } else if host.contains("linuxtv.org") {
        Some(format!("https://git.linuxtv.org{}{}", path, cgit_commit_path(commit)))
    } else if host.contains("w1.fi") {
        let tree = W1_TREE.captures(path)?;
        Some(format!("https://w1.fi/cgit/{}{}", &tree[1], cgit_commit_path(commit)))
    } else {
        None
    }
}
