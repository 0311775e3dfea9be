//! Where FROMLIST patches and their mailing-list replies come from.
//!
//! [`ArchivePatchSource`] serves them from a local mirror of the allowed
//! patch archives. A patch url `https://<host>/patch/<id>/` maps to the
//! directory `<root>/<host>/<path>/<id>/`, which holds the raw patch in
//! `raw` and the archive's comment records in `comments.json`.

use crate::comments::{CommentRecord, UpstreamComment};
use crate::config::PatchworkConfig;
use crate::error::{AuditError, Result};
use crate::telemetry::Telemetry;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static ARCHIVE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://([^/?#]+)(/[^?#]*)?").expect("Invalid archive url regex")
});

static PATCH_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/([a-z/]*)/([0-9]+)/?").expect("Invalid patch path regex"));

/// Source of mailing-list patches.
pub trait PatchSource {
    /// The patch as it was posted (mbox-style text).
    fn fetch_raw_patch(&self, url: &str) -> Result<String>;

    /// Replies to the patch. Archives that do not keep replies return
    /// [`AuditError::Unsupported`].
    fn fetch_comments(&self, url: &str) -> Result<Vec<UpstreamComment>>;
}

/// Allowed archive and patch id a url points at.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PatchLocation<'a> {
    archive: &'a PatchworkConfig,
    id: u64,
}

/// [`PatchSource`] over a local mirror of the allowed patch archives.
#[derive(Debug, Clone)]
pub struct ArchivePatchSource {
    root: PathBuf,
    patchworks: Vec<PatchworkConfig>,
    log: Telemetry,
}

impl ArchivePatchSource {
    pub fn new<P: Into<PathBuf>>(root: P, patchworks: Vec<PatchworkConfig>, log: Telemetry) -> Self {
        Self {
            root: root.into(),
            patchworks,
            log,
        }
    }

    fn locate(&self, url: &str) -> Result<PatchLocation<'_>> {
        let malformed = || AuditError::UserError(format!("malformed patch url '{}'", url));

        let caps = ARCHIVE_URL.captures(url).ok_or_else(malformed)?;
        let host = caps.get(1).map_or("", |m| m.as_str());
        let path = caps.get(2).map_or("", |m| m.as_str());

        let id = PATCH_PATH
            .captures(path)
            .and_then(|c| c.get(2))
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .ok_or_else(malformed)?;

        let archive = self
            .patchworks
            .iter()
            .find(|p| p.serves(host))
            .ok_or_else(|| {
                AuditError::UserError(format!("patch archive host '{}' is not allowed", host))
            })?;

        Ok(PatchLocation { archive, id })
    }

    fn patch_dir(&self, location: &PatchLocation<'_>) -> PathBuf {
        let mut dir = self.root.join(&location.archive.host);
        let prefix = location.archive.path.trim_matches('/');
        if !prefix.is_empty() {
            dir.push(prefix);
        }
        dir.join(location.id.to_string())
    }

    fn read(&self, path: &Path) -> Result<String> {
        log::debug!(target: self.log.target(), "reading {}", path.display());
        std::fs::read_to_string(path)
            .map_err(|e| AuditError::FetchError(format!("failed to read '{}': {}", path.display(), e)))
    }
}

impl PatchSource for ArchivePatchSource {
    fn fetch_raw_patch(&self, url: &str) -> Result<String> {
        let location = self.locate(url)?;
        self.read(&self.patch_dir(&location).join("raw"))
    }

    fn fetch_comments(&self, url: &str) -> Result<Vec<UpstreamComment>> {
        let location = self.locate(url)?;
        if !location.archive.has_comments {
            return Err(AuditError::Unsupported(format!(
                "{} does not serve comments",
                location.archive.name
            )));
        }

        let path = self.patch_dir(&location).join("comments.json");
        let content = self.read(&path)?;
        let records: Vec<CommentRecord> = serde_json::from_str(&content).map_err(|e| {
            AuditError::FetchError(format!("failed to parse '{}': {}", path.display(), e))
        })?;

        Ok(records.into_iter().map(UpstreamComment::from).collect())
    }
}
