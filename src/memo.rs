//! Memo of changes already judged, so repeated polling stays idempotent.
//!
//! The memo is a JSON object keyed by change number. Each entry records the
//! revision that was judged, the vote given and when.

use crate::error::{AuditError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Outcome recorded for one change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoEntry {
    pub revision: u32,
    pub vote: i8,
    /// When the verdict was recorded (RFC3339).
    pub reviewed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewMemo {
    entries: BTreeMap<u64, MemoEntry>,
}

impl ReviewMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a memo from a JSON file. A missing file is an empty memo.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            AuditError::UserError(format!(
                "failed to read review memo '{}': {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            AuditError::UserError(format!(
                "failed to parse review memo '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Write the memo as pretty JSON, replacing the file atomically.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AuditError::UserError(format!("failed to serialize review memo: {}", e)))?;
        write_atomic(path.as_ref(), json.as_bytes())
    }

    /// True when `revision` of `change` has already been judged.
    pub fn already_judged(&self, change: u64, revision: u32) -> bool {
        self.entries
            .get(&change)
            .is_some_and(|entry| entry.revision == revision)
    }

    /// Record a verdict for `change` at `revision`, stamped now.
    pub fn record(&mut self, change: u64, revision: u32, vote: i8) {
        self.record_at(change, revision, vote, Utc::now());
    }

    pub fn record_at(&mut self, change: u64, revision: u32, vote: i8, reviewed_at: DateTime<Utc>) {
        self.entries.insert(
            change,
            MemoEntry {
                revision,
                vote,
                reviewed_at,
            },
        );
    }

    pub fn entry(&self, change: u64) -> Option<&MemoEntry> {
        self.entries.get(&change)
    }

    /// Whole days since `change` was last judged, `None` if it never was.
    pub fn days_since_last_review(&self, change: u64) -> Option<i64> {
        self.entries
            .get(&change)
            .map(|entry| Utc::now().signed_duration_since(entry.reviewed_at).num_days())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Write to `.{name}.tmp` beside the target, sync, then rename over it.
fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let io_err = |what: &str, target: &Path, e: std::io::Error| {
        AuditError::UserError(format!("failed to {} '{}': {}", what, target.display(), e))
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !parent.exists() {
        fs::create_dir_all(&parent).map_err(|e| io_err("create directory", &parent, e))?;
    }

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| AuditError::UserError(format!("invalid memo path '{}'", path.display())))?;
    let temp_path = parent.join(format!(".{}.tmp", name));

    let mut file = File::create(&temp_path).map_err(|e| io_err("create", &temp_path, e))?;
    if let Err(e) = file.write_all(content).and_then(|_| file.sync_all()) {
        let _ = fs::remove_file(&temp_path);
        return Err(io_err("write", &temp_path, e));
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        io_err("replace", path, e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_empty_memo() {
        let temp_dir = TempDir::new().unwrap();
        let memo = ReviewMemo::load(temp_dir.path().join("memo.json")).unwrap();
        assert!(memo.is_empty());
    }

    #[test]
    fn judged_only_at_recorded_revision() {
        let mut memo = ReviewMemo::new();
        memo.record(1234, 2, 1);

        assert!(memo.already_judged(1234, 2));
        assert!(!memo.already_judged(1234, 3));
        assert!(!memo.already_judged(999, 2));
    }

    #[test]
    fn days_since_last_review() {
        let mut memo = ReviewMemo::new();
        assert_eq!(memo.days_since_last_review(1), None);

        memo.record_at(1, 1, -1, Utc::now() - Duration::days(3) - Duration::hours(2));
        assert_eq!(memo.days_since_last_review(1), Some(3));

        memo.record(1, 2, 0);
        assert_eq!(memo.days_since_last_review(1), Some(0));
    }

    #[test]
    fn save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state").join("memo.json");

        let mut memo = ReviewMemo::new();
        memo.record(42, 5, -1);
        memo.save(&path).unwrap();

        let loaded = ReviewMemo::load(&path).unwrap();
        assert_eq!(loaded, memo);
        assert_eq!(loaded.entry(42).map(|e| e.vote), Some(-1));
        assert!(!temp_dir.path().join("state").join(".memo.json.tmp").exists());
    }

    #[test]
    fn corrupt_memo_is_user_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("memo.json");
        fs::write(&path, "not json").unwrap();

        let err = ReviewMemo::load(&path).unwrap_err();
        assert!(matches!(err, AuditError::UserError(_)));
    }
}
