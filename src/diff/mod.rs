//! Patch differencing engine.
//!
//! - `classify`: line taxonomy shared by every consumer of patch text
//! - `kruft`: drops structural noise while keeping a bounded context window
//! - `compare`: Myers delta between an upstream patch and a backport, with
//!   file headers re-attached once per file that actually differs

pub mod classify;
mod compare;
mod helpers;
pub mod kruft;


// Re-export public API
pub use classify::{classify_line, line_kind, DiffLine, HunkRange, LineKind};
pub use compare::{compare_diffs, DiffComparator};
pub use helpers::format_diff;
pub use kruft::{KruftStripper, MAX_CONTEXT};
