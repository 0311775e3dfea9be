//! Review orchestration.
//!
//! - `strategy`: picks the reviewer for a change from its subject prefix
//! - `reviewer`: locates the upstream source and collects findings
//! - `verdict`: merges findings into one vote and renders the message
//! - `message`: required commit-message trailers
//! - `strings`: message templates

mod message;
mod reviewer;
mod strategy;
pub mod strings;
mod types;
mod verdict;


// Re-export public API
pub use message::{check_fields, commit_message_of};
pub use reviewer::ChangeReviewer;
pub use strategy::{select_strategy, Strategy};
pub use strings::ReviewStrings;
pub use types::{Change, Finding, ReviewType};
pub use verdict::{InlineNote, ReviewInput, Verdict};
