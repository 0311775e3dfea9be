//! Configuration model for backport-audit.
//!
//! A single YAML file lists the reviewed projects with their mainline tree,
//! review-system remote, accepted subject prefixes and patch archives.
//! Parsing is forward compatible (unknown fields are ignored), optional
//! fields have defaults, and values are validated after parsing.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::ReviewConfig;
pub use types::{PatchworkConfig, ProjectConfig};
