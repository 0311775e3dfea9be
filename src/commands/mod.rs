//! Command implementations for backport-audit.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Every command returns the process exit code on success
//! so that "patch altered" can be reported without being an error.

mod compare;
mod refs;
mod resolve_comments;
mod review;

#[cfg(test)]
mod tests;

use crate::cli::Command;
use crate::error::{AuditError, Result};
use crate::telemetry::Telemetry;
use std::path::Path;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command, log: &Telemetry) -> Result<i32> {
    match command {
        Command::Compare(args) => compare::cmd_compare(args, log),
        Command::Refs(args) => refs::cmd_refs(args),
        Command::ResolveComments(args) => resolve_comments::cmd_resolve_comments(args, log),
        Command::Review(args) => review::cmd_review(args, log),
    }
}

/// Read an input file named on the command line.
fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| AuditError::UserError(format!("failed to read '{}': {}", path.display(), e)))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AuditError::UserError(format!("failed to serialize output: {}", e)))
}
