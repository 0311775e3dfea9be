//! backport-audit: provenance and differencing engine for backported patches.
//!
//! A candidate backport is compared with the upstream commit or mailing-list
//! patch its commit message points at. The library locates the upstream
//! source from footers (`refs`), strips structural noise and computes a
//! canonical delta (`diff`), carries mailing-list replies over to the
//! candidate (`comments`) and folds everything into a review verdict
//! (`review`).

pub mod cli;
pub mod commands;
pub mod comments;
pub mod config;
pub mod diff;
pub mod error;
pub mod exit_codes;
pub mod git;
pub mod memo;
pub mod patch_source;
pub mod refs;
pub mod retry;
pub mod review;
pub mod telemetry;

#[cfg(test)]
mod test_support;
