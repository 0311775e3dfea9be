//! Logging handle passed to every component at construction.
//!
//! Components never log through a module-global target. Each receives a
//! `Telemetry` scoped to its own target and logs with
//! `log::warn!(target: self.log.target(), ...)`. The `log` facade is backed by
//! `env_logger`, installed once by the binary.

use log::LevelFilter;

/// Root log target; component targets are `backport_audit::<component>`.
pub const ROOT_TARGET: &str = "backport_audit";

/// Explicit logging handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Telemetry {
    target: String,
    chatty: bool,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Telemetry {
    /// Create a root handle. `chatty` enables per-line trace logging in the
    /// diff engine.
    pub fn new(chatty: bool) -> Self {
        Self {
            target: ROOT_TARGET.to_string(),
            chatty,
        }
    }

    /// Derive a handle for a named component.
    pub fn component(&self, name: &str) -> Self {
        Self {
            target: format!("{}::{}", self.target, name),
            chatty: self.chatty,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn chatty(&self) -> bool {
        self.chatty
    }
}

/// Install the `env_logger` backend.
///
/// `RUST_LOG` still overrides the level chosen from the flags.
pub fn init(verbose: bool, chatty: bool) {
    let level = if chatty {
        LevelFilter::Trace
    } else if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };

    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_secs()
        .try_init();
}
