//! Bounded retry for collaborator calls.

use crate::error::{AuditError, Result};
use crate::telemetry::Telemetry;

/// Run `op` up to `attempts` times.
///
/// `op` receives the 1-based attempt number. Transient failures (git and
/// fetch errors) are logged and retried; any other error is returned as is.
/// When every attempt fails, the last error is wrapped in
/// [`AuditError::RetriesExhausted`].
pub fn retry<T, F>(attempts: u32, log: &Telemetry, mut op: F) -> Result<T>
where
    F: FnMut(u32) -> Result<T>,
{
    if attempts == 0 {
        return Err(AuditError::UserError(
            "retry needs at least one attempt".to_string(),
        ));
    }

    let mut attempt = 0;
    loop {
        attempt += 1;
        match op(attempt) {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < attempts => {
                log::warn!(
                    target: log.target(),
                    "attempt {}/{} failed, retrying: {}",
                    attempt,
                    attempts,
                    err
                );
            }
            Err(err) if err.is_transient() => {
                log::error!(
                    target: log.target(),
                    "attempt {}/{} failed, giving up: {}",
                    attempt,
                    attempts,
                    err
                );
                return Err(AuditError::RetriesExhausted {
                    attempts,
                    last: Box::new(err),
                });
            }
            Err(err) => return Err(err),
        }
    }
}
