//! Exit code constants for the backport-audit CLI.
//!
//! - 0: Success (or a clean comparison)
//! - 1: User error (bad args, invalid config, contract violation)
//! - 2: Patch altered (comparison produced a delta, or review voted negative)
//! - 3: Git operation failure
//! - 4: Patch source failure (fetch failed, unsupported, retries exhausted)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid config, or an invalid context budget.
pub const USER_ERROR: i32 = 1;

/// The compared patches differ, or the review produced a negative vote.
pub const ALTERED: i32 = 2;

/// Git operation failure: fetch, show, merge-base errors.
pub const GIT_FAILURE: i32 = 3;

/// Patch source failure: archive fetch failed or is unsupported for the host.
pub const FETCH_FAILURE: i32 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, ALTERED, GIT_FAILURE, FETCH_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
    }
}
