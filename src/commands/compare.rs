//! Implementation of the `backport-audit compare` command.

use super::read_input;
use crate::cli::CompareArgs;
use crate::diff::DiffComparator;
use crate::error::Result;
use crate::exit_codes;
use crate::telemetry::Telemetry;

/// Compare two patch files and print the delta.
pub fn cmd_compare(args: CompareArgs, log: &Telemetry) -> Result<i32> {
    let upstream = read_input(&args.upstream)?;
    let candidate = read_input(&args.candidate)?;

    let delta = compare_files(&upstream, &candidate, args.context, log)?;
    if delta.is_empty() {
        println!("No differences at context {}.", args.context);
        return Ok(exit_codes::SUCCESS);
    }

    for line in &delta {
        println!("{}", line);
    }
    Ok(exit_codes::ALTERED)
}

pub(super) fn compare_files(
    upstream: &str,
    candidate: &str,
    context: usize,
    log: &Telemetry,
) -> Result<Vec<String>> {
    DiffComparator::new(log.component("diff")).compare(upstream, candidate, context)
}
