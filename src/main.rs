//! backport-audit: checks backported patches against their upstream source.
//!
//! This is the main entry point for the `backport-audit` CLI. It parses
//! arguments, installs the logger, dispatches to the appropriate command
//! handler, and handles errors with proper exit codes.

use backport_audit::cli::Cli;
use backport_audit::telemetry::{self, Telemetry};
use backport_audit::commands;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    telemetry::init(cli.verbose, cli.chatty);
    let log = Telemetry::new(cli.chatty);

    match commands::dispatch(cli.command, &log) {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
