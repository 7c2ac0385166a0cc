//! postmark: command-line front end for the Postmark API
//!
//! Entry point for the postmark binary.

use postmark::config::{Cli, Command, ValidatedConfig, write_default_config};
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, print_config_hint, print_runtime_hint, setup_tracing};
use run::Job;

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Build the request from the subcommand before touching credentials
    let job = match &cli.command {
        Command::Init { output } => return handle_init(output),
        Command::Send(args) => args.to_email().map(Job::Send),
        Command::SendTemplate(args) => args.to_email().map(Job::SendTemplate),
        Command::Templates(command) => Job::from_templates(command),
    };

    let loaded = job.and_then(|job| ValidatedConfig::load(&cli).map(|config| (job, config)));
    let (job, config) = match loaded {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    setup_tracing(config.verbose);
    tracing::debug!("{config}");

    run_application(config, job)
}

/// Handles the `init` subcommand.
fn handle_init(output: &std::path::Path) -> ExitCode {
    match write_default_config(output) {
        Ok(()) => {
            println!("Configuration template written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Runs the requested operation with the given configuration.
///
/// Excluded from coverage - requires async runtime and network access.
#[cfg(not(tarpaulin_include))]
fn run_application(config: ValidatedConfig, job: Job) -> ExitCode {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to create Tokio runtime: {e}");
            return exit_code::runtime_error();
        }
    };

    match runtime.block_on(run::execute(config, job)) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            print_runtime_hint(&e);
            exit_code::runtime_error()
        }
    }
}
