//! # Backport Warden CLI
//!
//! Command-line interface for checking the backport labels and milestone of a
//! pull request.
//!
//! The binary is meant to run as a step of a GitHub Actions workflow triggered
//! by a `pull_request` or `pull_request_target` event. It reads the pull
//! request from the event payload and its settings from environment variables.
//!
//! # Commands
//!
//! - `check` - Check the backport labels and milestone of a pull request
//! - `config` - Create or show the configuration file
//!
//! # Exit codes
//!
//! | code | meaning              |
//! |------|----------------------|
//! | 0    | all checks passed    |
//! | 1    | a check failed       |
//! | 2    | configuration error  |
//! | 3    | authentication error |
//! | 4    | network or API error |
//! | 5    | invalid arguments    |
//!
//! # Examples
//!
//! ```bash
//! # Check the pull request of the current workflow run
//! SET_MILESTONE=true backport-warden check
//!
//! # Check a pull request locally
//! backport-warden check --repository owner/repo --pr-number 123 --token <token>
//!
//! # Initialize configuration
//! backport-warden config init
//! ```

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

use std::process::{ExitCode, Termination};

use clap::{Parser, Subcommand};
use tracing::{error, info};

/// Command implementations for the CLI.
mod commands;

/// Configuration management for the CLI.
mod config;

/// Error types specific to the CLI.
mod errors;

use commands::{check::CheckArgs, config_cmd::ConfigCommands};
use errors::CliError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter
const LOG_FILTER_ENV: &str = "BACKPORT_WARDEN_LOG";

/// Command-line interface structure for Backport Warden.
///
/// This struct defines the top-level CLI interface using clap's derive API.
/// It includes global options like verbose logging and the main command structure.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

/// Available commands for the Backport Warden CLI.
#[derive(Subcommand)]
enum Commands {
    /// Check the backport labels and milestone of a pull request
    Check(CheckArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Installs the log subscriber. `--verbose` turns on debug logging for
/// Backport Warden when no filter is set in the environment.
fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "backport_warden=debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Main entry point for the Backport Warden CLI.
///
/// Parses the command line, initializes logging and dispatches to the
/// command handler. Errors are reported on stderr and turned into the exit
/// code of the process.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            if e.use_stderr() {
                return CliError::InvalidArguments(e.kind().to_string()).report();
            }

            return ExitCode::SUCCESS;
        }
    };

    init_logging(cli.verbose);
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let result = match cli.command {
        Commands::Check(args) => commands::check::execute(args).await,
        Commands::Config(cmd) => commands::config_cmd::execute(cmd).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            e.report()
        }
    }
}
