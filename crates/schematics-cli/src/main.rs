//! Schematics CLI - Validate and transform JSON records against a schema
//!
//! This is the main entry point for the Schematics CLI application,
//! providing commands for validating data files and running them through
//! a schema's operator pipelines.

mod cli;
mod error;
mod handlers;
mod logging;

use cli::{Cli, Commands};
use colored::control;
use error::Result;
use std::process;
use tracing::instrument;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    control::set_override(cli.use_color());

    if let Err(e) = logging::init_logging(cli.verbosity_level(), cli.quiet) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli).await {
        Ok(()) => {
            process::exit(0);
        }
        Err(e) => {
            eprintln!(
                "{}",
                error::format_error(&e, control::SHOULD_COLORIZE.should_colorize())
            );
            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip(cli), fields(command = ?cli.command))]
async fn run(cli: Cli) -> Result<()> {
    let format = cli.output;
    let quiet = cli.quiet;

    match cli.command {
        Commands::Validate(args) => handlers::handle_validate(args, format, quiet).await,
        Commands::Operate(args) => handlers::handle_operate(args, format, quiet).await,
    }
}
