//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Schematics CLI - Schema-driven validation and transformation of JSON records
///
/// Loads a schema file and a data file, runs the validation engine or the
/// operator pipeline over the data, and renders the result.
#[derive(Parser, Debug)]
#[command(
    name = "schematics",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a data file against a schema
    Validate(ValidateArgs),

    /// Run a data file through the schema's operator pipelines
    Operate(OperateArgs),
}

/// Shared engine settings for both subcommands
#[derive(Parser, Debug)]
pub struct EngineArgs {
    /// Path separator used for flattening and target matching
    #[arg(long, default_value = ".", env = "SCHEMATICS_SEPARATOR")]
    pub separator: String,

    /// Flat key consulted for an explicit array element identifier
    #[arg(long, default_value = "id")]
    pub array_id_key: String,

    /// Locale for error messages
    #[arg(short, long, default_value = "en", env = "SCHEMATICS_LOCALE")]
    pub locale: String,
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the schema file (JSON)
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Path to the data file (JSON object or array of objects)
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Template for rendered error lines
    ///
    /// Placeholders: %target, %validator, %message, %value
    #[arg(long, default_value = "%target: %message")]
    pub template: String,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Arguments for the operate command
#[derive(Parser, Debug)]
pub struct OperateArgs {
    /// Path to the schema file (JSON)
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Path to the data file (JSON object or array of objects)
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Output file path (stdout if not specified)
    #[arg(long = "save-to")]
    pub save_to: Option<PathBuf>,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// Pretty-printed JSON output
    JsonPretty,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        use is_terminal::IsTerminal;
        !self.no_color && std::io::stdout().is_terminal()
    }
}
