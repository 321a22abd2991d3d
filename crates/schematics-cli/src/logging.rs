//! Logging setup for the CLI
//!
//! Verbosity flags map to a default tracing level; `RUST_LOG` takes
//! precedence when set. All diagnostics go to stderr so command output on
//! stdout stays machine-readable.

use crate::error::{Error, Result};
use tracing_subscriber::EnvFilter;

fn default_level(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize the global tracing subscriber.
pub fn init_logging(verbosity: u8, quiet: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity, quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|e| Error::other(format!("Failed to initialize logging: {}", e)))
}
