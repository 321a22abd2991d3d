//! Operate command handler

use crate::cli::{OperateArgs, OutputFormat};
use crate::error::{Error, Result};
use crate::handlers::utils;
use colored::Colorize;
use std::fs;
use tracing::{info, instrument, warn};

/// Handle the operate command
#[instrument(skip(args), fields(schema = %args.schema.display(), data = %args.data.display()))]
pub async fn handle_operate(args: OperateArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let engine = utils::build_engine(&args.schema, &args.engine)?;
    let data = utils::read_data(&args.data)?;

    info!("Operating on {} with {}", args.data.display(), args.schema.display());
    let transformed = match engine.operate(&data) {
        Ok(transformed) => transformed,
        Err(errors) => {
            warn!("Operate pipeline aborted");
            let message = errors
                .get_strings(&args.engine.locale, "%message")
                .join("; ");
            eprintln!("{} {}", "✗".red(), message);
            return Err(Error::OperateFailed { message });
        }
    };

    let rendered = match format {
        OutputFormat::JsonPretty | OutputFormat::Human => {
            serde_json::to_string_pretty(&transformed)?
        }
        OutputFormat::Json => serde_json::to_string(&transformed)?,
    };

    match args.save_to {
        Some(path) => {
            fs::write(&path, rendered)?;
            if !quiet {
                println!("{} saved to {}", "✓".green(), path.display());
            }
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
