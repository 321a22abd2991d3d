//! Validate command handler

use crate::cli::{OutputFormat, ValidateArgs};
use crate::error::{Error, Result};
use crate::handlers::utils;
use colored::Colorize;
use tracing::{info, instrument, warn};

/// Handle the validate command
#[instrument(skip(args), fields(schema = %args.schema.display(), data = %args.data.display()))]
pub async fn handle_validate(args: ValidateArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let engine = utils::build_engine(&args.schema, &args.engine)?;
    let data = utils::read_data(&args.data)?;

    info!("Validating {} against {}", args.data.display(), args.schema.display());
    let Some(errors) = engine.validate(&data).await else {
        if !quiet {
            match format {
                OutputFormat::Human => println!("{}", "✓ data is valid".green()),
                OutputFormat::Json => println!("{{}}"),
                OutputFormat::JsonPretty => println!("{{}}"),
            }
        }
        return Ok(());
    };

    warn!("Validation produced errors for {} target(s)", errors.len());
    match format {
        OutputFormat::Human => {
            eprintln!("{}", "✗ data failed validation".red());
            for line in errors.get_strings(&args.engine.locale, &args.template) {
                eprintln!("  {}", line);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(&errors)?),
        OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(&errors)?),
    }

    Err(Error::ValidationFailed {
        count: errors.len(),
    })
}
