//! Shared helpers for the subcommand handlers

use crate::cli::EngineArgs;
use crate::error::{Error, Result};
use schematics_core::Schematics;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load a schema file and apply the engine settings from the CLI.
pub fn build_engine(schema_path: &Path, settings: &EngineArgs) -> Result<Schematics> {
    if !schema_path.exists() {
        return Err(Error::FileNotFound {
            path: schema_path.to_path_buf(),
        });
    }

    debug!("Loading schema from {}", schema_path.display());
    let mut engine = Schematics::load_from_file(schema_path)?;
    engine.separator = settings.separator.clone();
    engine.array_id_key = settings.array_id_key.clone();
    engine.locale = settings.locale.clone();
    Ok(engine)
}

/// Read and parse a JSON data file.
pub fn read_data(path: &Path) -> Result<serde_json::Value> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    debug!("Read {} bytes from {}", content.len(), path.display());
    serde_json::from_str(&content).map_err(|_| Error::InvalidFormat {
        path: path.to_path_buf(),
        expected: "JSON".to_string(),
    })
}
