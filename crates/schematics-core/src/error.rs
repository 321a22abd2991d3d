//! Error types for the schematics core library
//!
//! This module defines the structural error type for engine operations,
//! using thiserror for ergonomic error definitions and anyhow for flexible
//! error sources. Per-field validation failures are not represented here;
//! those aggregate into a [`crate::report::ErrorSet`].

use thiserror::Error;

/// Main error type for schematics operations
#[derive(Error, Debug)]
pub enum Error {
    /// Schema load or parse errors
    #[error("Schema load failed: {message}")]
    SchemaLoad {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// IO errors (schema file access)
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// An operator name with no registered function (fail-unknown policy)
    #[error("Operator '{name}' is not registered")]
    UnknownOperator { name: String },

    /// Runtime construction failure for the blocking API
    #[error("Runtime error: {message}")]
    Runtime {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_operator_display() {
        let err = Error::UnknownOperator {
            name: "Reverse".to_string(),
        };
        assert_eq!(err.to_string(), "Operator 'Reverse' is not registered");
    }

    #[test]
    fn test_schema_load_carries_source() {
        let err = Error::SchemaLoad {
            message: "bad field block".to_string(),
            source: Some(anyhow::anyhow!("inner")),
        };
        assert!(err.to_string().contains("bad field block"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
