//! Schematics Core - Schema-driven validation and transformation for JSON records
//!
//! This crate flattens nested JSON records into dotted paths, resolves schema
//! field targets (including `*` wildcards) against them, and runs pluggable
//! validator, operator, and condition functions over the bound values.
//!
//! # Main Components
//!
//! - **Error Handling**: Library error types using `thiserror` and `anyhow`
//! - **Schema Model**: Serde data structures for schemas, fields, and constants
//! - **Flattening**: Lossless record flattening and re-inflation
//! - **Matching**: Wildcard target resolution over flat records
//! - **Registries**: Caller-owned validator/operator/condition tables
//! - **Engine**: Concurrent validation and the sequential operate pipeline
//!
//! # Example
//!
//! ```no_run
//! use schematics_core::{Result, Schematics};
//! use serde_json::json;
//!
//! async fn example() -> Result<()> {
//!     let engine = Schematics::load_from_file("schema.json")?;
//!     let errors = engine.validate(&json!({ "name": "ada" })).await;
//!     assert!(errors.is_none());
//!     Ok(())
//! }
//! ```

pub mod builtin;
pub mod engine;
pub mod error;
pub mod flat;
pub mod matcher;
pub mod registry;
pub mod report;
pub mod schema;

// Re-export main types for convenience
pub use engine::{
    FieldBinding, SchemaState, Schematics, DB_ATTRIBUTE, DEFAULT_ARRAY_ID_KEY, DEFAULT_LOCALE,
    DEFAULT_SEPARATOR,
};
pub use error::{Error, Result};
pub use flat::{deflate, flatten};
pub use matcher::find_matching_keys;
pub use registry::{
    ConditionFn, ConditionRegistry, OperatorFn, OperatorRegistry, UnknownPolicy, ValidatorFn,
    ValidatorRegistry,
};
pub use report::{ErrorEntry, ErrorSet, WHOLE_DATA};
pub use schema::{Attributes, Condition, Constant, ConstantL10n, Field, Schema, TargetKey};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
