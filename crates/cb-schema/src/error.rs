//! Errors raised while loading and compiling schemas.
//!
//! Validation failures are not errors here; they are
//! [`SchemaViolation`](crate::SchemaViolation) values.

use thiserror::Error;

/// Error while preparing schemas for validation.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema file could not be loaded.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoad {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// The compiled validator could not be built (e.g., invalid schema).
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuild {
        /// Schema filename or identifier.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },

    /// IO error reading a schema.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
