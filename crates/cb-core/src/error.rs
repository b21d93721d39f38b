//! # Error Types
//!
//! Errors raised while building the core model from untrusted input.
//! The navigation engine itself never fails; these only surface when a
//! host constructs documents, paths, or views from external data.

use thiserror::Error;

/// Top-level error type for the builder data model.
#[derive(Error, Debug)]
pub enum BuilderError {
    /// The form values do not have the global + streams shape.
    #[error("invalid document shape: {0}")]
    InvalidDocument(String),

    /// A field path string could not be parsed.
    #[error("invalid field path '{path}': {reason}")]
    InvalidPath {
        /// The path text as supplied.
        path: String,
        /// Why parsing stopped.
        reason: String,
    },

    /// A view token was neither `global` nor a stream index.
    #[error("invalid view '{0}': expected \"global\" or a stream index")]
    InvalidView(String),
}
