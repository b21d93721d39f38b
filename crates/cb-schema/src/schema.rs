//! # View Schema Capability
//!
//! A view schema validates one shape of builder data (the global section,
//! one stream, or the whole document) and reports at most one failure:
//! the first failing field in whatever order the schema walks the value.
//! Callers consume that path as an atomic result and never reorder.

use std::fmt;

use cb_core::FieldPath;
use serde_json::Value;

/// The first failure a schema found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Path of the failing field, relative to the validated value.
    pub path: FieldPath,
    /// Human-readable description. Not interpreted by the error engine.
    pub message: String,
}

impl SchemaViolation {
    /// Create a violation at `path`.
    pub fn new(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Validate a value, failing with the first invalid field.
pub trait ViewSchema {
    /// Returns `Ok(())` when `value` conforms, or the first violation.
    fn validate(&self, value: &Value) -> Result<(), SchemaViolation>;
}

impl<F> ViewSchema for F
where
    F: Fn(&Value) -> Result<(), SchemaViolation>,
{
    fn validate(&self, value: &Value) -> Result<(), SchemaViolation> {
        self(value)
    }
}

/// The three schemas the error engine validates with.
#[derive(Clone, Copy)]
pub struct SchemaSet<'a> {
    /// Validates `formValues.global`.
    pub global: &'a dyn ViewSchema,
    /// Validates one element of `formValues.streams`.
    pub stream: &'a dyn ViewSchema,
    /// Validates the whole of `formValues`.
    pub document: &'a dyn ViewSchema,
}

impl fmt::Debug for SchemaSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaSet").finish_non_exhaustive()
    }
}
