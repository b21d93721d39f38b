//! # First Error Path
//!
//! Finds the single field the builder should focus for a slice of the
//! document: the global section, one stream, or the whole form values.
//!
//! ## Order of Checks
//!
//! 1. If the slice holds a declarative OAuth authenticator whose token
//!    key has no testing value, the path is
//!    `authenticator.declarative_oauth_flow`. The schema is not run.
//! 2. Otherwise the schema's first violation, if any.
//!
//! The authenticator is looked up at `authenticator` (global slice) and,
//! failing that, at `global.authenticator` (whole document). In the
//! second case the reported path keeps the `global.` prefix so it
//! resolves to the global view.

use cb_core::{FieldPath, PathSegment, TestingValues};
use cb_schema::ViewSchema;
use serde_json::Value;

use crate::auth::{Authenticator, OAUTH_FLOW_FIELD};

/// Resolves the first failing path of a document slice.
#[derive(Debug, Clone, Copy)]
pub struct ErrorPathResolver<'a> {
    testing_values: &'a TestingValues,
}

impl<'a> ErrorPathResolver<'a> {
    /// Resolver checking OAuth tokens against `testing_values`.
    pub fn new(testing_values: &'a TestingValues) -> Self {
        Self { testing_values }
    }

    /// Path of the first failing field in `slice`, relative to `slice`.
    pub fn first_error_path(&self, slice: &Value, schema: &dyn ViewSchema) -> Option<FieldPath> {
        if let Some(path) = self.oauth_flow_error(slice) {
            tracing::trace!(path = %path, "declarative OAuth token has no testing value");
            return Some(path);
        }

        schema.validate(slice).err().map(|violation| violation.path)
    }

    fn oauth_flow_error(&self, slice: &Value) -> Option<FieldPath> {
        let (prefix, config) = locate_authenticator(slice)?;
        let Authenticator::DeclarativeOAuth(oauth) = Authenticator::classify(config) else {
            return None;
        };
        if !oauth.is_missing_testing_value(self.testing_values) {
            return None;
        }

        let mut path = FieldPath::root();
        path.push_key("authenticator");
        path.push_key(OAUTH_FLOW_FIELD);
        Some(path.prefixed_by(&prefix))
    }
}

/// The authenticator config in `slice` and the path prefix leading to its
/// parent object.
fn locate_authenticator(slice: &Value) -> Option<(FieldPath, &Value)> {
    if let Some(config) = slice.get("authenticator") {
        return Some((FieldPath::root(), config));
    }
    let config = slice.get("global")?.get("authenticator")?;
    let prefix = FieldPath::from_segments([PathSegment::Key("global".to_string())]);
    Some((prefix, config))
}
