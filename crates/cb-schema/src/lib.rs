//! # cb-schema — View Schemas
//!
//! The error engine treats schemas as opaque capabilities: hand it a
//! value, get back success or the first failing path. This crate defines
//! that seam and ships the JSON Schema implementation used by the CLI.
//!
//! ## Capability (`schema`)
//!
//! - [`ViewSchema`] — "validate, or fail with the first failing path".
//!   Implemented for plain closures so callers can inject schemas without
//!   any schema language.
//! - [`SchemaSet`] — the three schemas the engine needs: global, stream,
//!   and full document.
//!
//! ## JSON Schema (`validate`)
//!
//! - [`SchemaRegistry`] loads `*.schema.json` files and resolves
//!   cross-file `$ref`s locally, without network access.
//! - [`JsonSchemaValidator`] compiles one schema (Draft 2020-12) and
//!   reports its first error as a [`SchemaViolation`].
//! - [`BuilderSchemas`] bundles the three compiled builder schemas.
//!
//! ## Crate Policy
//!
//! - Depends only on `cb-core` internally.
//! - Traversal order is the schema implementation's; this crate never
//!   re-sorts errors.

pub mod error;
pub mod schema;
pub mod validate;

pub use error::SchemaError;
pub use schema::{SchemaSet, SchemaViolation, ViewSchema};
pub use validate::{
    BuilderSchemas, JsonSchemaValidator, SchemaRegistry, BUILDER_SCHEMA, GLOBAL_SCHEMA,
    STREAM_SCHEMA,
};
