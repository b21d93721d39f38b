//! # cb-core — Foundational Types for the Connector Builder
//!
//! Defines the data model shared by the schema layer and the error
//! navigation engine. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Views are a closed vocabulary.** A [`View`] is either the global
//!    section or a stream index. It serializes as `"global"` or a bare
//!    integer, the same tokens the form layer uses.
//!
//! 2. **Paths are structured.** [`FieldPath`] holds key and index
//!    segments. Validators may report dotted, bracketed, or JSON Pointer
//!    paths; all of them parse into the same value.
//!
//! 3. **The document shape is checked once.** [`BuilderFormValues`] can
//!    only be built from an object with an object `global` and an array
//!    `streams`, so slice lookups never have to re-check it.
//!
//! 4. **Error trees are coarse.** [`ErrorTree`] only records whether the
//!    global section failed and which stream indices failed. Field-level
//!    detail stays with the validator that produced it.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cb-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod error_tree;
pub mod path;
pub mod truthy;
pub mod view;

// Re-export primary types for ergonomic imports.
pub use document::{BuilderFormValues, BuilderState, TestingValues};
pub use error::BuilderError;
pub use error_tree::ErrorTree;
pub use path::{FieldPath, PathSegment};
pub use truthy::is_truthy;
pub use view::View;
