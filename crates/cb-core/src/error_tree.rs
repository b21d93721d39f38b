//! # Error Tree
//!
//! A coarse mirror of [`BuilderFormValues`](crate::BuilderFormValues) that
//! records which sections currently fail validation.
//!
//! ## Shape
//!
//! - `global` is a single flag. Any failure anywhere under the global
//!   section sets it; individual global fields are not tracked.
//! - `streams` is a sparse map from stream index to flag. Indices are
//!   independent of each other and ordered ascending.
//!
//! ## Ownership
//!
//! The schema-validation layer produces error trees; the form layer owns
//! them. When a stream is removed the owner must drop indices that no
//! longer exist ([`ErrorTree::purge_stale_streams`]). Readers must not
//! assume the owner did so.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::path::{FieldPath, PathSegment};
use crate::truthy::is_truthy;

/// Which builder sections carry validation errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorTree {
    global: bool,
    streams: BTreeMap<usize, bool>,
}

impl ErrorTree {
    /// An error tree with no failures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree marking the section each path points into.
    pub fn from_paths<'a>(paths: impl IntoIterator<Item = &'a FieldPath>) -> Self {
        let mut tree = Self::new();
        for path in paths {
            tree.mark_path(path);
        }
        tree
    }

    /// Parse a form-layer error object such as
    /// `{ "global": { "urlBase": {..} }, "streams": { "2": {..} } }`.
    ///
    /// Entries count as errors when truthy. `streams` may be an object keyed
    /// by decimal index or an array with holes. Anything else is ignored.
    pub fn from_value(errors: &Value) -> Self {
        let mut tree = Self::new();
        let Some(object) = errors.as_object() else {
            return tree;
        };

        tree.global = object.get("global").is_some_and(is_truthy);

        match object.get("streams") {
            Some(Value::Object(streams)) => {
                for (key, flag) in streams {
                    if let Ok(index) = key.parse::<usize>() {
                        tree.streams.insert(index, is_truthy(flag));
                    }
                }
            }
            Some(Value::Array(streams)) => {
                for (index, flag) in streams.iter().enumerate() {
                    tree.streams.insert(index, is_truthy(flag));
                }
            }
            _ => {}
        }

        tree
    }

    /// Mark the section `path` points into.
    ///
    /// `global.<..>` marks the global section and `streams.<i>.<..>` marks
    /// stream `i`. A path naming `streams` without an index, or any other
    /// top-level key, belongs to no section and leaves the tree unchanged.
    pub fn mark_path(&mut self, path: &FieldPath) {
        match path.segments() {
            [PathSegment::Key(head), ..] if head == "global" => self.global = true,
            [PathSegment::Key(head), PathSegment::Index(index), ..] if head == "streams" => {
                self.streams.insert(*index, true);
            }
            _ => {}
        }
    }

    /// Set the global flag.
    pub fn set_global(&mut self, failed: bool) {
        self.global = failed;
    }

    /// Set the flag for one stream index.
    pub fn set_stream(&mut self, index: usize, failed: bool) {
        self.streams.insert(index, failed);
    }

    /// Whether the global section failed.
    pub fn global(&self) -> bool {
        self.global
    }

    /// Whether stream `index` failed. Absent indices have not failed.
    pub fn stream(&self, index: usize) -> bool {
        self.streams.get(&index).copied().unwrap_or(false)
    }

    /// Stream entries in ascending index order, including cleared flags.
    pub fn stream_entries(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        self.streams.iter().map(|(index, flag)| (*index, *flag))
    }

    /// Drop stream entries at or past `stream_count`.
    pub fn purge_stale_streams(&mut self, stream_count: usize) {
        self.streams.retain(|index, _| *index < stream_count);
    }

    /// Whether no section is flagged.
    pub fn is_clean(&self) -> bool {
        !self.global && self.streams.values().all(|flag| !flag)
    }
}
