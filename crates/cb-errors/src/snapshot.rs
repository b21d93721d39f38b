//! # Error Snapshot Cell
//!
//! Holds the most recent [`ErrorTree`] produced by a validation pass. The
//! form layer publishes a fresh tree once per pass; readers take an
//! `Arc` to whatever tree is current and keep it for the rest of their
//! call, so a publish in between never changes what they see.

use std::sync::Arc;

use cb_core::ErrorTree;
use parking_lot::RwLock;

/// Single-writer, many-reader cell for the latest error tree.
#[derive(Debug, Default)]
pub struct ErrorSnapshot {
    current: RwLock<Arc<ErrorTree>>,
}

impl ErrorSnapshot {
    /// A cell holding `errors`.
    pub fn new(errors: ErrorTree) -> Self {
        Self {
            current: RwLock::new(Arc::new(errors)),
        }
    }

    /// Replace the current tree.
    pub fn publish(&self, errors: ErrorTree) {
        *self.current.write() = Arc::new(errors);
    }

    /// The current tree.
    pub fn load(&self) -> Arc<ErrorTree> {
        Arc::clone(&*self.current.read())
    }
}
