//! # Navigation Sink
//!
//! The form layer the engine steers. The engine writes two things: which
//! view is shown and which field to scroll to. It never reads them back.

use cb_core::{FieldPath, View};
use serde::{Deserialize, Serialize};

/// Root key of the form values inside the form state. Scroll targets are
/// absolute, so they start with it.
pub const FORM_VALUES_ROOT: &str = "formValues";

/// Receiver of navigation decisions.
pub trait NavigationSink {
    /// Ask the form to scroll to and focus `target`.
    fn set_scroll_target(&mut self, target: &FieldPath);

    /// Switch the builder to `view`.
    fn set_current_view(&mut self, view: View);
}

/// The builder's form management state: shown view and pending scroll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormManagementState {
    /// The view currently shown.
    pub view: View,
    /// Field the form should scroll to on next render.
    pub scroll_to_field: Option<FieldPath>,
}

impl Default for FormManagementState {
    fn default() -> Self {
        Self {
            view: View::Global,
            scroll_to_field: None,
        }
    }
}

impl NavigationSink for FormManagementState {
    fn set_scroll_target(&mut self, target: &FieldPath) {
        self.scroll_to_field = Some(target.clone());
    }

    fn set_current_view(&mut self, view: View) {
        self.view = view;
    }
}

/// `formValues.<relative>`.
pub(crate) fn form_values_path(relative: &FieldPath) -> FieldPath {
    let mut root = FieldPath::root();
    root.push_key(FORM_VALUES_ROOT);
    root.join(relative)
}

/// `formValues.<view section>.<relative>`.
pub(crate) fn view_scoped_path(view: View, relative: &FieldPath) -> FieldPath {
    let mut section = FieldPath::root();
    match view {
        View::Global => section.push_key("global"),
        View::Stream(index) => {
            section.push_key("streams");
            section.push_index(index);
        }
    }
    form_values_path(&section.join(relative))
}
