//! # Builder Error Engine
//!
//! [`BuilderErrors`] answers "which views are broken" from the latest
//! error tree and, on demand, validates the document and steers the form
//! to the first broken field.
//!
//! ## `validate_and_touch`
//!
//! ```text
//!              ┌── scoped (views given) ──▶ for each view, in caller order:
//!              │                              first error? ─▶ navigate, stop
//! invoke ──────┤                            none ─▶ Unchanged (no callback)
//!              │
//!              └── full (no views) ───────▶ first error in whole document?
//!                                             none ─▶ callback, Valid
//!                                             path ─▶ views of path?
//!                                                      some ─▶ navigate to first
//!                                                      none ─▶ Unresolved
//! ```
//!
//! Each call is one synchronous pass. The engine reads the document, the
//! testing values, and the error tree; it writes only to the sink.

use cb_core::{BuilderState, ErrorTree, FieldPath, View};
use cb_schema::SchemaSet;
use serde::Serialize;

use crate::navigation::{form_values_path, view_scoped_path, NavigationSink};
use crate::resolver::ErrorPathResolver;
use crate::views;

/// What one `validate_and_touch` call decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TouchOutcome {
    /// The sink was moved to `view` and asked to scroll to `scroll_target`.
    Navigated {
        /// View switched to.
        view: View,
        /// Absolute field path, rooted at `formValues`.
        scroll_target: FieldPath,
    },
    /// Full validation passed; the callback, if any, ran once.
    Valid,
    /// Scoped validation found nothing. The callback did not run.
    Unchanged,
    /// Full validation failed at a path that belongs to no view. Nothing
    /// was navigated and the callback did not run.
    Unresolved {
        /// The failing path, relative to `formValues`.
        path: FieldPath,
    },
}

/// Error queries and navigation over one builder state.
#[derive(Debug, Clone, Copy)]
pub struct BuilderErrors<'a> {
    state: &'a BuilderState,
    errors: &'a ErrorTree,
    schemas: SchemaSet<'a>,
}

impl<'a> BuilderErrors<'a> {
    /// Engine over `state`, reading view errors from `errors`.
    pub fn new(state: &'a BuilderState, errors: &'a ErrorTree, schemas: SchemaSet<'a>) -> Self {
        Self {
            state,
            errors,
            schemas,
        }
    }

    /// Views with errors, in global-then-ascending-stream order.
    ///
    /// Reads `errors_override` instead of the engine's tree when given.
    /// Only views in `limit_to_views` are returned when it is given.
    pub fn invalid_views(
        &self,
        limit_to_views: Option<&[View]>,
        errors_override: Option<&ErrorTree>,
    ) -> Vec<View> {
        views::invalid_views(
            errors_override.unwrap_or(self.errors),
            self.state.form_values.stream_count(),
            limit_to_views,
        )
    }

    /// Whether any view (or any view in `limit_to_views`) has errors.
    pub fn has_errors(&self, limit_to_views: Option<&[View]>) -> bool {
        !self.invalid_views(limit_to_views, None).is_empty()
    }

    /// Validate and move `sink` to the first broken field.
    ///
    /// With `limit_to_views`, checks those views in the given order against
    /// their own schemas and never runs `callback`. Without it, validates
    /// the whole document and runs `callback` only if it is valid.
    pub fn validate_and_touch(
        &self,
        sink: &mut dyn NavigationSink,
        callback: Option<&mut dyn FnMut()>,
        limit_to_views: Option<&[View]>,
    ) -> TouchOutcome {
        match limit_to_views {
            Some(views) => self.touch_scoped(sink, views),
            None => self.touch_full(sink, callback),
        }
    }

    fn touch_scoped(&self, sink: &mut dyn NavigationSink, views: &[View]) -> TouchOutcome {
        let resolver = ErrorPathResolver::new(&self.state.testing_values);

        for &view in views {
            let Some(slice) = self.state.form_values.slice(view) else {
                tracing::debug!(%view, "skipping view with no stream");
                continue;
            };
            let schema = match view {
                View::Global => self.schemas.global,
                View::Stream(_) => self.schemas.stream,
            };
            if let Some(path) = resolver.first_error_path(slice, schema) {
                return navigate(sink, view, view_scoped_path(view, &path));
            }
        }

        tracing::debug!(views = views.len(), "scoped validation found no errors");
        TouchOutcome::Unchanged
    }

    fn touch_full(
        &self,
        sink: &mut dyn NavigationSink,
        callback: Option<&mut dyn FnMut()>,
    ) -> TouchOutcome {
        let resolver = ErrorPathResolver::new(&self.state.testing_values);
        let document = self.state.form_values.as_value();

        let Some(path) = resolver.first_error_path(document, self.schemas.document) else {
            tracing::debug!("document is valid");
            if let Some(callback) = callback {
                callback();
            }
            return TouchOutcome::Valid;
        };

        let synthetic = ErrorTree::from_paths([&path]);
        match self.invalid_views(None, Some(&synthetic)).first() {
            Some(&view) => navigate(sink, view, form_values_path(&path)),
            None => {
                tracing::debug!(%path, "first error belongs to no view");
                TouchOutcome::Unresolved { path }
            }
        }
    }
}

fn navigate(sink: &mut dyn NavigationSink, view: View, scroll_target: FieldPath) -> TouchOutcome {
    tracing::debug!(%view, target = %scroll_target, "navigating to first error");
    sink.set_scroll_target(&scroll_target);
    sink.set_current_view(view);
    TouchOutcome::Navigated {
        view,
        scroll_target,
    }
}
