//! # View Resolution
//!
//! Maps an [`ErrorTree`] onto the views that need attention.
//!
//! ## Ordering
//!
//! The global view comes first, then flagged streams in ascending index
//! order. Filtering by a caller's view list keeps this order; the order of
//! the filter list is irrelevant.
//!
//! ## Stale Indices
//!
//! A tree produced before a stream was removed may flag indices past the
//! end of the stream list. Those are skipped, never reported.

use cb_core::{ErrorTree, View};

/// Views flagged in `errors`, limited to `limit_to_views` when given.
pub fn invalid_views(
    errors: &ErrorTree,
    stream_count: usize,
    limit_to_views: Option<&[View]>,
) -> Vec<View> {
    let global = errors.global().then_some(View::Global);
    let streams = errors
        .stream_entries()
        .filter(|(_, failed)| *failed)
        .map(|(index, _)| View::Stream(index))
        .filter(|view| view.exists_in(stream_count));

    global
        .into_iter()
        .chain(streams)
        .filter(|view| limit_to_views.map_or(true, |limit| limit.contains(view)))
        .collect()
}

/// Whether any view in `limit_to_views` (or any view at all) is flagged.
pub fn has_errors(errors: &ErrorTree, stream_count: usize, limit_to_views: Option<&[View]>) -> bool {
    !invalid_views(errors, stream_count, limit_to_views).is_empty()
}
