//! # cb-errors — Builder Error Navigation
//!
//! Decides where the builder should send the user when the document does
//! not validate. Every operation is synchronous, reads its inputs for the
//! duration of one call, and never fails: each outcome is a navigation
//! decision or the absence of one.
//!
//! ## Pipeline
//!
//! ```text
//! ErrorPathResolver ──▶ invalid_views ──▶ NavigationSink
//!   (auth pre-check,      (path → view)     (view + scroll
//!    then schema)                             target)
//! ```
//!
//! - **`auth`** — the declarative OAuth rule: the token field must
//!   interpolate a config key that has a testing value. Checked before
//!   any schema runs.
//! - **`views`** — which views an [`ErrorTree`](cb_core::ErrorTree) marks
//!   as invalid, optionally limited to a caller's subset.
//! - **`resolver`** — first failing path of a slice.
//! - **`engine`** — [`BuilderErrors`]: `invalid_views`, `has_errors`,
//!   and `validate_and_touch`.
//! - **`snapshot`** — [`ErrorSnapshot`], the single-writer cell holding the
//!   latest error tree.
//!
//! ## Callback Asymmetry
//!
//! Full-document validation runs the caller's callback when nothing
//! fails. Scoped validation never runs it, even when every scoped view is
//! valid. Hosts that gate an action on scoped validation must check the
//! returned [`TouchOutcome`] themselves.

pub mod auth;
pub mod engine;
pub mod navigation;
pub mod resolver;
pub mod snapshot;
pub mod views;

pub use auth::{
    extract_interpolated_config_key, Authenticator, DeclarativeOAuth, TokenType,
    DECLARATIVE_OAUTH_AUTHENTICATOR, OAUTH_FLOW_FIELD,
};
pub use engine::{BuilderErrors, TouchOutcome};
pub use navigation::{FormManagementState, NavigationSink, FORM_VALUES_ROOT};
pub use resolver::ErrorPathResolver;
pub use snapshot::ErrorSnapshot;
pub use views::{has_errors, invalid_views};
