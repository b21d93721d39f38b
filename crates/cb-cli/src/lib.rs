//! # cb-cli — Connector Builder Validation CLI
//!
//! Runs the error navigation engine against builder state files, for CI
//! checks and for reproducing what the builder UI would do.
//!
//! ## Subcommands
//!
//! - `validate` — validate a builder state and print the navigation
//!   decision and resulting form management state.
//! - `views` — print the views an error file marks as invalid.
//! - `has-errors` — print whether an error file marks any view invalid.
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers delegate to `cb-errors`; no decision logic lives here.

pub mod input;
pub mod validate;
pub mod views;
