//! # Views and Has-Errors Subcommands
//!
//! Read-only queries over an error file: which views are invalid, and
//! whether any are. The builder state is only needed for its stream
//! count, which bounds the stream views that can be reported.

use std::path::PathBuf;

use cb_core::View;
use clap::Args;

use crate::input::{load_errors, load_state};

/// Arguments shared by the views and has-errors subcommands.
#[derive(Args, Debug)]
pub struct ViewsArgs {
    /// Builder state file (JSON or YAML).
    #[arg(long)]
    pub state: PathBuf,

    /// Error object file (JSON or YAML).
    #[arg(long)]
    pub errors: PathBuf,

    /// Only report these views ("global" or a stream index).
    #[arg(long = "view")]
    pub views: Vec<View>,
}

impl ViewsArgs {
    fn limit(&self) -> Option<&[View]> {
        (!self.views.is_empty()).then_some(self.views.as_slice())
    }
}

/// Invalid views, global first, then streams ascending.
pub fn run_views(args: &ViewsArgs) -> anyhow::Result<Vec<View>> {
    let state = load_state(&args.state)?;
    let errors = load_errors(&args.errors)?;
    Ok(cb_errors::invalid_views(
        &errors,
        state.form_values.stream_count(),
        args.limit(),
    ))
}

/// Whether any (limited) view is invalid.
pub fn run_has_errors(args: &ViewsArgs) -> anyhow::Result<bool> {
    Ok(!run_views(args)?.is_empty())
}
