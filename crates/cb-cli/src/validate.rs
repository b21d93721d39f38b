//! # Validate Subcommand
//!
//! Runs `validate_and_touch` over a builder state file and prints the
//! decision with the form management state it produced.

use std::path::PathBuf;

use anyhow::Context;
use cb_core::View;
use cb_errors::{BuilderErrors, FormManagementState, TouchOutcome};
use cb_schema::BuilderSchemas;
use clap::Args;
use serde::Serialize;

use crate::input::{load_errors, load_state};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Directory holding global.schema.json, stream.schema.json and builder.schema.json.
    #[arg(long)]
    pub schemas: PathBuf,

    /// Builder state file (JSON or YAML).
    #[arg(long)]
    pub state: PathBuf,

    /// Limit validation to these views, in order ("global" or a stream index).
    /// Without any, the whole document is validated.
    #[arg(long = "view")]
    pub views: Vec<View>,

    /// Current error object, used for the reported invalid views.
    #[arg(long)]
    pub errors: Option<PathBuf>,
}

/// Printed result of the validate subcommand.
#[derive(Debug, Serialize)]
pub struct ValidateReport {
    /// The navigation decision.
    pub decision: TouchOutcome,
    /// Form management state after the decision.
    pub form: FormManagementState,
    /// Views flagged by `--errors`, if given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_views: Option<Vec<View>>,
}

/// Run the validate subcommand.
pub fn run(args: &ValidateArgs) -> anyhow::Result<ValidateReport> {
    let schemas = BuilderSchemas::load(&args.schemas)
        .with_context(|| format!("cannot load schemas from {}", args.schemas.display()))?;
    let state = load_state(&args.state)?;
    let errors = match &args.errors {
        Some(path) => load_errors(path)?,
        None => Default::default(),
    };

    let engine = BuilderErrors::new(&state, &errors, schemas.schema_set());
    let limit = (!args.views.is_empty()).then_some(args.views.as_slice());

    let mut form = FormManagementState::default();
    let decision = engine.validate_and_touch(&mut form, None, limit);
    tracing::info!(?decision, "validation finished");

    Ok(ValidateReport {
        decision,
        form,
        invalid_views: args.errors.as_ref().map(|_| engine.invalid_views(None, None)),
    })
}
