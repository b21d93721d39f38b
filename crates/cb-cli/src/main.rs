//! # cb CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::{Parser, ValueEnum};

/// Connector builder validation CLI.
///
/// Validates builder states against the builder schemas and reports the
/// view and field the builder would navigate to.
#[derive(Parser, Debug)]
#[command(name = "cb", version, about)]
struct Cli {
    /// Log output format. Verbosity is controlled by RUST_LOG.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LogFormat {
    Text,
    Json,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate a builder state and print the navigation decision.
    Validate(cb_cli::validate::ValidateArgs),
    /// Print the views an error file marks invalid.
    Views(cb_cli::views::ViewsArgs),
    /// Print whether an error file marks any view invalid.
    HasErrors(cb_cli::views::ViewsArgs),
}

fn init_tracing(format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let output = match cli.command {
        Commands::Validate(args) => serde_json::to_string_pretty(&cb_cli::validate::run(&args)?)?,
        Commands::Views(args) => serde_json::to_string(&cb_cli::views::run_views(&args)?)?,
        Commands::HasErrors(args) => cb_cli::views::run_has_errors(&args)?.to_string(),
    };
    println!("{output}");

    Ok(())
}
