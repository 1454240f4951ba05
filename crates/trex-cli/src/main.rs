//! trexlint CLI — ERC-3643 (T-REX) static checks for Solidity projects.
//!
//! Loads a contract model for the target, runs rules C1 to C4 and exits with
//! 0 (pass), 1 (at least one FAIL) or 2 (the model could not be loaded).
//! See `trexlint --help` for usage.

use std::io::Write;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli_args;
mod commands;

use cli_args::Cli;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let formatter: Box<dyn trex_output::OutputFormatter> = if cli.json {
        Box::new(trex_output::json::JsonFormatter)
    } else {
        Box::new(trex_output::human::HumanFormatter)
    };

    let exit_code = commands::check::run(
        &*formatter,
        cli.target,
        cli.root,
        cli.model,
        cli.export_model,
        cli.report,
    );

    let _ = std::io::stdout().flush();
    std::process::exit(exit_code);
}

/// Diagnostics go to stderr; stdout is reserved for the report.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
