use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "trexlint",
    version,
    about = "ERC-3643 (T-REX) static checks for Solidity projects"
)]
pub(crate) struct Cli {
    /// Project directory or single .sol file
    #[arg(default_value = ".")]
    pub target: PathBuf,

    /// Project root for package imports, tx.origin scan roots and trexlint.json
    /// (default: the target directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Read a contract model snapshot instead of parsing sources
    #[arg(long, value_name = "FILE")]
    pub model: Option<PathBuf>,

    /// Write the loaded contract model as a snapshot
    #[arg(long, value_name = "FILE")]
    pub export_model: Option<PathBuf>,

    /// Output the run report as structured JSON
    #[arg(long)]
    pub json: bool,

    /// Also write a Markdown summary to FILE
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Debug-level diagnostics on stderr
    #[arg(long, short)]
    pub verbose: bool,
}

#[cfg(test)]
#[path = "cli_args_tests.rs"]
mod tests;
