//! Output formatters for trexlint run results.
//!
//! Provides three output modes:
//! - **Human** (default): the `[INFO]`/`[WARN]`/`[FAIL]` line protocol, streamed
//! - **JSON** (`--json`): one machine-readable report
//! - **Markdown** (`--report <file>`): a summary document for review

pub mod human;
pub mod json;
pub mod markdown;

use trex_rules::types::{Finding, RunReport};

pub trait OutputFormatter {
    /// Printed once, before any rule runs.
    fn format_inventory(&self, contracts: &[String]) -> String;
    /// Printed for each FAIL or WARN as it is recorded.
    fn format_finding(&self, finding: &Finding) -> String;
    /// Printed once after all rules and the downgrade step.
    fn format_report(&self, report: &RunReport) -> String;
}
