use crate::OutputFormatter;
use trex_rules::types::{Finding, RunReport};

pub const RESULT_LABEL: &str = "ERC-3643 static subset";

pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_inventory(&self, contracts: &[String]) -> String {
        let mut sorted = contracts.to_vec();
        sorted.sort();

        let mut out = String::from("\n[INFO] Contracts visible to the model:\n");
        for name in &sorted {
            out.push_str(&format!(" - {name}\n"));
        }
        out.push('\n');
        out.push_str(&format!("\n[INFO] Contracts detected: {}\n\n", sorted.len()));
        out
    }

    fn format_finding(&self, finding: &Finding) -> String {
        format!("[{}] {}\n", finding.severity.tag(), finding.message)
    }

    /// Downgraded notes, the verdict, then kept warnings. Failures and
    /// warnings were already streamed by `format_finding`.
    fn format_report(&self, report: &RunReport) -> String {
        let mut out = String::new();
        for note in &report.notes {
            out.push_str(&format!("[INFO] {}\n", note.message));
        }

        let verdict = if report.passed { "PASS ✅" } else { "FAIL ❌" };
        out.push_str(&format!("\n[RESULT] {RESULT_LABEL}: {verdict}\n"));

        if !report.warnings.is_empty() {
            out.push_str("\n[NOTE] Warnings (review manually):\n");
            for w in &report.warnings {
                out.push_str(&format!(" - {}\n", w.message));
            }
        }
        out
    }
}
