use crate::human::RESULT_LABEL;
use crate::OutputFormatter;
use trex_rules::types::{Finding, RuleId, RunReport};

pub struct MarkdownFormatter;

impl OutputFormatter for MarkdownFormatter {
    fn format_inventory(&self, contracts: &[String]) -> String {
        let mut sorted = contracts.to_vec();
        sorted.sort();
        let mut out = format!("## Contracts ({})\n\n", sorted.len());
        for name in &sorted {
            out.push_str(&format!("- `{name}`\n"));
        }
        out
    }

    fn format_finding(&self, finding: &Finding) -> String {
        // Multi-line messages (C3 path lists) become nested list items.
        let mut lines = finding.message.lines();
        let mut out = format!(
            "- **{}** {}\n",
            finding.severity.tag(),
            lines.next().unwrap_or("")
        );
        for line in lines {
            let item = line.trim_start().trim_start_matches("- ");
            out.push_str(&format!("  - `{item}`\n"));
        }
        out
    }

    fn format_report(&self, report: &RunReport) -> String {
        let verdict = if report.passed { "PASS ✅" } else { "FAIL ❌" };
        let mut out = format!("# trexlint report\n\n**{RESULT_LABEL}: {verdict}**\n\n");
        out.push_str(&format!("Target: `{}`\n\n", report.target));
        out.push_str("## Rules\n\n");
        for rule in RuleId::ALL {
            out.push_str(&format!("- **{rule}**: {}\n", rule.title()));
        }
        out.push('\n');
        out.push_str(&self.format_inventory(&report.contracts));

        for (title, findings) in [
            ("Failures", &report.failures),
            ("Warnings (review manually)", &report.warnings),
            ("Downgraded to info", &report.notes),
        ] {
            out.push_str(&format!("\n## {title} ({})\n\n", findings.len()));
            if findings.is_empty() {
                out.push_str("None.\n");
            }
            for f in findings {
                out.push_str(&self.format_finding(f));
            }
        }
        out
    }
}
