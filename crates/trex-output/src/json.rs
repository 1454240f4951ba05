use crate::OutputFormatter;
use trex_rules::types::{Finding, RunReport};

/// Emits nothing until the end, then the whole report as one JSON document.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_inventory(&self, _contracts: &[String]) -> String {
        String::new()
    }

    fn format_finding(&self, _finding: &Finding) -> String {
        String::new()
    }

    fn format_report(&self, report: &RunReport) -> String {
        match serde_json::to_string_pretty(report) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("failed to serialize run report: {e}");
                String::new()
            }
        }
    }
}
