use std::path::{Path, PathBuf};

use trex_core::config::TrexConfig;
use trex_core::model::ContractModel;

use crate::access_control::{self, AdminTables};
use crate::downgrade::DowngradeFilter;
use crate::findings::{FindingSink, Findings};
use crate::types::RunReport;
use crate::{initializer, transfer_gate, tx_origin};

/// Runs C1 to C4 in order over one model, then applies the downgrade filter.
///
/// The engine holds only configuration, so the same engine can run any number
/// of models and gives identical results for identical inputs.
pub struct RulesetEngine {
    pub(crate) project_root: PathBuf,
    pub(crate) scan_dirs: Vec<String>,
    pub(crate) admin_tables: AdminTables,
    pub(crate) downgrade: DowngradeFilter,
}

impl RulesetEngine {
    pub fn new(project_root: &Path) -> Self {
        Self::with_config(project_root, &TrexConfig::default())
    }

    /// Create an engine configured from a `TrexConfig`.
    pub fn with_config(project_root: &Path, config: &TrexConfig) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            scan_dirs: config.scan_dirs.clone(),
            admin_tables: AdminTables::with_extra(&config.admin_patterns),
            downgrade: DowngradeFilter::from_config(&config.downgrade),
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Evaluate every rule. FAIL and WARN findings reach `sink` as they are
    /// produced; downgraded notes only appear in the returned report.
    pub fn run(&self, model: &dyn ContractModel, sink: &mut dyn FindingSink) -> RunReport {
        let mut findings = Findings::new(sink);

        access_control::check(model, &self.admin_tables, &mut findings);
        transfer_gate::check(model, &mut findings);
        tx_origin::check(&self.project_root, &self.scan_dirs, &mut findings);
        initializer::check(model, &mut findings);

        let (failures, warnings) = findings.into_parts();
        let (warnings, notes) = self.downgrade.apply(warnings);
        let passed = failures.is_empty();

        tracing::info!(
            failures = failures.len(),
            warnings = warnings.len(),
            notes = notes.len(),
            "rules evaluated"
        );

        RunReport {
            version: env!("CARGO_PKG_VERSION").to_string(),
            command: "check".to_string(),
            target: self.project_root.display().to_string(),
            contracts: model.contract_names_sorted(),
            failures,
            warnings,
            notes,
            passed,
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
