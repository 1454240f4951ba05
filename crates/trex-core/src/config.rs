//! Configuration file loading for trexlint.
//!
//! Reads `trexlint.json` from the project root and provides typed access to all
//! settings. Falls back to defaults when the file is missing or incomplete.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "trexlint.json";

/// Vendor and local roots scanned for `tx.origin`, relative to the project root.
pub const DEFAULT_SCAN_DIRS: &[&str] = &[
    "contracts",
    "node_modules/@tokenysolutions/t-rex",
    "node_modules/@onchain-id/solidity",
];

/// Top-level trexlint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrexConfig {
    #[serde(default = "default_version")]
    pub version: String,
    /// Roots scanned by the `tx.origin` check.
    #[serde(default = "default_scan_dirs")]
    pub scan_dirs: Vec<String>,
    /// Globs excluded from source discovery.
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
    /// Extra admin-like function patterns per contract name.
    #[serde(default)]
    pub admin_patterns: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub downgrade: DowngradeConfig,
}

/// Warning downgrade tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DowngradeConfig {
    /// Apply the built-in audited allow-list.
    #[serde(default = "default_true")]
    pub builtin: bool,
    #[serde(default)]
    pub extra_prefixes: Vec<String>,
}

fn default_true() -> bool {
    true
}
fn default_version() -> String {
    "0.1.0".to_string()
}
fn default_scan_dirs() -> Vec<String> {
    DEFAULT_SCAN_DIRS.iter().map(|s| s.to_string()).collect()
}

impl Default for DowngradeConfig {
    fn default() -> Self {
        Self {
            builtin: true,
            extra_prefixes: vec![],
        }
    }
}

impl Default for TrexConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            scan_dirs: default_scan_dirs(),
            ignore_patterns: vec![],
            admin_patterns: BTreeMap::new(),
            downgrade: DowngradeConfig::default(),
        }
    }
}

impl TrexConfig {
    /// Load configuration from `trexlint.json` inside the given project root.
    /// Returns defaults if the file doesn't exist or can't be parsed.
    pub fn load(project_root: &Path) -> Self {
        let config_path = project_root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(cfg) => {
                tracing::debug!(path = %config_path.display(), "loaded configuration");
                cfg
            }
            Err(e) => {
                tracing::warn!(
                    "failed to parse {}: {}, using defaults",
                    config_path.display(),
                    e
                );
                Self::default()
            }
        }
    }
}
