use trex_core::config::DowngradeConfig;

use crate::types::{Finding, Severity};

/// Audited warnings that are reported as notes instead.
pub const BUILTIN_PREFIXES: &[&str] = &[
    "C1: IdentityRegistryStorage.bindIdentityRegistry",
    "C4: AgentRoleUpgradeable inherits OwnableUpgradeable but no obvious initializer found",
];

const KEY_SEPARATOR: &str = " — ";

/// Reclassifies allow-listed WARN findings to INFO.
#[derive(Debug, Clone)]
pub struct DowngradeFilter {
    prefixes: Vec<String>,
}

impl Default for DowngradeFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl DowngradeFilter {
    /// The built-in allow-list.
    pub fn new() -> Self {
        Self {
            prefixes: BUILTIN_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn empty() -> Self {
        Self { prefixes: vec![] }
    }

    pub fn from_config(config: &DowngradeConfig) -> Self {
        let mut filter = if config.builtin {
            Self::new()
        } else {
            Self::empty()
        };
        for prefix in &config.extra_prefixes {
            filter.allow(prefix);
        }
        filter
    }

    pub fn allow(&mut self, prefix: &str) {
        if !self.prefixes.iter().any(|p| p == prefix) {
            self.prefixes.push(prefix.to_string());
        }
    }

    /// Comparison key: the text before the first ` — `, or the whole message.
    pub fn key(message: &str) -> &str {
        message
            .split_once(KEY_SEPARATOR)
            .map_or(message, |(head, _)| head)
    }

    pub fn matches(&self, message: &str) -> bool {
        let key = Self::key(message);
        self.prefixes.iter().any(|p| key.starts_with(p.as_str()))
    }

    /// Split `warnings` into `(kept, notes)`, both in original order.
    /// Notes come back with severity INFO.
    pub fn apply(&self, warnings: Vec<Finding>) -> (Vec<Finding>, Vec<Finding>) {
        let mut kept = Vec::new();
        let mut notes = Vec::new();
        for mut w in warnings {
            if w.severity == Severity::Warn && self.matches(&w.message) {
                w.severity = Severity::Info;
                notes.push(w);
            } else {
                kept.push(w);
            }
        }
        if !notes.is_empty() {
            tracing::debug!(count = notes.len(), "warnings downgraded");
        }
        (kept, notes)
    }

    pub fn count(&self) -> usize {
        self.prefixes.len()
    }
}
