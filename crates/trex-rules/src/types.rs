use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Fail,
    Warn,
    Info,
}

impl Severity {
    /// Tag used in the line protocol, e.g. `WARN`.
    pub fn tag(&self) -> &'static str {
        match self {
            Severity::Fail => "FAIL",
            Severity::Warn => "WARN",
            Severity::Info => "INFO",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleId {
    C1,
    C2,
    C3,
    C4,
}

impl RuleId {
    /// Every rule, in evaluation order.
    pub const ALL: [RuleId; 4] = [RuleId::C1, RuleId::C2, RuleId::C3, RuleId::C4];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::C1 => "C1",
            RuleId::C2 => "C2",
            RuleId::C3 => "C3",
            RuleId::C4 => "C4",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RuleId::C1 => "admin functions have access control",
            RuleId::C2 => "transfer path reaches canTransfer",
            RuleId::C3 => "no tx.origin authentication",
            RuleId::C4 => "upgradeable ownership has an initializer",
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rule outcome. `message` already carries the `C<n>: ` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub rule: RuleId,
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    pub fn new(rule: RuleId, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            rule,
            severity,
            message: message.into(),
        }
    }
}

/// Everything one run produced, in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub version: String,
    pub command: String,
    pub target: String,
    /// Contract names, sorted.
    pub contracts: Vec<String>,
    pub failures: Vec<Finding>,
    /// Warnings left after downgrading.
    pub warnings: Vec<Finding>,
    /// Downgraded warnings, severity INFO.
    pub notes: Vec<Finding>,
    pub passed: bool,
}

impl RunReport {
    /// 0 without failures, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.passed {
            0
        } else {
            1
        }
    }
}
