use crate::types::{Finding, RuleId, Severity};

/// Observer notified of every FAIL and WARN the moment a rule records it.
pub trait FindingSink {
    fn on_finding(&mut self, finding: &Finding);
}

/// Discards everything.
pub struct NullSink;

impl FindingSink for NullSink {
    fn on_finding(&mut self, _finding: &Finding) {}
}

impl FindingSink for Vec<Finding> {
    fn on_finding(&mut self, finding: &Finding) {
        self.push(finding.clone());
    }
}

/// Per-run accumulator. Rules only append; nothing is removed here.
pub struct Findings<'a> {
    failures: Vec<Finding>,
    warnings: Vec<Finding>,
    sink: &'a mut dyn FindingSink,
}

impl<'a> Findings<'a> {
    pub fn new(sink: &'a mut dyn FindingSink) -> Self {
        Self {
            failures: Vec::new(),
            warnings: Vec::new(),
            sink,
        }
    }

    pub fn fail(&mut self, rule: RuleId, message: impl Into<String>) {
        let finding = Finding::new(rule, Severity::Fail, message);
        tracing::debug!(rule = %rule, "fail recorded");
        self.sink.on_finding(&finding);
        self.failures.push(finding);
    }

    pub fn warn(&mut self, rule: RuleId, message: impl Into<String>) {
        let finding = Finding::new(rule, Severity::Warn, message);
        tracing::debug!(rule = %rule, "warning recorded");
        self.sink.on_finding(&finding);
        self.warnings.push(finding);
    }

    pub fn failures(&self) -> &[Finding] {
        &self.failures
    }

    pub fn warnings(&self) -> &[Finding] {
        &self.warnings
    }

    /// `(failures, warnings)` in emission order.
    pub fn into_parts(self) -> (Vec<Finding>, Vec<Finding>) {
        (self.failures, self.warnings)
    }
}
