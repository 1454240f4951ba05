// Tests for a T-REX project that satisfies every rule

use trex_parsers::loader::ProjectLoader;
use trex_rules::engine::RulesetEngine;
use trex_rules::findings::NullSink;
use trex_rules::types::{Finding, Severity};

use super::common;
use super::common::fixtures::{AGENT_ROLE_NOTE, BIND_NOTE, TREX_CONTRACTS};

#[test]
fn test_trex_project_passes_with_audited_notes() {
    let (_dir, root) = common::create_trex_project();
    let model = ProjectLoader::new(&root).load().unwrap();
    let report = RulesetEngine::new(&root).run(&model, &mut NullSink);

    assert_eq!(report.contracts, TREX_CONTRACTS);
    assert!(report.passed);
    assert_eq!(report.exit_code(), 0);
    assert!(report.failures.is_empty());
    assert!(report.warnings.is_empty(), "unexpected warnings: {:?}", report.warnings);

    let notes: Vec<_> = report.notes.iter().map(|n| n.message.as_str()).collect();
    assert_eq!(notes, vec![BIND_NOTE, AGENT_ROLE_NOTE]);
    assert!(report.notes.iter().all(|n| n.severity == Severity::Info));
}

#[test]
fn test_streamed_findings_are_the_raw_warnings() {
    let (_dir, root) = common::create_trex_project();
    let model = ProjectLoader::new(&root).load().unwrap();

    let mut streamed: Vec<Finding> = Vec::new();
    let report = RulesetEngine::new(&root).run(&model, &mut streamed);

    // Downgrading happens after streaming, so the sink saw both as WARN.
    assert_eq!(streamed.len(), 2);
    assert!(streamed.iter().all(|f| f.severity == Severity::Warn));
    assert_eq!(report.notes.len(), 2);
}

#[test]
fn test_repeated_runs_match() {
    let (_dir, root) = common::create_trex_project();
    let engine = RulesetEngine::new(&root);

    let first = engine.run(&ProjectLoader::new(&root).load().unwrap(), &mut NullSink);
    let second = engine.run(&ProjectLoader::new(&root).load().unwrap(), &mut NullSink);
    assert_eq!(first, second);
}
