/// Contract tests for the `--json` run report.
use trex_parsers::loader::ProjectLoader;
use trex_rules::engine::RulesetEngine;
use trex_rules::findings::NullSink;
use trex_rules::types::{Finding, RuleId, RunReport, Severity};

use super::common;
use super::common::fixtures::TX_ORIGIN_IDENTITY;
use super::test_schema_helpers::{validate_against_schema, violates_schema};

const SCHEMA: &str = include_str!("../schemas/run_report.schema.json");

#[test]
fn passing_report_matches_schema() {
    let (_dir, root) = common::create_trex_project();
    let model = ProjectLoader::new(&root).load().unwrap();
    let report = RulesetEngine::new(&root).run(&model, &mut NullSink);
    assert!(!report.notes.is_empty());
    validate_against_schema(&serde_json::to_value(&report).unwrap(), SCHEMA);
}

#[test]
fn failing_report_matches_schema() {
    let (_dir, root) = common::create_trex_project();
    common::write_files(&root, &[("contracts/Legacy.sol", TX_ORIGIN_IDENTITY)]);
    let model = ProjectLoader::new(&root).load().unwrap();
    let report = RulesetEngine::new(&root).run(&model, &mut NullSink);
    assert!(!report.passed);
    validate_against_schema(&serde_json::to_value(&report).unwrap(), SCHEMA);
}

#[test]
fn hand_built_report_matches_schema() {
    let report = RunReport {
        version: "0.3.0".to_string(),
        command: "check".to_string(),
        target: ".".to_string(),
        contracts: vec![],
        failures: vec![],
        warnings: vec![Finding::new(
            RuleId::C2,
            Severity::Warn,
            "C2: No contract with a typical ERC-3643 token name found (add import shim to compile it)",
        )],
        notes: vec![],
        passed: true,
    };
    validate_against_schema(&serde_json::to_value(&report).unwrap(), SCHEMA);
}

#[test]
fn lowercase_severity_is_rejected() {
    let bad = serde_json::json!({
        "version": "0.3.0",
        "command": "check",
        "target": ".",
        "contracts": [],
        "failures": [{ "rule": "C3", "severity": "fail", "message": "C3: x" }],
        "warnings": [],
        "notes": [],
        "passed": false
    });
    assert!(violates_schema(&bad, SCHEMA));
}
