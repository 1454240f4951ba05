// Tests for model snapshots written by the loader and read back

use trex_core::model::ContractModel;
use trex_core::snapshot::ModelSnapshot;
use trex_core::types::ModelError;
use trex_parsers::loader::ProjectLoader;
use trex_rules::engine::RulesetEngine;
use trex_rules::findings::NullSink;

use super::common;

#[test]
fn test_exported_snapshot_gives_same_report() {
    let (_dir, root) = common::create_trex_project();
    let parsed = ProjectLoader::new(&root).load().unwrap();

    let out = tempfile::tempdir().unwrap();
    let path = out.path().join("model.json");
    parsed.save(&path).unwrap();
    let restored = ModelSnapshot::load(&path).unwrap();

    assert_eq!(restored.contracts, parsed.contracts);
    assert_eq!(restored.engine, parsed.engine);

    let engine = RulesetEngine::new(&root);
    assert_eq!(
        engine.run(&parsed, &mut NullSink),
        engine.run(&restored, &mut NullSink)
    );
}

#[test]
fn test_external_snapshot_without_call_data_uses_source_fallback() {
    let (_dir, root) = common::create_project(&[(
        "model.json",
        r#"{
  "version": "1",
  "engine": "external",
  "contracts": [
    {
      "name": "Token",
      "kind": "contract",
      "file": "contracts/token/Token.sol",
      "inheritance": ["AgentRoleUpgradeable", "OwnableUpgradeable"],
      "functions": [
        {
          "name": "initialize",
          "kind": "function",
          "visibility": "external"
        },
        {
          "name": "transfer",
          "kind": "function",
          "visibility": "public",
          "source": {
            "file": "contracts/token/Token.sol",
            "line_start": 40,
            "line_end": 43,
            "content": "function transfer(address to, uint256 v) public returns (bool) {\n    require(_tokenCompliance.canTransfer(msg.sender, to, v));\n    return true;\n}"
          }
        }
      ]
    }
  ]
}"#,
    )]);

    let model = ModelSnapshot::load(&root.join("model.json")).unwrap();
    let token = model.contract("Token").unwrap();
    let transfer = &token.functions[1];
    assert!(model.reachable_functions(token, transfer).is_none());
    assert!(model.modifiers(transfer).is_none());

    let report = RulesetEngine::new(&root).run(&model, &mut NullSink);
    assert!(report.passed);
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
}

#[test]
fn test_malformed_snapshot_is_an_error() {
    let (_dir, root) = common::create_project(&[("model.json", "{ \"contracts\": 3 }")]);
    let err = ModelSnapshot::load(&root.join("model.json")).unwrap_err();
    assert!(matches!(err, ModelError::Snapshot { .. }));
}
