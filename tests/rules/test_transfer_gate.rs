// Tests for C2 over parsed tokens

use trex_parsers::loader::ProjectLoader;
use trex_rules::engine::RulesetEngine;
use trex_rules::findings::NullSink;
use trex_rules::types::RuleId;

use super::common;
use super::common::fixtures::{UNGATED_TOKEN, T_REX};

fn c2_warnings(root: &std::path::Path) -> Vec<String> {
    let model = ProjectLoader::new(root).load().unwrap();
    let report = RulesetEngine::new(root).run(&model, &mut NullSink);
    assert!(report.failures.is_empty(), "C2 never fails a run");
    report
        .warnings
        .into_iter()
        .filter(|w| w.rule == RuleId::C2)
        .map(|w| w.message)
        .collect()
}

#[test]
fn test_ungated_transfer_warns() {
    let (_dir, root) = common::create_trex_project();
    let token_path = format!("{T_REX}/token/Token.sol");
    common::write_files(&root, &[(token_path.as_str(), UNGATED_TOKEN)]);
    assert_eq!(
        c2_warnings(&root),
        vec!["C2: Did not find evidence that Token transfer path reaches canTransfer() (review variant)"]
    );
}

#[test]
fn test_no_token_candidate_warns_once() {
    let (_dir, root) = common::create_project(&[(
        "contracts/Registry.sol",
        "contract IdentityRegistry { function isVerified(address a) external view returns (bool) {} }",
    )]);
    assert_eq!(
        c2_warnings(&root),
        vec!["C2: No contract with a typical ERC-3643 token name found (add import shim to compile it)"]
    );
}

#[test]
fn test_token_variant_without_transfer_functions() {
    let (_dir, root) = common::create_project(&[(
        "contracts/TREXToken.sol",
        "contract TREXToken { function move(address to, uint256 v) external {} }",
    )]);
    assert_eq!(
        c2_warnings(&root),
        vec!["C2: TREXToken has no recognizable transfer functions (variant may abstract transfers differently)"]
    );
}

#[test]
fn test_transfer_gated_by_modifier_is_accepted() {
    let (_dir, root) = common::create_project(&[(
        "contracts/Token.sol",
        r#"
interface ICompliance {
    function canTransfer(address from, address to, uint256 value) external view returns (bool);
}

contract Token {
    ICompliance internal _compliance;
    mapping(address => uint256) private _balances;

    modifier compliant(address _from, address _to, uint256 _value) {
        require(_compliance.canTransfer(_from, _to, _value), "Transfer not possible");
        _;
    }

    function transfer(address _to, uint256 _amount) public compliant(msg.sender, _to, _amount) returns (bool) {
        _balances[msg.sender] -= _amount;
        _balances[_to] += _amount;
        return true;
    }
}
"#,
    )]);
    assert!(c2_warnings(&root).is_empty());
}
