// Tests for loading a T-REX project from disk

use trex_core::model::ContractModel;
use trex_core::types::{ContractKind, ModelError, Visibility};
use trex_parsers::loader::ProjectLoader;

use super::common;
use super::common::fixtures::TREX_CONTRACTS;

#[test]
fn test_shim_pulls_in_vendor_contracts() {
    let (_dir, root) = common::create_trex_project();
    let model = ProjectLoader::new(&root).load().unwrap();
    assert_eq!(model.contract_names_sorted(), TREX_CONTRACTS);
}

#[test]
fn test_inheritance_is_linearized() {
    let (_dir, root) = common::create_trex_project();
    let model = ProjectLoader::new(&root).load().unwrap();

    let storage = model.contract("IdentityRegistryStorage").unwrap();
    assert_eq!(storage.inheritance, vec!["AgentRoleUpgradeable", "OwnableUpgradeable"]);
    assert_eq!(
        storage.file,
        "node_modules/@tokenysolutions/t-rex/contracts/registry/implementation/IdentityRegistryStorage.sol"
    );

    let ownable = model.contract("OwnableUpgradeable").unwrap();
    assert_eq!(ownable.kind, ContractKind::Abstract);
    assert!(ownable.inheritance.is_empty());
}

#[test]
fn test_functions_carry_modifiers_and_visibility() {
    let (_dir, root) = common::create_trex_project();
    let model = ProjectLoader::new(&root).load().unwrap();

    let storage = model.contract("IdentityRegistryStorage").unwrap();
    let add = storage
        .functions
        .iter()
        .find(|f| f.name == "addIdentityToStorage")
        .unwrap();
    assert_eq!(add.visibility, Visibility::External);
    assert_eq!(model.modifiers(add), Some(&["onlyAgent".to_string()][..]));
    assert!(model.source(add).unwrap().starts_with("function addIdentityToStorage"));
}

#[test]
fn test_transitive_calls_cross_contracts() {
    let (_dir, root) = common::create_trex_project();
    let model = ProjectLoader::new(&root).load().unwrap();

    let token = model.contract("Token").unwrap();
    let transfer = token.functions.iter().find(|f| f.name == "transfer").unwrap();
    let reachable = model.reachable_functions(token, transfer).unwrap();
    assert!(reachable.contains(&"_transfer".to_string()));
    assert!(reachable.contains(&"canTransfer".to_string()));
}

#[test]
fn test_trexignore_excludes_sources() {
    let (_dir, root) = common::create_project(&[
        ("contracts/Token.sol", "contract Token {}"),
        ("contracts/mocks/MockToken.sol", "contract MockToken {}"),
        (".trexignore", "mocks/\n"),
    ]);
    let model = ProjectLoader::new(&root).load().unwrap();
    assert_eq!(model.contract_names_sorted(), vec!["Token"]);
}

#[test]
fn test_ignore_patterns_exclude_sources() {
    let (_dir, root) = common::create_project(&[
        ("contracts/Token.sol", "contract Token {}"),
        ("contracts/test/TestToken.sol", "contract TestToken {}"),
    ]);
    let model = ProjectLoader::new(&root)
        .with_ignore_patterns(vec!["contracts/test/**".to_string()])
        .load()
        .unwrap();
    assert_eq!(model.contract_names_sorted(), vec!["Token"]);
}

#[test]
fn test_remappings_resolve_package_imports() {
    let (_dir, root) = common::create_project(&[
        ("remappings.txt", "@oz/=lib/openzeppelin/contracts/\n"),
        ("src/Registry.sol", "import \"@oz/access/Ownable.sol\";\ncontract Registry is Ownable {}"),
        ("lib/openzeppelin/contracts/access/Ownable.sol", "abstract contract Ownable {}"),
    ]);
    let model = ProjectLoader::new(&root.join("src")).with_project_root(&root).load().unwrap();
    assert_eq!(model.contract_names_sorted(), vec!["Ownable", "Registry"]);
}

#[test]
fn test_unresolved_imports_are_skipped() {
    let (_dir, root) = common::create_project(&[(
        "contracts/Token.sol",
        "import \"@missing/pkg/Base.sol\";\ncontract Token is Base {}",
    )]);
    let model = ProjectLoader::new(&root).load().unwrap();
    assert_eq!(model.contract("Token").unwrap().inheritance, vec!["Base"]);
}

#[test]
fn test_empty_project_is_an_error() {
    let (_dir, root) = common::create_project(&[("README.md", "# nothing here")]);
    let err = ProjectLoader::new(&root).load().unwrap_err();
    assert!(matches!(err, ModelError::NoSources(_)));
    assert!(err.to_string().contains("no Solidity sources"));
}
