// Tests for trexlint exit codes: 0 pass, 1 FAIL finding, 2 model not loaded

use super::common;
use super::common::fixtures::TX_ORIGIN_IDENTITY;

#[test]
/// Exit code 0 when no rule fails, even with warnings.
fn test_exit_code_0_clean_project() {
    let (_dir, root) = common::create_trex_project();
    let output = common::run_trexlint(&root, &[]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&output.stderr));
}

#[test]
/// Exit code 0 with only warnings.
fn test_exit_code_0_with_warnings() {
    let (_dir, root) = common::create_project(&[("contracts/Vault.sol", "contract Vault {}")]);
    let output = common::run_trexlint(&root, &[]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[WARN] C2: No contract with a typical ERC-3643 token name found"));
}

#[test]
/// Exit code 1 when any scanned file uses tx.origin.
fn test_exit_code_1_tx_origin() {
    let (_dir, root) = common::create_trex_project();
    common::write_files(&root, &[("contracts/Legacy.sol", TX_ORIGIN_IDENTITY)]);

    let output = common::run_trexlint(&root, &[]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[FAIL] C3: tx.origin usage found in:\n  - contracts/Legacy.sol\n"));
    assert!(stdout.contains("[RESULT] ERC-3643 static subset: FAIL ❌"));
}

#[test]
/// Exit code 2 when the target does not exist.
fn test_exit_code_2_missing_target() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = common::run_trexlint(dir.path(), &["does-not-exist"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("trexlint: failed to load contract model"), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
/// Exit code 2 when the target holds no Solidity sources.
fn test_exit_code_2_no_sources() {
    let (_dir, root) = common::create_project(&[("README.md", "# empty")]);
    let output = common::run_trexlint(&root, &[]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no Solidity sources"));
}

#[test]
/// Exit code 2 when a model snapshot is malformed.
fn test_exit_code_2_bad_snapshot() {
    let (_dir, root) = common::create_project(&[("model.json", "not json")]);
    let output = common::run_trexlint(&root, &["--model", "model.json"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
/// Usage errors come from clap with exit code 2.
fn test_exit_code_2_unknown_flag() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = common::run_trexlint(dir.path(), &["--no-such-flag"]);
    assert_eq!(output.status.code(), Some(2));
}
