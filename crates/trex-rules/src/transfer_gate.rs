//! C2: token transfer paths reach the compliance gate.

use trex_core::model::ContractModel;
use trex_core::types::{ContractDescriptor, FunctionDescriptor};

use crate::findings::Findings;
use crate::types::RuleId;

/// Lowercased contract names treated as the ERC-3643 token.
pub const TOKEN_CANDIDATE_NAMES: &[&str] = &["token", "trextoken", "erc3643token"];

pub const TRANSFER_FUNCTIONS: &[&str] = &["transfer", "transferFrom", "_update", "_transfer"];

pub fn is_token_candidate(contract: &ContractDescriptor) -> bool {
    TOKEN_CANDIDATE_NAMES.contains(&contract.name.to_lowercase().as_str())
}

pub fn check(model: &dyn ContractModel, out: &mut Findings<'_>) {
    let mut found_token = false;
    for contract in model.contracts().iter().filter(|c| is_token_candidate(c)) {
        found_token = true;
        let transfers: Vec<&FunctionDescriptor> = contract
            .functions_declared()
            .filter(|f| TRANSFER_FUNCTIONS.contains(&f.name.as_str()))
            .collect();

        if transfers.is_empty() {
            out.warn(
                RuleId::C2,
                format!(
                    "C2: {} has no recognizable transfer functions (variant may abstract transfers differently)",
                    contract.name
                ),
            );
            continue;
        }

        if !transfers.iter().any(|f| reaches_can_transfer(model, contract, f)) {
            out.warn(
                RuleId::C2,
                format!(
                    "C2: Did not find evidence that {} transfer path reaches canTransfer() (review variant)",
                    contract.name
                ),
            );
        }
    }

    if !found_token {
        out.warn(
            RuleId::C2,
            "C2: No contract with a typical ERC-3643 token name found (add import shim to compile it)",
        );
    }
}

/// True when the call closure names a `canTransfer` variant, or failing that,
/// when the function's own source calls `canTransfer(`.
pub fn reaches_can_transfer(
    model: &dyn ContractModel,
    contract: &ContractDescriptor,
    function: &FunctionDescriptor,
) -> bool {
    if let Some(closure) = model.reachable_functions(contract, function) {
        if closure.iter().any(|name| name.to_lowercase().contains("cantransfer")) {
            return true;
        }
    }
    model
        .source(function)
        .is_some_and(|src| src.contains("canTransfer("))
}
