//! C4: contracts inheriting `OwnableUpgradeable` have an initializer.

use trex_core::model::ContractModel;
use trex_core::types::ContractDescriptor;

use crate::findings::Findings;
use crate::types::RuleId;

pub const UPGRADEABLE_BASE: &str = "OwnableUpgradeable";

pub fn check(model: &dyn ContractModel, out: &mut Findings<'_>) {
    for contract in model.contracts() {
        if !contract.inheritance.iter().any(|b| b.contains(UPGRADEABLE_BASE)) {
            continue;
        }
        if !has_initializer(model, contract) {
            out.warn(
                RuleId::C4,
                format!(
                    "C4: {} inherits OwnableUpgradeable but no obvious initializer found",
                    contract.name
                ),
            );
        }
    }
}

pub fn has_initializer(model: &dyn ContractModel, contract: &ContractDescriptor) -> bool {
    let named_like_init = contract.functions_declared().any(|f| {
        let n = f.name.to_lowercase();
        n.starts_with("initialize") || (n.contains("ownable") && n.contains("init"))
    });
    named_like_init
        || contract.functions_declared().any(|f| {
            model
                .source(f)
                .is_some_and(|src| src.to_lowercase().contains("__ownable_init"))
        })
}
