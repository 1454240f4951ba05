//! C1: admin-like registry functions carry access control.
//!
//! Evidence is gathered in tiers (attached modifiers, the declaration line,
//! body hints, inline owner checks). A function with no evidence is reported
//! only when its contract inherits an access-control base; C1 never fails a run.

use std::collections::BTreeMap;

use regex::Regex;

use trex_core::model::ContractModel;
use trex_core::types::FunctionDescriptor;

use crate::findings::Findings;
use crate::glob::glob_to_regex;
use crate::types::RuleId;

/// Admin-like function patterns per T-REX registry contract.
pub const ADMIN_LIKE: &[(&str, &[&str])] = &[
    (
        "ClaimTopicsRegistry",
        &["addClaimTopic", "removeClaimTopic", "transferOwnership", "renounceOwnership"],
    ),
    (
        "TrustedIssuersRegistry",
        &["addTrustedIssuer", "removeTrustedIssuer", "updateIssuer"],
    ),
    (
        "IdentityRegistryStorage",
        &["bindIdentityRegistry", "addAgent", "removeAgent", "addIdentityToStorage"],
    ),
    (
        "IdentityRegistry",
        &[
            "setIdentityRegistryStorage",
            "setClaimTopicsRegistry",
            "setTrustedIssuersRegistry",
            "addAgent",
            "removeAgent",
            "registerIdentity",
            "registerIdentityFromRegistry",
        ],
    ),
];

pub const MODIFIER_KEYWORDS: &[&str] = &["onlyowner", "onlyrole", "onlyagent", "onlypauser"];

const BODY_HINTS: &[&str] = &["onlyowner", "accesscontrol", "hasrole(", "agentrole", "onlyrole"];

const ACCESS_PARENTS: &[&str] = &["ownable", "accesscontrol", "agentrole"];

/// Compiled admin patterns keyed by exact contract name.
#[derive(Debug, Clone)]
pub struct AdminTables {
    tables: BTreeMap<String, Vec<Regex>>,
}

impl AdminTables {
    /// The built-in registry tables.
    pub fn builtin() -> Self {
        let mut tables = Self {
            tables: BTreeMap::new(),
        };
        for (contract, patterns) in ADMIN_LIKE {
            tables.extend(contract, patterns.iter().copied());
        }
        tables
    }

    /// Built-ins plus `extra`. Extra tables append to existing ones.
    pub fn with_extra(extra: &BTreeMap<String, Vec<String>>) -> Self {
        let mut tables = Self::builtin();
        for (contract, patterns) in extra {
            tables.extend(contract, patterns.iter().map(String::as_str));
        }
        tables
    }

    fn extend<'p>(&mut self, contract: &str, patterns: impl Iterator<Item = &'p str>) {
        let entry = self.tables.entry(contract.to_string()).or_default();
        for pattern in patterns {
            match glob_to_regex(pattern) {
                Ok(rx) => entry.push(rx),
                Err(e) => tracing::warn!("skipping admin pattern {pattern:?} for {contract}: {e}"),
            }
        }
    }

    pub fn patterns(&self, contract: &str) -> &[Regex] {
        self.tables.get(contract).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contracts(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

impl Default for AdminTables {
    fn default() -> Self {
        Self::builtin()
    }
}

pub fn check(model: &dyn ContractModel, tables: &AdminTables, out: &mut Findings<'_>) {
    for contract in model.contracts() {
        let patterns = tables.patterns(&contract.name);
        if patterns.is_empty() {
            continue;
        }
        let inherits_access_base = {
            let bases = contract.inheritance_text_lower();
            ACCESS_PARENTS.iter().any(|k| bases.contains(k))
        };
        for function in contract.functions_and_modifiers_declared() {
            if !function.visibility.is_entry_point()
                || !patterns.iter().any(|rx| rx.is_match(&function.name))
            {
                continue;
            }
            if !has_access_control(model, function) && inherits_access_base {
                out.warn(
                    RuleId::C1,
                    format!(
                        "C1: {}.{} — not directly proven, but contract inherits access-control base",
                        contract.name, function.name
                    ),
                );
            }
        }
    }
}

/// First matching evidence tier wins.
pub fn has_access_control(model: &dyn ContractModel, function: &FunctionDescriptor) -> bool {
    if let Some(modifiers) = model.modifiers(function) {
        let guarded = modifiers.iter().any(|m| {
            let m = m.to_lowercase();
            MODIFIER_KEYWORDS.contains(&m.as_str()) || m.contains("onlyowner") || m.contains("onlyrole")
        });
        if guarded {
            return true;
        }
    }

    let src = model.source(function).unwrap_or("");
    // Declaration line, e.g. `function foo() external onlyOwner {`.
    let header = src.lines().next().unwrap_or("").to_lowercase();
    if MODIFIER_KEYWORDS.iter().any(|k| header.contains(k)) {
        return true;
    }

    let src = src.to_lowercase();
    if BODY_HINTS.iter().any(|k| src.contains(k)) {
        return true;
    }
    src.contains("owner()") && (src.contains("require(") || src.contains("revert"))
}
