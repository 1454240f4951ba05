//! ERC-3643 (T-REX) rule checks.
//!
//! Each rule reads the contract model and records findings:
//! - C1: admin-like registry functions carry access control
//! - C2: token transfer paths reach the `canTransfer` compliance check
//! - C3: no `tx.origin` in project or vendor sources (the only FAIL rule)
//! - C4: contracts inheriting `OwnableUpgradeable` have an initializer
//!
//! After all rules run, audited warnings are downgraded to notes.

pub mod access_control;
pub mod downgrade;
pub mod engine;
pub mod findings;
pub mod glob;
pub mod initializer;
pub mod transfer_gate;
pub mod tx_origin;
pub mod types;
