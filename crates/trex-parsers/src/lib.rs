//! Solidity source discovery and contract-model construction.
//!
//! - [`walker`] — finds `.sol` files under a target, honoring ignore files
//! - [`solidity`] — tree-sitter extraction of contracts, functions and call sites
//! - [`loader`] — follows imports, parses in parallel, linearizes inheritance

pub mod loader;
pub mod solidity;
pub mod walker;
