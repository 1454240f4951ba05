//! Core types, the contract model interface, and configuration for trexlint.
//!
//! This crate provides the foundational data structures used across all trexlint crates:
//! - [`types`] — Contract and function descriptors, model errors
//! - [`model`] — The [`ContractModel`](model::ContractModel) trait the rules query
//! - [`snapshot`] — Serializable, in-memory implementation of `ContractModel`
//! - [`callgraph`] — Name-resolved call graph used for transitive-call queries
//! - [`config`] — Configuration loading from `trexlint.json`

pub mod callgraph;
pub mod config;
pub mod model;
pub mod snapshot;
pub mod types;
