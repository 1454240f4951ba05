//! Serializable contract collection.
//!
//! A snapshot is what the project loader produces and what `--model` consumes.
//! Contract descriptors are stored as-is; the call graph is derived on demand.

use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::callgraph::CallGraph;
use crate::model::ContractModel;
use crate::types::{ContractDescriptor, FunctionDescriptor, ModelError};

pub const SNAPSHOT_VERSION: &str = "1";

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelSnapshot {
    #[serde(default = "default_version")]
    pub version: String,
    /// Which provider produced the descriptors (e.g. "tree-sitter").
    #[serde(default)]
    pub engine: String,
    pub contracts: Vec<ContractDescriptor>,
    #[serde(skip)]
    call_graph: OnceLock<CallGraph>,
}

fn default_version() -> String {
    SNAPSHOT_VERSION.to_string()
}

impl ModelSnapshot {
    pub fn new(engine: impl Into<String>, contracts: Vec<ContractDescriptor>) -> Self {
        Self {
            version: default_version(),
            engine: engine.into(),
            contracts,
            call_graph: OnceLock::new(),
        }
    }

    /// Read a snapshot written by `save` or by an external exporter.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: ModelSnapshot =
            serde_json::from_str(&content).map_err(|source| ModelError::Snapshot {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(
            path = %path.display(),
            contracts = snapshot.contracts.len(),
            "loaded model snapshot"
        );
        Ok(snapshot)
    }

    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| ModelError::Snapshot {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn call_graph(&self) -> &CallGraph {
        self.call_graph
            .get_or_init(|| CallGraph::build(&self.contracts))
    }
}

impl ContractModel for ModelSnapshot {
    fn contracts(&self) -> &[ContractDescriptor] {
        &self.contracts
    }

    fn reachable_functions(
        &self,
        contract: &ContractDescriptor,
        function: &FunctionDescriptor,
    ) -> Option<Vec<String>> {
        let decl = self
            .contracts
            .iter()
            .position(|c| std::ptr::eq(c, contract))
            .or_else(|| self.contracts.iter().position(|c| c == contract))?;
        self.call_graph().reachable_from_decl(decl, &function.name)
    }
}
