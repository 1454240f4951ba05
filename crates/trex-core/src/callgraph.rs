//! Name-resolved call graph over a contract collection.
//!
//! Call sites are recorded by callee name only, so resolution is heuristic:
//! a name is bound to the first declaring contract in the caller's lineage
//! (the contract itself, then its linearized ancestors), otherwise to every
//! contract that declares it (calls through interfaces and external
//! references), otherwise to an unresolved leaf. Modifiers attached to a
//! function are followed like calls.
//!
//! Nodes belong to a contract declaration, not a contract name, so two
//! contracts sharing a name keep separate call data.

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;

use crate::types::ContractDescriptor;

/// A vertex: a named function on the contract at `decl`, or an unresolved
/// callee (`decl` is `None`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallNode {
    pub decl: Option<usize>,
    pub name: String,
}

#[derive(Debug, Default)]
pub struct CallGraph {
    graph: DiGraph<CallNode, ()>,
    index: HashMap<(Option<usize>, String), NodeIndex>,
    /// First declaration of each contract name.
    by_name: HashMap<String, usize>,
    /// Functions whose call sites the provider could not supply.
    opaque: HashSet<NodeIndex>,
}

impl CallGraph {
    pub fn build(contracts: &[ContractDescriptor]) -> Self {
        let mut cg = CallGraph::default();

        // Which declarations define each function name, in load order.
        let mut declarers: HashMap<&str, Vec<usize>> = HashMap::new();
        for (decl, c) in contracts.iter().enumerate() {
            cg.by_name.entry(c.name.clone()).or_insert(decl);
            for f in &c.functions {
                let entry = declarers.entry(f.name.as_str()).or_default();
                if !entry.contains(&decl) {
                    entry.push(decl);
                }
                cg.node(Some(decl), &f.name);
            }
        }

        for (decl, c) in contracts.iter().enumerate() {
            for f in &c.functions {
                let from = cg.node(Some(decl), &f.name);
                let Some(calls) = &f.calls else {
                    cg.opaque.insert(from);
                    continue;
                };
                let attached = f.modifiers.iter().flatten();
                for callee in attached.chain(calls) {
                    let targets = resolve_callee(contracts, decl, callee, &declarers);
                    if targets.is_empty() {
                        let to = cg.node(None, callee);
                        cg.graph.update_edge(from, to, ());
                    }
                    for target in targets {
                        let to = cg.node(Some(target), callee);
                        cg.graph.update_edge(from, to, ());
                    }
                }
            }
        }

        cg
    }

    fn node(&mut self, decl: Option<usize>, name: &str) -> NodeIndex {
        let key = (decl, name.to_string());
        if let Some(idx) = self.index.get(&key) {
            return *idx;
        }
        let idx = self.graph.add_node(CallNode {
            decl,
            name: key.1.clone(),
        });
        self.index.insert(key, idx);
        idx
    }

    /// Like [`reachable_from_decl`](Self::reachable_from_decl), starting at
    /// the first contract declared under `contract`.
    pub fn reachable_from(&self, contract: &str, function: &str) -> Option<Vec<String>> {
        let decl = *self.by_name.get(contract)?;
        self.reachable_from_decl(decl, function)
    }

    /// Names of every function reachable from `function` on the contract at
    /// position `decl`, in DFS order, without duplicates. `None` when the start
    /// is unknown or has no call data.
    pub fn reachable_from_decl(&self, decl: usize, function: &str) -> Option<Vec<String>> {
        let start = *self.index.get(&(Some(decl), function.to_string()))?;
        if self.opaque.contains(&start) {
            return None;
        }
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        let mut dfs = Dfs::new(&self.graph, start);
        while let Some(nx) = dfs.next(&self.graph) {
            if nx == start {
                continue;
            }
            let name = &self.graph[nx].name;
            if seen.insert(name.clone()) {
                names.push(name.clone());
            }
        }
        Some(names)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

fn resolve_callee(
    contracts: &[ContractDescriptor],
    caller: usize,
    callee: &str,
    declarers: &HashMap<&str, Vec<usize>>,
) -> Vec<usize> {
    let Some(candidates) = declarers.get(callee) else {
        return vec![];
    };
    if candidates.contains(&caller) {
        return vec![caller];
    }
    for ancestor in &contracts[caller].inheritance {
        if let Some(hit) = candidates.iter().find(|c| contracts[**c].name == *ancestor) {
            return vec![*hit];
        }
    }
    candidates.clone()
}
