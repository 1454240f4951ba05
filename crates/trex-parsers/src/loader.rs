//! Builds a [`ModelSnapshot`] for a Solidity project.
//!
//! Sources found by the [`FileWalker`] seed the set; every import they reach
//! is parsed too, round by round, each round in parallel. Contracts are then
//! ordered by file and position and their inheritance is linearized. A base
//! name declared more than once resolves to the declaration the inheriting
//! file can see through its imports.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use trex_core::snapshot::ModelSnapshot;
use trex_core::types::{ContractDescriptor, ModelError};

use crate::solidity::imports::{resolve_import, Remappings};
use crate::solidity::{ParsedContract, ParsedFile, SolidityParser};
use crate::walker::FileWalker;

pub const ENGINE_NAME: &str = "tree-sitter-solidity";

pub struct ProjectLoader {
    target: PathBuf,
    project_root: PathBuf,
    ignore_patterns: Vec<String>,
}

impl ProjectLoader {
    /// Load `target` (a directory or a single `.sol` file). The project root,
    /// used for package imports, defaults to the target directory.
    pub fn new(target: &Path) -> Self {
        let project_root = if target.is_file() {
            target.parent().map(Path::to_path_buf).unwrap_or_default()
        } else {
            target.to_path_buf()
        };
        Self {
            target: target.to_path_buf(),
            project_root,
            ignore_patterns: vec![],
        }
    }

    pub fn with_project_root(mut self, root: &Path) -> Self {
        self.project_root = root.to_path_buf();
        self
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    pub fn load(&self) -> Result<ModelSnapshot, ModelError> {
        std::fs::metadata(&self.target).map_err(|source| ModelError::Io {
            path: self.target.clone(),
            source,
        })?;
        let root_dir = if self.project_root.as_os_str().is_empty() {
            Path::new(".")
        } else {
            self.project_root.as_path()
        };
        let root = std::fs::canonicalize(root_dir).map_err(|source| ModelError::Io {
            path: self.project_root.clone(),
            source,
        })?;

        let seeds: Vec<PathBuf> = FileWalker::new(&self.target)
            .with_ignore_patterns(&self.ignore_patterns)
            .walk()
            .into_iter()
            .filter_map(|p| std::fs::canonicalize(&p).ok())
            .collect();
        if seeds.is_empty() {
            return Err(ModelError::NoSources(self.target.clone()));
        }
        tracing::debug!(files = seeds.len(), root = %root.display(), "discovered sources");

        SolidityParser::check_grammar().map_err(|e| ModelError::Parse(e.to_string()))?;

        let remappings = Remappings::load(&root);
        let (parsed, edges) = parse_with_imports(&root, seeds, &remappings);

        let mut files: Vec<(PathBuf, ParsedFile)> = parsed.into_iter().collect();
        files.sort_by(|a, b| a.0.cmp(&b.0));

        let contracts: Vec<ParsedContract> = files
            .into_iter()
            .flat_map(|(_, f)| {
                let mut contracts = f.contracts;
                contracts.sort_by_key(|c| c.line_start);
                contracts
            })
            .collect();
        tracing::info!(contracts = contracts.len(), "contract model built");

        let imports: FileImports = edges
            .into_iter()
            .map(|(from, to)| {
                let to: Vec<String> = to.iter().map(|p| relative_display(&root, p)).collect();
                (relative_display(&root, &from), to)
            })
            .collect();

        Ok(ModelSnapshot::new(
            ENGINE_NAME,
            linearize_with_imports(contracts, &imports),
        ))
    }
}

/// Resolved imports per file, keyed and valued by display path.
pub type FileImports = HashMap<String, Vec<String>>;

fn parse_with_imports(
    root: &Path,
    seeds: Vec<PathBuf>,
    remappings: &Remappings,
) -> (HashMap<PathBuf, ParsedFile>, HashMap<PathBuf, Vec<PathBuf>>) {
    let mut seen: HashSet<PathBuf> = seeds.iter().cloned().collect();
    let mut parsed: HashMap<PathBuf, ParsedFile> = HashMap::new();
    let mut edges: HashMap<PathBuf, Vec<PathBuf>> = HashMap::new();
    let mut frontier = seeds;

    while !frontier.is_empty() {
        let round: Vec<(PathBuf, Option<ParsedFile>)> = frontier
            .par_iter()
            .map_init(SolidityParser::new, |parser, path| {
                (path.clone(), parse_one(parser, root, path))
            })
            .collect();

        let mut next = Vec::new();
        for (path, file) in round {
            let Some(file) = file else { continue };
            let mut resolved_imports = Vec::new();
            for spec in &file.imports {
                match resolve_import(root, &path, spec, remappings) {
                    Some(resolved) => {
                        if seen.insert(resolved.clone()) {
                            next.push(resolved.clone());
                        }
                        resolved_imports.push(resolved);
                    }
                    None => tracing::debug!("unresolved import {spec:?} in {}", path.display()),
                }
            }
            edges.insert(path.clone(), resolved_imports);
            parsed.insert(path, file);
        }
        frontier = next;
    }

    (parsed, edges)
}

fn parse_one(parser: &mut SolidityParser, root: &Path, path: &Path) -> Option<ParsedFile> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!("skipping {}: {e}", path.display());
            return None;
        }
    };
    let source = String::from_utf8_lossy(&bytes);
    let shown = relative_display(root, path);
    match parser.parse_file(&shown, &source) {
        Ok(file) => {
            if file.has_errors {
                tracing::debug!("{shown}: syntax errors, using partial tree");
            }
            Some(file)
        }
        Err(e) => {
            tracing::warn!("skipping {shown}: {e}");
            None
        }
    }
}

/// `path` relative to `root` when inside it, with `/` separators.
pub fn relative_display(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}

/// Attach linearized ancestor lists to parsed contracts.
///
/// Uses C3 linearization with Solidity's right-to-left base order. When a
/// hierarchy has no consistent linearization, falls back to a depth-first
/// order of the declared bases. Bases that were never parsed stay as leaves.
pub fn linearize(contracts: Vec<ParsedContract>) -> Vec<ContractDescriptor> {
    linearize_with_imports(contracts, &FileImports::new())
}

/// [`linearize`], resolving each base name through the declaring file's
/// imports when several contracts share that name.
pub fn linearize_with_imports(
    contracts: Vec<ParsedContract>,
    imports: &FileImports,
) -> Vec<ContractDescriptor> {
    let hierarchy = Hierarchy::new(&contracts, imports);
    let mut memo: HashMap<usize, Vec<String>> = HashMap::new();
    let lineages: Vec<Vec<String>> = (0..contracts.len())
        .map(|decl| {
            let mut visiting = HashSet::new();
            hierarchy.ancestors(decl, &mut memo, &mut visiting)
        })
        .collect();

    contracts
        .into_iter()
        .zip(lineages)
        .map(|(c, inheritance)| ContractDescriptor {
            name: c.name,
            kind: c.kind,
            file: c.file,
            inheritance,
            functions: c.functions,
        })
        .collect()
}

struct Hierarchy<'a> {
    contracts: &'a [ParsedContract],
    by_name: HashMap<&'a str, Vec<usize>>,
    imports: &'a FileImports,
}

impl<'a> Hierarchy<'a> {
    fn new(contracts: &'a [ParsedContract], imports: &'a FileImports) -> Self {
        let mut by_name: HashMap<&str, Vec<usize>> = HashMap::new();
        for (decl, c) in contracts.iter().enumerate() {
            by_name.entry(c.name.as_str()).or_default().push(decl);
        }
        Self {
            contracts,
            by_name,
            imports,
        }
    }

    /// Which declaration `base`, written in contract `decl`, refers to.
    /// Prefers the same file, then files reachable through imports, then the
    /// first declaration loaded.
    fn resolve_base(&self, decl: usize, base: &str) -> Option<usize> {
        let candidates: Vec<usize> = self
            .by_name
            .get(base)?
            .iter()
            .copied()
            .filter(|c| *c != decl)
            .collect();
        match candidates.as_slice() {
            [] => return None,
            [only] => return Some(*only),
            _ => {}
        }
        let file = self.contracts[decl].file.as_str();
        if let Some(local) = candidates.iter().find(|c| self.contracts[**c].file == file) {
            return Some(*local);
        }
        let visible = self.visible_files(file);
        candidates
            .iter()
            .find(|c| visible.contains(self.contracts[**c].file.as_str()))
            .or_else(|| candidates.first())
            .copied()
    }

    /// Files transitively imported by `file`.
    fn visible_files(&self, file: &str) -> HashSet<&'a str> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut stack: Vec<&str> = vec![file];
        while let Some(current) = stack.pop() {
            for next in self.imports.get(current).into_iter().flatten() {
                if seen.insert(next.as_str()) {
                    stack.push(next.as_str());
                }
            }
        }
        seen
    }

    fn ancestors(
        &self,
        decl: usize,
        memo: &mut HashMap<usize, Vec<String>>,
        visiting: &mut HashSet<usize>,
    ) -> Vec<String> {
        if let Some(hit) = memo.get(&decl) {
            return hit.clone();
        }
        let name = &self.contracts[decl].name;
        if !visiting.insert(decl) {
            tracing::warn!("inheritance cycle through {name}");
            return vec![];
        }

        // Most-derived base first.
        let ordered: Vec<&String> = self.contracts[decl].bases.iter().rev().collect();
        let mut seqs: Vec<Vec<String>> = ordered
            .iter()
            .map(|b| {
                let mut seq = vec![(*b).clone()];
                if let Some(base_decl) = self.resolve_base(decl, b) {
                    seq.extend(self.ancestors(base_decl, memo, visiting));
                }
                seq
            })
            .collect();
        seqs.push(ordered.iter().map(|b| (*b).clone()).collect());

        let result = c3_merge(seqs.clone()).unwrap_or_else(|| {
            tracing::debug!("no consistent linearization for {name}, using declaration order");
            let mut flat = Vec::new();
            for seq in seqs {
                for n in seq {
                    if !flat.contains(&n) {
                        flat.push(n);
                    }
                }
            }
            flat
        });

        visiting.remove(&decl);
        memo.insert(decl, result.clone());
        result
    }
}

fn c3_merge(mut seqs: Vec<Vec<String>>) -> Option<Vec<String>> {
    let mut out = Vec::new();
    loop {
        seqs.retain(|s| !s.is_empty());
        if seqs.is_empty() {
            return Some(out);
        }
        let head = seqs
            .iter()
            .map(|s| &s[0])
            .find(|cand| !seqs.iter().any(|s| s[1..].contains(cand)))?
            .clone();
        for s in seqs.iter_mut() {
            if s[0] == head {
                s.remove(0);
            }
        }
        out.push(head);
    }
}
