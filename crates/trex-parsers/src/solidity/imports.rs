//! Import path resolution.
//!
//! Relative imports (`./`, `../`) resolve against the importing file. Package
//! imports go through `remappings.txt` when present, then the usual package
//! roots (`node_modules`, the project root, `lib`).

use std::path::{Path, PathBuf};

const PACKAGE_ROOTS: &[&str] = &["node_modules", "", "lib"];

/// `prefix=target` lines from a Foundry-style `remappings.txt`.
#[derive(Debug, Clone, Default)]
pub struct Remappings {
    entries: Vec<(String, String)>,
}

impl Remappings {
    pub fn load(project_root: &Path) -> Self {
        match std::fs::read_to_string(project_root.join("remappings.txt")) {
            Ok(content) => Self::parse(&content),
            Err(_) => Self::default(),
        }
    }

    pub fn parse(content: &str) -> Self {
        let mut entries: Vec<(String, String)> = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .filter_map(|l| {
                // Drop an optional `context:` qualifier.
                let l = match l.split_once(':') {
                    Some((_, rest)) if rest.contains('=') => rest,
                    _ => l,
                };
                let (from, to) = l.split_once('=')?;
                Some((from.trim().to_string(), to.trim().to_string()))
            })
            .collect();
        // Longest prefix wins.
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { entries }
    }

    pub fn apply(&self, spec: &str) -> Option<String> {
        self.entries.iter().find_map(|(from, to)| {
            spec.strip_prefix(from.as_str())
                .map(|rest| format!("{to}{rest}"))
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolve an import as written in `importer` to an existing file.
pub fn resolve_import(
    project_root: &Path,
    importer: &Path,
    spec: &str,
    remappings: &Remappings,
) -> Option<PathBuf> {
    let mut candidates = Vec::new();
    if spec.starts_with('.') {
        candidates.push(importer.parent()?.join(spec));
    } else {
        if let Some(mapped) = remappings.apply(spec) {
            candidates.push(project_root.join(mapped));
        }
        for root in PACKAGE_ROOTS {
            candidates.push(project_root.join(root).join(spec));
        }
    }
    candidates
        .into_iter()
        .find(|p| p.is_file())
        .map(|p| std::fs::canonicalize(&p).unwrap_or(p))
}
