use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

/// Project-local ignore file, same syntax as `.gitignore`.
pub const IGNORE_FILE: &str = ".trexignore";

/// Discovers Solidity sources under a target.
///
/// `node_modules` is never walked: vendor files enter the model only when a
/// project source imports them.
pub struct FileWalker {
    root: PathBuf,
    ignore: Option<GlobSet>,
}

impl FileWalker {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            ignore: None,
        }
    }

    /// Exclude paths (relative to the walk root) matching any of `patterns`.
    /// Invalid globs are logged and skipped.
    pub fn with_ignore_patterns(mut self, patterns: &[String]) -> Self {
        if patterns.is_empty() {
            return self;
        }
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            match Glob::new(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => tracing::warn!("ignoring invalid pattern {pattern:?}: {e}"),
            }
        }
        match builder.build() {
            Ok(set) => self.ignore = Some(set),
            Err(e) => tracing::warn!("failed to build ignore patterns: {e}"),
        }
        self
    }

    /// All `.sol` files, sorted by path.
    pub fn walk(&self) -> Vec<PathBuf> {
        if self.root.is_file() {
            return if is_solidity(&self.root) {
                vec![self.root.clone()]
            } else {
                vec![]
            };
        }

        let mut entries = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .hidden(true)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .require_git(false)
            .add_custom_ignore_filename(IGNORE_FILE)
            .filter_entry(|e| e.file_name() != "node_modules")
            .build();

        for result in walker {
            let entry = match result {
                Ok(e) => e,
                Err(e) => {
                    tracing::debug!("walk error: {e}");
                    continue;
                }
            };

            if !entry.file_type().map_or(false, |ft| ft.is_file()) {
                continue;
            }

            let path = entry.into_path();
            if !is_solidity(&path) || self.is_ignored(&path) {
                continue;
            }
            entries.push(path);
        }

        entries.sort();
        entries
    }

    fn is_ignored(&self, path: &Path) -> bool {
        let Some(set) = &self.ignore else {
            return false;
        };
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        set.is_match(rel)
    }
}

pub fn is_solidity(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("sol")
}
