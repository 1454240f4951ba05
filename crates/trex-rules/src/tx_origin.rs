//! C3: `tx.origin` must not appear in project or vendor sources.
//!
//! This rule reads files directly and ignores the contract model, so vendor
//! code that never made it into the model is still covered.

use std::path::Path;

use walkdir::WalkDir;

use crate::findings::Findings;
use crate::types::RuleId;

pub const FORBIDDEN: &str = "tx.origin";

/// Paths (relative to `project_root`, `/`-separated) of `.sol` files under
/// `scan_dirs` that contain `tx.origin`. Missing roots and unreadable files are skipped.
pub fn scan(project_root: &Path, scan_dirs: &[String]) -> Vec<String> {
    let mut hits = Vec::new();
    for dir in scan_dirs {
        let base = project_root.join(dir);
        if !base.is_dir() {
            tracing::debug!("scan root {} not found, skipping", base.display());
            continue;
        }
        for entry in WalkDir::new(&base).sort_by_file_name() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::debug!("walk error: {e}");
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("sol") {
                continue;
            }
            let bytes = match std::fs::read(path) {
                Ok(b) => b,
                Err(e) => {
                    tracing::debug!("skipping {}: {e}", path.display());
                    continue;
                }
            };
            if String::from_utf8_lossy(&bytes).contains(FORBIDDEN) {
                let rel = path.strip_prefix(project_root).unwrap_or(path);
                hits.push(rel.to_string_lossy().replace('\\', "/"));
            }
        }
    }
    hits
}

pub fn check(project_root: &Path, scan_dirs: &[String], out: &mut Findings<'_>) {
    let hits = scan(project_root, scan_dirs);
    if hits.is_empty() {
        return;
    }
    out.fail(
        RuleId::C3,
        format!("C3: tx.origin usage found in:\n  - {}", hits.join("\n  - ")),
    );
}
