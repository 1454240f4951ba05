use std::path::{Path, PathBuf};

use trex_core::config::TrexConfig;
use trex_core::model::ContractModel;
use trex_core::snapshot::ModelSnapshot;
use trex_core::types::ModelError;
use trex_output::markdown::MarkdownFormatter;
use trex_output::OutputFormatter;
use trex_parsers::loader::ProjectLoader;
use trex_rules::engine::RulesetEngine;
use trex_rules::findings::FindingSink;
use trex_rules::types::Finding;

/// Streams each finding through the active formatter.
struct StdoutSink<'a> {
    formatter: &'a dyn OutputFormatter,
}

impl FindingSink for StdoutSink<'_> {
    fn on_finding(&mut self, finding: &Finding) {
        emit(&self.formatter.format_finding(finding));
    }
}

/// Run `trexlint [TARGET]`: load the model, evaluate C1 to C4, report.
pub fn run(
    formatter: &dyn OutputFormatter,
    target: PathBuf,
    root: Option<PathBuf>,
    model_path: Option<PathBuf>,
    export_model: Option<PathBuf>,
    report_path: Option<PathBuf>,
) -> i32 {
    let root = root.unwrap_or_else(|| default_root(&target));
    let config = TrexConfig::load(&root);

    let model = match load_model(&target, &root, model_path.as_deref(), &config) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("trexlint: failed to load contract model: {}", e);
            return 2;
        }
    };

    if let Some(path) = &export_model {
        if let Err(e) = model.save(path) {
            eprintln!("trexlint: failed to export model: {}", e);
            return 2;
        }
        tracing::info!(path = %path.display(), "model snapshot written");
    }

    emit(&formatter.format_inventory(&model.contract_names_sorted()));

    let engine = RulesetEngine::with_config(&root, &config);
    let mut sink = StdoutSink { formatter };
    let mut report = engine.run(&model, &mut sink);
    report.target = target.display().to_string();

    emit(&formatter.format_report(&report));

    if let Some(path) = &report_path {
        if let Err(e) = std::fs::write(path, MarkdownFormatter.format_report(&report)) {
            eprintln!("trexlint: failed to write report {}: {}", path.display(), e);
        }
    }

    report.exit_code()
}

fn load_model(
    target: &Path,
    root: &Path,
    model_path: Option<&Path>,
    config: &TrexConfig,
) -> Result<ModelSnapshot, ModelError> {
    match model_path {
        Some(path) => ModelSnapshot::load(path),
        None => ProjectLoader::new(target)
            .with_project_root(root)
            .with_ignore_patterns(config.ignore_patterns.clone())
            .load(),
    }
}

/// The target itself when it is a directory, otherwise its parent.
pub(crate) fn default_root(target: &Path) -> PathBuf {
    if target.is_dir() {
        return target.to_path_buf();
    }
    match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn emit(text: &str) {
    if text.is_empty() {
        return;
    }
    if text.ends_with('\n') {
        print!("{}", text);
    } else {
        println!("{}", text);
    }
}
