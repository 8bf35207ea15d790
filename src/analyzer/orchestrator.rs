use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::analyzer::{health, lifecycle, priority};
use crate::error::AuditError;
use crate::models::{
    AnalysisReport, ComponentStats, HardcodedString, HealthSnapshot, KeyPatternBreakdown,
    ReportMetadata,
};
use crate::patterns::PatternLibrary;
use crate::scanner::{ScanResult, Scanner};
use crate::store::TranslationStore;

pub const REPORT_FILE: &str = "localization_report.json";

/// Settings for one analysis pass.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub project_dir: PathBuf,
    pub locale_dir: PathBuf,
    pub extension: String,
    pub workers: usize,
    pub parallel: bool,
    pub verbose: bool,
}

/// Fully-materialized result of one pass: the loaded store, the merged scan,
/// the derived key sets, and the health snapshot.
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub store: TranslationStore,
    pub scan: ScanResult,
    pub lifecycle: lifecycle::KeyLifecycle,
    pub duplicates: BTreeMap<String, Vec<HardcodedString>>,
    pub key_patterns: KeyPatternBreakdown,
    pub health: HealthSnapshot,
    pub files_scanned: usize,
}

impl AnalysisOutcome {
    pub fn to_report(&self, project: &str) -> AnalysisReport {
        let mut component_stats: BTreeMap<String, ComponentStats> = BTreeMap::new();
        for usage in &self.scan.usages {
            component_stats
                .entry(usage.construct.clone())
                .or_default()
                .localized += 1;
        }
        for record in &self.scan.hardcoded {
            component_stats
                .entry(record.component.clone())
                .or_default()
                .hardcoded += 1;
        }

        AnalysisReport {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                project: project.to_string(),
            },
            health_score: self.health.clone(),
            key_patterns: self.key_patterns.clone(),
            component_stats,
            hardcoded_strings: self.scan.hardcoded.clone(),
            duplicate_strings: self
                .duplicates
                .iter()
                .map(|(text, occurrences)| (text.clone(), occurrences.len()))
                .collect(),
            dead_keys: self.lifecycle.dead.iter().cloned().collect(),
            missing_keys: self.lifecycle.missing.clone(),
        }
    }

    /// Write the machine-readable report consumed by external cleanup
    /// tooling (pretty-printed JSON under the project root).
    pub fn write_report(&self, project_dir: &Path) -> Result<PathBuf, AuditError> {
        let project = project_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project".to_string());
        let report = self.to_report(&project);
        let path = project_dir.join(REPORT_FILE);
        fs::write(&path, serde_json::to_string_pretty(&report)?)?;
        Ok(path)
    }
}

/// Run the full pipeline: load the store, discover and scan the tree, derive
/// the key lifecycle, and score health. The store and scanner run on
/// independent inputs; everything after the scan is sequential.
pub async fn run_analysis(options: &AnalysisOptions) -> Result<AnalysisOutcome, AuditError> {
    let mut store = TranslationStore::discover(&options.locale_dir)?;
    store.load();

    if options.verbose {
        eprintln!(
            "📚 Loaded {} keys across {} languages",
            store.key_count(),
            store.languages().len()
        );
    }

    let library = PatternLibrary::builtin();
    run_analysis_with(options, store, library).await
}

/// Variant taking a pre-loaded store and pattern library (custom rules file,
/// tests, watch-mode rescans).
pub async fn run_analysis_with(
    options: &AnalysisOptions,
    store: TranslationStore,
    library: PatternLibrary,
) -> Result<AnalysisOutcome, AuditError> {
    let scanner = Scanner::new(library, options.extension.clone(), options.workers);
    let files = scanner.discover_files(&options.project_dir)?;

    if options.verbose {
        eprintln!("🔍 Scanning {} source files", files.len());
    }

    let mut scan = scanner
        .analyze_all(&options.project_dir, &files, options.parallel)
        .await;

    // Priorities and key suggestions are derived after the merge so the
    // parallel phase stays free of shared state.
    for record in &mut scan.hardcoded {
        record.priority = priority::priority(record.category, &record.component, &record.text);
        record.suggested_key = priority::suggest_key(&record.text, &record.component);
    }

    let lifecycle_sets = lifecycle::KeyLifecycle::compute(store.existing_keys(), &scan.usages);
    let duplicates = lifecycle::duplicate_groups(&scan.hardcoded);
    let key_patterns = lifecycle::key_pattern_breakdown(store.existing_keys());

    let health = health::score(health::HealthInputs {
        localized: scan.usages.len(),
        hardcoded: scan.hardcoded.len(),
        missing_keys: lifecycle_sets.missing.len(),
        dead_keys: lifecycle_sets.dead.len(),
        duplicate_groups: duplicates.len(),
    });

    Ok(AnalysisOutcome {
        store,
        scan,
        lifecycle: lifecycle_sets,
        duplicates,
        key_patterns,
        health,
        files_scanned: files.len(),
    })
}
