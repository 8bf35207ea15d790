use std::path::Path;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use notify::{RecursiveMode, Watcher};

use crate::analyzer::{run_analysis, AnalysisOptions};
use crate::error::AuditError;

/// Changes arriving within this window after a triggered run are coalesced.
const DEBOUNCE: Duration = Duration::from_secs(2);

/// Watch the project tree and re-run the scan pipeline on source-file
/// changes. Runs until the process is terminated.
pub async fn run_watch(options: &AnalysisOptions) -> Result<(), AuditError> {
    let (tx, rx) = mpsc::channel();

    let mut watcher = notify::recommended_watcher(move |result: notify::Result<notify::Event>| {
        if let Ok(event) = result {
            let _ = tx.send(event);
        }
    })
    .map_err(|e| AuditError::WatchError(e.to_string()))?;

    watcher
        .watch(&options.project_dir, RecursiveMode::Recursive)
        .map_err(|e| AuditError::WatchError(e.to_string()))?;

    println!("\n👁️  WATCH MODE ACTIVE");
    println!("Monitoring: {}", options.project_dir.display());
    println!("Press Ctrl+C to stop\n");

    let mut last_run: Option<Instant> = None;

    loop {
        let event = match rx.recv() {
            Ok(event) => event,
            // Watcher gone; nothing left to do.
            Err(mpsc::RecvError) => return Ok(()),
        };

        if !touches_source(&event, &options.extension) {
            continue;
        }

        if last_run.is_some_and(|t| t.elapsed() < DEBOUNCE) {
            continue;
        }
        last_run = Some(Instant::now());

        if let Some(path) = event.paths.first() {
            println!("🔄 File changed: {}", path.display());
        }
        run_quick_analysis(options).await;
    }
}

fn touches_source(event: &notify::Event, extension: &str) -> bool {
    event
        .paths
        .iter()
        .any(|path| has_extension(path, extension))
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e == extension)
}

async fn run_quick_analysis(options: &AnalysisOptions) {
    println!("Running quick analysis...");
    match run_analysis(options).await {
        Ok(outcome) => {
            let health = &outcome.health;
            println!("✓ Analysis complete");
            println!(
                "  Localization: {}% ({}/{})",
                health.localization_rate, health.localized_count, health.total_strings
            );
            println!("  Hardcoded: {}", health.hardcoded_count);
            println!("  Watching for changes...\n");
        }
        Err(e) => {
            // A transient failure (e.g. a file mid-save) should not stop the
            // watch loop.
            eprintln!("⚠️  Analysis failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn extension_filter_matches_only_source_files() {
        assert!(has_extension(&PathBuf::from("/a/b/View.swift"), "swift"));
        assert!(!has_extension(&PathBuf::from("/a/b/notes.txt"), "swift"));
        assert!(!has_extension(&PathBuf::from("/a/b/swift"), "swift"));
    }
}
