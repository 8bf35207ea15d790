use std::fs;
use std::path::{Path, PathBuf};

use locaudit::analyzer::{run_analysis, AnalysisOptions};
use locaudit::fixer::{self, GuardedMutator};
use tempfile::TempDir;

fn write_locale(root: &Path, lang: &str, entries: &[(&str, &str)]) -> PathBuf {
    let dir = root.join(format!("Resources/{lang}.lproj"));
    fs::create_dir_all(&dir).unwrap();
    let mut content = String::new();
    for (key, value) in entries {
        content.push_str(&format!("\"{key}\" = \"{value}\";\n"));
    }
    let path = dir.join("Localizable.strings");
    fs::write(&path, content).unwrap();
    path
}

fn options(root: &Path) -> AnalysisOptions {
    AnalysisOptions {
        project_dir: root.to_path_buf(),
        locale_dir: root.join("Resources"),
        extension: "swift".to_string(),
        workers: 4,
        parallel: false,
        verbose: false,
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn batch_fix_applies_only_above_threshold() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_locale(root, "en", &[]);
    // Button -> priority 10; a long internal-ish TextField literal scores
    // below the default threshold.
    fs::write(root.join("A.swift"), "Button(\"Save\")\n").unwrap();
    fs::write(
        root.join("B.swift"),
        "TextField(\"Tell us about everything you did today\")\n",
    )
    .unwrap();

    let outcome = run_analysis(&options(root)).await.unwrap();
    let mut store = outcome.store;

    let mut mutator = GuardedMutator::new(&mut store, false);
    let stats = fixer::run_batch(
        &mut mutator,
        root,
        &outcome.scan.hardcoded,
        fixer::DEFAULT_MIN_PRIORITY,
    );

    assert_eq!(stats.applied, 1);
    assert_eq!(stats.failed, 0);
    assert!(fs::read_to_string(root.join("A.swift"))
        .unwrap()
        .contains("String(localized: \"button.save\")"));
    assert!(fs::read_to_string(root.join("B.swift"))
        .unwrap()
        .contains("TextField(\"Tell us about everything you did today\")"));

    // The fixed literal is localized on the next scan.
    let rescan = run_analysis(&options(root)).await.unwrap();
    assert!(rescan
        .scan
        .usages
        .iter()
        .any(|usage| usage.key == "button.save"));
    assert!(!rescan
        .scan
        .hardcoded
        .iter()
        .any(|record| record.text == "Save"));
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_fix_collapses_every_occurrence_onto_one_key() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    let locale = write_locale(root, "en", &[("existing", "Keep")]);
    for name in ["A.swift", "B.swift", "C.swift"] {
        fs::write(root.join(name), "Button(\"Retry\")\n").unwrap();
    }

    let outcome = run_analysis(&options(root)).await.unwrap();
    assert_eq!(outcome.duplicates["Retry"].len(), 3);

    let mut store = outcome.store;
    let keys_before = store.key_count();

    let mut mutator = GuardedMutator::new(&mut store, false);
    let stats = fixer::run_duplicates(&mut mutator, root, &outcome.duplicates);

    assert_eq!(stats.applied, 3);
    // Exactly one new store entry for the whole group.
    assert_eq!(store.key_count(), keys_before + 1);
    assert_eq!(
        fs::read_to_string(&locale)
            .unwrap()
            .matches("\"button.retry\"")
            .count(),
        1
    );

    let rescan = run_analysis(&options(root)).await.unwrap();
    let retry_usages: Vec<_> = rescan
        .scan
        .usages
        .iter()
        .filter(|usage| usage.key == "button.retry")
        .collect();
    assert_eq!(retry_usages.len(), 3);
    assert!(rescan.scan.hardcoded.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn dry_run_session_changes_nothing() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    let locale = write_locale(root, "en", &[]);
    fs::write(root.join("A.swift"), "Button(\"Save\")\n").unwrap();
    let source_before = fs::read_to_string(root.join("A.swift")).unwrap();
    let locale_before = fs::read_to_string(&locale).unwrap();

    let outcome = run_analysis(&options(root)).await.unwrap();
    let mut store = outcome.store;
    let keys_before = store.key_count();

    let mut mutator = GuardedMutator::new(&mut store, true);
    let stats = fixer::run_batch(&mut mutator, root, &outcome.scan.hardcoded, 0);

    assert_eq!(stats.applied, 1);
    assert_eq!(fs::read_to_string(root.join("A.swift")).unwrap(), source_before);
    assert_eq!(fs::read_to_string(&locale).unwrap(), locale_before);
    assert_eq!(store.key_count(), keys_before);
}

#[tokio::test(flavor = "multi_thread")]
async fn stale_edit_is_counted_not_escalated() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_locale(root, "en", &[]);
    fs::write(root.join("A.swift"), "Button(\"Save\")\n").unwrap();
    fs::write(root.join("B.swift"), "Button(\"Cancel\")\n").unwrap();

    let outcome = run_analysis(&options(root)).await.unwrap();

    // The file changes between scan and fix.
    fs::write(root.join("A.swift"), "Button(\"Renamed\")\n").unwrap();

    let mut store = outcome.store;
    let mut mutator = GuardedMutator::new(&mut store, false);
    let stats = fixer::run_batch(&mut mutator, root, &outcome.scan.hardcoded, 0);

    // One stale failure, and the batch still completed the other edit.
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.applied, 1);
    assert_eq!(
        fs::read_to_string(root.join("A.swift")).unwrap(),
        "Button(\"Renamed\")\n"
    );
    assert!(fs::read_to_string(root.join("B.swift"))
        .unwrap()
        .contains("String(localized: \"button.cancel\")"));
}
