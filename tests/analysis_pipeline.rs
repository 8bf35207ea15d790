use std::fs;
use std::path::{Path, PathBuf};

use locaudit::analyzer::{run_analysis, AnalysisOptions};
use locaudit::models::AnalysisReport;
use tempfile::TempDir;

fn write_locale(root: &Path, lang: &str, entries: &[(&str, &str)]) {
    let dir = root.join(format!("Resources/{lang}.lproj"));
    fs::create_dir_all(&dir).unwrap();
    let mut content = String::from("/* Localizable.strings */\n");
    for (key, value) in entries {
        content.push_str(&format!("\"{key}\" = \"{value}\";\n"));
    }
    fs::write(dir.join("Localizable.strings"), content).unwrap();
}

fn options(root: &Path) -> AnalysisOptions {
    AnalysisOptions {
        project_dir: root.to_path_buf(),
        locale_dir: root.join("Resources"),
        extension: "swift".to_string(),
        workers: 4,
        parallel: true,
        verbose: false,
    }
}

fn write_source(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

#[tokio::test(flavor = "multi_thread")]
async fn scan_classifies_localized_and_hardcoded() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_locale(root, "en", &[("button.save", "Save")]);
    write_locale(root, "es", &[("button.save", "Guardar")]);
    write_source(
        root,
        "Views/SaveView.swift",
        "Text(\"Save\")\nText(String(localized: \"button.save\"))\n",
    );

    let outcome = run_analysis(&options(root)).await.unwrap();

    assert_eq!(outcome.scan.usages.len(), 1);
    assert_eq!(outcome.scan.usages[0].key, "button.save");

    assert_eq!(outcome.scan.hardcoded.len(), 1);
    let record = &outcome.scan.hardcoded[0];
    assert_eq!(record.text, "Save");
    assert!(record.suggested_key.starts_with("text.save"));
    assert!(record.priority >= 8);

    assert!(outcome.lifecycle.missing.is_empty());
    assert!(outcome.lifecycle.dead.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn dead_and_missing_keys_are_derived() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_locale(root, "en", &[("a", "A"), ("b", "B"), ("c", "C")]);
    write_source(
        root,
        "Views/Home.swift",
        concat!(
            "Text(String(localized: \"b\"))\n",
            "Text(String(localized: \"c\"))\n",
            "Text(String(localized: \"d\"))\n",
        ),
    );

    let outcome = run_analysis(&options(root)).await.unwrap();

    assert_eq!(outcome.lifecycle.dead.iter().collect::<Vec<_>>(), vec!["a"]);
    assert_eq!(outcome.lifecycle.missing.len(), 1);
    assert_eq!(outcome.lifecycle.missing["d"], vec!["Views/Home.swift"]);
    assert_eq!(outcome.health.missing_keys_count, 1);
    assert_eq!(outcome.health.dead_keys_count, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn repeated_scans_are_identical() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_locale(root, "en", &[("screen.title", "Home")]);
    for i in 0..25 {
        write_source(
            root,
            &format!("Views/View{i:02}.swift"),
            "Button(\"Retry\")\nText(String(localized: \"screen.title\"))\n",
        );
    }

    let first = run_analysis(&options(root)).await.unwrap();
    let second = run_analysis(&options(root)).await.unwrap();

    assert_eq!(first.scan.usages, second.scan.usages);
    assert_eq!(first.scan.hardcoded, second.scan.hardcoded);
    assert_eq!(first.health, second.health);
}

#[tokio::test(flavor = "multi_thread")]
async fn report_exposes_dead_keys_for_external_tooling() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_locale(root, "en", &[("unused.key", "Old"), ("button.go", "Go")]);
    write_source(
        root,
        "Main.swift",
        "Button(String(localized: \"button.go\"))\nLabel(\"Welcome back\")\nLabel(\"Welcome back\")\n",
    );

    let outcome = run_analysis(&options(root)).await.unwrap();
    let path = outcome.write_report(root).unwrap();

    let report: AnalysisReport =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(report.dead_keys, vec!["unused.key"]);
    assert_eq!(report.duplicate_strings["Welcome back"], 2);
    assert_eq!(report.component_stats["Label"].hardcoded, 2);
    assert_eq!(report.component_stats["String.localized"].localized, 1);
    assert_eq!(report.key_patterns.frequency["button"], 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_locale_dir_is_a_setup_failure() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write_source(root, "Main.swift", "Text(\"Hello there\")\n");

    let err = run_analysis(&options(root)).await.unwrap_err();
    assert!(matches!(err, locaudit::AuditError::NoLocaleFiles(_)));
}
