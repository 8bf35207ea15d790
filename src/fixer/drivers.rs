use std::path::Path;

use crate::fixer::mutator::{Edit, EditOutcome, GuardedMutator};
use crate::models::{FixStats, HardcodedString};

/// Default batch threshold: only records at this priority or above are
/// auto-fixed.
pub const DEFAULT_MIN_PRIORITY: u8 = 8;

/// Operator decision for one reviewed item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewAction {
    /// Apply with the suggested key.
    Accept,
    /// No action; permanent for this run.
    Skip,
    /// Apply with an operator-supplied key instead.
    Rename(String),
    /// Abort the remaining queue immediately.
    Quit,
}

/// Seam between the interactive driver and the terminal. The CLI implements
/// this over stdin; tests script it.
pub trait ReviewPrompt {
    fn review(&mut self, item: &HardcodedString, position: usize, total: usize) -> ReviewAction;
}

/// Interactive session tallies, printed in the session summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub approved: usize,
    pub edited: usize,
    pub skipped: usize,
}

impl SessionSummary {
    pub fn total_reviewed(&self) -> usize {
        self.approved + self.edited + self.skipped
    }
}

fn report_outcome(outcome: &Result<EditOutcome, crate::error::AuditError>, edit: &Edit) {
    match outcome {
        Ok(EditOutcome::Applied) => {
            println!(
                "  ✅ Fixed: {}:{}",
                edit.file
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                edit.line
            );
        }
        Ok(EditOutcome::Preview { before, after }) => {
            println!("\n  [DRY RUN] {}:{}", edit.file.display(), edit.line);
            println!("    - {before}");
            println!("    + {after}");
        }
        Err(e) => println!("  ❌ Failed: {e}"),
    }
}

/// Batch mode: fix every record at or above the priority threshold, in
/// discovery order, each with its own suggested key.
pub fn run_batch(
    mutator: &mut GuardedMutator<'_>,
    project_dir: &Path,
    records: &[HardcodedString],
    min_priority: u8,
) -> FixStats {
    let selected: Vec<&HardcodedString> = records
        .iter()
        .filter(|record| record.priority >= min_priority)
        .collect();

    println!("Found {} high-priority strings to fix\n", selected.len());

    for record in selected {
        let edit = Edit::from_record(project_dir, record, &record.suggested_key);
        let outcome = mutator.apply(&edit);
        report_outcome(&outcome, &edit);
    }

    mutator.stats()
}

/// Interactive mode: records sorted by descending priority, one decision per
/// item. No action is reversible within the session.
pub fn run_interactive(
    mutator: &mut GuardedMutator<'_>,
    project_dir: &Path,
    records: &[HardcodedString],
    prompt: &mut dyn ReviewPrompt,
) -> SessionSummary {
    let mut queue: Vec<&HardcodedString> = records.iter().collect();
    queue.sort_by(|a, b| b.priority.cmp(&a.priority));

    let total = queue.len();
    let mut summary = SessionSummary::default();

    for (index, record) in queue.into_iter().enumerate() {
        match prompt.review(record, index + 1, total) {
            ReviewAction::Accept => {
                let edit = Edit::from_record(project_dir, record, &record.suggested_key);
                let outcome = mutator.apply(&edit);
                report_outcome(&outcome, &edit);
                if outcome.is_ok() {
                    summary.approved += 1;
                }
            }
            ReviewAction::Rename(key) => {
                let edit = Edit::from_record(project_dir, record, &key);
                let outcome = mutator.apply(&edit);
                report_outcome(&outcome, &edit);
                if outcome.is_ok() {
                    summary.edited += 1;
                }
            }
            ReviewAction::Skip => {
                println!("  ⏭️  Skipped");
                summary.skipped += 1;
            }
            ReviewAction::Quit => break,
        }
    }

    summary
}

/// Duplicate-group mode: collapse every occurrence of one literal onto the
/// suggested key of its first occurrence. Groups are processed most-frequent
/// first; occurrences keep the scanner's deterministic (file, line) order.
pub fn run_duplicates(
    mutator: &mut GuardedMutator<'_>,
    project_dir: &Path,
    groups: &std::collections::BTreeMap<String, Vec<HardcodedString>>,
) -> FixStats {
    let mut ordered: Vec<(&String, &Vec<HardcodedString>)> = groups.iter().collect();
    ordered.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(b.0)));

    println!("Found {} duplicate strings\n", ordered.len());

    for (text, occurrences) in ordered {
        let Some(first) = occurrences.first() else {
            continue;
        };
        let key = &first.suggested_key;
        println!("\nFixing duplicate: \"{text}\" ({} occurrences)", occurrences.len());
        println!("Using key: {key}");

        for record in occurrences {
            let edit = Edit::from_record(project_dir, record, key);
            let outcome = mutator.apply(&edit);
            report_outcome(&outcome, &edit);
        }
    }

    mutator.stats()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::lifecycle::duplicate_groups;
    use crate::models::UiCategory;
    use crate::store::{LocaleFile, TranslationStore};
    use std::fs;
    use tempfile::TempDir;

    fn setup(tmp: &TempDir) -> TranslationStore {
        let dir = tmp.path().join("en.lproj");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("Localizable.strings");
        fs::write(&path, "").unwrap();
        let mut store = TranslationStore::from_files(vec![LocaleFile {
            lang: "en".to_string(),
            path,
        }]);
        store.load();
        store
    }

    fn record(file: &str, line: usize, text: &str, priority: u8) -> HardcodedString {
        HardcodedString {
            file: file.to_string(),
            line,
            text: text.to_string(),
            component: "Button".to_string(),
            category: UiCategory::VisibleUi,
            priority,
            suggested_key: crate::analyzer::priority::suggest_key(text, "Button"),
        }
    }

    struct Scripted(Vec<ReviewAction>);

    impl ReviewPrompt for Scripted {
        fn review(&mut self, _: &HardcodedString, _: usize, _: usize) -> ReviewAction {
            if self.0.is_empty() {
                ReviewAction::Quit
            } else {
                self.0.remove(0)
            }
        }
    }

    #[test]
    fn batch_respects_the_threshold() {
        let tmp = TempDir::new().unwrap();
        let mut store = setup(&tmp);
        fs::write(tmp.path().join("A.swift"), "Button(\"Save\")\n").unwrap();
        fs::write(tmp.path().join("B.swift"), "Button(\"Maybe later sometime soon\")\n").unwrap();

        let records = vec![
            record("A.swift", 1, "Save", 9),
            record("B.swift", 1, "Maybe later sometime soon", 3),
        ];

        let mut mutator = GuardedMutator::new(&mut store, false);
        let stats = run_batch(&mut mutator, tmp.path(), &records, DEFAULT_MIN_PRIORITY);

        assert_eq!(stats.applied, 1);
        assert_eq!(stats.failed, 0);
        assert!(fs::read_to_string(tmp.path().join("A.swift"))
            .unwrap()
            .contains("String(localized:"));
        assert!(!fs::read_to_string(tmp.path().join("B.swift"))
            .unwrap()
            .contains("String(localized:"));
    }

    #[test]
    fn interactive_actions_apply_skip_rename_quit() {
        let tmp = TempDir::new().unwrap();
        let mut store = setup(&tmp);
        fs::write(
            tmp.path().join("A.swift"),
            "Button(\"Save\")\nButton(\"Cancel\")\nButton(\"Later\")\nButton(\"Never\")\n",
        )
        .unwrap();

        let records = vec![
            record("A.swift", 1, "Save", 10),
            record("A.swift", 2, "Cancel", 9),
            record("A.swift", 3, "Later", 8),
            record("A.swift", 4, "Never", 7),
        ];

        let mut prompt = Scripted(vec![
            ReviewAction::Accept,
            ReviewAction::Rename("action.cancel".to_string()),
            ReviewAction::Skip,
            ReviewAction::Quit,
        ]);

        let mut mutator = GuardedMutator::new(&mut store, false);
        let summary = run_interactive(&mut mutator, tmp.path(), &records, &mut prompt);

        assert_eq!(summary.approved, 1);
        assert_eq!(summary.edited, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.total_reviewed(), 3);

        let content = fs::read_to_string(tmp.path().join("A.swift")).unwrap();
        assert!(content.contains("String(localized: \"button.save\")"));
        assert!(content.contains("String(localized: \"action.cancel\")"));
        assert!(content.contains("Button(\"Later\")"));
        assert!(content.contains("Button(\"Never\")"));
    }

    #[test]
    fn duplicate_fix_collapses_onto_one_key() {
        let tmp = TempDir::new().unwrap();
        let mut store = setup(&tmp);
        fs::write(tmp.path().join("A.swift"), "Button(\"Retry\")\n").unwrap();
        fs::write(tmp.path().join("B.swift"), "Button(\"Retry\")\n").unwrap();
        fs::write(tmp.path().join("C.swift"), "Button(\"Retry\")\n").unwrap();

        let records = vec![
            record("A.swift", 1, "Retry", 10),
            record("B.swift", 1, "Retry", 10),
            record("C.swift", 1, "Retry", 10),
        ];
        let groups = duplicate_groups(&records);
        let keys_before = store.key_count();

        let mut mutator = GuardedMutator::new(&mut store, false);
        let stats = run_duplicates(&mut mutator, tmp.path(), &groups);

        assert_eq!(stats.applied, 3);
        assert_eq!(stats.failed, 0);
        // Exactly one new key for the whole group.
        assert_eq!(store.key_count(), keys_before + 1);
        for file in ["A.swift", "B.swift", "C.swift"] {
            assert!(fs::read_to_string(tmp.path().join(file))
                .unwrap()
                .contains("String(localized: \"button.retry\")"));
        }
    }
}
