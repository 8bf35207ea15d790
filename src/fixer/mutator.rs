use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AuditError;
use crate::models::{FixStats, HardcodedString};
use crate::store::TranslationStore;

/// One requested source edit: swap the quoted literal on a known line for a
/// translation-lookup call tied to `key`.
#[derive(Debug, Clone)]
pub struct Edit {
    pub file: PathBuf,
    pub line: usize,
    pub text: String,
    pub component: String,
    pub key: String,
    /// Explicit per-language translations; every language falls back to the
    /// original literal when absent.
    pub translations: BTreeMap<String, String>,
}

impl Edit {
    pub fn from_record(project_dir: &Path, record: &HardcodedString, key: &str) -> Self {
        Self {
            file: project_dir.join(&record.file),
            line: record.line,
            text: record.text.clone(),
            component: record.component.clone(),
            key: key.to_string(),
            translations: BTreeMap::new(),
        }
    }
}

/// Terminal state of one edit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    /// Dry-run: the before/after lines, trimmed, with no disk or store write.
    Preview { before: String, after: String },
}

/// The safe file-edit protocol: validate, render, register the key, rewrite
/// the single target line. Borrows the store; owns only its counters. Edits
/// are applied strictly sequentially, never in parallel.
#[derive(Debug)]
pub struct GuardedMutator<'a> {
    store: &'a mut TranslationStore,
    dry_run: bool,
    stats: FixStats,
}

impl<'a> GuardedMutator<'a> {
    pub fn new(store: &'a mut TranslationStore, dry_run: bool) -> Self {
        Self {
            store,
            dry_run,
            stats: FixStats::default(),
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Cumulative applied/failed counts across this mutator's lifetime.
    pub fn stats(&self) -> FixStats {
        self.stats
    }

    /// Run one edit through the full protocol. Failures are returned per
    /// item and counted; they never abort a batch.
    pub fn apply(&mut self, edit: &Edit) -> Result<EditOutcome, AuditError> {
        let outcome = self.try_apply(edit);
        match outcome {
            Ok(_) => self.stats.applied += 1,
            Err(_) => self.stats.failed += 1,
        }
        outcome
    }

    fn try_apply(&mut self, edit: &Edit) -> Result<EditOutcome, AuditError> {
        // Validate against the file as it is now, not as it was scanned.
        let content = fs::read_to_string(&edit.file)?;
        let had_trailing_newline = content.ends_with('\n');
        let mut lines: Vec<String> = content.lines().map(str::to_string).collect();

        if edit.line < 1 || edit.line > lines.len() {
            return Err(AuditError::LineOutOfBounds {
                file: edit.file.clone(),
                line: edit.line,
                len: lines.len(),
            });
        }

        let target = &lines[edit.line - 1];
        let quoted = format!("\"{}\"", edit.text);
        if !target.contains(&quoted) {
            return Err(AuditError::StaleEdit {
                file: edit.file.clone(),
                line: edit.line,
                text: edit.text.clone(),
            });
        }

        let replacement = render_replacement(&edit.component, &edit.key);
        let new_line = target.replace(&quoted, &replacement);

        if self.dry_run {
            return Ok(EditOutcome::Preview {
                before: target.trim().to_string(),
                after: new_line.trim().to_string(),
            });
        }

        // Register the key before touching the source file, seeding every
        // language with the original literal unless a translation was given.
        if !self.store.key_exists(&edit.key) {
            let status =
                self.store
                    .add_key_with(&edit.key, &edit.translations, &edit.text, false);
            if !status.is_success() {
                return Err(AuditError::KeyAlreadyExists(edit.key.clone()));
            }
        }

        lines[edit.line - 1] = new_line;
        let mut rebuilt = lines.join("\n");
        if had_trailing_newline {
            rebuilt.push('\n');
        }
        fs::write(&edit.file, rebuilt)?;

        Ok(EditOutcome::Applied)
    }
}

/// The lookup-call text substituted for the literal. Every component kind
/// maps to the same shape; the uniformity is intentional.
pub fn render_replacement(_component: &str, key: &str) -> String {
    format!("String(localized: \"{key}\")")
}
