pub mod args;
pub mod prompt;
pub mod reporter;
pub mod watch;

pub use args::Cli;
pub use prompt::FixPrompter;
pub use reporter::ReportFormatter;

use crate::analyzer::{run_analysis_with, AnalysisOptions, AnalysisOutcome};
use crate::error::AuditError;
use crate::fixer::{self, GuardedMutator};
use crate::patterns::PatternLibrary;
use crate::store::TranslationStore;

pub struct CliHandler {
    cli: Cli,
}

impl CliHandler {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    pub async fn run(&self) -> Result<i32, AuditError> {
        let options = self.analysis_options();

        if self.cli.watch {
            watch::run_watch(&options).await?;
            return Ok(0);
        }

        let formatter = ReportFormatter::new(self.cli.should_use_color());
        formatter.print_banner("🚀 Localization Coverage Audit");

        // Step 1: pattern library (built-in table, or an external rules file)
        let library = match &self.cli.patterns {
            Some(path) => PatternLibrary::load(path)?,
            None => PatternLibrary::builtin(),
        };

        // Step 2: load the translation store
        let mut store = TranslationStore::discover(&options.locale_dir)?;
        store.load();
        if self.cli.verbose {
            eprintln!(
                "📚 Loaded {} keys across {} languages",
                store.key_count(),
                store.languages().len()
            );
        }

        // Step 3: scan and derive
        let outcome = run_analysis_with(&options, store, library).await?;
        formatter.print_analysis_summary(&outcome.health, outcome.files_scanned);

        // Step 4: machine-readable report for external tooling
        let report_path = outcome.write_report(&options.project_dir)?;
        println!("📝 Report written to {}", report_path.display());

        if !self.cli.is_mutating() {
            return Ok(0);
        }

        self.run_fix_session(outcome, &formatter)
    }

    /// Drive the selected remediation mode over the analysis outcome. The
    /// backup precedes the first edit; edit failures are counted, never
    /// escalated, so the session itself always completes.
    fn run_fix_session(
        &self,
        outcome: AnalysisOutcome,
        formatter: &ReportFormatter,
    ) -> Result<i32, AuditError> {
        let AnalysisOutcome {
            mut store,
            scan,
            duplicates,
            ..
        } = outcome;

        // Backup-first: edits without a backup violate the safety contract.
        let backup_dir = if self.cli.no_backup || self.cli.dry_run {
            None
        } else {
            let dir = fixer::create_backup(&self.cli.project_dir, store.locale_files())?;
            println!("\n💾 Creating backup: {}", dir.display());
            Some(dir)
        };

        let mut mutator = GuardedMutator::new(&mut store, self.cli.dry_run);

        if self.cli.interactive {
            formatter.print_fix_header("🎮 INTERACTIVE MODE", self.cli.dry_run);
            let mut prompter = FixPrompter::new(self.cli.should_use_color());
            prompter.print_intro(scan.hardcoded.len());
            let summary = fixer::run_interactive(
                &mut mutator,
                &self.cli.project_dir,
                &scan.hardcoded,
                &mut prompter,
            );
            formatter.print_session_summary(&summary);
        } else if self.cli.auto_fix {
            formatter.print_fix_header("⚡ AUTO-FIX MODE", self.cli.dry_run);
            println!("Fixing strings with priority >= {}", self.cli.min_priority);
            let stats = fixer::run_batch(
                &mut mutator,
                &self.cli.project_dir,
                &scan.hardcoded,
                self.cli.min_priority,
            );
            formatter.print_fix_stats("Auto-fix", stats);
        }

        if self.cli.fix_duplicates {
            formatter.print_fix_header("📦 FIX DUPLICATES MODE", self.cli.dry_run);
            let stats = fixer::run_duplicates(&mut mutator, &self.cli.project_dir, &duplicates);
            formatter.print_fix_stats("Duplicate fix", stats);
        }

        if let Some(dir) = backup_dir {
            formatter.print_backup_info(&dir);
        }

        Ok(0)
    }

    fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            project_dir: self.cli.project_dir.clone(),
            locale_dir: self.cli.locale_dir(),
            extension: self.cli.ext.clone(),
            workers: self.cli.threads,
            parallel: self.cli.use_parallel(),
            verbose: self.cli.verbose,
        }
    }
}
