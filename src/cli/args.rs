use std::path::PathBuf;

use clap::Parser;

use crate::error::AuditError;
use crate::fixer::DEFAULT_MIN_PRIORITY;
use crate::scanner::DEFAULT_WORKERS;

#[derive(Parser, Debug)]
#[command(name = "locaudit")]
#[command(about = "Audit and incrementally repair the localization coverage of a UI source tree")]
#[command(version)]
pub struct Cli {
    /// Automatically fix hardcoded strings at or above --min-priority
    #[arg(long)]
    pub auto_fix: bool,

    /// Interactive mode - review each fix one by one
    #[arg(long)]
    pub interactive: bool,

    /// Collapse duplicate literals onto a single key each
    #[arg(long)]
    pub fix_duplicates: bool,

    /// Watch mode - monitor source files and re-run the analysis on change
    #[arg(long)]
    pub watch: bool,

    /// Preview changes without touching disk or the translation store
    #[arg(long)]
    pub dry_run: bool,

    /// Skip backup creation before a mutating session
    #[arg(long)]
    pub no_backup: bool,

    /// Disable the parallel scan phase
    #[arg(long)]
    pub no_threads: bool,

    /// Worker-pool size for the scan phase
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    pub threads: usize,

    /// Minimum priority for --auto-fix (0-10)
    #[arg(long, default_value_t = DEFAULT_MIN_PRIORITY)]
    pub min_priority: u8,

    /// Project root to scan
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Directory holding <lang>.lproj locale folders
    /// (defaults to <project-dir>/Resources)
    #[arg(long)]
    pub locale_dir: Option<PathBuf>,

    /// Source-file extension to scan
    #[arg(long, default_value = "swift")]
    pub ext: String,

    /// External JSON pattern-rules file replacing the built-in table
    #[arg(long)]
    pub patterns: Option<PathBuf>,

    /// Verbose diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn parse_args() -> Result<Self, AuditError> {
        let cli = Self::try_parse().map_err(|e| AuditError::InvalidArguments(e.to_string()))?;
        cli.validate()?;
        Ok(cli)
    }

    pub fn validate(&self) -> Result<(), AuditError> {
        if self.min_priority > 10 {
            return Err(AuditError::InvalidArguments(
                "--min-priority must be between 0 and 10".to_string(),
            ));
        }

        if self.threads == 0 {
            return Err(AuditError::InvalidArguments(
                "--threads must be at least 1".to_string(),
            ));
        }

        if self.watch && (self.auto_fix || self.interactive || self.fix_duplicates) {
            return Err(AuditError::InvalidArguments(
                "--watch cannot be combined with fix modes".to_string(),
            ));
        }

        if self.interactive && self.auto_fix {
            return Err(AuditError::InvalidArguments(
                "--interactive and --auto-fix are mutually exclusive".to_string(),
            ));
        }

        Ok(())
    }

    pub fn locale_dir(&self) -> PathBuf {
        self.locale_dir
            .clone()
            .unwrap_or_else(|| self.project_dir.join("Resources"))
    }

    pub fn is_mutating(&self) -> bool {
        self.auto_fix || self.interactive || self.fix_duplicates
    }

    pub fn use_parallel(&self) -> bool {
        !self.no_threads
    }

    pub fn should_use_color(&self) -> bool {
        // Respect NO_COLOR; otherwise color when stdout looks like a terminal.
        std::env::var_os("NO_COLOR").is_none()
    }
}
