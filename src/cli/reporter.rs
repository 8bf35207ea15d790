use crate::fixer::SessionSummary;
use crate::models::{FixStats, HealthSnapshot};

pub const BOLD: &str = "\x1b[1m";
pub const GREEN: &str = "\x1b[92m";
pub const CYAN: &str = "\x1b[96m";
pub const YELLOW: &str = "\x1b[93m";
pub const RED: &str = "\x1b[91m";
pub const RESET: &str = "\x1b[0m";

const RULE: &str = "======================================================================";

/// Formats the human-readable side of the tool's output. The machine-readable
/// side is the JSON report.
pub struct ReportFormatter {
    use_colors: bool,
}

impl ReportFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    pub fn print_banner(&self, title: &str) {
        println!("{RULE}");
        println!("{}", self.paint(BOLD, title));
        println!("{RULE}");
    }

    pub fn print_analysis_summary(&self, health: &HealthSnapshot, files_scanned: usize) {
        println!();
        self.print_banner("📊 ANALYSIS COMPLETE");
        let score = format!("{}/100 ({})", health.score, health.grade);
        println!("🏥 Health Score: {}", self.paint(GREEN, &score));
        println!("📈 Localization Rate: {}%", health.localization_rate);
        println!("📄 Files Scanned: {files_scanned}");
        println!("✅ Localized: {} strings", health.localized_count);
        println!("⚠️  Hardcoded: {} strings", health.hardcoded_count);
        println!("🔴 Missing Keys: {}", health.missing_keys_count);
        println!("🟡 Dead Keys: {}", health.dead_keys_count);
        println!("📦 Duplicates: {}", health.duplicate_count);
        println!("{RULE}");
    }

    pub fn print_fix_header(&self, title: &str, dry_run: bool) {
        println!();
        println!("{}", self.paint(BOLD, title));
        if dry_run {
            println!("{}", self.paint(YELLOW, "[DRY RUN - No changes will be made]"));
        }
    }

    pub fn print_fix_stats(&self, label: &str, stats: FixStats) {
        println!();
        println!("{}", self.paint(GREEN, &format!("✅ {label} complete")));
        println!("   Applied: {}", stats.applied);
        println!("   Failed: {}", stats.failed);
    }

    pub fn print_session_summary(&self, summary: &SessionSummary) {
        println!();
        self.print_banner("📊 INTERACTIVE SESSION SUMMARY");
        println!("✅ Approved: {}", summary.approved);
        println!("✏️  Edited: {}", summary.edited);
        println!("⏭️  Skipped: {}", summary.skipped);
        println!("📝 Total Reviewed: {}", summary.total_reviewed());
        println!("{RULE}");
    }

    pub fn print_backup_info(&self, backup_dir: &std::path::Path) {
        println!("\n💾 Backup saved to: {}", backup_dir.display());
        println!("   To restore: copy the .lproj folders back over the locale directory");
    }

    pub fn print_error(&self, message: &str) {
        eprintln!("{}", self.paint(RED, &format!("🚨 Error: {message}")));
    }
}
