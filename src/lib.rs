pub mod analyzer;
pub mod cli;
pub mod error;
pub mod fixer;
pub mod models;
pub mod patterns;
pub mod scanner;
pub mod store;

pub use error::AuditError;

// Re-export commonly used types
pub use analyzer::{run_analysis, run_analysis_with, AnalysisOptions, AnalysisOutcome, KeyLifecycle};
pub use cli::CliHandler;
pub use fixer::{Edit, EditOutcome, GuardedMutator};
pub use models::{
    AnalysisReport, FixStats, HardcodedString, HealthSnapshot, LocalizedUsage, UiCategory,
};
pub use patterns::PatternLibrary;
pub use scanner::Scanner;
pub use store::{AddKeyStatus, TranslationStore};
