pub mod health;
pub mod lifecycle;
pub mod orchestrator;
pub mod priority;

pub use health::{score, HealthInputs};
pub use lifecycle::{duplicate_groups, key_pattern_breakdown, KeyLifecycle};
pub use orchestrator::{run_analysis, run_analysis_with, AnalysisOptions, AnalysisOutcome};
pub use priority::{priority, suggest_key};
