pub mod records;
pub mod report;

pub use records::{HardcodedString, LocalizedUsage, UiCategory};
pub use report::{
    AnalysisReport, ComponentStats, FixStats, HealthSnapshot, KeyPatternBreakdown, ReportMetadata,
};
