use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::records::HardcodedString;

/// Derived, stateless health aggregate. Recomputed on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub score: f64,
    pub grade: String,
    pub localized_count: usize,
    pub hardcoded_count: usize,
    pub total_strings: usize,
    pub localization_rate: f64,
    pub missing_keys_count: usize,
    pub dead_keys_count: usize,
    pub duplicate_count: usize,
}

/// Per-component localized/hardcoded tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentStats {
    pub localized: usize,
    pub hardcoded: usize,
}

/// Frequency breakdown of leading key-name prefixes. Descriptive only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPatternBreakdown {
    /// prefix -> keys carrying that prefix
    pub patterns: BTreeMap<String, Vec<String>>,
    /// prefix -> occurrence count
    pub frequency: BTreeMap<String, usize>,
    pub total_patterns: usize,
    /// Up to ten (prefix, count) pairs, most frequent first.
    pub most_common: Vec<(String, usize)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub version: String,
    pub project: String,
}

/// The machine-readable analysis report. External cleanup tooling reads the
/// `dead_keys` list from this document; the auditor itself never deletes keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    pub health_score: HealthSnapshot,
    pub key_patterns: KeyPatternBreakdown,
    pub component_stats: BTreeMap<String, ComponentStats>,
    pub hardcoded_strings: Vec<HardcodedString>,
    /// literal text -> occurrence count, duplicates only (>= 2)
    pub duplicate_strings: BTreeMap<String, usize>,
    pub dead_keys: Vec<String>,
    /// missing key -> files referencing it
    pub missing_keys: BTreeMap<String, Vec<String>>,
}

/// Cumulative mutation counters, owned by the Guarded Mutator and surfaced
/// in every session summary. An explicit value, never hidden module state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixStats {
    pub applied: usize,
    pub failed: usize,
}

impl FixStats {
    pub fn total(&self) -> usize {
        self.applied + self.failed
    }
}
