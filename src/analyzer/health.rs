use crate::models::HealthSnapshot;

/// Inputs to one health computation, all counts over the current scan pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthInputs {
    pub localized: usize,
    pub hardcoded: usize,
    pub missing_keys: usize,
    pub dead_keys: usize,
    pub duplicate_groups: usize,
}

/// Reduce the scan state to a 0-100 score and letter grade. Advisory only;
/// no control flow depends on the result.
pub fn score(inputs: HealthInputs) -> HealthSnapshot {
    let total = inputs.localized + inputs.hardcoded;

    // No strings means no signal; fail open with a perfect score.
    if total == 0 {
        return HealthSnapshot {
            score: 100.0,
            grade: "A+".to_string(),
            localized_count: 0,
            hardcoded_count: 0,
            total_strings: 0,
            localization_rate: 100.0,
            missing_keys_count: inputs.missing_keys,
            dead_keys_count: inputs.dead_keys,
            duplicate_count: inputs.duplicate_groups,
        };
    }

    let rate = inputs.localized as f64 / total as f64 * 100.0;
    let mut score = rate;

    score -= (inputs.missing_keys as f64 * 0.5).min(10.0);
    score -= (inputs.dead_keys as f64 * 0.1).min(5.0);
    score -= (inputs.duplicate_groups as f64 * 0.2).min(5.0);

    let score = score.clamp(0.0, 100.0);

    HealthSnapshot {
        score: round1(score),
        grade: grade(score).to_string(),
        localized_count: inputs.localized,
        hardcoded_count: inputs.hardcoded,
        total_strings: total,
        localization_rate: round1(rate),
        missing_keys_count: inputs.missing_keys,
        dead_keys_count: inputs.dead_keys,
        duplicate_count: inputs.duplicate_groups,
    }
}

fn grade(score: f64) -> &'static str {
    if score >= 95.0 {
        "A+"
    } else if score >= 90.0 {
        "A"
    } else if score >= 80.0 {
        "B"
    } else if score >= 70.0 {
        "C"
    } else if score >= 60.0 {
        "D"
    } else {
        "F"
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
