use std::collections::{BTreeMap, BTreeSet};

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{HardcodedString, KeyPatternBreakdown, LocalizedUsage};

lazy_static! {
    /// Leading lowercase prefix before the first `.` or `_`.
    static ref KEY_PREFIX: Regex = Regex::new(r"^([a-z]+)[._]").unwrap();
}

/// Derived key sets over one scan pass. Recomputed wholesale after every
/// scan; always derivable, never authoritative.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyLifecycle {
    /// Keys referenced by any localized usage.
    pub used: BTreeSet<String>,
    /// used − existing, each mapped to every file referencing it.
    pub missing: BTreeMap<String, Vec<String>>,
    /// existing − used.
    pub dead: BTreeSet<String>,
}

impl KeyLifecycle {
    pub fn compute<'a, E>(existing: E, usages: &[LocalizedUsage]) -> Self
    where
        E: IntoIterator<Item = &'a str>,
    {
        let existing: BTreeSet<&str> = existing.into_iter().collect();

        let mut used = BTreeSet::new();
        let mut missing: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for usage in usages {
            used.insert(usage.key.clone());
            if !existing.contains(usage.key.as_str()) {
                let files = missing.entry(usage.key.clone()).or_default();
                if !files.contains(&usage.file) {
                    files.push(usage.file.clone());
                }
            }
        }

        let dead = existing
            .iter()
            .filter(|key| !used.contains(**key))
            .map(|key| (*key).to_string())
            .collect();

        Self {
            used,
            missing,
            dead,
        }
    }
}

/// Group hardcoded records by exact literal text, retaining only groups with
/// at least two occurrences. Input order is preserved within each group, so
/// the scanner's (file, line) ordering decides the first occurrence.
pub fn duplicate_groups(records: &[HardcodedString]) -> BTreeMap<String, Vec<HardcodedString>> {
    let mut groups: BTreeMap<String, Vec<HardcodedString>> = BTreeMap::new();
    for record in records {
        groups.entry(record.text.clone()).or_default().push(record.clone());
    }
    groups.retain(|_, occurrences| occurrences.len() >= 2);
    groups
}

/// Tally the leading key-name prefixes across the existing key set.
pub fn key_pattern_breakdown<'a, K>(keys: K) -> KeyPatternBreakdown
where
    K: IntoIterator<Item = &'a str>,
{
    let mut breakdown = KeyPatternBreakdown::default();

    for key in keys {
        let Some(caps) = KEY_PREFIX.captures(key) else {
            continue;
        };
        let prefix = caps[1].to_string();
        breakdown
            .patterns
            .entry(prefix.clone())
            .or_default()
            .push(key.to_string());
        *breakdown.frequency.entry(prefix).or_insert(0) += 1;
    }

    breakdown.total_patterns = breakdown.patterns.len();

    let mut ranked: Vec<(String, usize)> = breakdown
        .frequency
        .iter()
        .map(|(prefix, count)| (prefix.clone(), *count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(10);
    breakdown.most_common = ranked;

    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UiCategory;

    fn usage(file: &str, key: &str) -> LocalizedUsage {
        LocalizedUsage {
            file: file.to_string(),
            line: 1,
            key: key.to_string(),
            construct: "String.localized".to_string(),
        }
    }

    fn hardcoded(file: &str, line: usize, text: &str) -> HardcodedString {
        HardcodedString {
            file: file.to_string(),
            line,
            text: text.to_string(),
            component: "Text".to_string(),
            category: UiCategory::VisibleUi,
            priority: 5,
            suggested_key: format!("text.{}", text.to_lowercase()),
        }
    }

    #[test]
    fn dead_and_missing_sets() {
        // existing {a,b,c}, used {b,c,d} -> missing {d}, dead {a}
        let usages = vec![usage("V/Home.swift", "b"), usage("V/Home.swift", "c"), usage("V/Detail.swift", "d")];
        let lifecycle = KeyLifecycle::compute(["a", "b", "c"], &usages);

        assert_eq!(lifecycle.dead.iter().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(lifecycle.missing.len(), 1);
        assert_eq!(lifecycle.missing["d"], vec!["V/Detail.swift"]);
    }

    #[test]
    fn missing_key_keeps_every_referencing_file() {
        let usages = vec![usage("A.swift", "x"), usage("B.swift", "x"), usage("A.swift", "x")];
        let lifecycle = KeyLifecycle::compute([], &usages);
        assert_eq!(lifecycle.missing["x"], vec!["A.swift", "B.swift"]);
    }

    #[test]
    fn sets_are_disjoint_and_recover_the_union() {
        let usages = vec![usage("A.swift", "b"), usage("A.swift", "d")];
        let existing = ["a", "b", "c"];
        let lifecycle = KeyLifecycle::compute(existing, &usages);

        let existing: BTreeSet<String> = existing.iter().map(|s| s.to_string()).collect();
        let missing: BTreeSet<String> = lifecycle.missing.keys().cloned().collect();

        assert!(missing.is_disjoint(&lifecycle.dead));

        let intersection: BTreeSet<String> =
            existing.intersection(&lifecycle.used).cloned().collect();
        let mut recovered: BTreeSet<String> = BTreeSet::new();
        recovered.extend(missing);
        recovered.extend(lifecycle.dead.clone());
        recovered.extend(intersection);

        let union: BTreeSet<String> = existing.union(&lifecycle.used).cloned().collect();
        assert_eq!(recovered, union);
    }

    #[test]
    fn duplicates_need_at_least_two_occurrences() {
        let records = vec![
            hardcoded("A.swift", 1, "Retry"),
            hardcoded("B.swift", 9, "Retry"),
            hardcoded("C.swift", 3, "Save"),
        ];
        let groups = duplicate_groups(&records);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups["Retry"].len(), 2);
        assert_eq!(groups["Retry"][0].file, "A.swift");
    }

    #[test]
    fn prefix_breakdown_counts_frequencies() {
        let breakdown =
            key_pattern_breakdown(["button.save", "button.cancel", "nav_title", "Weird.Key", "plain"]);

        assert_eq!(breakdown.frequency["button"], 2);
        assert_eq!(breakdown.frequency["nav"], 1);
        assert_eq!(breakdown.total_patterns, 2);
        assert_eq!(breakdown.most_common[0], ("button".to_string(), 2));
    }
}
