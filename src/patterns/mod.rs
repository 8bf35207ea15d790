use std::fs;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AuditError;
use crate::models::UiCategory;

/// Markers that, when present in the 50-char window before a match, mean the
/// literal is already the inner argument of a localization call.
pub const LOCALIZATION_MARKERS: &[&str] = &["String(localized:", "NSLocalizedString"];

/// Width of the preceding-context window used by the wrapped-literal guard.
pub const CONTEXT_WINDOW: usize = 50;

/// A detection rule for a hardcoded literal inside a UI-component call.
/// Capture group 1 must be the literal text.
#[derive(Debug, Clone)]
pub struct HardcodedRule {
    pub pattern: Regex,
    pub component: String,
    pub category: UiCategory,
}

/// A detection rule for an already-localized call shape.
/// Capture group 1 must be the referenced key.
#[derive(Debug, Clone)]
pub struct LocalizedRule {
    pub pattern: Regex,
    pub construct: String,
}

/// On-disk shape of a loadable rules file. Patterns are plain strings so the
/// table stays data; they are compiled on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternConfig {
    pub hardcoded: Vec<HardcodedRuleConfig>,
    pub localized: Vec<LocalizedRuleConfig>,
    #[serde(default)]
    pub exclusions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HardcodedRuleConfig {
    pub pattern: String,
    pub component: String,
    pub category: UiCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizedRuleConfig {
    pub pattern: String,
    pub construct: String,
}

/// The ordered rule tables plus the false-positive exclusion set.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    pub hardcoded: Vec<HardcodedRule>,
    pub localized: Vec<LocalizedRule>,
    exclusions: Vec<Regex>,
}

const DEFAULT_HARDCODED: &[(&str, &str, UiCategory)] = &[
    (r#"Text\(\s*"([^"]+)"\s*\)"#, "Text", UiCategory::VisibleUi),
    (r#"Label\(\s*"([^"]+)""#, "Label", UiCategory::VisibleUi),
    (r#"Button\(\s*"([^"]+)""#, "Button", UiCategory::VisibleUi),
    (
        r#"\.navigationTitle\(\s*"([^"]+)"\s*\)"#,
        "NavigationTitle",
        UiCategory::Navigation,
    ),
    (
        r#"Alert\([^)]*title:\s*Text\(\s*"([^"]+)"\s*\)"#,
        "Alert",
        UiCategory::ErrorMessages,
    ),
    (
        r#"TextField\(\s*"([^"]+)""#,
        "TextField",
        UiCategory::Placeholders,
    ),
    (r#"Menu\(\s*"([^"]+)""#, "Menu", UiCategory::VisibleUi),
    (r#"Section\(\s*"([^"]+)""#, "Section", UiCategory::VisibleUi),
    (
        r#"LabeledContent\(\s*"([^"]+)""#,
        "LabeledContent",
        UiCategory::Labels,
    ),
    (
        r#"\.confirmationDialog\(\s*"([^"]+)""#,
        "ConfirmationDialog",
        UiCategory::UserFacing,
    ),
    (
        r#"\.accessibilityLabel\(\s*"([^"]+)"\s*\)"#,
        "AccessibilityLabel",
        UiCategory::UserFacing,
    ),
    (
        r#"\.placeholder\(\s*"([^"]+)"\s*\)"#,
        "Placeholder",
        UiCategory::Placeholders,
    ),
    (r#"\.help\(\s*"([^"]+)"\s*\)"#, "Help", UiCategory::UserFacing),
    (r#"\.badge\(\s*"([^"]+)"\s*\)"#, "Badge", UiCategory::VisibleUi),
];

const DEFAULT_LOCALIZED: &[(&str, &str)] = &[
    (r#"String\(\s*localized:\s*"([^"]+)""#, "String.localized"),
    (
        r#"NSLocalizedString\(\s*"([^"]+)"\s*,\s*comment:"#,
        "NSLocalizedString",
    ),
    (r#"LocalizedStringKey\(\s*"([^"]+)"\s*\)"#, "LocalizedStringKey"),
];

/// Exclusion patterns are matched against the trimmed literal, anchored at
/// the start (a match anywhere from position 0 suppresses the literal).
const DEFAULT_EXCLUSIONS: &[&str] = &[
    r"^[\u{1F300}-\u{1F9FF}]+$",            // emoji-only
    r"^[0-9\s.,\-+*/=<>]+$",                // numeric / arithmetic only
    r"^(https?://|www\.)",                  // URLs
    r"^[A-Z_]+$",                           // ALL_CAPS symbolic constants
    r"^SF Symbols?:",                       // SF Symbol references
    r"^\$\d+",                              // currency-style tokens
    r"^%[a-z]+$",                           // bare format placeholders
    r"^\.{3,}$",                            // ellipsis runs
    r"^\s*$",                               // whitespace-only
];

impl PatternLibrary {
    /// The built-in rule vocabulary. Compilation of the embedded tables
    /// cannot fail, so this is infallible.
    pub fn builtin() -> Self {
        let hardcoded = DEFAULT_HARDCODED
            .iter()
            .map(|(pattern, component, category)| HardcodedRule {
                pattern: Regex::new(pattern).unwrap(),
                component: (*component).to_string(),
                category: *category,
            })
            .collect();

        let localized = DEFAULT_LOCALIZED
            .iter()
            .map(|(pattern, construct)| LocalizedRule {
                pattern: Regex::new(pattern).unwrap(),
                construct: (*construct).to_string(),
            })
            .collect();

        let exclusions = DEFAULT_EXCLUSIONS
            .iter()
            .map(|pattern| Regex::new(pattern).unwrap())
            .collect();

        Self {
            hardcoded,
            localized,
            exclusions,
        }
    }

    /// Build a library from an external rules file. An empty `exclusions`
    /// list falls back to the built-in exclusion set.
    pub fn from_config(config: PatternConfig) -> Result<Self, AuditError> {
        let compile = |pattern: &str| {
            Regex::new(pattern)
                .map_err(|e| AuditError::PatternConfig(format!("invalid pattern '{pattern}': {e}")))
        };

        let mut hardcoded = Vec::with_capacity(config.hardcoded.len());
        for rule in &config.hardcoded {
            hardcoded.push(HardcodedRule {
                pattern: compile(&rule.pattern)?,
                component: rule.component.clone(),
                category: rule.category,
            });
        }

        let mut localized = Vec::with_capacity(config.localized.len());
        for rule in &config.localized {
            localized.push(LocalizedRule {
                pattern: compile(&rule.pattern)?,
                construct: rule.construct.clone(),
            });
        }

        let exclusions = if config.exclusions.is_empty() {
            DEFAULT_EXCLUSIONS
                .iter()
                .map(|pattern| Regex::new(pattern).unwrap())
                .collect()
        } else {
            let mut compiled = Vec::with_capacity(config.exclusions.len());
            for pattern in &config.exclusions {
                compiled.push(compile(pattern)?);
            }
            compiled
        };

        Ok(Self {
            hardcoded,
            localized,
            exclusions,
        })
    }

    pub fn load(path: &Path) -> Result<Self, AuditError> {
        let content = fs::read_to_string(path)?;
        let config: PatternConfig = serde_json::from_str(&content)?;
        Self::from_config(config)
    }

    /// Whether a matched literal should be suppressed as a false positive.
    pub fn should_exclude(&self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.len() <= 1 {
            return true;
        }

        for pattern in &self.exclusions {
            if pattern
                .find(trimmed)
                .is_some_and(|m| m.start() == 0)
            {
                return true;
            }
        }

        // Reject strings that are mostly symbols or digits.
        let total = text.chars().count();
        let alpha = text.chars().filter(|c| c.is_alphabetic()).count();
        if (alpha as f64) < (total as f64) * 0.3 {
            return true;
        }

        false
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}
