use lazy_static::lazy_static;
use regex::Regex;

use crate::models::UiCategory;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s]").unwrap();
}

const URGENCY_KEYWORDS: &[&str] = &["error", "warning", "failed", "success"];

/// Component kinds whose fixes matter most for primary interaction.
const PRIMARY_KINDS: &[&str] = &["Button", "Label", "Menu"];

/// Remediation priority in [0, 10]: category base weight, +2 for short
/// literals, +3 for urgency keywords, +2 for primary-interaction kinds.
pub fn priority(category: UiCategory, component: &str, text: &str) -> u8 {
    let mut score = category.base_weight();

    if text.chars().count() < 20 {
        score += 2;
    }

    let lower = text.to_lowercase();
    if URGENCY_KEYWORDS.iter().any(|word| lower.contains(word)) {
        score += 3;
    }

    if PRIMARY_KINDS.contains(&component) {
        score += 2;
    }

    score.min(10)
}

/// Derive a dotted key name from a literal: component namespace prefix, then
/// the first four lowercased words with punctuation stripped.
pub fn suggest_key(text: &str, component: &str) -> String {
    let lowered = text.to_lowercase();
    let clean = NON_WORD.replace_all(&lowered, "");

    let prefix = match component {
        "Button" => "button",
        "Label" => "label",
        "Text" => "text",
        "NavigationTitle" => "nav",
        "Alert" => "alert",
        "TextField" => "placeholder",
        "Menu" => "menu",
        "Section" => "section",
        _ => "common",
    };

    let mut parts = vec![prefix.to_string()];
    parts.extend(clean.split_whitespace().take(4).map(str::to_string));
    parts.join(".")
}
