use serde::{Deserialize, Serialize};

/// Remediation category attached to every hardcoded-string pattern.
///
/// The category drives the priority base weight; the component kind stays a
/// free-form string so the pattern table remains data, not control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiCategory {
    VisibleUi,
    UserFacing,
    ErrorMessages,
    Navigation,
    Labels,
    Placeholders,
    Internal,
}

impl UiCategory {
    /// Base priority weight for this category.
    pub fn base_weight(&self) -> u8 {
        match self {
            UiCategory::VisibleUi => 10,
            UiCategory::ErrorMessages => 9,
            UiCategory::UserFacing => 8,
            UiCategory::Navigation => 7,
            UiCategory::Labels => 6,
            UiCategory::Placeholders => 5,
            UiCategory::Internal => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UiCategory::VisibleUi => "visible_ui",
            UiCategory::UserFacing => "user_facing",
            UiCategory::ErrorMessages => "error_messages",
            UiCategory::Navigation => "navigation",
            UiCategory::Labels => "labels",
            UiCategory::Placeholders => "placeholders",
            UiCategory::Internal => "internal",
        }
    }
}

/// A call site that already routes its text through a translation lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedUsage {
    /// Source file, relative to the project root.
    pub file: String,
    /// 1-indexed line number of the match start.
    pub line: usize,
    /// The referenced translation key.
    pub key: String,
    /// The calling construct (e.g. "String.localized").
    pub construct: String,
}

/// A natural-language literal not yet routed through a translation lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardcodedString {
    pub file: String,
    pub line: usize,
    /// The raw literal text, without surrounding quotes.
    pub text: String,
    /// UI component kind that carried the literal (e.g. "Button").
    pub component: String,
    pub category: UiCategory,
    /// Remediation priority in [0, 10].
    pub priority: u8,
    /// Proposed dotted key name derived from the literal.
    pub suggested_key: String,
}
