use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Why a field blocks copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MissingReason {
    /// Required and empty after trimming.
    #[default]
    Required,
    /// Filled, but not a `YYYY-MM-DD` date.
    InvalidDate,
}

/// A field whose value keeps the note from being copied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MissingField {
    pub field: String,
    pub label: String,
    #[serde(default)]
    pub reason: MissingReason,
}

impl std::fmt::Display for MissingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.reason {
            MissingReason::Required => write!(f, "{} is required", self.label),
            MissingReason::InvalidDate => write!(f, "{} is not a valid date", self.label),
        }
    }
}

/// A computed value such as a "Day 3/7" counter.
///
/// `value` is `None` when the inputs are absent or the counter is past its
/// display window; fragments that reference it are then dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DerivedValue {
    pub name: String,
    pub value: Option<String>,
}

/// Everything the host needs to render one form's live preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NotePreview {
    pub form_id: String,
    pub note: String,
    pub missing: Vec<MissingField>,
    pub derived: Vec<DerivedValue>,
    /// True when `note` is an AI-polished rewrite rather than the composed text.
    pub polished: bool,
    /// Copy/export is allowed only when no required field is missing.
    pub can_copy: bool,
}
