use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// The nursing-note forms shipped with CareNote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FormKind {
    Admission,
    PsychConsult,
    Antibiotic,
    AccidentFollowUp,
    ChangeOfCondition,
    Vaccination,
    Observation,
    Expiry,
}

impl FormKind {
    pub const ALL: [FormKind; 8] = [
        FormKind::PsychConsult,
        FormKind::ChangeOfCondition,
        FormKind::Admission,
        FormKind::Observation,
        FormKind::Vaccination,
        FormKind::Antibiotic,
        FormKind::AccidentFollowUp,
        FormKind::Expiry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormKind::Admission => "admission",
            FormKind::PsychConsult => "psych_consult",
            FormKind::Antibiotic => "antibiotic",
            FormKind::AccidentFollowUp => "accident_follow_up",
            FormKind::ChangeOfCondition => "change_of_condition",
            FormKind::Vaccination => "vaccination",
            FormKind::Observation => "observation",
            FormKind::Expiry => "expiry",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| CoreError::UnknownFormKind(s.to_string()))
    }
}
