use std::collections::BTreeMap;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The complete set of user-entered values for one form instance.
///
/// Keys are field names, values are the raw strings the user typed or
/// selected. Storage order carries no meaning; note assembly order comes
/// from the form schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldGroup {
    values: BTreeMap<String, String>,
}

impl FieldGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value of a field, if one was ever set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Trimmed value of a field. Missing and whitespace-only values are `None`.
    pub fn filled(&self, name: &str) -> Option<&str> {
        self.get(name).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn is_filled(&self, name: &str) -> bool {
        self.filled(name).is_some()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parse a field as an ISO `YYYY-MM-DD` date.
    ///
    /// Returns `Ok(None)` when the field is empty, and an error when it holds
    /// something that is not a calendar date.
    pub fn date(&self, name: &str) -> Result<Option<Date>, CoreError> {
        let Some(raw) = self.filled(name) else {
            return Ok(None);
        };
        raw.parse::<Date>()
            .map(Some)
            .map_err(|_| CoreError::InvalidDate {
                field: name.to_string(),
                value: raw.to_string(),
            })
    }

    /// Checkbox semantics: `true`, `yes` and `on` (any case) are checked.
    pub fn is_checked(&self, name: &str) -> bool {
        self.filled(name).is_some_and(|v| {
            v.eq_ignore_ascii_case("true")
                || v.eq_ignore_ascii_case("yes")
                || v.eq_ignore_ascii_case("on")
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldGroup {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
