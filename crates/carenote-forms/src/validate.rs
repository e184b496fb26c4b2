use carenote_core::models::field_group::FieldGroup;
use carenote_core::models::preview::{MissingField, MissingReason};

use crate::schema::{FieldKind, FormSchema};

/// Fields that block copy, in schema declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub missing: Vec<MissingField>,
}

impl Validation {
    /// True when nothing required is missing, i.e. copy/export is allowed.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Human-readable reasons, e.g. `"Start Date is required"`.
    pub fn reasons(&self) -> Vec<String> {
        self.missing.iter().map(ToString::to_string).collect()
    }
}

/// Check required fields and date syntax. Pure.
///
/// A date field holding something other than a `YYYY-MM-DD` date is reported
/// whether or not it is required, since any fragment reading it would be
/// dropped from the note.
pub fn validate(schema: &FormSchema, fields: &FieldGroup) -> Validation {
    let missing = schema
        .fields()
        .iter()
        .filter_map(|def| {
            let reason = if !fields.is_filled(&def.name) {
                def.required.then_some(MissingReason::Required)
            } else if def.kind == FieldKind::Date && fields.date(&def.name).is_err() {
                Some(MissingReason::InvalidDate)
            } else {
                None
            };
            reason.map(|reason| MissingField {
                field: def.name.clone(),
                label: def.label.clone(),
                reason,
            })
        })
        .collect();

    Validation { missing }
}
