use carenote_core::models::form::FormKind;

use crate::NoteForm;
use crate::schema::{FieldDef, FormSchema, FormSchemaBuilder, Fragment};

const STATUS_OPTIONS: &[(&str, &str)] = &[
    ("accepted", "Accepted"),
    ("declined", "Declined"),
    ("history", "Received Previously"),
];

/// Vaccination offer note. Each vaccine's status maps to a canned clause.
pub struct Vaccination;

fn status_field(name: &str, label: &str, default: &str) -> FieldDef {
    FieldDef::select(name, label, STATUS_OPTIONS).default_value(default)
}

fn status_clauses(field: &str, vaccine: &str) -> Fragment {
    let accepted = format!("{vaccine} vaccine accepted and administered.");
    let declined = format!("{vaccine} vaccine declined by resident/representative.");
    let history = format!("{vaccine} vaccine previously received per history.");
    Fragment::enumerated(
        field,
        &[
            ("accepted", accepted.as_str()),
            ("declined", declined.as_str()),
            ("history", history.as_str()),
        ],
    )
}

impl NoteForm for Vaccination {
    fn kind(&self) -> FormKind {
        FormKind::Vaccination
    }

    fn name(&self) -> &str {
        "Vaccination"
    }

    fn define(&self) -> FormSchemaBuilder {
        FormSchema::builder(self.id(), self.name())
            .field(status_field("covid", "COVID-19", "declined"))
            .field(status_field("influenza", "Influenza", "accepted"))
            .field(status_field("pneumonia", "Pneumonia", "history"))
            .field(status_field("rsv", "RSV", "declined"))
            .field(
                FieldDef::multiline("education", "Education Provided").default_value(
                    "Vaccine education provided regarding purpose and potential side effects.",
                ),
            )
            .fragment(Fragment::boilerplate("Vaccinations offered per protocol."))
            .fragment(status_clauses("covid", "COVID-19"))
            .fragment(status_clauses("influenza", "Influenza"))
            .fragment(status_clauses("pneumonia", "Pneumonia"))
            .fragment(status_clauses("rsv", "RSV"))
            .fragment(Fragment::template("{education}"))
            .fragment(Fragment::boilerplate(
                "Resident verbalized understanding. Will continue to monitor.",
            ))
    }
}
