use carenote_core::models::form::FormKind;

use crate::NoteForm;
use crate::schema::{Counter, FieldDef, FormSchema, FormSchemaBuilder, Fragment};

/// Antibiotic therapy progress note, with a "Day N/M" course counter that
/// switches to a post-therapy count once the end date has passed.
pub struct Antibiotic;

impl NoteForm for Antibiotic {
    fn kind(&self) -> FormKind {
        FormKind::Antibiotic
    }

    fn name(&self) -> &str {
        "Antibiotic Note"
    }

    fn define(&self) -> FormSchemaBuilder {
        FormSchema::builder(self.id(), self.name())
            .field(FieldDef::text("antibiotic", "Antibiotic").required())
            .field(FieldDef::text("indication", "Indication").required())
            .field(FieldDef::date("start_date", "Start Date").required())
            .field(FieldDef::date("end_date", "End Date"))
            .field(FieldDef::text("temp", "Temp"))
            .field(FieldDef::text("bp", "BP"))
            .field(
                FieldDef::multiline("symptoms", "Symptoms/Response")
                    .default_value("Stable, no acute changes."),
            )
            .field(
                FieldDef::multiline("tolerance", "Tolerance")
                    .default_value("Tolerating well, no adverse reactions."),
            )
            .field(FieldDef::multiline("other", "Other"))
            .derived("therapy_day", Counter::course("start_date", Some("end_date")))
            .fragment(Fragment::template("{therapy_day}."))
            .fragment(Fragment::template(
                "Resident currently receiving {antibiotic} for treatment of {indication}.",
            ))
            .fragment(Fragment::template("Treatment started {start_date}."))
            .fragment(Fragment::template("Scheduled end date {end_date}."))
            .fragment(Fragment::labeled("Temp", "temp"))
            .fragment(Fragment::labeled("BP", "bp"))
            .fragment(Fragment::labeled("Signs/symptoms", "symptoms"))
            .fragment(Fragment::labeled("Tolerance", "tolerance"))
            .fragment(Fragment::labeled("Additional notes", "other"))
    }
}
