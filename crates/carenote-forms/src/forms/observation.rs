use carenote_core::models::form::FormKind;

use crate::NoteForm;
use crate::schema::{Counter, FieldDef, FormSchema, FormSchemaBuilder, Fragment};

/// Days a new admission stays on observation charting.
const OBSERVATION_DAYS: u32 = 7;

/// 7-day admission observation note. The day number is computed from the
/// admission date rather than typed in.
pub struct Observation;

impl NoteForm for Observation {
    fn kind(&self) -> FormKind {
        FormKind::Observation
    }

    fn name(&self) -> &str {
        "7-Day Observation"
    }

    fn define(&self) -> FormSchemaBuilder {
        FormSchema::builder(self.id(), self.name())
            .field(FieldDef::date("admit_date", "Admit Date").required())
            .field(FieldDef::text("vitals", "Vitals"))
            .field(FieldDef::multiline("summary", "Observations"))
            .field(FieldDef::multiline("interventions", "Interventions"))
            .field(FieldDef::text("response", "Response").default_value("Resting comfortably."))
            .derived(
                "observation_day",
                Counter::window("admit_date", OBSERVATION_DAYS),
            )
            .fragment(Fragment::template("Admission observation {observation_day}."))
            .fragment(Fragment::labeled("Vitals", "vitals"))
            .fragment(Fragment::labeled("Shift summary", "summary"))
            .fragment(Fragment::labeled("Interventions", "interventions"))
            .fragment(Fragment::labeled("Response", "response"))
    }
}
