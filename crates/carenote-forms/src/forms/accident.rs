use carenote_core::models::form::FormKind;

use crate::NoteForm;
use crate::schema::{Counter, FieldDef, FormSchema, FormSchemaBuilder, Fragment};

const FOLLOW_UP_DAYS: u32 = 3;

/// Post-fall follow-up note for the 72-hour monitoring period.
pub struct AccidentFollowUp;

impl NoteForm for AccidentFollowUp {
    fn kind(&self) -> FormKind {
        FormKind::AccidentFollowUp
    }

    fn name(&self) -> &str {
        "Accident F/U"
    }

    fn define(&self) -> FormSchemaBuilder {
        FormSchema::builder(self.id(), self.name())
            .field(FieldDef::date("incident_date", "Incident Date").required())
            .field(
                FieldDef::multiline("injury", "Injury Details")
                    .default_value("No injury observed."),
            )
            .field(
                FieldDef::multiline("symptoms", "Current Symptoms")
                    .default_value("Denies pain or distress."),
            )
            .field(
                FieldDef::multiline("assessment", "Clinical Assessment")
                    .default_value("Baseline neuro and physical status unchanged."),
            )
            .field(FieldDef::checkbox("neuro_checks", "Neuro Checks Completed"))
            .derived(
                "follow_up_day",
                Counter::window("incident_date", FOLLOW_UP_DAYS),
            )
            .fragment(Fragment::template("S/p fall {follow_up_day} follow-up."))
            .fragment(Fragment::template("Incident date: {incident_date}."))
            .fragment(Fragment::labeled("Injury status", "injury"))
            .fragment(Fragment::labeled("Symptoms", "symptoms"))
            .fragment(Fragment::labeled("Assessment", "assessment"))
            .fragment(Fragment::enumerated(
                "neuro_checks",
                &[("true", "Neuro checks completed per protocol.")],
            ))
            .fragment(Fragment::boilerplate("Will continue to monitor for 72 hours."))
    }
}
