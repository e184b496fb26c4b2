use carenote_core::models::form::FormKind;

use crate::NoteForm;
use crate::schema::{FieldDef, FormSchema, FormSchemaBuilder, Fragment};

pub struct Expiry;

impl NoteForm for Expiry {
    fn kind(&self) -> FormKind {
        FormKind::Expiry
    }

    fn name(&self) -> &str {
        "Expiry Note"
    }

    fn define(&self) -> FormSchemaBuilder {
        FormSchema::builder(self.id(), self.name())
            .field(FieldDef::text("shift_start", "Shift Start"))
            .field(FieldDef::text("discovery_time", "Time Found").required())
            .field(FieldDef::text("location", "Location"))
            .field(FieldDef::multiline("shift_start_note", "Status at Shift Start"))
            .field(FieldDef::multiline("objective", "Objective Findings").default_value(
                "Found unresponsive. No respirations noted. No palpable pulse. \
                 Skin cool to touch, pale/cyanotic. Pupils fixed/dilated. No BP obtainable.",
            ))
            .field(FieldDef::text("code_status", "Code Status"))
            .field(FieldDef::text("resuscitation", "Resuscitation"))
            .field(FieldDef::text("pronounce_time", "Time Pronounced"))
            .field(FieldDef::multiline("notifications", "Notifications"))
            .field(FieldDef::text("family_name", "Family Member"))
            .field(FieldDef::text("family_notified", "Family Notified At"))
            .field(FieldDef::multiline("pm_care", "Post-Mortem Care"))
            .field(FieldDef::multiline("belongings", "Belongings"))
            .fragment(Fragment::template(
                "At start of shift ({shift_start}), {shift_start_note}.",
            ))
            .fragment(Fragment::template(
                "At {discovery_time}, resident found unresponsive.",
            ))
            .fragment(Fragment::labeled("Location", "location"))
            .fragment(Fragment::labeled("Objective", "objective"))
            .fragment(Fragment::labeled("Code status", "code_status"))
            .fragment(Fragment::labeled("Resuscitation", "resuscitation"))
            .fragment(Fragment::template("Time of death pronounced at {pronounce_time}."))
            .fragment(Fragment::labeled("Notifications", "notifications"))
            .fragment(Fragment::template("Family ({family_name}) notified."))
            .fragment(Fragment::labeled("Family notified at", "family_notified"))
            .fragment(Fragment::labeled("Post-mortem care", "pm_care"))
            .fragment(Fragment::labeled("Belongings", "belongings"))
    }
}
