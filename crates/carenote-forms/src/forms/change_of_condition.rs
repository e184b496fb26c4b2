use carenote_core::models::form::FormKind;

use crate::NoteForm;
use crate::schema::{FieldDef, FormSchema, FormSchemaBuilder, Fragment};

/// Change-of-condition (SBAR-style) note.
pub struct ChangeOfCondition;

impl NoteForm for ChangeOfCondition {
    fn kind(&self) -> FormKind {
        FormKind::ChangeOfCondition
    }

    fn name(&self) -> &str {
        "Change of Condition"
    }

    fn define(&self) -> FormSchemaBuilder {
        FormSchema::builder(self.id(), self.name())
            .field(FieldDef::text("issue", "Current Issue").required())
            .field(FieldDef::text("onset", "Onset"))
            .field(FieldDef::text("vitals", "Vitals"))
            .field(FieldDef::multiline("assessment", "Assessment"))
            .field(FieldDef::text("md_name", "MD Name"))
            .field(FieldDef::multiline("orders", "New Orders"))
            .field(FieldDef::text("family_rep", "Family Rep"))
            .fragment(Fragment::template(
                "Resident exhibited a change in condition noted as {issue}.",
            ))
            .fragment(Fragment::labeled("Onset", "onset"))
            .fragment(Fragment::labeled("Vitals", "vitals"))
            .fragment(Fragment::labeled("Physical exam", "assessment"))
            .fragment(Fragment::template("MD ({md_name}) notified."))
            .fragment(Fragment::labeled("New orders", "orders"))
            .fragment(Fragment::template("Family ({family_rep}) updated."))
            .fragment(Fragment::boilerplate("Will continue to monitor."))
    }
}
