use carenote_core::models::form::FormKind;

use crate::NoteForm;
use crate::schema::{FieldDef, FormSchema, FormSchemaBuilder, Fragment};

/// Psychiatric consult follow-up note.
///
/// Recommendations are entered one per line and rendered as a single
/// "Psychiatry recommends to ..." sentence.
pub struct PsychConsult;

impl NoteForm for PsychConsult {
    fn kind(&self) -> FormKind {
        FormKind::PsychConsult
    }

    fn name(&self) -> &str {
        "Psych Consult"
    }

    fn define(&self) -> FormSchemaBuilder {
        FormSchema::builder(self.id(), self.name())
            .field(FieldDef::date("consult_date", "Consult Date").required())
            .field(FieldDef::select(
                "consult_type",
                "Consult Type",
                &[("initial", "Initial"), ("follow-up", "Follow-up")],
            ))
            .field(FieldDef::text("trigger", "Reason for Consult").required())
            .field(FieldDef::text("target_symptoms", "Target Symptoms"))
            .field(FieldDef::multiline("findings", "Key Findings"))
            .field(FieldDef::text("capacity", "Capacity"))
            .field(FieldDef::multiline("recommendations", "Recommendations"))
            .field(FieldDef::multiline("nonpharm", "Non-Pharm Interventions"))
            .field(FieldDef::text("gdr", "GDR"))
            .field(FieldDef::select(
                "provider_response",
                "Provider Response",
                &[("agreed", "Agreed"), ("did_not_agree", "Did Not Agree")],
            ))
            .field(FieldDef::text("provider_reason", "Reason if Not Agreed"))
            .field(FieldDef::text("notified_who", "Notified"))
            .field(FieldDef::text("rep_name", "Representative"))
            .field(FieldDef::text("rep_relationship", "Relationship"))
            .field(FieldDef::text("consent", "Consent"))
            .field(FieldDef::text("idt", "IDT Review"))
            .field(FieldDef::multiline("monitoring", "Monitoring"))
            .field(FieldDef::text("follow_up", "Follow-up"))
            .fragment(Fragment::template(
                "Resident evaluated by Psychiatry on {consult_date} for {consult_type?} consult.",
            ))
            .fragment(Fragment::template("Seen due to {trigger}."))
            .fragment(Fragment::labeled("Target symptoms", "target_symptoms"))
            .fragment(Fragment::labeled("Key findings", "findings"))
            .fragment(Fragment::labeled("Capacity", "capacity"))
            .fragment(Fragment::list(
                "recommendations",
                "Psychiatry recommends to {items}.",
                "; ",
            ))
            .fragment(Fragment::labeled("Non-pharmacological interventions", "nonpharm"))
            .fragment(Fragment::labeled("GDR", "gdr"))
            .fragment(Fragment::enumerated(
                "provider_response",
                &[
                    ("agreed", "Provider agreed with recommendations."),
                    ("did_not_agree", "Provider did not agree with recommendations."),
                ],
            ))
            .fragment(Fragment::labeled("Reason", "provider_reason"))
            .fragment(Fragment::template("{notified_who} notified of recommendations."))
            .fragment(Fragment::template("Representative {rep_name} informed."))
            .fragment(Fragment::labeled("Relationship", "rep_relationship"))
            .fragment(Fragment::labeled("Consent", "consent"))
            .fragment(Fragment::labeled("IDT", "idt"))
            .fragment(Fragment::labeled("Monitoring", "monitoring"))
            .fragment(Fragment::labeled("Follow-up", "follow_up"))
    }
}
