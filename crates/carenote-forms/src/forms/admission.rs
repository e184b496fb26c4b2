use carenote_core::models::form::FormKind;

use crate::NoteForm;
use crate::schema::{FieldDef, FormSchema, FormSchemaBuilder, Fragment};

pub struct Admission;

impl NoteForm for Admission {
    fn kind(&self) -> FormKind {
        FormKind::Admission
    }

    fn name(&self) -> &str {
        "Admission Note"
    }

    fn define(&self) -> FormSchemaBuilder {
        FormSchema::builder(self.id(), self.name())
            .field(FieldDef::date("admit_date", "Admit Date").required())
            .field(
                FieldDef::select(
                    "admission_type",
                    "Admission Type",
                    &[("new_admission", "New Admission"), ("readmission", "Readmission")],
                )
                .default_value("new_admission"),
            )
            .field(FieldDef::text("from_facility", "Admitted From"))
            .field(FieldDef::multiline("diagnoses", "Primary Diagnoses"))
            .field(FieldDef::text("allergies", "Allergies").default_value("NKDA"))
            .field(FieldDef::text("vitals", "Vitals"))
            .field(
                FieldDef::multiline("skin", "Skin Assessment")
                    .default_value("Intact, no issues noted."),
            )
            .field(FieldDef::multiline("plan", "Monitoring Plan"))
            .fragment(Fragment::enumerated(
                "admission_type",
                &[
                    ("new_admission", "Resident is a new admission to the facility."),
                    ("readmission", "Resident readmitted to the facility."),
                ],
            ))
            .fragment(Fragment::template("Admitted on {admit_date}."))
            .fragment(Fragment::template("Arrived from {from_facility}."))
            .fragment(Fragment::labeled("Primary diagnoses", "diagnoses"))
            .fragment(Fragment::labeled("Allergies", "allergies"))
            .fragment(Fragment::labeled("Vitals", "vitals"))
            .fragment(Fragment::labeled("Skin assessment", "skin"))
            .fragment(Fragment::labeled("Monitoring plan", "plan"))
    }
}
