//! carenote-forms
//!
//! The note composer. Each nursing-note form is a declarative schema;
//! one engine derives day counters, validates required fields and assembles
//! the note text for all of them. No I/O happens here.

pub mod compose;
pub mod derived;
pub mod error;
pub mod forms;
pub mod schema;
pub mod session;
pub mod template;
pub mod validate;

use carenote_core::models::form::FormKind;

use error::FormError;
use schema::{FormSchema, FormSchemaBuilder};

/// Trait implemented by each nursing-note form.
pub trait NoteForm: Send + Sync {
    fn kind(&self) -> FormKind;

    /// Stable identifier (e.g. "antibiotic", "psych_consult").
    fn id(&self) -> &str {
        self.kind().as_str()
    }

    /// Human-readable name (e.g. "Antibiotic Note").
    fn name(&self) -> &str;

    /// The form's fields, counters and fragments, not yet checked.
    fn define(&self) -> FormSchemaBuilder;

    /// Build and check the schema.
    fn schema(&self) -> Result<FormSchema, FormError> {
        self.define().build()
    }
}

/// Return all registered forms, in navigation order.
pub fn all_forms() -> Vec<Box<dyn NoteForm>> {
    vec![
        Box::new(forms::psych_consult::PsychConsult),
        Box::new(forms::change_of_condition::ChangeOfCondition),
        Box::new(forms::admission::Admission),
        Box::new(forms::observation::Observation),
        Box::new(forms::vaccination::Vaccination),
        Box::new(forms::antibiotic::Antibiotic),
        Box::new(forms::accident::AccidentFollowUp),
        Box::new(forms::expiry::Expiry),
    ]
}

/// Look up a form by ID.
pub fn get_form(id: &str) -> Option<Box<dyn NoteForm>> {
    all_forms().into_iter().find(|f| f.id() == id)
}

/// Every form's schema, built once and checked up front.
#[derive(Debug, Clone)]
pub struct FormRegistry {
    schemas: Vec<FormSchema>,
}

impl FormRegistry {
    pub fn get(&self, id: &str) -> Option<&FormSchema> {
        self.schemas.iter().find(|s| s.id() == id)
    }

    /// Like [`FormRegistry::get`], but an unknown ID is an error.
    pub fn require(&self, id: &str) -> Result<&FormSchema, FormError> {
        self.get(id)
            .ok_or_else(|| FormError::UnknownForm(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormSchema> {
        self.schemas.iter()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Build every form's schema, failing on the first definition error.
pub fn register_all() -> Result<FormRegistry, FormError> {
    let schemas = all_forms()
        .iter()
        .map(|form| form.schema())
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(count = schemas.len(), "registered note forms");

    Ok(FormRegistry { schemas })
}
