//! One live form instance.
//!
//! A `NoteSession` owns the FieldGroup of a single form and recomputes the
//! derived values, validation and note text on every read. Nothing is
//! memoized, so a preview can never be stale.

use jiff::civil::Date;

use carenote_core::models::field_group::FieldGroup;
use carenote_core::models::preview::NotePreview;

use crate::compose::compose;
use crate::derived::compute_derived;
use crate::error::FormError;
use crate::schema::{FieldKind, FormSchema};
use crate::validate::{Validation, validate};

pub struct NoteSession<'a> {
    schema: &'a FormSchema,
    fields: FieldGroup,
    polished: Option<String>,
}

impl<'a> NoteSession<'a> {
    /// Start a session with every field at its default.
    pub fn new(schema: &'a FormSchema) -> Self {
        Self {
            schema,
            fields: schema.defaults(),
            polished: None,
        }
    }

    /// Start a session with `values` applied over the defaults.
    pub fn with_fields(schema: &'a FormSchema, values: &FieldGroup) -> Result<Self, FormError> {
        let mut session = Self::new(schema);
        for (name, value) in values.iter() {
            session.set(name, value)?;
        }
        Ok(session)
    }

    pub fn schema(&self) -> &FormSchema {
        self.schema
    }

    pub fn fields(&self) -> &FieldGroup {
        &self.fields
    }

    /// Update one field. Any polished text is discarded, since it no longer
    /// reflects the inputs.
    ///
    /// A select only accepts one of its option values; an empty value unsets it.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        let Some(def) = self.schema.field(name) else {
            return Err(FormError::UnknownField {
                form: self.schema.id().to_string(),
                field: name.to_string(),
            });
        };
        let trimmed = value.trim();
        if def.kind == FieldKind::Select
            && !trimmed.is_empty()
            && !def.options.iter().any(|o| o.value == trimmed)
        {
            return Err(FormError::InvalidOption {
                form: self.schema.id().to_string(),
                field: name.to_string(),
                value: value.to_string(),
            });
        }
        self.fields.set(name, value);
        self.polished = None;
        Ok(())
    }

    /// Reset every field to its default.
    pub fn clear(&mut self) {
        self.fields = self.schema.defaults();
        self.polished = None;
    }

    pub fn validation(&self) -> Validation {
        validate(self.schema, &self.fields)
    }

    /// The composed note, ignoring any polish.
    pub fn composed(&self, today: Date) -> String {
        let derived = compute_derived(self.schema, &self.fields, today);
        compose(self.schema, &self.fields, &derived)
    }

    /// Replace the displayed note with a polished rewrite until the next edit.
    pub fn apply_polish(&mut self, text: String) {
        self.polished = Some(text);
    }

    pub fn polished(&self) -> Option<&str> {
        self.polished.as_deref()
    }

    pub fn preview(&self, today: Date) -> NotePreview {
        let derived = compute_derived(self.schema, &self.fields, today);
        let validation = validate(self.schema, &self.fields);
        let note = match &self.polished {
            Some(text) => text.clone(),
            None => compose(self.schema, &self.fields, &derived),
        };

        NotePreview {
            form_id: self.schema.id().to_string(),
            note,
            can_copy: validation.is_complete(),
            missing: validation.missing,
            derived: derived.into_values(),
            polished: self.polished.is_some(),
        }
    }

    /// The clipboard payload, or `None` while a required field is missing.
    pub fn copy_text(&self, today: Date) -> Option<String> {
        let preview = self.preview(today);
        preview.can_copy.then_some(preview.note)
    }
}
