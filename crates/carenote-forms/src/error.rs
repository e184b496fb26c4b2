use thiserror::Error;

/// Schema and form-instance errors.
///
/// `UnknownForm`, `UnknownField` and `InvalidOption` reject caller input.
/// Everything else is a schema definition bug, reported when the schema is
/// built rather than when a note renders.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("unknown form: {0}")]
    UnknownForm(String),

    #[error("form '{form}': field '{field}' is not defined")]
    UnknownField { form: String, field: String },

    #[error("form '{form}': '{value}' is not an option of field '{field}'")]
    InvalidOption {
        form: String,
        field: String,
        value: String,
    },

    #[error("form '{form}': field '{field}' is defined more than once")]
    DuplicateField { form: String, field: String },

    #[error("form '{form}': fragment {index} references undefined value '{name}'")]
    UnknownReference {
        form: String,
        index: usize,
        name: String,
    },

    #[error("form '{form}': fragment {index} has a malformed template: {reason}")]
    MalformedTemplate {
        form: String,
        index: usize,
        reason: String,
    },

    #[error("form '{form}': fragment {index} maps '{value}', which field '{field}' can never hold")]
    UnknownOption {
        form: String,
        index: usize,
        field: String,
        value: String,
    },

    #[error("form '{form}': counter '{counter}' reads '{field}', which is not a date field")]
    NotADateField {
        form: String,
        counter: String,
        field: String,
    },

    #[error("form '{form}': counter '{counter}' is invalid: {reason}")]
    InvalidCounter {
        form: String,
        counter: String,
        reason: String,
    },
}
