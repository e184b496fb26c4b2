use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown form kind: {0}")]
    UnknownFormKind(String),

    #[error("invalid date in field '{field}': {value}")]
    InvalidDate { field: String, value: String },
}
