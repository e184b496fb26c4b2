use carenote_core::models::kb::KbDocument;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KbError {
    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("unexpected response from {url}: {reason}")]
    Malformed { url: String, reason: String },

    /// Every attempt failed and no usable cached copy exists.
    #[error("{document} unavailable: {source}")]
    Unavailable {
        document: KbDocument,
        #[source]
        source: Box<KbError>,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("tantivy error: {0}")]
    Tantivy(#[from] tantivy::TantivyError),

    #[error("query parse error: {0}")]
    QueryParse(String),
}
