use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::PolishError;

pub type PolishFuture<'a> = Pin<Box<dyn Future<Output = Result<String, PolishError>> + Send + 'a>>;

/// Rewrites a note for clarity. May fail; callers keep the original on error.
pub trait Polisher: Send + Sync {
    fn polish<'a>(&'a self, text: &'a str) -> PolishFuture<'a>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolishStatus {
    Polished,
    /// Nothing to polish.
    Unchanged,
    /// No polisher is configured.
    Unavailable,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolishOutcome {
    pub text: String,
    pub status: PolishStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl PolishOutcome {
    fn kept(text: &str, status: PolishStatus, reason: Option<String>) -> Self {
        Self {
            text: text.to_string(),
            status,
            reason,
        }
    }
}

/// Polish `text` once. Never retried; on any failure the original text comes
/// back with the reason.
pub async fn polish_note<P>(polisher: Option<&P>, text: &str) -> PolishOutcome
where
    P: Polisher + ?Sized,
{
    if text.trim().is_empty() {
        return PolishOutcome::kept(text, PolishStatus::Unchanged, None);
    }

    let Some(polisher) = polisher else {
        return PolishOutcome::kept(text, PolishStatus::Unavailable, None);
    };

    match polisher.polish(text).await {
        Ok(polished) if !polished.trim().is_empty() => PolishOutcome {
            text: polished.trim().to_string(),
            status: PolishStatus::Polished,
            reason: None,
        },
        Ok(_) => {
            let reason = PolishError::EmptyResponse.to_string();
            tracing::warn!(%reason, "polish returned nothing, keeping original");
            PolishOutcome::kept(text, PolishStatus::Failed, Some(reason))
        }
        Err(e) => {
            tracing::warn!(error = %e, "polish failed, keeping original");
            PolishOutcome::kept(text, PolishStatus::Failed, Some(e.to_string()))
        }
    }
}
