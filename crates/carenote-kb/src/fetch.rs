//! JSON fetching with bounded exponential backoff.

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::KbError;

/// Retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(300);

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Largest response body `HttpFetcher` reads. The search index is the
/// biggest document and grows with the corpus.
pub const MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

/// Source of JSON documents. Implemented over HTTP in production and by
/// scripted fakes in tests.
pub trait Fetcher: Send + Sync {
    fn get_json(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<serde_json::Value, KbError>> + Send;
}

/// How many times to retry and how long to wait between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
        }
    }
}

impl RetryPolicy {
    /// Delay after failed attempt `attempt` (0-based): `initial * 2^attempt`.
    ///
    /// Uncapped and without jitter, so large retry counts grow quickly.
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.initial_backoff
            .saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Fetch `url` and decode it as `T`, making up to `max_retries + 1` attempts.
///
/// A decode failure counts as a failed attempt. The last error is returned
/// once attempts are exhausted.
pub async fn fetch_with_retry<F, T>(
    fetcher: &F,
    url: &str,
    policy: &RetryPolicy,
) -> Result<T, KbError>
where
    F: Fetcher,
    T: DeserializeOwned,
{
    let mut attempt = 0;
    loop {
        let result = fetcher.get_json(url).await.and_then(|value| {
            serde_json::from_value::<T>(value).map_err(|e| KbError::Malformed {
                url: url.to_string(),
                reason: e.to_string(),
            })
        });

        match result {
            Ok(value) => return Ok(value),
            Err(e) if attempt < policy.max_retries => {
                let delay = policy.backoff(attempt);
                tracing::warn!(
                    url,
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "KB fetch failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                tracing::warn!(url, attempts = attempt + 1, error = %e, "KB fetch gave up");
                return Err(e);
            }
        }
    }
}

/// Blocking `ureq` client run on the tokio blocking pool.
#[derive(Clone)]
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self { agent }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Fetcher for HttpFetcher {
    fn get_json(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<serde_json::Value, KbError>> + Send {
        let agent = self.agent.clone();
        let url = url.to_string();
        async move {
            let task_url = url.clone();
            tokio::task::spawn_blocking(move || get_blocking(&agent, &task_url))
                .await
                .map_err(|e| KbError::Request {
                    url,
                    reason: e.to_string(),
                })?
        }
    }
}

fn get_blocking(agent: &ureq::Agent, url: &str) -> Result<serde_json::Value, KbError> {
    let mut response = agent
        .get(url)
        .header("Cache-Control", "no-store")
        .call()
        .map_err(|e| match e {
            ureq::Error::StatusCode(status) => KbError::Status {
                url: url.to_string(),
                status,
            },
            other => KbError::Request {
                url: url.to_string(),
                reason: other.to_string(),
            },
        })?;

    let body = response
        .body_mut()
        .with_config()
        .limit(MAX_BODY_BYTES)
        .read_to_string()
        .map_err(|e| KbError::Request {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    serde_json::from_str(&body).map_err(|e| KbError::Malformed {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

impl<F: Fetcher> Fetcher for std::sync::Arc<F> {
    fn get_json(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<serde_json::Value, KbError>> + Send {
        (**self).get_json(url)
    }
}
