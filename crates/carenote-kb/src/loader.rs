//! Manifest-first KB loading with per-document cache fallback.

use serde::Serialize;
use serde::de::DeserializeOwned;

use carenote_core::kb_paths;
use carenote_core::models::kb::{
    KbDocument, KbManifest, KbSnapshot, KbSource, SearchIndexDocument, SourcesDocument,
};

use crate::cache::FileCache;
use crate::error::KbError;
use crate::fetch::{Fetcher, RetryPolicy, fetch_with_retry};

pub struct KbLoader<F> {
    fetcher: F,
    base_url: String,
    cache: FileCache,
    retry: RetryPolicy,
}

impl<F: Fetcher> KbLoader<F> {
    pub fn new(fetcher: F, base_url: impl Into<String>, cache: FileCache) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            cache,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn cache(&self) -> &FileCache {
        &self.cache
    }

    /// Fetch the manifest with a cache-busting query parameter.
    pub async fn load_manifest(&self) -> Result<KbManifest, KbError> {
        let bust = jiff::Timestamp::now().as_millisecond();
        let url = kb_paths::manifest_url(&self.base_url, bust);
        self.load_document(KbDocument::Manifest, &url).await
    }

    pub async fn load_sources(&self, manifest: &KbManifest) -> Result<Vec<KbSource>, KbError> {
        let url = kb_paths::document_url(&self.base_url, &manifest.files.sources);
        let document: SourcesDocument = self.load_document(KbDocument::Sources, &url).await?;
        Ok(document.sources)
    }

    pub async fn load_search_index(
        &self,
        manifest: &KbManifest,
    ) -> Result<SearchIndexDocument, KbError> {
        let url = kb_paths::document_url(&self.base_url, &manifest.files.search_index);
        self.load_document(KbDocument::SearchIndex, &url).await
    }

    /// Load the manifest, then the sources and search index concurrently.
    ///
    /// Each document falls back to its own cache entry independently, so the
    /// snapshot may mix versions; see [`KbSnapshot::version_mismatch`].
    pub async fn load(&self) -> Result<KbSnapshot, KbError> {
        let manifest = self.load_manifest().await?;
        let (sources, search_index) = tokio::join!(
            self.load_sources(&manifest),
            self.load_search_index(&manifest)
        );

        let snapshot = KbSnapshot {
            manifest,
            sources: sources?,
            search_index: search_index?,
        };

        if snapshot.version_mismatch() {
            tracing::warn!(
                manifest_version = %snapshot.manifest.kb_version,
                index_version = %snapshot.search_index.kb_version,
                "KB manifest and search index versions differ"
            );
        }

        tracing::info!(
            kb_version = %snapshot.manifest.kb_version,
            sources = snapshot.sources.len(),
            docs = snapshot.search_index.docs.len(),
            "KB loaded"
        );

        Ok(snapshot)
    }

    async fn load_document<T>(&self, document: KbDocument, url: &str) -> Result<T, KbError>
    where
        T: Serialize + DeserializeOwned,
    {
        match fetch_with_retry::<F, T>(&self.fetcher, url, &self.retry).await {
            Ok(value) => {
                if let Err(e) = self.cache.write(document, &value) {
                    tracing::warn!(%document, error = %e, "failed to write KB cache");
                }
                Ok(value)
            }
            Err(e) => match self.cache.read::<T>(document) {
                Some(cached) => {
                    tracing::warn!(%document, error = %e, "KB fetch failed, using cached copy");
                    Ok(cached)
                }
                None => Err(KbError::Unavailable {
                    document,
                    source: Box::new(e),
                }),
            },
        }
    }
}
