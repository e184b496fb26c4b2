use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use carenote_core::models::kb::{KbDocument, KbManifest, SearchIndexDocument, SourcesDocument};
use carenote_kb::cache::FileCache;
use carenote_kb::error::KbError;
use carenote_kb::fetch::{Fetcher, RetryPolicy};
use carenote_kb::loader::KbLoader;
use serde_json::{Value, json};

const BASE: &str = "http://kb.test";

/// Replays canned responses per document; anything unscripted is a 503.
#[derive(Default)]
struct ScriptedFetcher {
    responses: Mutex<HashMap<&'static str, VecDeque<Result<Value, KbError>>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    fn script(self, file: &'static str, responses: Vec<Result<Value, KbError>>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(file, responses.into_iter().collect());
        self
    }

    fn calls_to(&self, file: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|url| url.contains(file))
            .count()
    }

    fn urls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Fetcher for ScriptedFetcher {
    fn get_json(&self, url: &str) -> impl Future<Output = Result<Value, KbError>> + Send {
        self.calls.lock().unwrap().push(url.to_string());
        let next = self
            .responses
            .lock()
            .unwrap()
            .iter_mut()
            .find(|(file, _)| url.contains(*file))
            .and_then(|(_, queue)| queue.pop_front());
        let url = url.to_string();
        async move { next.unwrap_or(Err(KbError::Status { url, status: 503 })) }
    }
}

fn unavailable() -> Result<Value, KbError> {
    Err(KbError::Request {
        url: "scripted".to_string(),
        reason: "connection refused".to_string(),
    })
}

fn manifest(version: &str) -> Value {
    json!({
        "kb_version": version,
        "effective_date": "2025-03-01",
        "approval": {
            "status": "approved",
            "approved_by_role": "DON",
            "approved_date": "2025-02-27"
        },
        "files": {
            "sources": "sources.json",
            "sections": "sections.json",
            "search_index": "search_index.json"
        },
        "changelog": []
    })
}

fn sources(ids: &[&str]) -> Value {
    let sources: Vec<Value> = ids
        .iter()
        .map(|id| json!({ "source_id": id, "type": "policy", "title": format!("Policy {id}") }))
        .collect();
    json!({ "sources": sources })
}

fn search_index(version: &str) -> Value {
    json!({
        "kb_version": version,
        "generated_at": "2025-03-01T00:00:00Z",
        "docs": [{
            "id": "falls-1",
            "source_id": "falls",
            "section_id": "s1",
            "title": "Fall Management",
            "heading": "Post-fall monitoring",
            "type": "policy",
            "jurisdiction": "facility",
            "effective_date": "2025-03-01",
            "review_by": "2026-03-01",
            "url_or_location": "binder 2",
            "tags": ["falls"],
            "text": "Neuro checks for 72 hours after an unwitnessed fall."
        }]
    })
}

fn fast_retry(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        initial_backoff: Duration::from_millis(1),
    }
}

fn seed<T: serde::de::DeserializeOwned + serde::Serialize>(
    cache: &FileCache,
    document: KbDocument,
    value: Value,
) {
    let typed: T = serde_json::from_value(value).unwrap();
    cache.write(document, &typed).unwrap();
}

#[tokio::test]
async fn retry_succeeds_on_third_attempt_without_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let cache = FileCache::new(dir.path());
    seed::<KbManifest>(&cache, KbDocument::Manifest, manifest("2024.12"));

    let fetcher = ScriptedFetcher::default().script(
        "manifest.json",
        vec![unavailable(), unavailable(), Ok(manifest("2025.03"))],
    );
    let fetcher = Arc::new(fetcher);
    let loader = KbLoader::new(fetcher.clone(), BASE, cache).with_retry(fast_retry(2));

    let loaded = loader.load_manifest().await.unwrap();
    assert_eq!(loaded.kb_version, "2025.03");
    assert_eq!(fetcher.calls_to("manifest.json"), 3);

    let cached: KbManifest = loader.cache().read(KbDocument::Manifest).unwrap();
    assert_eq!(cached.kb_version, "2025.03");
}

#[tokio::test]
async fn falls_back_to_cached_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let cache = FileCache::new(dir.path());
    seed::<KbManifest>(&cache, KbDocument::Manifest, manifest("2025.01"));

    let fetcher = ScriptedFetcher::default();
    let loader = KbLoader::new(fetcher, BASE, cache).with_retry(fast_retry(2));

    let loaded = loader.load_manifest().await.unwrap();
    assert_eq!(loaded.kb_version, "2025.01");
}

#[tokio::test]
async fn fails_without_a_cached_copy() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = ScriptedFetcher::default();
    let loader = KbLoader::new(fetcher, BASE, FileCache::new(dir.path())).with_retry(fast_retry(2));

    let err = loader.load_manifest().await.unwrap_err();
    match err {
        KbError::Unavailable { document, source } => {
            assert_eq!(document, KbDocument::Manifest);
            assert!(matches!(*source, KbError::Status { status: 503, .. }));
        }
        other => panic!("expected Unavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn attempts_are_bounded_by_max_retries() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = ScriptedFetcher::default().script(
        "manifest.json",
        vec![unavailable(), unavailable(), Ok(manifest("2025.03"))],
    );
    let loader = KbLoader::new(fetcher, BASE, FileCache::new(dir.path())).with_retry(fast_retry(1));

    assert!(loader.load_manifest().await.is_err());
}

#[tokio::test]
async fn malformed_body_counts_as_a_failed_attempt() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = ScriptedFetcher::default().script(
        "manifest.json",
        vec![Ok(json!({ "unexpected": true })), Ok(manifest("2025.03"))],
    );
    let loader = KbLoader::new(fetcher, BASE, FileCache::new(dir.path())).with_retry(fast_retry(2));

    assert_eq!(loader.load_manifest().await.unwrap().kb_version, "2025.03");
}

#[tokio::test]
async fn corrupt_cache_counts_as_missing() {
    let dir = tempfile::tempdir().unwrap();
    let cache = FileCache::new(dir.path());
    std::fs::write(cache.path(KbDocument::Manifest), b"{ not json").unwrap();

    let loader = KbLoader::new(ScriptedFetcher::default(), BASE, cache).with_retry(fast_retry(0));
    assert!(matches!(
        loader.load_manifest().await,
        Err(KbError::Unavailable { .. })
    ));
}

#[tokio::test]
async fn load_fetches_all_three_documents() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = ScriptedFetcher::default()
        .script("manifest.json", vec![Ok(manifest("2025.03"))])
        .script("sources.json", vec![Ok(sources(&["falls", "abx"]))])
        .script("search_index.json", vec![Ok(search_index("2025.03"))]);
    let loader = KbLoader::new(fetcher, BASE, FileCache::new(dir.path())).with_retry(fast_retry(0));

    let snapshot = loader.load().await.unwrap();
    assert_eq!(snapshot.sources.len(), 2);
    assert_eq!(snapshot.search_index.docs.len(), 1);
    assert!(!snapshot.version_mismatch());

    for document in [KbDocument::Manifest, KbDocument::Sources, KbDocument::SearchIndex] {
        assert!(loader.cache().path(document).exists(), "{document} not cached");
    }
}

#[tokio::test]
async fn urls_follow_the_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = Arc::new(
        ScriptedFetcher::default()
            .script("manifest.json", vec![Ok(manifest("2025.03"))])
            .script("sources.json", vec![Ok(sources(&["falls"]))])
            .script("search_index.json", vec![Ok(search_index("2025.03"))]),
    );
    let loader = KbLoader::new(fetcher.clone(), "http://kb.test/", FileCache::new(dir.path()))
        .with_retry(fast_retry(0));
    loader.load().await.unwrap();

    let urls = fetcher.urls();
    assert_eq!(urls.len(), 3);
    assert!(urls[0].starts_with("http://kb.test/kb/manifest.json?v="));
    assert!(urls.contains(&"http://kb.test/kb/sources.json".to_string()));
    assert!(urls.contains(&"http://kb.test/kb/search_index.json".to_string()));
}

#[tokio::test]
async fn fallback_is_decided_per_document() {
    let dir = tempfile::tempdir().unwrap();
    let cache = FileCache::new(dir.path());
    seed::<KbManifest>(&cache, KbDocument::Manifest, manifest("2025.01"));
    seed::<SourcesDocument>(&cache, KbDocument::Sources, sources(&["cached"]));
    seed::<SearchIndexDocument>(&cache, KbDocument::SearchIndex, search_index("2025.01"));

    let fetcher = Arc::new(
        ScriptedFetcher::default()
            .script("manifest.json", vec![Ok(manifest("2025.03"))])
            .script("search_index.json", vec![Ok(search_index("2025.03"))]),
    );
    let loader = KbLoader::new(fetcher.clone(), BASE, cache).with_retry(fast_retry(1));

    let snapshot = loader.load().await.unwrap();
    assert_eq!(snapshot.manifest.kb_version, "2025.03");
    assert_eq!(snapshot.sources[0].source_id, "cached");
    assert_eq!(snapshot.search_index.kb_version, "2025.03");
    assert_eq!(fetcher.calls_to("sources.json"), 2);

    let manifest: KbManifest = loader.cache().read(KbDocument::Manifest).unwrap();
    assert_eq!(manifest.kb_version, "2025.03");
    let cached_sources: SourcesDocument = loader.cache().read(KbDocument::Sources).unwrap();
    assert_eq!(cached_sources.sources[0].source_id, "cached");
}

#[tokio::test]
async fn mixed_versions_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let cache = FileCache::new(dir.path());
    seed::<SearchIndexDocument>(&cache, KbDocument::SearchIndex, search_index("2025.01"));

    let fetcher = ScriptedFetcher::default()
        .script("manifest.json", vec![Ok(manifest("2025.03"))])
        .script("sources.json", vec![Ok(sources(&["falls"]))]);
    let loader = KbLoader::new(fetcher, BASE, cache).with_retry(fast_retry(0));

    let snapshot = loader.load().await.unwrap();
    assert!(snapshot.version_mismatch());
}

#[tokio::test]
async fn missing_dependent_document_fails_the_load() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = ScriptedFetcher::default()
        .script("manifest.json", vec![Ok(manifest("2025.03"))])
        .script("sources.json", vec![Ok(sources(&["falls"]))]);
    let loader = KbLoader::new(fetcher, BASE, FileCache::new(dir.path())).with_retry(fast_retry(0));

    assert!(matches!(
        loader.load().await,
        Err(KbError::Unavailable {
            document: KbDocument::SearchIndex,
            ..
        })
    ));
}
