//! KB URL and cache-key conventions.
//!
//! Pure string functions. These define where the knowledge-base documents
//! live relative to the serving origin and how each one is keyed in the
//! durable cache.

/// Path segment every KB document is served under.
pub const KB_PREFIX: &str = "kb";

pub const MANIFEST_FILE: &str = "manifest.json";

pub const MANIFEST_CACHE_KEY: &str = "kb_manifest_cache_v1";
pub const SOURCES_CACHE_KEY: &str = "kb_sources_cache_v1";
pub const SEARCH_INDEX_CACHE_KEY: &str = "kb_search_index_cache_v1";

/// Manifest URL with a cache-busting query parameter.
///
/// `bust` is normally the current Unix time in milliseconds, so an
/// intermediate HTTP cache never answers for the manifest.
pub fn manifest_url(base_url: &str, bust: i64) -> String {
    format!(
        "{}/{KB_PREFIX}/{MANIFEST_FILE}?v={bust}",
        base_url.trim_end_matches('/')
    )
}

/// URL of a dependent document whose relative path comes from the manifest.
pub fn document_url(base_url: &str, relative_path: &str) -> String {
    format!(
        "{}/{KB_PREFIX}/{}",
        base_url.trim_end_matches('/'),
        relative_path.trim_start_matches('/')
    )
}
