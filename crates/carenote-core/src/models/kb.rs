use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The KB manifest: the version header of one knowledge-base snapshot.
///
/// `files` holds the paths (relative to the KB prefix) of the dependent
/// documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct KbManifest {
    pub kb_version: String,
    pub effective_date: String,
    pub approval: KbApproval,
    pub files: KbFiles,
    #[serde(default)]
    pub changelog: Vec<ChangelogEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct KbApproval {
    pub status: ApprovalStatus,
    pub approved_by_role: String,
    pub approved_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ApprovalStatus {
    Draft,
    Pending,
    Approved,
    Retired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct KbFiles {
    pub sources: String,
    pub sections: String,
    pub search_index: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChangelogEntry {
    pub date: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files_changed: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_or_reason: Option<String>,
}

/// A policy, regulation or guideline the KB cites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct KbSource {
    pub source_id: String,
    #[serde(rename = "type")]
    pub source_type: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_or_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// The sources document, wrapped the way it is served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SourcesDocument {
    pub sources: Vec<KbSource>,
}

/// The pre-chunked search index document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SearchIndexDocument {
    pub kb_version: String,
    pub generated_at: String,
    pub docs: Vec<SearchDoc>,
}

/// One searchable section of a KB source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SearchDoc {
    pub id: String,
    pub source_id: String,
    pub section_id: String,
    pub title: String,
    pub heading: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub jurisdiction: String,
    pub effective_date: String,
    pub review_by: String,
    pub url_or_location: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub text: String,
}

/// A loaded manifest/sources/search-index triple.
///
/// Each document was fetched (or recovered from cache) independently, so the
/// three are not guaranteed to share a `kb_version`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct KbSnapshot {
    pub manifest: KbManifest,
    pub sources: Vec<KbSource>,
    pub search_index: SearchIndexDocument,
}

impl KbSnapshot {
    /// True when the manifest and search index disagree on `kb_version`.
    pub fn version_mismatch(&self) -> bool {
        self.manifest.kb_version != self.search_index.kb_version
    }
}

/// Which KB document a fetch or cache entry concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum KbDocument {
    Manifest,
    Sources,
    SearchIndex,
}

impl KbDocument {
    pub fn as_str(&self) -> &'static str {
        match self {
            KbDocument::Manifest => "manifest",
            KbDocument::Sources => "sources",
            KbDocument::SearchIndex => "search_index",
        }
    }

    pub fn cache_key(&self) -> &'static str {
        match self {
            KbDocument::Manifest => crate::kb_paths::MANIFEST_CACHE_KEY,
            KbDocument::Sources => crate::kb_paths::SOURCES_CACHE_KEY,
            KbDocument::SearchIndex => crate::kb_paths::SEARCH_INDEX_CACHE_KEY,
        }
    }
}

impl std::fmt::Display for KbDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
