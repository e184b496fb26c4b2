use carenote_core::models::kb::{
    ApprovalStatus, KbDocument, KbManifest, KbSnapshot, SearchIndexDocument, SourcesDocument,
};

fn manifest_json() -> serde_json::Value {
    serde_json::json!({
        "kb_version": "2025.03",
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
        "changelog": [
            { "date": "2025-03-01", "summary": "Initial release" }
        ]
    })
}

#[test]
fn manifest_parses_served_shape() {
    let manifest: KbManifest = serde_json::from_value(manifest_json()).unwrap();
    assert_eq!(manifest.approval.status, ApprovalStatus::Approved);
    assert_eq!(manifest.files.search_index, "search_index.json");
    assert_eq!(manifest.changelog.len(), 1);
    assert!(manifest.changelog[0].files_changed.is_none());
}

#[test]
fn source_type_uses_reserved_word_key() {
    let doc: SourcesDocument = serde_json::from_value(serde_json::json!({
        "sources": [{ "source_id": "cms-483", "type": "regulation", "title": "42 CFR 483" }]
    }))
    .unwrap();
    assert_eq!(doc.sources[0].source_type, "regulation");
    assert!(doc.sources[0].tags.is_none());

    let back = serde_json::to_value(&doc).unwrap();
    assert_eq!(back["sources"][0]["type"], "regulation");
}

#[test]
fn version_mismatch_compares_manifest_and_index() {
    let manifest: KbManifest = serde_json::from_value(manifest_json()).unwrap();
    let mut snapshot = KbSnapshot {
        manifest,
        sources: Vec::new(),
        search_index: SearchIndexDocument {
            kb_version: "2025.03".to_string(),
            generated_at: "2025-03-01T00:00:00Z".to_string(),
            docs: Vec::new(),
        },
    };
    assert!(!snapshot.version_mismatch());

    snapshot.search_index.kb_version = "2025.02".to_string();
    assert!(snapshot.version_mismatch());
}

#[test]
fn cache_keys_are_distinct_per_document() {
    let keys = [
        KbDocument::Manifest.cache_key(),
        KbDocument::Sources.cache_key(),
        KbDocument::SearchIndex.cache_key(),
    ];
    assert_eq!(keys[0], "kb_manifest_cache_v1");
    assert_ne!(keys[0], keys[1]);
    assert_ne!(keys[1], keys[2]);
}
