use carenote_core::models::kb::SearchDoc;
use carenote_kb::error::KbError;
use carenote_kb::search::KbSearch;

fn doc(id: &str, title: &str, heading: &str, text: &str, tags: &[&str]) -> SearchDoc {
    SearchDoc {
        id: id.to_string(),
        source_id: id.split('-').next().unwrap_or_default().to_string(),
        section_id: format!("{id}-section"),
        title: title.to_string(),
        heading: heading.to_string(),
        doc_type: "policy".to_string(),
        jurisdiction: "facility".to_string(),
        effective_date: "2025-03-01".to_string(),
        review_by: "2026-03-01".to_string(),
        url_or_location: "binder".to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        text: text.to_string(),
    }
}

fn corpus() -> Vec<SearchDoc> {
    vec![
        doc(
            "falls-1",
            "Fall Management",
            "Post-fall monitoring",
            "Complete neuro checks for 72 hours after an unwitnessed fall.",
            &["falls", "neuro"],
        ),
        doc(
            "abx-1",
            "Antibiotic Stewardship",
            "Time-outs",
            "Review every antibiotic order at 48 to 72 hours.",
            &["stewardship"],
        ),
        doc(
            "vax-1",
            "Immunizations",
            "Declinations",
            "Document education and the resident's decision.",
            &["vaccination"],
        ),
    ]
}

#[test]
fn finds_sections_by_text_and_tag() {
    let search = KbSearch::build(&corpus()).unwrap();
    assert_eq!(search.len(), 3);

    let hits = search.search("neuro", 10).unwrap();
    assert_eq!(hits[0].id, "falls-1");
    assert_eq!(hits[0].source_id, "falls");
    assert_eq!(hits[0].heading, "Post-fall monitoring");

    let hits = search.search("stewardship", 10).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Antibiotic Stewardship");
}

#[test]
fn limit_caps_results() {
    let search = KbSearch::build(&corpus()).unwrap();
    let hits = search.search("72", 1).unwrap();
    assert_eq!(hits.len(), 1);
}

#[test]
fn blank_query_returns_nothing() {
    let search = KbSearch::build(&corpus()).unwrap();
    assert!(search.search("   ", 10).unwrap().is_empty());
    assert!(search.search("falls", 0).unwrap().is_empty());
}

#[test]
fn unknown_field_is_a_query_error() {
    let search = KbSearch::build(&corpus()).unwrap();
    assert!(matches!(
        search.search("nosuchfield:falls", 10),
        Err(KbError::QueryParse(_))
    ));
}

#[test]
fn empty_index_is_searchable() {
    let search = KbSearch::build(&[]).unwrap();
    assert!(search.is_empty());
    assert!(search.search("falls", 5).unwrap().is_empty());
}
