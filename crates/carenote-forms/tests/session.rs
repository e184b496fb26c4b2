use carenote_core::models::field_group::FieldGroup;
use carenote_core::models::preview::MissingReason;
use carenote_forms::error::FormError;
use carenote_forms::get_form;
use carenote_forms::schema::FormSchema;
use carenote_forms::session::NoteSession;
use jiff::civil::date;

fn antibiotic() -> FormSchema {
    get_form("antibiotic").unwrap().schema().unwrap()
}

#[test]
fn new_session_starts_from_defaults() {
    let schema = antibiotic();
    let session = NoteSession::new(&schema);

    assert_eq!(
        session.fields().get("symptoms"),
        Some("Stable, no acute changes.")
    );
    assert_eq!(
        session.validation().reasons(),
        vec![
            "Antibiotic is required",
            "Indication is required",
            "Start Date is required"
        ]
    );
}

#[test]
fn copy_is_gated_on_required_fields() {
    let schema = antibiotic();
    let mut session = NoteSession::new(&schema);
    let today = date(2024, 1, 2);

    session.set("antibiotic", "Cipro").unwrap();
    session.set("indication", "UTI").unwrap();
    assert_eq!(session.copy_text(today), None);

    let preview = session.preview(today);
    assert!(!preview.can_copy);
    assert_eq!(preview.missing.len(), 1);
    assert_eq!(preview.missing[0].field, "start_date");

    session.set("start_date", "2024-01-01").unwrap();
    let text = session.copy_text(today).unwrap();
    assert!(text.starts_with("Day 2/?. Resident currently receiving Cipro"));
}

#[test]
fn whitespace_does_not_satisfy_a_required_field() {
    let schema = antibiotic();
    let mut session = NoteSession::new(&schema);
    session.set("antibiotic", "   ").unwrap();

    assert!(
        session
            .validation()
            .missing
            .iter()
            .any(|m| m.field == "antibiotic")
    );
}

#[test]
fn unknown_field_is_an_error() {
    let schema = antibiotic();
    let mut session = NoteSession::new(&schema);

    assert!(matches!(
        session.set("dose", "500mg"),
        Err(FormError::UnknownField { ref field, .. }) if field == "dose"
    ));

    let values: FieldGroup = [("dose", "500mg")].into_iter().collect();
    assert!(NoteSession::with_fields(&schema, &values).is_err());
}

#[test]
fn unparseable_required_date_blocks_copy() {
    let schema = get_form("observation").unwrap().schema().unwrap();
    let mut session = NoteSession::new(&schema);
    session.set("admit_date", "yesterday").unwrap();

    let preview = session.preview(date(2024, 3, 10));
    assert!(!preview.can_copy);
    assert_eq!(preview.missing.len(), 1);
    assert_eq!(preview.missing[0].field, "admit_date");
    assert_eq!(preview.missing[0].reason, MissingReason::InvalidDate);
    assert_eq!(
        session.validation().reasons(),
        vec!["Admit Date is not a valid date"]
    );
    assert_eq!(session.copy_text(date(2024, 3, 10)), None);

    session.set("admit_date", "2024-03-08").unwrap();
    assert!(session.preview(date(2024, 3, 10)).can_copy);
}

#[test]
fn select_rejects_values_outside_its_options() {
    let schema = get_form("vaccination").unwrap().schema().unwrap();
    let mut session = NoteSession::new(&schema);

    assert!(matches!(
        session.set("covid", "Accepted"),
        Err(FormError::InvalidOption { ref field, ref value, .. })
            if field == "covid" && value == "Accepted"
    ));
    assert_eq!(session.fields().get("covid"), Some("declined"));

    session.set("covid", "accepted").unwrap();
    session.set("covid", "").unwrap();

    let values: FieldGroup = [("covid", "yes")].into_iter().collect();
    assert!(NoteSession::with_fields(&schema, &values).is_err());
}

#[test]
fn polish_is_discarded_on_edit() {
    let schema = antibiotic();
    let values: FieldGroup = [
        ("antibiotic", "Cipro"),
        ("indication", "UTI"),
        ("start_date", "2024-01-01"),
    ]
    .into_iter()
    .collect();
    let mut session = NoteSession::with_fields(&schema, &values).unwrap();
    let today = date(2024, 1, 2);
    let composed = session.composed(today);

    session.apply_polish("Polished note.".to_string());
    let preview = session.preview(today);
    assert!(preview.polished);
    assert_eq!(preview.note, "Polished note.");
    assert_eq!(session.copy_text(today).as_deref(), Some("Polished note."));

    session.set("temp", "98.6").unwrap();
    assert_eq!(session.polished(), None);
    let preview = session.preview(today);
    assert!(!preview.polished);
    assert_ne!(preview.note, composed);
    assert!(preview.note.contains("Temp: 98.6."));
}

#[test]
fn clear_restores_defaults() {
    let schema = antibiotic();
    let mut session = NoteSession::new(&schema);
    session.set("symptoms", "Mild nausea").unwrap();
    session.apply_polish("x".to_string());

    session.clear();
    assert_eq!(session.fields(), &schema.defaults());
    assert_eq!(session.polished(), None);
}

#[test]
fn preview_reports_derived_values() {
    let schema = antibiotic();
    let values: FieldGroup = [("start_date", "2024-01-01"), ("end_date", "2024-01-05")]
        .into_iter()
        .collect();
    let session = NoteSession::with_fields(&schema, &values).unwrap();

    let preview = session.preview(date(2024, 1, 5));
    assert_eq!(preview.form_id, "antibiotic");
    assert_eq!(preview.derived.len(), 1);
    assert_eq!(preview.derived[0].value.as_deref(), Some("Day 5/5"));
}
