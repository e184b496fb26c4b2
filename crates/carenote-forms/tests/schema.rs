use carenote_forms::error::FormError;
use carenote_forms::schema::{Counter, FieldDef, FieldKind, FormSchema, Fragment};
use carenote_forms::template::Template;
use carenote_forms::{all_forms, get_form, register_all};
use carenote_core::models::form::FormKind;

#[test]
fn register_all_builds_every_form() {
    let registry = register_all().unwrap();
    assert_eq!(registry.len(), FormKind::ALL.len());

    let ids: Vec<&str> = registry.iter().map(|s| s.id()).collect();
    let expected: Vec<&str> = FormKind::ALL.iter().map(|k| k.as_str()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn registry_lookup() {
    let registry = register_all().unwrap();
    assert_eq!(registry.require("antibiotic").unwrap().name(), "Antibiotic Note");
    assert!(matches!(
        registry.require("discharge"),
        Err(FormError::UnknownForm(ref id)) if id == "discharge"
    ));
}

#[test]
fn get_form_by_id() {
    assert_eq!(get_form("expiry").unwrap().kind(), FormKind::Expiry);
    assert!(get_form("nope").is_none());
    assert_eq!(all_forms().len(), 8);
}

#[test]
fn defaults_cover_every_field() {
    let schema = get_form("admission").unwrap().schema().unwrap();
    let defaults = schema.defaults();

    assert_eq!(defaults.len(), schema.fields().len());
    assert_eq!(defaults.get("allergies"), Some("NKDA"));
    assert_eq!(defaults.get("admission_type"), Some("new_admission"));
    assert_eq!(
        schema.field("admit_date").map(|f| f.kind),
        Some(FieldKind::Date)
    );
}

#[test]
fn unknown_reference_is_rejected() {
    let err = FormSchema::builder("t", "Test")
        .field(FieldDef::text("a", "A"))
        .fragment(Fragment::boilerplate("Hello."))
        .fragment(Fragment::labeled("B", "b"))
        .build()
        .unwrap_err();

    assert!(matches!(
        err,
        FormError::UnknownReference { index: 1, ref name, .. } if name == "b"
    ));
}

#[test]
fn template_placeholder_must_exist() {
    let err = FormSchema::builder("t", "Test")
        .field(FieldDef::text("a", "A"))
        .fragment(Fragment::template("{a} and {missing?}."))
        .build()
        .unwrap_err();

    assert!(matches!(err, FormError::UnknownReference { ref name, .. } if name == "missing"));
}

#[test]
fn duplicate_field_is_rejected() {
    let err = FormSchema::builder("t", "Test")
        .field(FieldDef::text("a", "A"))
        .field(FieldDef::multiline("a", "Again"))
        .build()
        .unwrap_err();

    assert!(matches!(err, FormError::DuplicateField { ref field, .. } if field == "a"));
}

#[test]
fn derived_name_may_not_shadow_a_field() {
    let err = FormSchema::builder("t", "Test")
        .field(FieldDef::date("start", "Start"))
        .derived("start", Counter::window("start", 3))
        .build()
        .unwrap_err();

    assert!(matches!(err, FormError::DuplicateField { .. }));
}

#[test]
fn malformed_template_is_rejected() {
    let err = FormSchema::builder("t", "Test")
        .field(FieldDef::text("a", "A"))
        .fragment(Fragment::template("Unclosed {a"))
        .build()
        .unwrap_err();

    assert!(matches!(err, FormError::MalformedTemplate { index: 0, .. }));
}

#[test]
fn enumerated_case_must_be_an_option() {
    let err = FormSchema::builder("t", "Test")
        .field(FieldDef::select("status", "Status", &[("yes", "Yes"), ("no", "No")]))
        .fragment(Fragment::enumerated("status", &[("maybe", "Unsure.")]))
        .build()
        .unwrap_err();

    assert!(matches!(err, FormError::UnknownOption { ref value, .. } if value == "maybe"));
}

#[test]
fn checkbox_cases_are_true_or_false() {
    let err = FormSchema::builder("t", "Test")
        .field(FieldDef::checkbox("done", "Done"))
        .fragment(Fragment::enumerated("done", &[("checked", "Done.")]))
        .build()
        .unwrap_err();

    assert!(matches!(err, FormError::UnknownOption { .. }));
}

#[test]
fn counter_requires_a_date_field() {
    let err = FormSchema::builder("t", "Test")
        .field(FieldDef::text("start", "Start"))
        .derived("day", Counter::course("start", None))
        .build()
        .unwrap_err();
    assert!(matches!(err, FormError::NotADateField { ref field, .. } if field == "start"));

    let err = FormSchema::builder("t", "Test")
        .derived("day", Counter::window("start", 3))
        .build()
        .unwrap_err();
    assert!(matches!(err, FormError::InvalidCounter { .. }));
}

#[test]
fn empty_window_is_rejected() {
    let err = FormSchema::builder("t", "Test")
        .field(FieldDef::date("start", "Start"))
        .derived("day", Counter::window("start", 0))
        .build()
        .unwrap_err();

    assert!(matches!(err, FormError::InvalidCounter { .. }));
}

#[test]
fn list_template_needs_items_slot() {
    let err = FormSchema::builder("t", "Test")
        .field(FieldDef::multiline("recs", "Recs"))
        .fragment(Fragment::list("recs", "Recommends {recs}.", "; "))
        .build()
        .unwrap_err();

    assert!(matches!(err, FormError::MalformedTemplate { .. }));
}

#[test]
fn template_parsing() {
    let template = Template::parse("{a} and {b?}.").unwrap();
    let names: Vec<(&str, bool)> = template
        .placeholders()
        .map(|p| (p.name.as_str(), p.optional))
        .collect();
    assert_eq!(names, vec![("a", false), ("b", true)]);

    let lookup_a = |name: &str| (name == "a").then(|| "x".to_string());
    assert_eq!(template.render(lookup_a), Some("x and .".to_string()));
    assert_eq!(template.render(|_: &str| None), None);

    assert!(Template::parse("{bad name}").is_err());
    assert!(Template::parse("stray }").is_err());
    assert!(Template::parse("{}").is_err());
    assert!(Template::parse("no slots").is_ok());
}
