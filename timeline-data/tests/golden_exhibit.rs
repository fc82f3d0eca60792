use std::fs;

use serde_json::Value;
use timeline_core::TimelineError;
use timeline_data::{load_exhibit_str, load_timeline_str, load_timeline_value};

fn fixture_path(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name)).expect("could not read fixture")
}

#[test]
fn exhibit_matches_golden() {
    let exhibit = load_exhibit_str(&fixture("timeline.json"), &fixture("cases.json"))
        .expect("could not load exhibit");

    let actual = serde_json::to_value(&exhibit).expect("could not serialize exhibit");
    let expected: Value =
        serde_json::from_str(&fixture("exhibit_snapshot.json")).expect("invalid golden");

    assert_eq!(actual, expected);
}

#[test]
fn loading_keeps_file_order() {
    let entries = load_timeline_str(&fixture("timeline.json")).expect("could not load timeline");
    let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Conferencia de la OTAN",
            "Modelo en cascada",
            "Crisis del software",
            "Sin fecha",
        ]
    );
}

#[test]
fn rejects_documents_that_are_not_arrays() {
    assert!(matches!(
        load_timeline_str(r#"{ "title": "alone" }"#),
        Err(TimelineError::Parse(_))
    ));
    assert!(matches!(
        load_timeline_value(&Value::Null),
        Err(TimelineError::MissingData)
    ));
    assert!(matches!(
        load_timeline_str("[{"),
        Err(TimelineError::Parse(_))
    ));
}

#[test]
fn odd_field_types_degrade_to_absent() {
    let entries = load_timeline_str(
        r#"[{ "date": { "month": 3, "year": 1969.5 }, "title": 42, "subtitle": [], "resume": null }]"#,
    )
    .expect("could not load timeline");

    let entry = &entries[0];
    assert_eq!(entry.date.month.as_deref(), Some("3"));
    assert_eq!(entry.date.year, None);
    assert_eq!(entry.title, "42");
    assert_eq!(entry.subtitle, None);
    assert_eq!(entry.resume, "");
}
