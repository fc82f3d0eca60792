use timeline_core::{empty_exhibit, Exhibit, ExhibitConfig, TimelineEntry};

#[test]
fn entries_read_camel_case_json() {
    let entry: TimelineEntry = serde_json::from_str(
        r#"{
            "date": { "month": "Octubre", "year": 1968 },
            "title": "Conferencia OTAN",
            "resume": "Nace el término ingeniería de software.",
            "imagePath": "/assets/nato.png"
        }"#,
    )
    .expect("valid entry");

    assert_eq!(entry.date.sort_key(), (1968, 10));
    assert_eq!(entry.image_path.as_deref(), Some("/assets/nato.png"));
    assert_eq!(entry.subtitle, None);
}

#[test]
fn exhibit_orders_its_timeline() {
    let entries: Vec<TimelineEntry> = serde_json::from_str(
        r#"[
            { "date": { "month": "dec", "year": 1999 }, "title": "late", "resume": "" },
            { "date": { "year": 1950 }, "title": "early", "resume": "" }
        ]"#,
    )
    .expect("valid entries");

    let exhibit = Exhibit::new(entries, Vec::new());
    assert_eq!(exhibit.timeline()[0].title, "early");
    assert!(exhibit.cases().is_empty());
    assert_eq!(empty_exhibit(), Exhibit::default());
}

#[test]
fn partial_config_keeps_defaults() {
    let config: ExhibitConfig =
        serde_json::from_str(r#"{ "progress": { "end_fraction": 0.8 }, "lightbox": false }"#)
            .expect("valid config");
    assert_eq!(config.progress.end_fraction, 0.8);
    assert_eq!(config.progress.start_fraction, 0.5);
    assert_eq!(config.progress.spring.stiffness, 120.0);
    assert_eq!(config.prefetch_margin_px, 200.0);
    assert!(!config.lightbox);
}
