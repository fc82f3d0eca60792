use proptest::prelude::*;
use timeline_core::{month_index, order, EntryDate, OrderedView, TimelineEntry};

fn entry(title: &str, month: Option<&str>, year: Option<i32>) -> TimelineEntry {
    TimelineEntry {
        date: EntryDate::new(month, year),
        title: title.to_string(),
        resume: format!("{title} resume"),
        ..TimelineEntry::default()
    }
}

const ENGLISH: [&str; 12] = [
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];
const SPANISH: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio", "julio", "agosto", "septiembre",
    "octubre", "noviembre", "diciembre",
];

#[test]
fn recognises_every_language_and_case_variant() {
    for (ordinal, (english, spanish)) in (1u8..).zip(ENGLISH.iter().zip(SPANISH.iter())) {
        let short = &english[..3];
        for label in [
            english.to_string(),
            english.to_uppercase(),
            short.to_string(),
            short.to_uppercase(),
            spanish.to_string(),
            format!("  {}  ", spanish.to_uppercase()),
        ] {
            assert_eq!(month_index(Some(&label)), ordinal, "label {label:?}");
        }
    }
    assert_eq!(month_index(Some("Sept")), 9);
}

#[test]
fn unknown_labels_are_zero() {
    assert_eq!(month_index(None), 0);
    assert_eq!(month_index(Some("")), 0);
    assert_eq!(month_index(Some("Q3")), 0);
    assert_eq!(month_index(Some("13")), 0);
    assert_eq!(month_index(Some("janvier")), 0);
}

#[test]
fn orders_mixed_language_months_within_a_year() {
    let entries = vec![
        entry("NATO conference", Some("October"), Some(1968)),
        entry("Unix", None, Some(1970)),
        entry("Software crisis", Some("enero"), Some(1968)),
    ];

    let ordered = order(&entries);
    let titles: Vec<&str> = ordered.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Software crisis", "NATO conference", "Unix"]);
    assert_eq!(entries[0].title, "NATO conference", "input must stay untouched");
}

#[test]
fn missing_year_sorts_first() {
    let entries = vec![
        entry("dated", Some("mar"), Some(1950)),
        entry("undated", Some("dec"), None),
    ];
    let ordered = order(&entries);
    assert_eq!(ordered[0].title, "undated");
}

#[test]
fn ordered_view_recomputes_only_on_change() {
    let mut view = OrderedView::new();
    let mut entries = vec![
        entry("b", Some("feb"), Some(1960)),
        entry("a", Some("jan"), Some(1960)),
    ];

    assert_eq!(view.get(&entries)[0].title, "a");
    assert_eq!(view.get(&entries)[0].title, "a");
    assert_eq!(view.generation(), 1);

    entries.push(entry("c", None, Some(1900)));
    assert_eq!(view.get(&entries)[0].title, "c");
    assert_eq!(view.generation(), 2);

    let titles: Vec<&str> = view.current().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["c", "a", "b"]);
}

fn month_label() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("jan".to_string())),
        Just(Some("Marzo".to_string())),
        Just(Some("sept".to_string())),
        Just(Some("DICIEMBRE".to_string())),
        Just(Some("whenever".to_string())),
    ]
}

fn entries() -> impl Strategy<Value = Vec<TimelineEntry>> {
    prop::collection::vec(
        (month_label(), prop::option::of(1940i32..1975)),
        0..24,
    )
    .prop_map(|dates| {
        dates
            .into_iter()
            .enumerate()
            .map(|(i, (month, year))| entry(&format!("entry {i}"), month.as_deref(), year))
            .collect()
    })
}

fn position(title: &str) -> usize {
    title
        .trim_start_matches("entry ")
        .parse()
        .unwrap_or(usize::MAX)
}

proptest! {
    #[test]
    fn prop_sorted_stable_and_idempotent(input in entries()) {
        let ordered = order(&input);
        prop_assert_eq!(ordered.len(), input.len());

        for pair in ordered.windows(2) {
            let (a, b) = (pair[0].date.sort_key(), pair[1].date.sort_key());
            prop_assert!(a <= b);
            if a == b {
                prop_assert!(position(&pair[0].title) < position(&pair[1].title));
            }
        }

        prop_assert_eq!(order(&ordered), ordered);
    }

    #[test]
    fn prop_unrecognised_labels_map_to_zero(label in "[0-9 ]{0,6}|x[a-z]{0,8}") {
        prop_assert_eq!(month_index(Some(&label)), 0);
    }
}
