use timeline_core::{
    CardEvent, CardState, EntryDate, ExhibitConfig, ImageFormat, ImageSource, LoadPriority,
    LoadState, MediaStage, PreviewState, Side, TimelineCard, TimelineEntry,
};

const PLACEHOLDER: &str = "/images/placeholder.jpg";

#[test]
fn raster_paths_offer_avif_then_webp_then_original() {
    let source = ImageSource::resolve(Some("/img/x.png"), PLACEHOLDER);
    assert_eq!(source.sources(), vec!["/img/x.avif", "/img/x.webp", "/img/x.png"]);
    assert_eq!(source.candidates[0].format.mime(), Some("image/avif"));
    assert_eq!(source.original, "/img/x.png");
    assert!(!source.is_placeholder);

    let upper = ImageSource::resolve(Some("/img/Photo.JPG"), PLACEHOLDER);
    assert_eq!(
        upper.sources(),
        vec!["/img/Photo.avif", "/img/Photo.webp", "/img/Photo.JPG"]
    );
}

#[test]
fn missing_path_offers_only_the_placeholder() {
    for path in [None, Some("")] {
        let source = ImageSource::resolve(path, PLACEHOLDER);
        assert_eq!(source.sources(), vec![PLACEHOLDER]);
        assert!(source.is_placeholder);
    }
}

#[test]
fn other_formats_are_offered_as_is() {
    let source = ImageSource::resolve(Some("/img/diagram.svg"), PLACEHOLDER);
    assert_eq!(source.sources(), vec!["/img/diagram.svg"]);
}

#[test]
fn selection_follows_decoder_support() {
    let source = ImageSource::resolve(Some("/img/x.jpeg"), PLACEHOLDER);
    assert_eq!(source.select(|_| true), "/img/x.avif");
    assert_eq!(source.select(|f| f == ImageFormat::Webp), "/img/x.webp");
    assert_eq!(source.select(|_| false), "/img/x.jpeg");
}

#[test]
fn loaded_is_permanent() {
    let state = CardState::default()
        .apply(CardEvent::ImageDecoded)
        .apply(CardEvent::ImageFailed)
        .apply(CardEvent::PreviewRequested)
        .apply(CardEvent::PreviewDismissed);
    assert_eq!(state.load, LoadState::Loaded);
    assert_eq!(state.preview, PreviewState::Closed);
}

#[test]
fn failed_decode_keeps_placeholder() {
    let state = CardState::default().apply(CardEvent::ImageFailed);
    assert!(!state.is_loaded());
}

#[test]
fn missing_alternate_falls_back_to_the_original() {
    let image = ImageSource::resolve(Some("/img/x.png"), PLACEHOLDER);
    let state = CardState::default();

    let event = CardEvent::for_image_error(&image, "https://museum.test/img/x.avif", state.media);
    assert_eq!(event, CardEvent::AlternateFailed);

    let state = state.apply(event);
    assert_eq!(state.media, MediaStage::OriginalOnly);
    assert!(!state.is_loaded());
    assert_eq!(image.for_stage(state.media).sources(), vec!["/img/x.png"]);
    assert!(image.for_stage(state.media).alternates().is_empty());

    let state = state.apply(CardEvent::ImageDecoded);
    assert!(state.is_loaded());
}

#[test]
fn failed_original_is_not_retried() {
    let image = ImageSource::resolve(Some("/img/x.png"), PLACEHOLDER);

    let event = CardEvent::for_image_error(&image, "/img/x.png", MediaStage::Candidates);
    assert_eq!(event, CardEvent::ImageFailed);

    let fallback = CardState::default().apply(CardEvent::AlternateFailed);
    let event = CardEvent::for_image_error(&image, "/img/x.png", fallback.media);
    assert_eq!(event, CardEvent::ImageFailed);
    let state = fallback.apply(event);
    assert_eq!(state.media, MediaStage::OriginalOnly);
    assert!(!state.is_loaded());

    let placeholder = ImageSource::resolve(None, PLACEHOLDER);
    assert_eq!(
        CardEvent::for_image_error(&placeholder, PLACEHOLDER, MediaStage::Candidates),
        CardEvent::ImageFailed
    );
}

#[test]
fn late_alternate_errors_do_not_unload_a_card() {
    let state = CardState::default()
        .apply(CardEvent::ImageDecoded)
        .apply(CardEvent::AlternateFailed);
    assert!(state.is_loaded());
    assert_eq!(state.media, MediaStage::Candidates);
}

#[test]
fn preview_keys() {
    assert_eq!(
        CardEvent::for_key("Enter", PreviewState::Closed),
        Some(CardEvent::PreviewRequested)
    );
    assert_eq!(
        CardEvent::for_key(" ", PreviewState::Closed),
        Some(CardEvent::PreviewRequested)
    );
    assert_eq!(
        CardEvent::for_key("Escape", PreviewState::Open),
        Some(CardEvent::PreviewDismissed)
    );
    assert_eq!(CardEvent::for_key("Escape", PreviewState::Closed), None);
    assert_eq!(CardEvent::for_key("Enter", PreviewState::Open), None);
}

#[test]
fn cards_alternate_and_prefetch_the_next_image() {
    let entries = vec![
        TimelineEntry {
            date: EntryDate::new(Some("oct"), Some(1968)),
            title: "NATO".to_string(),
            image_path: Some("/img/nato.png".to_string()),
            ..TimelineEntry::default()
        },
        TimelineEntry {
            date: EntryDate::new(None, Some(1970)),
            title: "Waterfall".to_string(),
            ..TimelineEntry::default()
        },
        TimelineEntry {
            date: EntryDate::new(Some("junio"), None),
            title: "Agile".to_string(),
            image_path: Some("/img/agile.jpg".to_string()),
            ..TimelineEntry::default()
        },
    ];

    let cards = TimelineCard::build_all(&entries, &ExhibitConfig::default());

    let sides: Vec<Side> = cards.iter().map(|c| c.side).collect();
    assert_eq!(sides, vec![Side::Left, Side::Right, Side::Left]);

    let priorities: Vec<LoadPriority> = cards.iter().map(|c| c.priority).collect();
    assert_eq!(
        priorities,
        vec![LoadPriority::Eager, LoadPriority::Lazy, LoadPriority::Lazy]
    );
    assert_eq!(cards[0].priority.fetch_priority_attr(), "high");

    assert_eq!(cards[0].prefetch.as_deref(), Some(PLACEHOLDER));
    assert_eq!(cards[1].prefetch.as_deref(), Some("/img/agile.jpg"));
    assert_eq!(cards[2].prefetch, None);

    assert_eq!(cards[0].key, "NATO-0");
    assert_eq!(cards[0].datetime.as_deref(), Some("1968-10-01"));
    assert_eq!(cards[1].datetime.as_deref(), Some("1970-01-01"));
    assert_eq!(cards[2].datetime, None);
    assert_eq!(cards[0].date_label, "Date: oct 1968");
}
