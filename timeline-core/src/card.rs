//! Per-card view model and the state each rendered card keeps.

use serde::{Deserialize, Serialize};

use crate::config::ExhibitConfig;
use crate::media::{ImageSource, MediaStage};
use crate::{CaseStudyEntry, TimelineEntry};

/// Side of the axis a card sits on at wide breakpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            Side::Left
        } else {
            Side::Right
        }
    }

    pub fn is_left(self) -> bool {
        self == Side::Left
    }
}

/// How eagerly a card's image is fetched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LoadPriority {
    /// Loaded immediately with high fetch priority.
    Eager,
    Lazy,
}

impl LoadPriority {
    /// Only the first card in the ordered timeline is eager.
    pub fn for_index(index: usize) -> Self {
        if index == 0 {
            LoadPriority::Eager
        } else {
            LoadPriority::Lazy
        }
    }

    pub fn loading_attr(self) -> &'static str {
        match self {
            LoadPriority::Eager => "eager",
            LoadPriority::Lazy => "lazy",
        }
    }

    pub fn fetch_priority_attr(self) -> &'static str {
        match self {
            LoadPriority::Eager => "high",
            LoadPriority::Lazy => "auto",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    Unloaded,
    Loaded,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PreviewState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CardEvent {
    ImageDecoded,
    /// An alternate format failed; the original is tried next.
    AlternateFailed,
    /// The original itself failed.
    ImageFailed,
    PreviewRequested,
    PreviewDismissed,
}

impl CardEvent {
    /// Event for a key pressed on the card image or inside the open preview.
    pub fn for_key(key: &str, preview: PreviewState) -> Option<Self> {
        match (key, preview) {
            ("Enter" | " " | "Spacebar", PreviewState::Closed) => Some(CardEvent::PreviewRequested),
            ("Escape" | "Esc", PreviewState::Open) => Some(CardEvent::PreviewDismissed),
            _ => None,
        }
    }

    /// Event for an image `error` reported while offering `stage`.
    pub fn for_image_error(image: &ImageSource, failed_src: &str, stage: MediaStage) -> Self {
        if stage.after_error(image, failed_src) == stage {
            CardEvent::ImageFailed
        } else {
            CardEvent::AlternateFailed
        }
    }
}

/// Image and preview state of one card.
///
/// `Loaded` is terminal for the image half: nothing moves it back. A failed
/// alternate drops the card to its original; a failed original leaves the
/// placeholder in place.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardState {
    pub load: LoadState,
    pub media: MediaStage,
    pub preview: PreviewState,
}

impl CardState {
    pub fn apply(self, event: CardEvent) -> Self {
        match event {
            CardEvent::ImageDecoded => Self {
                load: LoadState::Loaded,
                ..self
            },
            CardEvent::AlternateFailed if self.load == LoadState::Unloaded => Self {
                media: MediaStage::OriginalOnly,
                ..self
            },
            CardEvent::AlternateFailed | CardEvent::ImageFailed => self,
            CardEvent::PreviewRequested => Self {
                preview: PreviewState::Open,
                ..self
            },
            CardEvent::PreviewDismissed => Self {
                preview: PreviewState::Closed,
                ..self
            },
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.load == LoadState::Loaded
    }

    pub fn is_open(&self) -> bool {
        self.preview == PreviewState::Open
    }
}

/// Everything a timeline card needs to render, derived from its entry and
/// position in the ordered sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineCard {
    pub index: usize,
    pub key: String,
    pub side: Side,
    pub priority: LoadPriority,
    pub image: ImageSource,
    /// Image of the following card, hinted when this one nears the viewport.
    pub prefetch: Option<String>,
    pub datetime: Option<String>,
    pub date_label: String,
    pub entry: TimelineEntry,
}

impl TimelineCard {
    /// Builds the cards for an already ordered timeline.
    pub fn build_all(ordered: &[TimelineEntry], config: &ExhibitConfig) -> Vec<Self> {
        let images: Vec<ImageSource> = ordered
            .iter()
            .map(|entry| {
                ImageSource::resolve(entry.image_path.as_deref(), &config.timeline_placeholder)
            })
            .collect();

        ordered
            .iter()
            .zip(images.iter())
            .enumerate()
            .map(|(index, (entry, image))| Self {
                index,
                key: entry.key(index),
                side: Side::for_index(index),
                priority: LoadPriority::for_index(index),
                image: image.clone(),
                prefetch: images.get(index + 1).map(|next| next.original.clone()),
                datetime: entry.date.datetime_attr(),
                date_label: entry.date.aria_label(),
                entry: entry.clone(),
            })
            .collect()
    }
}

/// View model of one case-study card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseCard {
    pub index: usize,
    pub key: String,
    pub image: ImageSource,
    pub entry: CaseStudyEntry,
}

impl CaseCard {
    pub fn build_all(cases: &[CaseStudyEntry], config: &ExhibitConfig) -> Vec<Self> {
        cases
            .iter()
            .enumerate()
            .map(|(index, entry)| Self {
                index,
                key: entry.key(index),
                image: ImageSource::resolve(entry.image_path.as_deref(), &config.case_placeholder),
                entry: entry.clone(),
            })
            .collect()
    }
}
