//! Core logic for the engineering-history exhibit: the timeline data model,
//! its ordering, and the host-independent state behind the scroll-driven
//! timeline and the case-study carousel.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod card;
pub mod carousel;
pub mod config;
pub mod media;
pub mod month;
pub mod order;
pub mod progress;
pub mod viewport;

pub use card::{
    CardEvent, CardState, CaseCard, LoadPriority, LoadState, PreviewState, Side, TimelineCard,
};
pub use carousel::{
    centered_scroll_left, nearest_to_center, CardBox, CarouselController, CarouselKey,
    CarouselSurface,
};
pub use config::{ExhibitConfig, ProgressConfig, SpringConfig};
pub use media::{ImageCandidate, ImageFormat, ImageSource, MediaStage};
pub use month::month_index;
pub use order::{order, OrderedView};
pub use progress::{LayoutGeometry, ProgressTracker, ScrollRange, Spring};
pub use viewport::{
    watch_prefetch, FrameGate, IntersectionSource, MotionPreference, PrefetchOnce, ScrollBehavior,
    Unsubscribe,
};

/// Date of a milestone as written in the source data.
///
/// The month is free text in English or Spanish; the year may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EntryDate {
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

impl EntryDate {
    pub fn new(month: Option<&str>, year: Option<i32>) -> Self {
        Self {
            month: month.map(str::to_string),
            year,
        }
    }

    /// Sort key `(year, month)`; unknown parts count as 0 and sort first.
    pub fn sort_key(&self) -> (i32, u8) {
        (self.year.unwrap_or(0), month_index(self.month.as_deref()))
    }

    pub fn month_label(&self) -> &str {
        self.month.as_deref().unwrap_or_default()
    }

    pub fn year_label(&self) -> String {
        self.year.map(|year| year.to_string()).unwrap_or_default()
    }

    /// Machine-readable date for a `<time datetime>` attribute.
    ///
    /// Unknown months fall back to January; without a year there is nothing
    /// meaningful to emit.
    pub fn datetime_attr(&self) -> Option<String> {
        let year = self.year?;
        let month = month_index(self.month.as_deref()).max(1);
        NaiveDate::from_ymd_opt(year, u32::from(month), 1)
            .map(|date| date.format("%Y-%m-%d").to_string())
    }

    /// Accessible label read out in place of the two date pills.
    pub fn aria_label(&self) -> String {
        format!("Date: {} {}", self.month_label(), self.year_label())
    }
}

/// One milestone of the timeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    #[serde(default)]
    pub date: EntryDate,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub resume: String,
    #[serde(default)]
    pub image_path: Option<String>,
}

impl TimelineEntry {
    /// Rendering key; titles repeat across eras so the index is part of it.
    pub fn key(&self, index: usize) -> String {
        format!("{}-{index}", self.title)
    }
}

/// One card of the case-study carousel.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudyEntry {
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CaseStudyEntry {
    pub fn key(&self, index: usize) -> String {
        format!("{}{index}", self.company)
    }
}

/// Everything the page renders, with the timeline already ordered.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Exhibit {
    pub timeline: Vec<TimelineEntry>,
    pub cases: Vec<CaseStudyEntry>,
}

impl Exhibit {
    /// Builds the exhibit, ordering the timeline chronologically.
    pub fn new(timeline: Vec<TimelineEntry>, cases: Vec<CaseStudyEntry>) -> Self {
        Self {
            timeline: order(&timeline),
            cases,
        }
    }

    /// Timeline entries in chronological order.
    pub fn timeline(&self) -> &[TimelineEntry] {
        &self.timeline
    }

    pub fn cases(&self) -> &[CaseStudyEntry] {
        &self.cases
    }
}

/// Errors raised while loading or configuring the exhibit.
///
/// Rendering itself never fails; these only come out of loading.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error("input data is missing the minimum required structure")]
    MissingData,
    #[error("could not read data: {0}")]
    Parse(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Empty exhibit, handy for mocks and first paint.
pub fn empty_exhibit() -> Exhibit {
    Exhibit::default()
}
