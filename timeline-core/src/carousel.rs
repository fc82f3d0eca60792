//! Case-study carousel: which card is centred, and navigation between cards.
//!
//! The active card is always read back from the scroll position. Navigation
//! only asks the surface to scroll; the next scroll event decides what is
//! active, so a user scroll interrupting an animation never leaves the two
//! out of sync.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::viewport::{MotionPreference, ScrollBehavior};

/// Horizontal extent of a card inside the scroll container's content box.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CardBox {
    pub left: f64,
    pub width: f64,
}

impl CardBox {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    pub fn center(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

/// Horizontally scrollable strip of cards.
pub trait CarouselSurface {
    fn scroll_left(&self) -> f64;
    fn client_width(&self) -> f64;
    /// Cards in display order.
    fn cards(&self) -> Vec<CardBox>;
    fn scroll_to(&self, left: f64, behavior: ScrollBehavior);
}

/// Index of the card whose center is closest to `center`; the lowest index
/// wins ties.
pub fn nearest_to_center(cards: &[CardBox], center: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, card) in cards.iter().enumerate() {
        let distance = (center - card.center()).abs();
        if !distance.is_finite() {
            continue;
        }
        if best.map_or(true, |(_, best_distance)| distance < best_distance) {
            best = Some((index, distance));
        }
    }
    best.map(|(index, _)| index)
}

/// Scroll offset that puts `card` in the middle of a container
/// `client_width` wide.
pub fn centered_scroll_left(card: CardBox, client_width: f64) -> f64 {
    card.left - (client_width - card.width) / 2.0
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CarouselKey {
    Prev,
    Next,
}

impl CarouselKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" => Some(CarouselKey::Prev),
            "ArrowRight" | "Right" => Some(CarouselKey::Next),
            _ => None,
        }
    }
}

pub struct CarouselController<S, M> {
    surface: S,
    motion: M,
    active: usize,
}

impl<S, M> CarouselController<S, M>
where
    S: CarouselSurface,
    M: MotionPreference,
{
    /// Attaches to `surface` and reads the initial active card from it.
    pub fn new(surface: S, motion: M) -> Self {
        let mut controller = Self {
            surface,
            motion,
            active: 0,
        };
        controller.on_scroll();
        controller
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn len(&self) -> usize {
        self.surface.cards().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Recomputes the active card from the current scroll position.
    pub fn on_scroll(&mut self) -> usize {
        let center = self.surface.scroll_left() + self.surface.client_width() / 2.0;
        let active = nearest_to_center(&self.surface.cards(), center).unwrap_or(0);
        if active != self.active {
            debug!(from = self.active, to = active, "carousel active card changed");
            self.active = active;
        }
        self.active
    }

    /// Centers the card after the active one. Returns the targeted index, or
    /// `None` when already at the last card.
    pub fn next(&self) -> Option<usize> {
        let count = self.len();
        if count == 0 || self.active + 1 >= count {
            return None;
        }
        self.center_on(self.active + 1)
    }

    /// Centers the card before the active one; `None` at the first card.
    pub fn prev(&self) -> Option<usize> {
        if self.active == 0 {
            return None;
        }
        let target = (self.active - 1).min(self.len().checked_sub(1)?);
        self.center_on(target)
    }

    /// Centers card `index`; out-of-range indices are ignored.
    pub fn go_to(&self, index: usize) -> Option<usize> {
        self.center_on(index)
    }

    pub fn on_key(&self, key: &str) -> Option<usize> {
        match CarouselKey::from_key(key)? {
            CarouselKey::Prev => self.prev(),
            CarouselKey::Next => self.next(),
        }
    }

    fn center_on(&self, index: usize) -> Option<usize> {
        let card = *self.surface.cards().get(index)?;
        let left = centered_scroll_left(card, self.surface.client_width());
        self.surface
            .scroll_to(left, ScrollBehavior::for_motion(&self.motion));
        Some(index)
    }
}
