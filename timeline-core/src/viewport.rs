//! Host capabilities the components consume, and the subscription model
//! for observer callbacks.
//!
//! Browser state (intersection, reduced-motion preference, animation
//! frames) is reached only through these types so the logic runs the same
//! under a real page and under tests.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Teardown handle returned by every subscription.
///
/// Runs its teardown exactly once: on [`Unsubscribe::unsubscribe`] or when
/// dropped, whichever comes first.
#[must_use = "dropping the handle ends the subscription"]
pub struct Unsubscribe {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Unsubscribe {
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// Handle for a subscription that never started.
    pub fn noop() -> Self {
        Self { teardown: None }
    }

    pub fn unsubscribe(mut self) {
        self.run();
    }

    pub fn is_active(&self) -> bool {
        self.teardown.is_some()
    }

    fn run(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for Unsubscribe {
    fn drop(&mut self) {
        self.run();
    }
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unsubscribe")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Reports whether an element intersects the viewport grown by a margin.
pub trait IntersectionSource {
    fn observe(&self, margin_px: f64, on_change: Box<dyn FnMut(bool)>) -> Unsubscribe;
}

/// The user's reduced-motion preference.
pub trait MotionPreference {
    fn prefers_reduced_motion(&self) -> bool;
}

impl MotionPreference for bool {
    fn prefers_reduced_motion(&self) -> bool {
        *self
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

impl ScrollBehavior {
    pub fn for_motion<M: MotionPreference + ?Sized>(motion: &M) -> Self {
        if motion.prefers_reduced_motion() {
            ScrollBehavior::Instant
        } else {
            ScrollBehavior::Smooth
        }
    }
}

/// Coalesces bursts of events into one callback per animation frame.
#[derive(Debug, Default)]
pub struct FrameGate {
    pending: bool,
}

impl FrameGate {
    /// True when the caller should schedule a frame; false while one is
    /// already scheduled.
    pub fn request(&mut self) -> bool {
        !std::mem::replace(&mut self.pending, true)
    }

    /// Marks the scheduled frame as run.
    pub fn release(&mut self) {
        self.pending = false;
    }
}

/// One-shot trigger for the next card's prefetch hint.
#[derive(Debug, Clone, Default)]
pub struct PrefetchOnce {
    href: Option<String>,
    fired: bool,
}

impl PrefetchOnce {
    pub fn new(href: Option<String>) -> Self {
        Self { href, fired: false }
    }

    /// Returns the path to prefetch on the first intersection, and nothing
    /// ever after.
    pub fn on_intersection(&mut self, intersecting: bool) -> Option<&str> {
        if self.fired || !intersecting {
            return None;
        }
        self.fired = true;
        self.href.as_deref()
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

/// Observes a card through `source` and emits `hint` once, the first time
/// it comes within `margin_px` of the viewport. The observation is dropped
/// right after firing; the returned handle tears it down earlier if the card
/// goes away first.
pub fn watch_prefetch<S>(
    source: &S,
    href: Option<String>,
    margin_px: f64,
    mut hint: impl FnMut(&str) + 'static,
) -> Unsubscribe
where
    S: IntersectionSource + ?Sized,
{
    if href.is_none() {
        return Unsubscribe::noop();
    }

    let mut trigger = PrefetchOnce::new(href);
    let handle: Rc<RefCell<Option<Unsubscribe>>> = Rc::default();
    let fired = Rc::new(Cell::new(false));

    let slot = Rc::clone(&handle);
    let fired_flag = Rc::clone(&fired);
    let subscription = source.observe(
        margin_px,
        Box::new(move |intersecting| {
            let Some(href) = trigger.on_intersection(intersecting) else {
                return;
            };
            debug!(href, "prefetch hint");
            hint(href);
            fired_flag.set(true);
            let taken = slot.try_borrow_mut().ok().and_then(|mut slot| slot.take());
            if let Some(subscription) = taken {
                subscription.unsubscribe();
            }
        }),
    );

    // The source may report an intersection synchronously while observing.
    if fired.get() {
        subscription.unsubscribe();
        return Unsubscribe::noop();
    }

    *handle.borrow_mut() = Some(subscription);
    Unsubscribe::new(move || {
        let taken = handle.borrow_mut().take();
        if let Some(subscription) = taken {
            subscription.unsubscribe();
        }
    })
}
