//! Scroll progress through the timeline region, smoothed for the indicator.

use serde::{Deserialize, Serialize};

use crate::config::{ProgressConfig, SpringConfig};

/// Longest integration step; larger frame deltas are split.
const MAX_SUBSTEP_SECS: f64 = 1.0 / 240.0;
/// Frame deltas above this (a backgrounded tab) are treated as this long.
const MAX_FRAME_SECS: f64 = 0.1;

/// Layout measurements of the timeline region, in document pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LayoutGeometry {
    /// Top edge of the region relative to the document.
    pub region_top: f64,
    pub region_height: f64,
    pub viewport_height: f64,
}

/// Scroll offsets at which progress is 0 and 1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScrollRange {
    pub start: f64,
    pub end: f64,
}

impl ScrollRange {
    /// Start is where the region top meets `start_fraction` of the viewport,
    /// end is where the region bottom meets `end_fraction` of it.
    pub fn from_layout(geometry: &LayoutGeometry, config: &ProgressConfig) -> Self {
        let viewport = geometry.viewport_height;
        let region_bottom = geometry.region_top + geometry.region_height;
        Self {
            start: geometry.region_top - config.start_fraction * viewport,
            end: region_bottom - config.end_fraction * viewport,
        }
    }

    /// Unsmoothed progress in `[0, 1]` at vertical scroll offset `scroll_y`.
    pub fn progress_at(&self, scroll_y: f64) -> f64 {
        let span = self.end - self.start;
        if span <= f64::EPSILON {
            return if scroll_y >= self.start { 1.0 } else { 0.0 };
        }
        ((scroll_y - self.start) / span).clamp(0.0, 1.0)
    }
}

/// Damped spring following a moving target.
///
/// Integrated with semi-implicit Euler in fixed substeps. The spring comes to
/// rest once both distance and speed drop under the configured thresholds,
/// and in any case `max_settle_frames` frames after the last retarget.
#[derive(Debug, Clone)]
pub struct Spring {
    config: SpringConfig,
    value: f64,
    velocity: f64,
    target: f64,
    frames_since_retarget: u32,
}

impl Spring {
    pub fn new(config: SpringConfig, initial: f64) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
            frames_since_retarget: 0,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn is_at_rest(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    pub fn set_target(&mut self, target: f64) {
        if target != self.target {
            self.target = target;
            self.frames_since_retarget = 0;
        }
    }

    /// Moves straight to `value` with no animation.
    pub fn jump_to(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
        self.frames_since_retarget = 0;
    }

    /// Advances one frame of `dt_secs` seconds and returns the new value.
    pub fn step(&mut self, dt_secs: f64) -> f64 {
        if self.is_at_rest() || !(dt_secs.is_finite() && dt_secs > 0.0) {
            return self.value;
        }

        let dt = dt_secs.min(MAX_FRAME_SECS);
        let substeps = (dt / MAX_SUBSTEP_SECS).ceil().max(1.0) as u32;
        let h = dt / f64::from(substeps);
        let SpringConfig {
            stiffness,
            damping,
            mass,
            ..
        } = self.config;

        for _ in 0..substeps {
            let displacement = self.value - self.target;
            let acceleration = (-stiffness * displacement - damping * self.velocity) / mass;
            self.velocity += acceleration * h;
            self.value += self.velocity * h;
        }
        self.frames_since_retarget = self.frames_since_retarget.saturating_add(1);

        let resting = (self.value - self.target).abs() < self.config.rest_delta
            && self.velocity.abs() < self.config.rest_speed;
        if resting || self.frames_since_retarget >= self.config.max_settle_frames {
            self.value = self.target;
            self.velocity = 0.0;
        }
        self.value
    }
}

/// Tracks how far the page has been scrolled through the timeline region.
///
/// Geometry is only read once the host reports a settled layout; scroll
/// offsets seen before that are remembered and applied at that point.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    config: ProgressConfig,
    range: Option<ScrollRange>,
    scroll_y: Option<f64>,
    spring: Spring,
    reduced_motion: bool,
}

impl ProgressTracker {
    pub fn new(config: ProgressConfig) -> Self {
        Self {
            spring: Spring::new(config.spring, 0.0),
            config,
            range: None,
            scroll_y: None,
            reduced_motion: false,
        }
    }

    /// With reduced motion the indicator follows scrolling without smoothing.
    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        self.reduced_motion = reduced_motion;
        self.retarget();
    }

    /// Records settled layout. Call after layout and paint, and again after
    /// every resize.
    pub fn layout_settled(&mut self, geometry: LayoutGeometry) {
        self.range = Some(ScrollRange::from_layout(&geometry, &self.config));
        self.retarget();
    }

    pub fn is_ready(&self) -> bool {
        self.range.is_some()
    }

    pub fn range(&self) -> Option<ScrollRange> {
        self.range
    }

    pub fn on_scroll(&mut self, scroll_y: f64) {
        self.scroll_y = Some(scroll_y);
        self.retarget();
    }

    /// Unsmoothed progress; 0 until layout has settled.
    pub fn raw(&self) -> f64 {
        match (self.range, self.scroll_y) {
            (Some(range), Some(scroll_y)) => range.progress_at(scroll_y),
            _ => 0.0,
        }
    }

    /// Advances the smoothing by one frame and returns the indicator fill.
    pub fn tick(&mut self, dt_secs: f64) -> f64 {
        self.spring.step(dt_secs).clamp(0.0, 1.0)
    }

    /// Current indicator fill in `[0, 1]`.
    pub fn value(&self) -> f64 {
        self.spring.value().clamp(0.0, 1.0)
    }

    /// True when no more frames are needed until the next scroll or resize.
    pub fn is_settled(&self) -> bool {
        self.spring.is_at_rest()
    }

    fn retarget(&mut self) {
        if self.range.is_none() || self.scroll_y.is_none() {
            return;
        }
        let target = self.raw();
        if self.reduced_motion {
            self.spring.jump_to(target);
        } else {
            self.spring.set_target(target);
        }
    }
}
