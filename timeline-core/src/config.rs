//! Tunables for the exhibit; every field has a default matching the site.

use serde::{Deserialize, Serialize};

use crate::TimelineError;

/// Spring used to smooth the scroll progress indicator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Distance to target under which the spring may come to rest.
    pub rest_delta: f64,
    /// Speed under which the spring may come to rest.
    pub rest_speed: f64,
    /// Frames after the last target change at which the value snaps to the
    /// target regardless of the remaining motion.
    pub max_settle_frames: u32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 120.0,
            damping: 20.0,
            mass: 1.0,
            rest_delta: 0.001,
            rest_speed: 0.01,
            max_settle_frames: 120,
        }
    }
}

/// Where the timeline progress starts and ends, as fractions of the
/// viewport height.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProgressConfig {
    /// Progress is 0 while the region top is below this point.
    pub start_fraction: f64,
    /// Progress reaches 1 when the region bottom reaches this point.
    pub end_fraction: f64,
    pub spring: SpringConfig,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            start_fraction: 0.5,
            end_fraction: 0.9,
            spring: SpringConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExhibitConfig {
    pub progress: ProgressConfig,
    /// Margin around the viewport at which the next image is prefetched.
    pub prefetch_margin_px: f64,
    pub timeline_placeholder: String,
    pub case_placeholder: String,
    /// Whether clicking a timeline image opens the full-screen preview.
    pub lightbox: bool,
}

impl Default for ExhibitConfig {
    fn default() -> Self {
        Self {
            progress: ProgressConfig::default(),
            prefetch_margin_px: 200.0,
            timeline_placeholder: "/images/placeholder.jpg".to_string(),
            case_placeholder: "/images/cases/placeholder.jpg".to_string(),
            lightbox: true,
        }
    }
}

impl ExhibitConfig {
    pub fn validate(&self) -> Result<(), TimelineError> {
        let progress = &self.progress;
        for (name, value) in [
            ("start_fraction", progress.start_fraction),
            ("end_fraction", progress.end_fraction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TimelineError::Config(format!(
                    "{name} must lie in [0, 1], got {value}"
                )));
            }
        }

        let spring = &progress.spring;
        for (name, value) in [
            ("stiffness", spring.stiffness),
            ("damping", spring.damping),
            ("mass", spring.mass),
            ("rest_delta", spring.rest_delta),
            ("rest_speed", spring.rest_speed),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(TimelineError::Config(format!(
                    "spring {name} must be positive, got {value}"
                )));
            }
        }
        if spring.max_settle_frames == 0 {
            return Err(TimelineError::Config(
                "spring max_settle_frames must be at least 1".to_string(),
            ));
        }

        if !(self.prefetch_margin_px.is_finite() && self.prefetch_margin_px >= 0.0) {
            return Err(TimelineError::Config(format!(
                "prefetch_margin_px must be non-negative, got {}",
                self.prefetch_margin_px
            )));
        }

        for (name, path) in [
            ("timeline_placeholder", &self.timeline_placeholder),
            ("case_placeholder", &self.case_placeholder),
        ] {
            if path.trim().is_empty() {
                return Err(TimelineError::Config(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }
}
