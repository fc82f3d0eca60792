//! Framework-neutral WASM <-> JavaScript bridge.
//!
//! Hosts that render with their own UI library call into the same ordering,
//! image and scroll logic the Yew components use.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_wasm_bindgen::{from_value, to_value};
use timeline_core::{
    order, CardBox, CarouselController, CarouselSurface, ExhibitConfig, ImageFormat,
    ImageSource, LayoutGeometry, MotionPreference, ProgressTracker, ScrollBehavior,
    TimelineCard, TimelineError,
};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
struct JsExhibitConfig {
    #[serde(default)]
    start_fraction: Option<f64>,
    #[serde(default)]
    end_fraction: Option<f64>,
    #[serde(default)]
    stiffness: Option<f64>,
    #[serde(default)]
    damping: Option<f64>,
    #[serde(default)]
    prefetch_margin_px: Option<f64>,
    #[serde(default)]
    timeline_placeholder: Option<String>,
    #[serde(default)]
    case_placeholder: Option<String>,
    #[serde(default)]
    lightbox: Option<bool>,
}

impl From<JsExhibitConfig> for ExhibitConfig {
    fn from(cfg: JsExhibitConfig) -> Self {
        let mut base = ExhibitConfig::default();
        if let Some(fraction) = cfg.start_fraction {
            base.progress.start_fraction = fraction;
        }
        if let Some(fraction) = cfg.end_fraction {
            base.progress.end_fraction = fraction;
        }
        if let Some(stiffness) = cfg.stiffness {
            base.progress.spring.stiffness = stiffness;
        }
        if let Some(damping) = cfg.damping {
            base.progress.spring.damping = damping;
        }
        if let Some(margin) = cfg.prefetch_margin_px {
            base.prefetch_margin_px = margin;
        }
        if let Some(path) = cfg.timeline_placeholder {
            base.timeline_placeholder = path;
        }
        if let Some(path) = cfg.case_placeholder {
            base.case_placeholder = path;
        }
        if let Some(lightbox) = cfg.lightbox {
            base.lightbox = lightbox;
        }
        base
    }
}

fn read_config(config: Option<JsValue>) -> Result<ExhibitConfig, JsValue> {
    let cfg = match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            let cfg: JsExhibitConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Could not read config: {err}")))?;
            ExhibitConfig::from(cfg)
        }
        _ => ExhibitConfig::default(),
    };
    cfg.validate()
        .map_err(|err| JsValue::from_str(&format_timeline_error(err)))?;
    Ok(cfg)
}

fn read_json(value: JsValue, what: &str) -> Result<serde_json::Value, JsValue> {
    from_value::<serde_json::Value>(value)
        .map_err(|err| JsValue::from_str(&format!("Could not read {what} JSON: {err}")))
}

fn format_timeline_error(err: TimelineError) -> String {
    format!("Timeline error: {err}")
}

/// Month ordinal (1-12) of an English or Spanish label, 0 when unknown.
#[wasm_bindgen]
pub fn month_index(label: Option<String>) -> u8 {
    timeline_core::month_index(label.as_deref())
}

/// Timeline entries sorted by year and month.
#[wasm_bindgen]
pub fn order_timeline(entries: JsValue) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let document = read_json(entries, "timeline")?;
    let entries = timeline_data::load_timeline_value(&document)
        .map_err(|err| JsValue::from_str(&format_timeline_error(err)))?;

    to_value(&order(&entries))
        .map_err(|err| JsValue::from_str(&format!("Could not serialize timeline: {err}")))
}

/// Candidate paths for an image, most preferred first.
#[wasm_bindgen]
pub fn image_candidates(
    image_path: Option<String>,
    placeholder: Option<String>,
) -> Result<JsValue, JsValue> {
    let placeholder =
        placeholder.unwrap_or_else(|| ExhibitConfig::default().timeline_placeholder);
    let source = ImageSource::resolve(image_path.as_deref(), &placeholder);
    to_value(&source.sources())
        .map_err(|err| JsValue::from_str(&format!("Could not serialize candidates: {err}")))
}

/// The single path to load for hosts that cannot use `<picture>` (canvas,
/// CSS backgrounds), given which formats the host can decode.
#[wasm_bindgen]
pub fn preferred_image(
    image_path: Option<String>,
    placeholder: Option<String>,
    supports_avif: bool,
    supports_webp: bool,
) -> String {
    let placeholder =
        placeholder.unwrap_or_else(|| ExhibitConfig::default().timeline_placeholder);
    ImageSource::resolve(image_path.as_deref(), &placeholder)
        .select(|format| match format {
            ImageFormat::Avif => supports_avif,
            ImageFormat::Webp => supports_webp,
            _ => true,
        })
        .to_string()
}

/// Both documents loaded, with the timeline ordered.
#[wasm_bindgen]
pub fn load_exhibit(timeline: JsValue, cases: JsValue) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let timeline = read_json(timeline, "timeline")?;
    let cases = read_json(cases, "case studies")?;
    let exhibit = timeline_data::load_exhibit_value(&timeline, &cases)
        .map_err(|err| JsValue::from_str(&format_timeline_error(err)))?;

    to_value(&exhibit)
        .map_err(|err| JsValue::from_str(&format!("Could not serialize exhibit: {err}")))
}

/// Render-ready cards (side, priority, image candidates, prefetch target)
/// for the ordered timeline.
#[wasm_bindgen]
pub fn timeline_cards(entries: JsValue, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    let config = read_config(config)?;
    let document = read_json(entries, "timeline")?;
    let entries = timeline_data::load_timeline_value(&document)
        .map_err(|err| JsValue::from_str(&format_timeline_error(err)))?;

    to_value(&TimelineCard::build_all(&order(&entries), &config))
        .map_err(|err| JsValue::from_str(&format!("Could not serialize cards: {err}")))
}

/// Smoothed scroll progress for a host-driven animation loop.
#[wasm_bindgen]
pub struct ProgressSpring {
    tracker: ProgressTracker,
}

#[wasm_bindgen]
impl ProgressSpring {
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<JsValue>, reduced_motion: bool) -> Result<ProgressSpring, JsValue> {
        let config = read_config(config)?;
        Ok(Self {
            tracker: ProgressTracker::new(config.progress).with_reduced_motion(reduced_motion),
        })
    }

    /// Call once layout has settled (after first paint) and after resizes.
    pub fn layout_settled(&mut self, region_top: f64, region_height: f64, viewport_height: f64) {
        self.tracker.layout_settled(LayoutGeometry {
            region_top,
            region_height,
            viewport_height,
        });
    }

    pub fn on_scroll(&mut self, scroll_y: f64) {
        self.tracker.on_scroll(scroll_y);
    }

    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        self.tracker.set_reduced_motion(reduced_motion);
    }

    /// Advances one frame; `dt` is in seconds.
    pub fn tick(&mut self, dt: f64) -> f64 {
        self.tracker.tick(dt)
    }

    pub fn value(&self) -> f64 {
        self.tracker.value()
    }

    pub fn raw(&self) -> f64 {
        self.tracker.raw()
    }

    pub fn is_settled(&self) -> bool {
        self.tracker.is_settled()
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
struct ScrollRequest {
    index: usize,
    left: f64,
    behavior: ScrollBehavior,
}

/// Strip geometry as last reported by the host.
#[derive(Default)]
struct HostStrip {
    cards: RefCell<Vec<CardBox>>,
    scroll_left: Cell<f64>,
    client_width: Cell<f64>,
    request: Cell<Option<(f64, ScrollBehavior)>>,
}

impl CarouselSurface for HostStrip {
    fn scroll_left(&self) -> f64 {
        self.scroll_left.get()
    }

    fn client_width(&self) -> f64 {
        self.client_width.get()
    }

    fn cards(&self) -> Vec<CardBox> {
        self.cards.borrow().clone()
    }

    fn scroll_to(&self, left: f64, behavior: ScrollBehavior) {
        self.request.set(Some((left, behavior)));
    }
}

struct HostMotion(Rc<Cell<bool>>);

impl MotionPreference for HostMotion {
    fn prefers_reduced_motion(&self) -> bool {
        self.0.get()
    }
}

/// Carousel state for a host-rendered strip. Navigation returns
/// `{ index, left, behavior }` for the host to apply, or `undefined` at the
/// ends.
#[wasm_bindgen]
pub struct CarouselEngine {
    reduced_motion: Rc<Cell<bool>>,
    controller: CarouselController<HostStrip, HostMotion>,
}

#[wasm_bindgen]
impl CarouselEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(reduced_motion: bool) -> CarouselEngine {
        let motion = Rc::new(Cell::new(reduced_motion));
        let controller =
            CarouselController::new(HostStrip::default(), HostMotion(Rc::clone(&motion)));
        Self {
            reduced_motion: motion,
            controller,
        }
    }

    /// Card offsets and widths in display order; both slices must have the
    /// same length.
    pub fn set_cards(&mut self, lefts: Vec<f64>, widths: Vec<f64>) -> Result<(), JsValue> {
        if lefts.len() != widths.len() {
            return Err(JsValue::from_str("lefts and widths must have the same length"));
        }
        *self.strip().cards.borrow_mut() = lefts
            .into_iter()
            .zip(widths)
            .map(|(left, width)| CardBox::new(left, width))
            .collect();
        Ok(())
    }

    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        self.reduced_motion.set(reduced_motion);
    }

    /// Records the container's scroll position and returns the active card.
    pub fn on_scroll(&mut self, scroll_left: f64, client_width: f64) -> usize {
        self.strip().scroll_left.set(scroll_left);
        self.strip().client_width.set(client_width);
        self.controller.on_scroll()
    }

    pub fn active_index(&self) -> usize {
        self.controller.active_index()
    }

    pub fn next(&self) -> Result<JsValue, JsValue> {
        let target = self.controller.next();
        self.take_request(target)
    }

    pub fn prev(&self) -> Result<JsValue, JsValue> {
        let target = self.controller.prev();
        self.take_request(target)
    }

    pub fn go_to(&self, index: usize) -> Result<JsValue, JsValue> {
        let target = self.controller.go_to(index);
        self.take_request(target)
    }

    pub fn on_key(&self, key: &str) -> Result<JsValue, JsValue> {
        let target = self.controller.on_key(key);
        self.take_request(target)
    }

    fn strip(&self) -> &HostStrip {
        self.controller.surface()
    }

    fn take_request(&self, target: Option<usize>) -> Result<JsValue, JsValue> {
        let requested = self.strip().request.take();
        let (Some(index), Some((left, behavior))) = (target, requested) else {
            return Ok(JsValue::UNDEFINED);
        };
        to_value(&ScrollRequest {
            index,
            left,
            behavior,
        })
        .map_err(|err| JsValue::from_str(&format!("Could not serialize scroll request: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_js_config_overrides_only_given_fields() {
        let js: JsExhibitConfig =
            serde_json::from_str(r#"{ "end_fraction": 0.75, "lightbox": false }"#)
                .expect("valid config");
        let config = ExhibitConfig::from(js);

        assert_eq!(config.progress.end_fraction, 0.75);
        assert_eq!(config.progress.start_fraction, 0.5);
        assert!(!config.lightbox);
        assert_eq!(config.prefetch_margin_px, 200.0);
    }

    #[test]
    fn preferred_image_skips_formats_the_host_cannot_decode() {
        let path = Some("/img/eniac.png".to_string());
        assert_eq!(preferred_image(path.clone(), None, true, true), "/img/eniac.avif");
        assert_eq!(preferred_image(path.clone(), None, false, true), "/img/eniac.webp");
        assert_eq!(preferred_image(path, None, false, false), "/img/eniac.png");
        assert_eq!(preferred_image(None, None, true, true), "/images/placeholder.jpg");
    }

    #[test]
    fn host_strip_reports_the_centred_card() {
        let strip = HostStrip::default();
        *strip.cards.borrow_mut() = vec![CardBox::new(0.0, 200.0), CardBox::new(220.0, 200.0)];
        strip.client_width.set(300.0);
        strip.scroll_left.set(170.0);

        let controller = CarouselController::new(strip, false);
        assert_eq!(controller.active_index(), 1);
        assert_eq!(controller.prev(), Some(0));
        assert_eq!(
            controller.surface().request.get(),
            Some((-50.0, ScrollBehavior::Smooth))
        );
    }
}
