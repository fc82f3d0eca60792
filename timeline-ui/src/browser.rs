#![cfg(target_arch = "wasm32")]

//! web-sys implementations of the host capabilities `timeline-core` asks for.

use gloo_timers::callback::Timeout;
use js_sys::Array;
use timeline_core::{
    CardBox, CarouselSurface, IntersectionSource, LayoutGeometry, MotionPreference,
    ScrollBehavior, Unsubscribe,
};
use wasm_bindgen::closure::WasmClosure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    console, AddEventListenerOptions, Element, Event, EventTarget, HtmlElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, ScrollToOptions,
};

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Frees a JS callback on a later task, since the callback being torn down
/// may be the one currently running.
fn release<T: ?Sized + WasmClosure>(closure: Closure<T>) {
    let _ = Timeout::new(0, move || drop(closure)).forget();
}

pub fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|window| window.match_media(REDUCED_MOTION_QUERY).ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false)
}

/// Reduced-motion preference read from the system on every query.
pub struct SystemMotion;

impl MotionPreference for SystemMotion {
    fn prefers_reduced_motion(&self) -> bool {
        prefers_reduced_motion()
    }
}

pub fn scroll_y() -> f64 {
    web_sys::window()
        .and_then(|window| window.scroll_y().ok())
        .unwrap_or(0.0)
}

/// Document-relative geometry of `region` and the current viewport height.
pub fn measure_region(region: &Element) -> Option<LayoutGeometry> {
    let window = web_sys::window()?;
    let rect = region.get_bounding_client_rect();
    let scroll_y = window.scroll_y().ok()?;
    let viewport_height = window.inner_height().ok()?.as_f64()?;
    Some(LayoutGeometry {
        region_top: rect.top() + scroll_y,
        region_height: rect.height(),
        viewport_height,
    })
}

/// Adds a passive listener; the handle removes it.
pub fn listen(
    target: &EventTarget,
    event: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Unsubscribe {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    if let Err(err) = target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &options,
    ) {
        console::error_1(&err);
        return Unsubscribe::noop();
    }

    let target = target.clone();
    Unsubscribe::new(move || {
        if let Err(err) =
            target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            console::error_1(&err);
        }
        release(closure);
    })
}

/// Runs `callback` with the frame timestamp (ms) on the next animation frame.
pub fn request_frame(callback: impl FnOnce(f64) + 'static) -> Unsubscribe {
    let Some(window) = web_sys::window() else {
        return Unsubscribe::noop();
    };
    let closure = Closure::once(callback);
    match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        Ok(id) => Unsubscribe::new(move || {
            if let Some(window) = web_sys::window() {
                if let Err(err) = window.cancel_animation_frame(id) {
                    console::error_1(&err);
                }
            }
            release(closure);
        }),
        Err(err) => {
            console::error_1(&err);
            Unsubscribe::noop()
        }
    }
}

/// Appends `<link rel="prefetch" as="image">` for `href`.
pub fn prefetch_image(href: &str) {
    if let Err(err) = append_prefetch_link(href) {
        console::error_1(&err);
    }
}

fn append_prefetch_link(href: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("No document available"))?;
    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document has no <head> element"))?;

    let link = document.create_element("link")?;
    link.set_attribute("rel", "prefetch")?;
    link.set_attribute("as", "image")?;
    link.set_attribute("href", href)?;
    head.append_child(&link)?;
    Ok(())
}

/// Intersection of one element with the viewport.
pub struct ElementIntersection {
    element: Element,
}

impl ElementIntersection {
    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

impl IntersectionSource for ElementIntersection {
    fn observe(&self, margin_px: f64, mut on_change: Box<dyn FnMut(bool)>) -> Unsubscribe {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                        on_change(entry.is_intersecting());
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_root_margin(&format!("{margin_px}px"));
        let observer =
            match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
                Ok(observer) => observer,
                Err(err) => {
                    console::error_1(&err);
                    return Unsubscribe::noop();
                }
            };
        observer.observe(&self.element);

        Unsubscribe::new(move || {
            observer.disconnect();
            release(callback);
        })
    }
}

/// The case-study strip as laid out in the DOM. Cards are the children
/// carrying `data-idx`, measured relative to the strip.
pub struct DomStrip {
    container: HtmlElement,
}

impl DomStrip {
    pub fn new(container: HtmlElement) -> Self {
        Self { container }
    }
}

impl CarouselSurface for DomStrip {
    fn scroll_left(&self) -> f64 {
        f64::from(self.container.scroll_left())
    }

    fn client_width(&self) -> f64 {
        f64::from(self.container.client_width())
    }

    fn cards(&self) -> Vec<CardBox> {
        let Ok(nodes) = self.container.query_selector_all("[data-idx]") else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .map(|card| {
                CardBox::new(
                    f64::from(card.offset_left()),
                    f64::from(card.client_width()),
                )
            })
            .collect()
    }

    fn scroll_to(&self, left: f64, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_left(left);
        options.set_behavior(match behavior {
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
        });
        self.container.scroll_to_with_scroll_to_options(&options);
    }
}
