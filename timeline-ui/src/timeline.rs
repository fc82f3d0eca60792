#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use timeline_core::{
    ExhibitConfig, FrameGate, OrderedView, ProgressTracker, TimelineCard, TimelineEntry,
    Unsubscribe,
};
use web_sys::{console, Element, HtmlElement};
use yew::prelude::*;

use crate::browser;
use crate::item::TimelineItem;

const FALLBACK_FRAME_SECS: f64 = 1.0 / 60.0;

/// Progress indicator driven from scroll events and animation frames,
/// outside Yew's render cycle.
struct ProgressLoop {
    tracker: ProgressTracker,
    gate: FrameGate,
    frame: Option<Unsubscribe>,
    last_timestamp: Option<f64>,
    fill: NodeRef,
}

impl ProgressLoop {
    fn apply_fill(&self, fill: f64) {
        if let Some(element) = self.fill.cast::<HtmlElement>() {
            if let Err(err) = element
                .style()
                .set_property("transform", &format!("translateX(-50%) scaleY({fill})"))
            {
                console::error_1(&err);
            }
        }
    }
}

/// Schedules the next smoothing frame unless one is already pending.
fn schedule_frame(state: &Rc<RefCell<ProgressLoop>>) {
    if !state.borrow_mut().gate.request() {
        return;
    }

    let next = Rc::clone(state);
    let handle = browser::request_frame(move |timestamp| {
        let settled = {
            let mut progress = next.borrow_mut();
            progress.gate.release();
            progress.frame = None;

            let dt = progress
                .last_timestamp
                .map_or(FALLBACK_FRAME_SECS, |last| (timestamp - last) / 1000.0);
            let fill = progress.tracker.tick(dt);
            progress.apply_fill(fill);

            let settled = progress.tracker.is_settled();
            progress.last_timestamp = if settled { None } else { Some(timestamp) };
            settled
        };
        if !settled {
            schedule_frame(&next);
        }
    });

    let mut progress = state.borrow_mut();
    if handle.is_active() {
        progress.frame = Some(handle);
    } else {
        progress.gate.release();
    }
}

fn measure(state: &Rc<RefCell<ProgressLoop>>, region: &NodeRef) {
    let Some(geometry) = region
        .cast::<Element>()
        .and_then(|element| browser::measure_region(&element))
    else {
        return;
    };
    {
        let mut progress = state.borrow_mut();
        progress.tracker.layout_settled(geometry);
        progress.tracker.on_scroll(browser::scroll_y());
    }
    schedule_frame(state);
}

#[derive(Properties, PartialEq)]
pub struct TimelineViewProps {
    pub entries: Vec<TimelineEntry>,
    pub config: ExhibitConfig,
    pub reduced_motion: bool,
}

#[function_component(TimelineView)]
pub fn timeline_view(props: &TimelineViewProps) -> Html {
    let region_ref = use_node_ref();
    let fill_ref = use_node_ref();

    let ordered = use_mut_ref(OrderedView::new);
    let generation = {
        let mut view = ordered.borrow_mut();
        view.get(&props.entries);
        view.generation()
    };
    let cards = use_memo((generation, props.config.clone()), move |(_, config)| {
        TimelineCard::build_all(ordered.borrow().current(), config)
    });

    {
        let region_ref = region_ref.clone();
        let fill_ref = fill_ref.clone();
        let progress_config = props.config.progress;
        let reduced_motion = props.reduced_motion;
        use_effect_with((progress_config, reduced_motion), move |_| {
            let state = Rc::new(RefCell::new(ProgressLoop {
                tracker: ProgressTracker::new(progress_config).with_reduced_motion(reduced_motion),
                gate: FrameGate::default(),
                frame: None,
                last_timestamp: None,
                fill: fill_ref,
            }));

            // Geometry is read two frames out, once layout and first paint
            // are done.
            let layout = {
                let state = Rc::clone(&state);
                let region_ref = region_ref.clone();
                let pending: Rc<RefCell<Option<Unsubscribe>>> = Rc::default();
                let second = Rc::clone(&pending);
                let first = browser::request_frame(move |_| {
                    let handle = browser::request_frame(move |_| measure(&state, &region_ref));
                    *second.borrow_mut() = Some(handle);
                });
                Unsubscribe::new(move || {
                    drop(first);
                    pending.borrow_mut().take();
                })
            };

            let listeners = match web_sys::window() {
                Some(window) => {
                    let on_scroll = {
                        let state = Rc::clone(&state);
                        browser::listen(&window, "scroll", move |_| {
                            state.borrow_mut().tracker.on_scroll(browser::scroll_y());
                            schedule_frame(&state);
                        })
                    };
                    let on_resize = {
                        let state = Rc::clone(&state);
                        let region_ref = region_ref.clone();
                        browser::listen(&window, "resize", move |_| measure(&state, &region_ref))
                    };
                    vec![on_scroll, on_resize]
                }
                None => Vec::new(),
            };

            move || {
                drop(layout);
                drop(listeners);
                state.borrow_mut().frame.take();
            }
        });
    }

    let margin = props.config.prefetch_margin_px;
    let lightbox = props.config.lightbox;
    let reduced_motion = props.reduced_motion;

    html! {
        <section ref={region_ref} class="timeline-section" aria-label="Engineering timeline">
            <header class="section-header">
                <h2>{"Orígenes de la ingeniería de software"}</h2>
                <p>{"¿Cómo surge la ingeniería de software? ¿Quién propone el ciclo de desarrollo de software? ¿Cómo ha cambiado a lo largo de los años?"}</p>
            </header>
            <div class="timeline-track">
                <div class="timeline-axis" aria-hidden="true" />
                <div ref={fill_ref} class="timeline-progress" aria-hidden="true" />
                <ol class="timeline-list">
                    {
                        for cards.iter().map(|card| html! {
                            <TimelineItem
                                key={card.key.clone()}
                                card={card.clone()}
                                reduced_motion={reduced_motion}
                                lightbox={lightbox}
                                prefetch_margin_px={margin}
                            />
                        })
                    }
                </ol>
            </div>
        </section>
    }
}
