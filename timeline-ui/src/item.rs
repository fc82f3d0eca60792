#![cfg(target_arch = "wasm32")]

use std::rc::Rc;

use timeline_core::{
    watch_prefetch, CardEvent, CardState, MediaStage, PreviewState, TimelineCard, Unsubscribe,
};
use wasm_bindgen::JsCast;
use web_sys::{console, Element, HtmlElement, HtmlImageElement, KeyboardEvent};
use yew::prelude::*;
use yew::TargetCast;

use crate::browser::{self, ElementIntersection};

/// Card state behind a Yew reducer; `CardState::apply` is the only way it
/// changes.
#[derive(Debug, Default, PartialEq)]
struct CardModel(CardState);

impl Reducible for CardModel {
    type Action = CardEvent;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = self.0.apply(action);
        if next == self.0 {
            self
        } else {
            Rc::new(CardModel(next))
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct TimelineItemProps {
    pub card: TimelineCard,
    pub reduced_motion: bool,
    pub lightbox: bool,
    pub prefetch_margin_px: f64,
}

#[function_component(TimelineItem)]
pub fn timeline_item(props: &TimelineItemProps) -> Html {
    let card = &props.card;
    let entry = &card.entry;
    let state = use_reducer(CardModel::default);
    let media_ref = use_node_ref();
    let img_ref = use_node_ref();
    let close_ref = use_node_ref();

    // The image may finish decoding before the load listener is attached.
    {
        let img_ref = img_ref.clone();
        let dispatcher = state.dispatcher();
        use_effect_with((), move |_| {
            if let Some(img) = img_ref.cast::<HtmlImageElement>() {
                if img.complete() && img.natural_width() > 0 {
                    dispatcher.dispatch(CardEvent::ImageDecoded);
                }
            }
            || ()
        });
    }

    {
        let media_ref = media_ref.clone();
        let margin = props.prefetch_margin_px;
        use_effect_with(card.prefetch.clone(), move |prefetch| {
            let handle = match media_ref.cast::<Element>() {
                Some(element) => watch_prefetch(
                    &ElementIntersection::new(element),
                    prefetch.clone(),
                    margin,
                    browser::prefetch_image,
                ),
                None => Unsubscribe::noop(),
            };
            move || drop(handle)
        });
    }

    let is_open = state.0.is_open();
    {
        let dispatcher = state.dispatcher();
        let close_ref = close_ref.clone();
        let media_ref = media_ref.clone();
        use_effect_with(is_open, move |&is_open| {
            let handle = if is_open {
                if let Some(button) = close_ref.cast::<HtmlElement>() {
                    if let Err(err) = button.focus() {
                        console::error_1(&err);
                    }
                }
                match web_sys::window() {
                    Some(window) => browser::listen(&window, "keydown", move |event| {
                        if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                            let key = event.key();
                            if let Some(action) = CardEvent::for_key(&key, PreviewState::Open) {
                                dispatcher.dispatch(action);
                            }
                        }
                    }),
                    None => Unsubscribe::noop(),
                }
            } else {
                Unsubscribe::noop()
            };
            move || {
                drop(handle);
                if is_open {
                    if let Some(media) = media_ref.cast::<HtmlElement>() {
                        if let Err(err) = media.focus() {
                            console::error_1(&err);
                        }
                    }
                }
            }
        });
    }

    let on_load = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_: Event| dispatcher.dispatch(CardEvent::ImageDecoded))
    };
    let on_error = {
        let dispatcher = state.dispatcher();
        let image = card.image.clone();
        let stage = state.0.media;
        Callback::from(move |event: Event| {
            let failed = event
                .target_dyn_into::<HtmlImageElement>()
                .map(|img| img.current_src())
                .unwrap_or_default();
            dispatcher.dispatch(CardEvent::for_image_error(&image, &failed, stage));
        })
    };
    let on_open = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(CardEvent::PreviewRequested))
    };
    let on_media_key = {
        let dispatcher = state.dispatcher();
        let preview = state.0.preview;
        Callback::from(move |event: KeyboardEvent| {
            if let Some(action) = CardEvent::for_key(&event.key(), preview) {
                event.prevent_default();
                dispatcher.dispatch(action);
            }
        })
    };
    let on_close = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(CardEvent::PreviewDismissed))
    };

    let animated = (!props.reduced_motion).then_some("is-animated");
    let side_class = if card.side.is_left() { "is-left" } else { "is-right" };
    let media_class = classes!("card-media", state.0.is_loaded().then_some("is-loaded"));
    let picture = render_picture(card, state.0.media, img_ref, on_load, on_error);

    let media = if props.lightbox {
        html! {
            <div
                ref={media_ref}
                class={media_class}
                role="button"
                tabindex="0"
                aria-label={format!("Open image: {}", entry.title)}
                onclick={on_open}
                onkeydown={on_media_key}
            >
                { picture }
                <div class="card-placeholder" aria-hidden="true" />
            </div>
        }
    } else {
        html! {
            <div ref={media_ref} class={media_class}>
                { picture }
                <div class="card-placeholder" aria-hidden="true" />
            </div>
        }
    };

    html! {
        <li class="timeline-item">
            <span class={classes!("timeline-dot", animated)} aria-hidden="true" />
            <article class={classes!("timeline-card", side_class, animated)}>
                { media }
                <div class="card-body">
                    <time class="card-date" datetime={card.datetime.clone()} aria-label={card.date_label.clone()}>
                        <span class="card-month">{ entry.date.month_label().to_string() }</span>
                        <span class="card-year">{ entry.date.year_label() }</span>
                    </time>
                    {
                        if entry.title.is_empty() {
                            html! {}
                        } else {
                            html! { <h3 class="card-title">{ entry.title.clone() }</h3> }
                        }
                    }
                    { entry.subtitle.as_deref().map(render_subtitle).unwrap_or_default() }
                    <p class="card-resume">{ entry.resume.clone() }</p>
                </div>
            </article>
            {
                if is_open {
                    html! {
                        <div class="lightbox" role="dialog" aria-modal="true" aria-label={entry.title.clone()}>
                            <img src={card.image.original.clone()} alt={entry.title.clone()} decoding="async" />
                            <button
                                ref={close_ref}
                                type="button"
                                class="lightbox-close"
                                aria-label="Close preview"
                                onclick={on_close}
                            >
                                <span aria-hidden="true">{"×"}</span>
                            </button>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </li>
    }
}

fn render_picture(
    card: &TimelineCard,
    stage: MediaStage,
    img_ref: NodeRef,
    on_load: Callback<Event>,
    on_error: Callback<Event>,
) -> Html {
    let image = card.image.for_stage(stage);
    // Keyed by stage so the browser picks a source again after a fallback.
    html! {
        <picture key={format!("{stage:?}")}>
            {
                for image.alternates().iter().map(|candidate| html! {
                    <source srcset={candidate.src.clone()} type={candidate.format.mime()} />
                })
            }
            <img
                ref={img_ref}
                src={image.original.clone()}
                alt={card.entry.title.clone()}
                loading={card.priority.loading_attr()}
                fetchpriority={card.priority.fetch_priority_attr()}
                decoding="async"
                width="1280"
                height="720"
                sizes="(min-width: 1024px) 520px, (min-width: 768px) 50vw, 100vw"
                onload={on_load}
                onerror={on_error}
            />
        </picture>
    }
}

fn render_subtitle(subtitle: &str) -> Html {
    html! { <p class="card-subtitle">{ subtitle.to_string() }</p> }
}
