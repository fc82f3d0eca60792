#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use timeline_core::{CarouselController, CaseCard, FrameGate, MediaStage, Unsubscribe};
use web_sys::{HtmlElement, HtmlImageElement, KeyboardEvent};
use yew::prelude::*;
use yew::TargetCast;

use crate::browser::{self, DomStrip, SystemMotion};

type Controller = CarouselController<DomStrip, SystemMotion>;

/// Controller plus the frame gate that coalesces scroll events.
#[derive(Default)]
struct CarouselHandle {
    controller: Option<Controller>,
    gate: FrameGate,
    frame: Option<Unsubscribe>,
}

fn navigate(
    handle: &Rc<RefCell<CarouselHandle>>,
    step: impl FnOnce(&Controller) -> Option<usize>,
) {
    if let Some(controller) = handle.borrow().controller.as_ref() {
        step(controller);
    }
}

#[derive(Properties, PartialEq)]
pub struct CaseStudiesProps {
    pub cards: Vec<CaseCard>,
    pub reduced_motion: bool,
}

#[function_component(CaseStudies)]
pub fn case_studies(props: &CaseStudiesProps) -> Html {
    let strip_ref = use_node_ref();
    let active = use_state_eq(|| 0usize);
    let handle = use_mut_ref(CarouselHandle::default);

    {
        let strip_ref = strip_ref.clone();
        let active = active.clone();
        let handle = handle.clone();
        use_effect_with(props.cards.len(), move |_| {
            let listener = match strip_ref.cast::<HtmlElement>() {
                Some(element) => {
                    let controller =
                        CarouselController::new(DomStrip::new(element.clone()), SystemMotion);
                    active.set(controller.active_index());
                    handle.borrow_mut().controller = Some(controller);

                    let handle = handle.clone();
                    browser::listen(&element, "scroll", move |_| {
                        if !handle.borrow_mut().gate.request() {
                            return;
                        }
                        let frame_handle = handle.clone();
                        let active = active.clone();
                        let frame = browser::request_frame(move |_| {
                            let mut carousel = frame_handle.borrow_mut();
                            carousel.gate.release();
                            carousel.frame = None;
                            if let Some(controller) = carousel.controller.as_mut() {
                                active.set(controller.on_scroll());
                            }
                        });
                        let mut carousel = handle.borrow_mut();
                        if frame.is_active() {
                            carousel.frame = Some(frame);
                        } else {
                            carousel.gate.release();
                        }
                    })
                }
                None => Unsubscribe::noop(),
            };

            move || {
                drop(listener);
                let mut carousel = handle.borrow_mut();
                carousel.frame = None;
                carousel.gate.release();
                carousel.controller = None;
            }
        });
    }

    let on_prev = {
        let handle = handle.clone();
        Callback::from(move |_: MouseEvent| navigate(&handle, Controller::prev))
    };
    let on_next = {
        let handle = handle.clone();
        Callback::from(move |_: MouseEvent| navigate(&handle, Controller::next))
    };
    let on_key = {
        let handle = handle.clone();
        Callback::from(move |event: KeyboardEvent| {
            let key = event.key();
            navigate(&handle, |controller| controller.on_key(&key));
        })
    };

    let animated = (!props.reduced_motion).then_some("is-animated");

    html! {
        <section id="case-studies" class="cases-section" aria-label="Casos de estudio del ciclo de desarrollo de software">
            <header class="section-header">
                <h2>{"Casos de estudio: Ciclo de desarrollo de software"}</h2>
                <p>{"Comparativa visual de enfoques organizacionales y de ingeniería."}</p>
            </header>

            <div class="cases-nav">
                <button type="button" aria-label="Anterior" onclick={on_prev}>
                    <span aria-hidden="true">{"←"}</span>
                </button>
                <button type="button" aria-label="Siguiente" onclick={on_next}>
                    <span aria-hidden="true">{"→"}</span>
                </button>
            </div>

            <div
                ref={strip_ref}
                class="cases-strip"
                role="region"
                aria-roledescription="carrusel"
                aria-label="Carrusel de casos"
                tabindex="0"
                onkeydown={on_key}
            >
                {
                    for props.cards.iter().map(|card| html! {
                        <CaseSlide key={card.key.clone()} card={card.clone()} animated={animated} />
                    })
                }
            </div>

            <div class="cases-dots">
                {
                    for (0..props.cards.len()).map(|index| {
                        let handle = handle.clone();
                        let onclick = Callback::from(move |_: MouseEvent| {
                            navigate(&handle, |controller| controller.go_to(index));
                        });
                        html! {
                            <button
                                type="button"
                                class={classes!("cases-dot", (*active == index).then_some("is-active"))}
                                aria-label={format!("Ir al caso {}", index + 1)}
                                onclick={onclick}
                            />
                        }
                    })
                }
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct CaseSlideProps {
    card: CaseCard,
    animated: Option<&'static str>,
}

#[function_component(CaseSlide)]
fn case_slide(props: &CaseSlideProps) -> Html {
    let card = &props.card;
    let entry = &card.entry;
    let stage = use_state_eq(MediaStage::default);

    let on_error = {
        let stage = stage.clone();
        let image = card.image.clone();
        Callback::from(move |event: Event| {
            let failed = event
                .target_dyn_into::<HtmlImageElement>()
                .map(|img| img.current_src())
                .unwrap_or_default();
            stage.set((*stage).after_error(&image, &failed));
        })
    };

    let image = card.image.for_stage(*stage);
    html! {
        <article data-idx={card.index.to_string()} class={classes!("case-card", props.animated)}>
            <picture key={format!("{:?}", *stage)}>
                {
                    for image.alternates().iter().map(|candidate| html! {
                        <source srcset={candidate.src.clone()} type={candidate.format.mime()} />
                    })
                }
                <img
                    src={image.original.clone()}
                    alt={entry.company.clone()}
                    loading="lazy"
                    decoding="async"
                    onerror={on_error}
                />
            </picture>
            <div class="card-body">
                <h3 class="card-title">{ entry.company.clone() }</h3>
                { entry.subtitle.as_ref().map(|subtitle| html! { <p class="card-subtitle">{ subtitle.clone() }</p> }).unwrap_or_default() }
                { entry.description.as_ref().map(|text| html! { <p class="card-resume">{ text.clone() }</p> }).unwrap_or_default() }
            </div>
        </article>
    }
}
