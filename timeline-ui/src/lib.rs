//! Yew components for the software-engineering history exhibit.

#[cfg(target_arch = "wasm32")]
mod browser;
#[cfg(target_arch = "wasm32")]
mod cases;
#[cfg(target_arch = "wasm32")]
mod item;
#[cfg(target_arch = "wasm32")]
mod styles;
#[cfg(target_arch = "wasm32")]
mod timeline;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use serde_wasm_bindgen::from_value;
    use timeline_core::{CaseCard, Exhibit, ExhibitConfig};
    use wasm_bindgen::prelude::*;
    use web_sys::{console, Document, Element, Window};
    use yew::prelude::*;

    use crate::browser;
    use crate::cases::CaseStudies;
    use crate::styles;
    use crate::timeline::TimelineView;

    #[derive(Properties, PartialEq)]
    pub struct AppProps {
        pub exhibit: Exhibit,
        pub config: ExhibitConfig,
        pub reduced_motion: bool,
    }

    #[function_component(App)]
    fn app(props: &AppProps) -> Html {
        use_effect_with((), |_| {
            if let Some(document) = web_sys::window().and_then(|window| window.document()) {
                if let Err(err) = styles::ensure_styles(&document) {
                    console::error_1(&err);
                }
            }
            || ()
        });

        let case_cards = use_memo(
            (props.exhibit.cases.clone(), props.config.clone()),
            |(cases, config)| CaseCard::build_all(cases, config),
        );

        html! {
            <main class="exhibit-root">
                <TimelineView
                    entries={props.exhibit.timeline.clone()}
                    config={props.config.clone()}
                    reduced_motion={props.reduced_motion}
                />
                <CaseStudies cards={(*case_cards).clone()} reduced_motion={props.reduced_motion} />
                <footer class="exhibit-footer">
                    <p>{"Historia de la ingeniería de software"}</p>
                </footer>
            </main>
        }
    }

    fn read_config(config: Option<JsValue>) -> Result<ExhibitConfig, JsValue> {
        let config = match config {
            Some(value) if !value.is_undefined() && !value.is_null() => from_value(value)
                .map_err(|err| JsValue::from_str(&format!("Could not read config: {err}")))?,
            _ => ExhibitConfig::default(),
        };
        config
            .validate()
            .map_err(|err| JsValue::from_str(&format!("Timeline error: {err}")))?;
        Ok(config)
    }

    /// Renders the exhibit into the element matching `selector`.
    #[wasm_bindgen]
    pub fn mount_exhibit(
        selector: &str,
        timeline: JsValue,
        cases: JsValue,
        config: Option<JsValue>,
    ) -> Result<(), JsValue> {
        let window: Window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document available"))?;

        let target: Element = document
            .query_selector(selector)
            .map_err(|err| JsValue::from_str(&format!("Invalid selector: {err:?}")))?
            .ok_or_else(|| JsValue::from_str("No element matches the selector"))?;

        let timeline: serde_json::Value = from_value(timeline)?;
        let cases: serde_json::Value = from_value(cases)?;
        let exhibit = timeline_data::load_exhibit_value(&timeline, &cases)
            .map_err(|err| JsValue::from_str(&format!("Timeline error: {err}")))?;
        let config = read_config(config)?;

        yew::Renderer::<App>::with_root_and_props(
            target,
            AppProps {
                exhibit,
                config,
                reduced_motion: browser::prefers_reduced_motion(),
            },
        )
        .render();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::mount_exhibit;

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_exhibit(
    _: &str,
    _: wasm_bindgen::JsValue,
    _: wasm_bindgen::JsValue,
    _: Option<wasm_bindgen::JsValue>,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "timeline-ui only supports the wasm32 target",
    ))
}
