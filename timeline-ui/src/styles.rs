#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-timeline-ui]";

/// Default CSS for the exhibit along with easy-to-override design tokens.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --exhibit-font-family: 'Inter', system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
  --exhibit-bg: linear-gradient(to bottom, #f8fafc, #ffffff);
  --exhibit-text: #334155;
  --exhibit-heading: #0f172a;
  --exhibit-muted: #64748b;
  --exhibit-axis: rgba(226, 232, 240, 0.8);
  --exhibit-accent: linear-gradient(to bottom, #38bdf8, #6366f1, #d946ef);
  --exhibit-accent-x: linear-gradient(to right, #38bdf8, #6366f1, #d946ef);
  --exhibit-card-bg: rgba(255, 255, 255, 0.75);
  --exhibit-card-ring: rgba(226, 232, 240, 0.8);
  --exhibit-placeholder: linear-gradient(135deg, #e2e8f0, #cbd5e1);
  --exhibit-radius: 24px;
}

.exhibit-root {
  font-family: var(--exhibit-font-family);
  background: var(--exhibit-bg);
  color: var(--exhibit-text);
  min-height: 100dvh;
}

.timeline-section,
.cases-section {
  position: relative;
  max-width: 72rem;
  margin: 0 auto;
  padding: 4rem 1rem;
}

.section-header {
  text-align: center;
  margin-bottom: 4rem;
}

.section-header h2 {
  font-size: clamp(1.75rem, 4vw, 3rem);
  font-weight: 700;
  color: var(--exhibit-heading);
}

.section-header p {
  margin-top: 1rem;
  color: var(--exhibit-muted);
}

.timeline-track {
  position: relative;
}

.timeline-axis,
.timeline-progress {
  pointer-events: none;
  position: absolute;
  top: 0;
  bottom: 0;
  left: 1rem;
  width: 6px;
  border-radius: 999px;
  transform: translateX(-50%);
}

.timeline-axis {
  background: var(--exhibit-axis);
}

.timeline-progress {
  background: var(--exhibit-accent);
  transform-origin: top;
  transform: translateX(-50%) scaleY(0);
  will-change: transform;
}

.timeline-list {
  list-style: none;
  margin: 0;
  padding: 0;
  display: grid;
  gap: 3.5rem;
}

.timeline-item {
  position: relative;
  display: grid;
  align-items: center;
  padding-left: 2.5rem;
}

.timeline-dot {
  position: absolute;
  top: 2rem;
  left: 1rem;
  width: 1rem;
  height: 1rem;
  border-radius: 999px;
  background: #6366f1;
  box-shadow: 0 0 0 4px rgba(99, 102, 241, 0.2);
  transform: translateX(-50%);
}

.timeline-dot.is-animated {
  animation: exhibit-pulse 2.8s ease-in-out infinite;
}

.timeline-card {
  position: relative;
  overflow: hidden;
  border-radius: var(--exhibit-radius);
  background: var(--exhibit-card-bg);
  box-shadow: 0 0 0 1px var(--exhibit-card-ring), 0 10px 15px rgba(15, 23, 42, 0.05);
  transition: transform 0.3s ease, box-shadow 0.3s ease;
}

.timeline-card.is-animated:hover {
  transform: translateY(-8px) rotate(var(--exhibit-tilt, 0deg)) scale(1.02);
}

.timeline-card.is-left {
  --exhibit-tilt: -0.35deg;
}

.timeline-card.is-right {
  --exhibit-tilt: 0.35deg;
}

.card-media {
  position: relative;
  aspect-ratio: 16 / 9;
  display: flex;
  align-items: center;
  justify-content: center;
  overflow: hidden;
  background: rgba(248, 250, 252, 0.9);
}

.card-media[role="button"] {
  cursor: zoom-in;
}

.card-media img {
  width: 100%;
  height: 100%;
  object-fit: contain;
  opacity: 0;
  transition: opacity 0.5s ease;
}

.card-media.is-loaded img {
  opacity: 1;
}

.card-placeholder {
  position: absolute;
  inset: 0;
  background: var(--exhibit-placeholder);
  opacity: 0.6;
  transition: opacity 0.5s ease;
}

.card-media.is-loaded .card-placeholder {
  opacity: 0;
}

.card-body {
  padding: 1.5rem;
}

.card-date {
  display: inline-flex;
  gap: 0.5rem;
  align-items: center;
  font-size: 0.75rem;
  border-radius: 999px;
  padding: 0.25rem 0.75rem;
  box-shadow: 0 0 0 1px var(--exhibit-card-ring);
}

.card-month {
  text-transform: uppercase;
  letter-spacing: 0.25em;
  color: var(--exhibit-muted);
}

.card-year {
  border-radius: 999px;
  padding: 0.25rem 0.75rem;
  color: #ffffff;
  font-weight: 600;
  background: var(--exhibit-accent-x);
}

.card-title {
  margin-top: 0.75rem;
  font-size: 1.5rem;
  font-weight: 600;
  color: var(--exhibit-heading);
}

.card-subtitle {
  margin-top: 0.25rem;
  font-size: 0.875rem;
  text-transform: uppercase;
  letter-spacing: 0.05em;
  color: var(--exhibit-muted);
}

.card-resume {
  margin-top: 0.75rem;
  line-height: 1.6;
  text-align: justify;
}

.lightbox {
  position: fixed;
  inset: 0;
  z-index: 50;
  display: flex;
  align-items: center;
  justify-content: center;
  background: rgba(15, 23, 42, 0.85);
}

.lightbox img {
  max-width: 92vw;
  max-height: 88vh;
  object-fit: contain;
}

.lightbox-close {
  position: absolute;
  top: 1rem;
  right: 1rem;
  width: 2.5rem;
  height: 2.5rem;
  border-radius: 999px;
  border: 0;
  background: rgba(255, 255, 255, 0.9);
  cursor: pointer;
}

.cases-strip {
  position: relative;
  display: flex;
  gap: 1.5rem;
  overflow-x: auto;
  scroll-snap-type: x mandatory;
  padding: 0.25rem 1rem 0.5rem;
}

.case-card {
  position: relative;
  flex-shrink: 0;
  min-width: 85%;
  scroll-snap-align: center;
  border-radius: 1rem;
  overflow: hidden;
  background: var(--exhibit-card-bg);
  box-shadow: 0 0 0 1px var(--exhibit-card-ring), 0 4px 6px rgba(15, 23, 42, 0.08);
}

.case-card img {
  width: 100%;
  height: 18rem;
  object-fit: cover;
}

.cases-nav {
  pointer-events: none;
  position: absolute;
  inset: 0;
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 0 0.5rem;
  z-index: 40;
}

.cases-nav button {
  pointer-events: auto;
  width: 2.5rem;
  height: 2.5rem;
  border-radius: 999px;
  border: 1px solid #cbd5e1;
  background: rgba(255, 255, 255, 0.9);
}

.cases-dots {
  margin-top: 1.5rem;
  display: flex;
  justify-content: center;
  gap: 0.5rem;
}

.cases-dot {
  width: 0.625rem;
  height: 0.625rem;
  border-radius: 999px;
  border: 1px solid #cbd5e1;
  background: #e2e8f0;
}

.cases-dot.is-active {
  background: #6366f1;
}

.exhibit-footer {
  padding: 2.5rem 0;
  text-align: center;
  font-size: 0.875rem;
  color: var(--exhibit-muted);
}

@keyframes exhibit-pulse {
  0%, 100% { transform: translateX(-50%) scale(1); }
  50% { transform: translateX(-50%) scale(1.15); }
}

@media (min-width: 768px) {
  .timeline-axis,
  .timeline-progress,
  .timeline-dot {
    left: 50%;
  }

  .timeline-item {
    grid-template-columns: 1fr 1fr;
    column-gap: 3rem;
    padding-left: 0;
  }

  .timeline-card.is-left {
    grid-column-start: 1;
    margin-right: 3.5rem;
    text-align: right;
  }

  .timeline-card.is-right {
    grid-column-start: 2;
    margin-left: 3.5rem;
  }

  .case-card {
    min-width: 55%;
  }
}

@media (min-width: 1024px) {
  .case-card {
    min-width: 42%;
  }
}

@media (prefers-reduced-motion: reduce) {
  .timeline-card,
  .card-media img,
  .card-placeholder {
    transition: none;
  }
}
"#;

pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document has no <head> element"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-timeline-ui", "exhibit")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.clone().dyn_into::<Node>()?)?;

    Ok(())
}
