//! Small lookups over the browser globals.

use std::fmt::Display;

use anyhow::{Context, Result, anyhow};
use folio_core::Viewport;
use wasm_bindgen::{JsCast, JsError, JsValue};
use web_sys::{Document, Element, HtmlElement, NodeList, Window};

/// Attach a description to a `Result` whose error is a raw `JsValue`.
pub(crate) trait JsResultExt<T> {
    fn js_context(self, what: &str) -> Result<T>;
}

impl<T> JsResultExt<T> for std::result::Result<T, JsValue> {
    fn js_context(self, what: &str) -> Result<T> {
        self.map_err(|err| anyhow!("{what}: {err:?}"))
    }
}

pub(crate) fn js_error(err: impl Display) -> JsValue {
    JsError::new(&err.to_string()).into()
}

pub(crate) fn window() -> Result<Window> {
    web_sys::window().context("no global window")
}

pub(crate) fn document() -> Result<Document> {
    window()?.document().context("window has no document")
}

/// Whether the document is still being parsed.
pub(crate) fn is_loading(document: &Document) -> bool {
    document.ready_state() == "loading"
}

pub(crate) fn by_id(document: &Document, id: &str) -> Option<Element> {
    document.get_element_by_id(id)
}

pub(crate) fn require_id(document: &Document, id: &str) -> Result<Element> {
    by_id(document, id).with_context(|| format!("element #{id} not found"))
}

pub(crate) fn require_html(document: &Document, id: &str) -> Result<HtmlElement> {
    require_id(document, id)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| anyhow!("element #{id} is not an HTML element"))
}

pub(crate) fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
    let list = document
        .query_selector_all(selector)
        .js_context(&format!("querySelectorAll({selector})"))?;
    Ok(elements(&list))
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|idx| list.get(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(crate) fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub(crate) fn viewport(window: &Window) -> Viewport {
    let width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0);
    Viewport::new(width, height)
}

/// Milliseconds on the same clock as animation frame timestamps.
pub(crate) fn now_ms(window: &Window) -> f64 {
    window
        .performance()
        .map(|performance| performance.now())
        .unwrap_or(0.0)
}
