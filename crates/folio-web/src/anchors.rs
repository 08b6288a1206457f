use anyhow::Result;
use folio_core::anchor::is_in_page;
use folio_core::{AnchorTarget, BindingSpec, EventKind, FolioConfig};
use tracing::trace;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::bindings::Binding;
use crate::dom;

/// Route in-page link clicks through smooth scrolling.
pub(crate) fn setup(_document: &Document, config: &FolioConfig) -> Result<Option<Vec<Binding>>> {
    let on_click = Binding::new(
        BindingSpec::selector(config.anchor_selector.clone(), EventKind::Click),
        route,
    );
    Ok(Some(vec![on_click]))
}

fn route(event: &Event) {
    let Some(link) = event
        .current_target()
        .and_then(|target| target.dyn_into::<Element>().ok())
    else {
        return;
    };
    let href = link.get_attribute("href").unwrap_or_default();
    if !is_in_page(&href) {
        return;
    }
    event.prevent_default();

    let Ok(document) = dom::document() else {
        return;
    };
    let Some(target) = AnchorTarget::from_href(&href)
        .and_then(|anchor| anchor.resolve(|id| dom::by_id(&document, id)))
    else {
        trace!(%href, "anchor has no target");
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}
