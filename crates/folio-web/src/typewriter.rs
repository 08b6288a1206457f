use anyhow::{Context, Result};
use folio_core::typewriter::Cadence;
use folio_core::{FolioConfig, Typewriter, TypewriterSettings};
use tracing::{debug, warn};
use web_sys::{Document, Element};

use crate::bindings::Binding;
use crate::{dom, timers};

/// Start cycling titles through the typewriter element, if the page has one.
pub(crate) fn setup(document: &Document, config: &FolioConfig) -> Result<Option<Vec<Binding>>> {
    let settings = &config.typewriter;
    let Some(element) = dom::by_id(document, &settings.element_id) else {
        return Ok(None);
    };
    let titles = titles(&element, settings)?;
    let Some(typewriter) = Typewriter::new(&titles, Cadence::from(settings)) else {
        debug!("typewriter has no titles");
        return Ok(None);
    };

    element.set_text_content(Some(""));
    timers::after(typewriter.initial_delay(), move || advance(typewriter, element))?;
    Ok(Some(Vec::new()))
}

/// Titles from the element's attribute, else the configured list.
pub(crate) fn titles(element: &Element, settings: &TypewriterSettings) -> Result<Vec<String>> {
    match element.get_attribute(&settings.titles_attribute) {
        Some(raw) => Typewriter::titles_from_json(&raw)
            .with_context(|| format!("{} is not a JSON string array", settings.titles_attribute)),
        None => Ok(settings.titles.clone()),
    }
}

/// One transition, then hand ownership to the next timer.
fn advance(mut typewriter: Typewriter, element: Element) {
    let delay = typewriter.step();
    element.set_text_content(Some(&typewriter.text()));
    if let Err(err) = timers::after(delay, move || advance(typewriter, element)) {
        warn!(%err, "typewriter stopped");
    }
}
