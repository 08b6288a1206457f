//! Intersection-driven effects: scroll reveal and count-up counters.

use std::time::Duration;

use anyhow::Result;
use folio_core::{CounterAnimation, CounterTrigger, FolioConfig, IntersectionSample, RevealTracker};
use js_sys::Array;
use tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::bindings::Binding;
use crate::dom::{self, JsResultExt};
use crate::timers;

fn sample(entry: &IntersectionObserverEntry) -> IntersectionSample {
    IntersectionSample::new(entry.is_intersecting(), entry.intersection_ratio())
}

/// Observe `elements`, feeding each entry with its index in `elements`.
fn observe(
    elements: &[Element],
    threshold: f64,
    root_margin: Option<&str>,
    mut on_entry: impl FnMut(usize, &IntersectionObserverEntry, &IntersectionObserver) + 'static,
) -> Result<IntersectionObserver> {
    let tracked = elements.to_vec();
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                if let Some(index) = tracked.iter().position(|element| *element == target) {
                    on_entry(index, &entry, &observer);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        options.set_root_margin(margin);
    }
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
            .js_context("IntersectionObserver")?;
    callback.forget();

    for element in elements {
        observer.observe(element);
    }
    Ok(observer)
}

/// Mark `.reveal` elements visible the first time they scroll into view.
pub(crate) fn setup_reveal(
    document: &Document,
    config: &FolioConfig,
) -> Result<Option<Vec<Binding>>> {
    let settings = &config.reveal;
    let elements = dom::query_all(document, &settings.selector)?;
    if elements.is_empty() {
        debug!(selector = %settings.selector, "no reveal targets");
        return Ok(None);
    }

    let mut tracker = RevealTracker::new(elements.len(), settings.threshold);
    let targets = elements.clone();
    let visible_class = settings.visible_class.clone();
    observe(
        &elements,
        settings.threshold,
        Some(&settings.root_margin()),
        move |index, entry, _observer| {
            if tracker.record(index, sample(entry)) {
                if let Err(err) = targets[index].class_list().add_1(&visible_class) {
                    warn!(?err, "failed to mark element visible");
                }
            }
        },
    )?;
    debug!(count = elements.len(), "observing reveal targets");
    Ok(Some(Vec::new()))
}

/// Count `.counter` elements up to their target once half visible.
pub(crate) fn setup_counters(
    document: &Document,
    config: &FolioConfig,
) -> Result<Option<Vec<Binding>>> {
    let settings = &config.counters;
    let duration = Duration::from_millis(settings.duration_ms.into());

    let found = dom::query_all(document, &settings.selector)?;
    let raw: Vec<String> = found
        .iter()
        .map(|element| {
            element
                .get_attribute(&settings.target_attribute)
                .unwrap_or_default()
        })
        .collect();
    let (mut trigger, kept) = CounterTrigger::from_attributes(
        settings.threshold,
        raw.iter().map(String::as_str),
        duration,
        &settings.suffix,
    );
    if trigger.is_empty() {
        return Ok(None);
    }
    let elements: Vec<Element> = kept.into_iter().map(|position| found[position].clone()).collect();

    let targets = elements.clone();
    observe(&elements, settings.threshold, None, move |index, entry, observer| {
        let Some(counter) = trigger.fire(index, sample(entry)) else {
            return;
        };
        let element = targets[index].clone();
        observer.unobserve(&element);
        element.set_text_content(Some(&counter.label_at(Duration::ZERO)));
        match dom::window() {
            Ok(window) => animate(element, counter, dom::now_ms(&window)),
            Err(err) => warn!(%err, "counter animation unavailable"),
        }
    })?;
    debug!(count = elements.len(), "observing counters");
    Ok(Some(Vec::new()))
}

fn animate(element: Element, counter: CounterAnimation, started_ms: f64) {
    let scheduled = timers::next_frame(move |now_ms| {
        let elapsed = Duration::from_secs_f64((now_ms - started_ms).max(0.0) / 1_000.0);
        element.set_text_content(Some(&counter.label_at(elapsed)));
        if !counter.is_finished(elapsed) {
            animate(element, counter, started_ms);
        }
    });
    if let Err(err) = scheduled {
        warn!(%err, "counter frame not scheduled");
    }
}
