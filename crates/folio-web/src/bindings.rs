//! Registers `(target, event, handler)` tuples against the live DOM.

use std::rc::Rc;

use anyhow::Result;
use folio_core::{BindingSpec, BindingTarget, EventKind};
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

use crate::dom::{self, JsResultExt};

pub(crate) type Handler = Rc<dyn Fn(&Event)>;

/// A handler waiting to be attached to every node its spec resolves to.
pub(crate) struct Binding {
    spec: BindingSpec,
    handler: Handler,
}

impl Binding {
    pub(crate) fn new(spec: BindingSpec, handler: impl Fn(&Event) + 'static) -> Self {
        Self {
            spec,
            handler: Rc::new(handler),
        }
    }
}

/// Attach every binding; returns how many listeners were installed.
///
/// Listeners live as long as the page, so their closures are leaked.
pub(crate) fn register(bindings: Vec<Binding>) -> Result<usize> {
    let mut installed = 0;
    for binding in bindings {
        let targets = resolve(&binding.spec.target)?;
        debug!(binding = %binding.spec, targets = targets.len(), "binding handler");
        for target in targets {
            attach(&target, binding.spec.event, Rc::clone(&binding.handler))?;
            installed += 1;
        }
    }
    Ok(installed)
}

fn resolve(target: &BindingTarget) -> Result<Vec<EventTarget>> {
    Ok(match target {
        BindingTarget::Window => vec![dom::window()?.into()],
        BindingTarget::Document => vec![dom::document()?.into()],
        BindingTarget::Id(id) => dom::by_id(&dom::document()?, id)
            .map(EventTarget::from)
            .into_iter()
            .collect(),
        BindingTarget::Selector(selector) => dom::query_all(&dom::document()?, selector)?
            .into_iter()
            .map(EventTarget::from)
            .collect(),
    })
}

fn attach(target: &EventTarget, event: EventKind, handler: Handler) -> Result<()> {
    let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| handler(&event));
    let function = callback.as_ref().unchecked_ref();
    if event.is_passive() {
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event.as_str(),
                function,
                &options,
            )
            .js_context("addEventListener")?;
    } else {
        target
            .add_event_listener_with_callback(event.as_str(), function)
            .js_context("addEventListener")?;
    }
    callback.forget();
    Ok(())
}
