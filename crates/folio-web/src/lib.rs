#![cfg(target_arch = "wasm32")]
//! Browser bindings for the Folio page effects.
//!
//! JavaScript calls [`mount`] once; every effect whose elements are present is
//! wired up when the document has finished parsing.

use std::cell::Cell;

use anyhow::{Result, anyhow, bail};
use folio_core::{BindingSpec, BindingTarget, EventKind, FolioConfig};
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::Document;

mod anchors;
mod bindings;
mod dom;
mod menu;
mod observers;
mod particles;
mod scroll;
mod timers;
mod typewriter;

use bindings::Binding;
use dom::js_error;

/// Wires one effect. `Ok(None)` means its optional elements are absent.
type Setup = fn(&Document, &FolioConfig) -> Result<Option<Vec<Binding>>>;

const EFFECTS: &[(&str, Setup)] = &[
    ("particles", particles::setup),
    ("reveal", observers::setup_reveal),
    ("nav", scroll::setup_nav),
    ("navbar", scroll::setup_navbar),
    ("menu", menu::setup),
    ("anchors", anchors::setup),
    ("typewriter", typewriter::setup),
    ("counters", observers::setup_counters),
    ("back-to-top", scroll::setup_back_to_top),
];

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct MountReport {
    deferred: bool,
    active: Vec<&'static str>,
    inactive: Vec<&'static str>,
    failed: Vec<FailedEffect>,
    listeners: usize,
}

#[derive(Debug, Serialize)]
struct FailedEffect {
    effect: &'static str,
    reason: String,
}

thread_local! {
    static MOUNTED: Cell<bool> = const { Cell::new(false) };
}

/// Claim the one mount a page gets; later calls would duplicate every listener.
fn claim_mount() -> Result<()> {
    if MOUNTED.with(|mounted| mounted.replace(true)) {
        bail!("page effects are already mounted");
    }
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = tracing_wasm::try_set_as_global_default();
}

/// Mount every effect, deferring until `DOMContentLoaded` while the page is still parsing.
///
/// `config` may be `null`/`undefined` for defaults, or a partial settings object.
/// Only the first call mounts; later calls fail.
#[wasm_bindgen]
pub fn mount(config: JsValue) -> Result<JsValue, JsValue> {
    let config = decode_config(config).map_err(js_error)?;
    let document = dom::document().map_err(js_error)?;
    claim_mount().map_err(js_error)?;

    if dom::is_loading(&document) {
        let on_ready = Binding::new(
            BindingSpec::new(BindingTarget::Document, EventKind::DomContentLoaded),
            move |_event| {
                if let Err(err) = mount_now(&config) {
                    warn!(%err, "deferred mount failed");
                }
            },
        );
        bindings::register(vec![on_ready]).map_err(js_error)?;
        debug!("document still loading; mount deferred");
        let report = MountReport {
            deferred: true,
            ..MountReport::default()
        };
        return to_value(&report).map_err(js_error);
    }

    let report = mount_now(&config).map_err(js_error)?;
    to_value(&report).map_err(js_error)
}

fn mount_now(config: &FolioConfig) -> Result<MountReport> {
    let document = dom::document()?;
    let mut report = MountReport::default();
    let mut pending = Vec::new();

    for &(name, setup) in EFFECTS {
        match setup(&document, config) {
            Ok(Some(bindings)) => {
                debug!(effect = name, bindings = bindings.len(), "effect wired");
                report.active.push(name);
                pending.extend(bindings);
            }
            Ok(None) => report.inactive.push(name),
            Err(err) => {
                warn!(effect = name, %err, "effect disabled");
                report.failed.push(FailedEffect {
                    effect: name,
                    reason: format!("{err:#}"),
                });
            }
        }
    }

    report.listeners = bindings::register(pending)?;
    info!(
        active = report.active.len(),
        inactive = report.inactive.len(),
        failed = report.failed.len(),
        listeners = report.listeners,
        "page effects mounted",
    );
    Ok(report)
}

fn decode_config(value: JsValue) -> Result<FolioConfig> {
    let config = if value.is_null() || value.is_undefined() {
        FolioConfig::default()
    } else {
        from_value::<FolioConfig>(value).map_err(|err| anyhow!("invalid config object: {err}"))?
    };
    config.validate()?;
    Ok(config)
}

#[wasm_bindgen]
pub fn version() -> String {
    format!("folio-web {}", env!("CARGO_PKG_VERSION"))
}

#[wasm_bindgen]
pub fn default_config() -> Result<JsValue, JsValue> {
    to_value(&FolioConfig::default()).map_err(js_error)
}
