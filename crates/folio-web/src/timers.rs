//! One-shot deferred callbacks on the browser event loop.

use std::time::Duration;

use anyhow::Result;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::dom::{self, JsResultExt};

/// Run `task` once after `delay`.
pub(crate) fn after(delay: Duration, task: impl FnOnce() + 'static) -> Result<i32> {
    let callback = Closure::once_into_js(task);
    let timeout = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
    dom::window()?
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), timeout)
        .js_context("setTimeout")
}

/// Run `task` once on the next display refresh with the frame timestamp.
pub(crate) fn next_frame(task: impl FnOnce(f64) + 'static) -> Result<i32> {
    let callback = Closure::once_into_js(task);
    dom::window()?
        .request_animation_frame(callback.unchecked_ref())
        .js_context("requestAnimationFrame")
}
