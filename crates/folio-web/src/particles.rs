use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use anyhow::{Context, Result, anyhow};
use folio_core::{BindingSpec, EventKind, FolioConfig, ParticleField, Rgba, Surface, Viewport};
use tracing::{info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::bindings::Binding;
use crate::dom::{self, JsResultExt};

struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl Surface for CanvasSurface {
    type Error = JsValue;

    fn clear(&mut self, viewport: Viewport) -> Result<(), JsValue> {
        self.ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);
        Ok(())
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.arc(x, y, radius, 0.0, TAU)?;
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.fill();
        Ok(())
    }

    fn stroke_line(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        color: Rgba,
    ) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.move_to(from.0, from.1);
        self.ctx.line_to(to.0, to.1);
        self.ctx.set_stroke_style_str(&color.to_string());
        self.ctx.set_line_width(width);
        self.ctx.stroke();
        Ok(())
    }
}

struct Background {
    canvas: HtmlCanvasElement,
    surface: CanvasSurface,
    field: ParticleField,
}

impl Background {
    fn fit(&mut self, viewport: Viewport) {
        self.canvas.set_width(viewport.width.max(0.0) as u32);
        self.canvas.set_height(viewport.height.max(0.0) as u32);
        self.field.resize(viewport);
    }

    fn draw(&mut self) -> Result<(), JsValue> {
        self.field.render(&mut self.surface)
    }
}

/// Size the canvas, seed the field and start the frame loop.
pub(crate) fn setup(document: &Document, config: &FolioConfig) -> Result<Option<Vec<Binding>>> {
    let settings = &config.particles;
    let canvas = dom::require_id(document, &settings.canvas_id)?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| anyhow!("#{} is not a canvas", settings.canvas_id))?;
    let ctx = canvas
        .get_context("2d")
        .js_context("getContext(2d)")?
        .context("2d context unavailable")?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| anyhow!("2d context has an unexpected type"))?;

    let viewport = dom::viewport(&dom::window()?);
    let entropy = (js_sys::Math::random() * u64::MAX as f64) as u64;
    let field = ParticleField::seeded(viewport, settings.clone(), entropy);
    info!(points = field.points().len(), "particle background ready");

    let mut background = Background {
        canvas,
        surface: CanvasSurface { ctx },
        field,
    };
    background.fit(viewport);
    let background = Rc::new(RefCell::new(background));
    start_loop(Rc::clone(&background))?;

    let on_resize = Binding::new(BindingSpec::window(EventKind::Resize), move |_event| {
        if let Ok(window) = dom::window() {
            background.borrow_mut().fit(dom::viewport(&window));
        }
    });
    Ok(Some(vec![on_resize]))
}

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Redraw on every display refresh for the lifetime of the page.
fn start_loop(background: Rc<RefCell<Background>>) -> Result<()> {
    let slot: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
    let again = Rc::clone(&slot);
    *slot.borrow_mut() = Some(Closure::new(move |_timestamp: f64| {
        if let Err(err) = background.borrow_mut().draw() {
            warn!(?err, "particle frame failed");
        }
        if let Some(callback) = again.borrow().as_ref() {
            if let Err(err) = request(callback) {
                warn!(%err, "particle loop stopped");
            }
        }
    }));
    let first = slot.borrow();
    let callback = first.as_ref().context("frame callback missing")?;
    request(callback)?;
    Ok(())
}

fn request(callback: &FrameCallback) -> Result<i32> {
    dom::window()?
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .js_context("requestAnimationFrame")
}
