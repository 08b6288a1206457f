//! Scroll-position effects: active nav link, navbar shade, back-to-top control.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use folio_core::nav::link_targets;
use folio_core::{
    BackToTop, BindingSpec, EventKind, FolioConfig, NavHighlighter, NavbarSettings, NavbarShade,
    SectionBounds,
};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions};

use crate::bindings::Binding;
use crate::dom::{self, JsResultExt};

struct NavLinks {
    highlighter: NavHighlighter,
    sections: Vec<HtmlElement>,
    links: Vec<Element>,
    active_class: String,
}

impl NavLinks {
    /// Section extents are re-read every time since layout can shift.
    fn bounds(&self) -> Vec<SectionBounds> {
        self.sections
            .iter()
            .map(|section| {
                SectionBounds::new(
                    section.id(),
                    f64::from(section.offset_top()),
                    f64::from(section.offset_height()),
                )
            })
            .collect()
    }

    fn refresh(&mut self, scroll_y: f64) {
        let bounds = self.bounds();
        if let Some(id) = self.highlighter.update(&bounds, scroll_y) {
            if let Err(err) = apply_active(&self.links, id, &self.active_class) {
                warn!(%err, "failed to update nav links");
            }
        }
    }
}

/// Mark the link pointing at `#id` active and clear every other link.
pub(crate) fn apply_active(links: &[Element], id: &str, active_class: &str) -> Result<()> {
    for link in links {
        let classes = link.class_list();
        classes.remove_1(active_class).js_context("classList.remove")?;
        let href = link.get_attribute("href").unwrap_or_default();
        if link_targets(&href, id) {
            classes.add_1(active_class).js_context("classList.add")?;
        }
    }
    Ok(())
}

pub(crate) fn setup_nav(document: &Document, config: &FolioConfig) -> Result<Option<Vec<Binding>>> {
    let settings = &config.nav;
    let sections: Vec<HtmlElement> = dom::query_all(document, &settings.section_selector)?
        .into_iter()
        .filter_map(|element| element.dyn_into::<HtmlElement>().ok())
        .collect();
    let links = dom::query_all(document, &settings.link_selector)?;
    if sections.is_empty() || links.is_empty() {
        debug!(
            sections = sections.len(),
            links = links.len(),
            "nav highlighting inactive"
        );
        return Ok(None);
    }

    let window = dom::window()?;
    let state = Rc::new(RefCell::new(NavLinks {
        highlighter: NavHighlighter::new(settings.lookahead),
        sections,
        links,
        active_class: settings.active_class.clone(),
    }));
    state.borrow_mut().refresh(dom::scroll_y(&window));

    let on_scroll = Binding::new(BindingSpec::window(EventKind::Scroll), move |_event| {
        state.borrow_mut().refresh(dom::scroll_y(&window));
    });
    Ok(Some(vec![on_scroll]))
}

pub(crate) fn apply_navbar_shade(
    navbar: &HtmlElement,
    shade: NavbarShade,
    settings: &NavbarSettings,
) -> Result<()> {
    let classes = navbar.class_list();
    let style = navbar.style();
    match shade {
        NavbarShade::Elevated => {
            classes.add_1(&settings.elevated_class).js_context("classList.add")?;
            style
                .set_property("background", &settings.elevated_background)
                .js_context("style.background")?;
        }
        NavbarShade::Transparent => {
            classes.remove_1(&settings.elevated_class).js_context("classList.remove")?;
            style
                .set_property("background", "")
                .js_context("style.background")?;
        }
    }
    Ok(())
}

pub(crate) fn setup_navbar(document: &Document, config: &FolioConfig) -> Result<Option<Vec<Binding>>> {
    let settings = config.navbar.clone();
    let navbar = dom::require_html(document, &settings.navbar_id)?;
    let window = dom::window()?;

    let on_scroll = Binding::new(BindingSpec::window(EventKind::Scroll), move |_event| {
        let shade = NavbarShade::for_scroll(dom::scroll_y(&window), settings.threshold);
        if let Err(err) = apply_navbar_shade(&navbar, shade, &settings) {
            warn!(%err, "failed to shade navbar");
        }
    });
    Ok(Some(vec![on_scroll]))
}

pub(crate) fn setup_back_to_top(
    document: &Document,
    config: &FolioConfig,
) -> Result<Option<Vec<Binding>>> {
    let settings = &config.back_to_top;
    let Some(control) = dom::by_id(document, &settings.element_id) else {
        return Ok(None);
    };
    let rule = BackToTop::new(settings.threshold);
    let visible_class = settings.visible_class.clone();
    let window = dom::window()?;

    let scroll_window = window.clone();
    let on_scroll = Binding::new(BindingSpec::window(EventKind::Scroll), move |_event| {
        let visible = rule.is_visible(dom::scroll_y(&scroll_window));
        if let Err(err) = control.class_list().toggle_with_force(&visible_class, visible) {
            warn!(?err, "failed to toggle back-to-top control");
        }
    });

    let on_click = Binding::new(
        BindingSpec::id(settings.element_id.clone(), EventKind::Click),
        move |event| {
            event.prevent_default();
            let options = ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        },
    );
    Ok(Some(vec![on_scroll, on_click]))
}
