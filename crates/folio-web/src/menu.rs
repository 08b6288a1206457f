use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use folio_core::{BindingSpec, EventKind, FolioConfig, MobileMenu};
use tracing::{debug, warn};
use web_sys::{Document, Element};

use crate::bindings::Binding;
use crate::dom::{self, JsResultExt};

struct MenuView {
    menu: MobileMenu,
    trigger: Element,
    panel: Element,
    icon: Element,
    hidden_class: String,
}

impl MenuView {
    fn sync(&self) -> Result<()> {
        self.panel
            .class_list()
            .toggle_with_force(&self.hidden_class, !self.menu.is_open())
            .js_context("classList.toggle")?;
        self.icon
            .set_attribute("d", self.menu.icon().path())
            .js_context("icon path")?;
        self.trigger
            .set_attribute("aria-expanded", self.menu.aria_expanded())
            .js_context("aria-expanded")?;
        Ok(())
    }

    fn apply(&mut self, change: impl FnOnce(&mut MobileMenu)) {
        change(&mut self.menu);
        if let Err(err) = self.sync() {
            warn!(%err, "failed to update mobile menu");
        }
    }
}

/// Wire the hamburger trigger. The panel and icon are required once a trigger exists.
pub(crate) fn setup(document: &Document, config: &FolioConfig) -> Result<Option<Vec<Binding>>> {
    let settings = &config.menu;
    let Some(trigger) = dom::by_id(document, &settings.trigger_id) else {
        debug!(id = %settings.trigger_id, "no mobile menu trigger");
        return Ok(None);
    };
    let panel = dom::require_id(document, &settings.panel_id)?;
    let icon = dom::require_id(document, &settings.icon_id)?;

    let open = !panel.class_list().contains(&settings.hidden_class);
    let view = MenuView {
        menu: MobileMenu::new(open),
        trigger,
        panel,
        icon,
        hidden_class: settings.hidden_class.clone(),
    };
    view.sync()?;
    let view = Rc::new(RefCell::new(view));

    let toggle_view = Rc::clone(&view);
    let on_toggle = Binding::new(
        BindingSpec::id(settings.trigger_id.clone(), EventKind::Click),
        move |_event| {
            toggle_view.borrow_mut().apply(|menu| {
                menu.toggle();
            });
        },
    );
    let on_follow = Binding::new(
        BindingSpec::selector(format!("#{} a", settings.panel_id), EventKind::Click),
        move |_event| view.borrow_mut().apply(MobileMenu::close),
    );
    Ok(Some(vec![on_toggle, on_follow]))
}
