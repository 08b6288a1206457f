//! Declarative event binding descriptors.
//!
//! Each page effect lists the `(target, event)` pairs it reacts to; the host
//! resolves targets and attaches a handler for every pair exactly once.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Scroll,
    Resize,
    DomContentLoaded,
}

impl EventKind {
    /// DOM event type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Scroll => "scroll",
            Self::Resize => "resize",
            Self::DomContentLoaded => "DOMContentLoaded",
        }
    }

    /// Handlers for these never cancel the event, so they register as passive.
    #[must_use]
    pub const fn is_passive(self) -> bool {
        matches!(self, Self::Scroll | Self::Resize)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a handler attaches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingTarget {
    Window,
    Document,
    /// A single element by id; a missing element binds nothing.
    Id(String),
    /// Every element matching a CSS selector at setup time.
    Selector(String),
}

impl fmt::Display for BindingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Window => f.write_str("window"),
            Self::Document => f.write_str("document"),
            Self::Id(id) => write!(f, "#{id}"),
            Self::Selector(selector) => f.write_str(selector),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingSpec {
    pub target: BindingTarget,
    pub event: EventKind,
}

impl BindingSpec {
    #[must_use]
    pub const fn new(target: BindingTarget, event: EventKind) -> Self {
        Self { target, event }
    }

    #[must_use]
    pub const fn window(event: EventKind) -> Self {
        Self::new(BindingTarget::Window, event)
    }

    #[must_use]
    pub fn id(id: impl Into<String>, event: EventKind) -> Self {
        Self::new(BindingTarget::Id(id.into()), event)
    }

    #[must_use]
    pub fn selector(selector: impl Into<String>, event: EventKind) -> Self {
        Self::new(BindingTarget::Selector(selector.into()), event)
    }
}

impl fmt::Display for BindingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.target, self.event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_and_resize_are_passive() {
        assert!(EventKind::Scroll.is_passive());
        assert!(EventKind::Resize.is_passive());
        assert!(!EventKind::Click.is_passive());
    }

    #[test]
    fn specs_describe_themselves() {
        assert_eq!(BindingSpec::id("menu-btn", EventKind::Click).to_string(), "#menu-btn:click");
        assert_eq!(BindingSpec::window(EventKind::Scroll).to_string(), "window:scroll");
        assert_eq!(
            BindingSpec::selector("#mobile-menu a", EventKind::Click).to_string(),
            "#mobile-menu a:click"
        );
    }
}
