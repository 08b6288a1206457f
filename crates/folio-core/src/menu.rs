//! Collapsible mobile menu state.

/// SVG path drawn by the menu trigger icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuIcon {
    Hamburger,
    Close,
}

impl MenuIcon {
    /// Value for the icon's `d` attribute.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Hamburger => "M4 6h16M4 12h16M4 18h16",
            Self::Close => "M6 18L18 6M6 6l12 12",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    #[must_use]
    pub const fn new(open: bool) -> Self {
        Self { open }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the panel; returns the new open state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// A link inside the panel was followed.
    pub fn close(&mut self) {
        self.open = false;
    }

    #[must_use]
    pub const fn icon(&self) -> MenuIcon {
        if self.open {
            MenuIcon::Close
        } else {
            MenuIcon::Hamburger
        }
    }

    /// Value for the trigger's `aria-expanded` attribute.
    #[must_use]
    pub const fn aria_expanded(&self) -> &'static str {
        if self.open { "true" } else { "false" }
    }
}
