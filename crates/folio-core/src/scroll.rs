//! Stateless scroll-depth toggles: navbar background and back-to-top control.

/// Background treatment of the top navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavbarShade {
    #[default]
    Transparent,
    Elevated,
}

impl NavbarShade {
    /// Elevated strictly past `threshold`; recomputed from scratch each event.
    #[must_use]
    pub fn for_scroll(scroll_y: f64, threshold: f64) -> Self {
        if scroll_y > threshold {
            Self::Elevated
        } else {
            Self::Transparent
        }
    }

    #[must_use]
    pub const fn is_elevated(self) -> bool {
        matches!(self, Self::Elevated)
    }
}

/// Visibility rule for the back-to-top control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackToTop {
    threshold: f64,
}

impl BackToTop {
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    #[must_use]
    pub fn is_visible(&self, scroll_y: f64) -> bool {
        scroll_y > self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navbar_elevates_strictly_past_threshold() {
        assert_eq!(NavbarShade::for_scroll(0.0, 50.0), NavbarShade::Transparent);
        assert_eq!(NavbarShade::for_scroll(50.0, 50.0), NavbarShade::Transparent);
        assert_eq!(NavbarShade::for_scroll(50.5, 50.0), NavbarShade::Elevated);
        assert_eq!(NavbarShade::for_scroll(10.0, 50.0), NavbarShade::Transparent);
    }

    #[test]
    fn back_to_top_follows_scroll_depth() {
        let control = BackToTop::new(500.0);
        assert!(!control.is_visible(500.0));
        assert!(control.is_visible(501.0));
        assert!(!control.is_visible(20.0));
    }
}
