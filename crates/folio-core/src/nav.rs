//! Active navigation link tracking.

/// Vertical extent of a page section, as laid out.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    #[must_use]
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    /// Half-open containment: `[top, top + height)`.
    #[must_use]
    pub fn contains(&self, offset: f64) -> bool {
        offset >= self.top && offset < self.top + self.height
    }
}

/// Whether a link's `href` targets section `id`.
#[must_use]
pub fn link_targets(href: &str, id: &str) -> bool {
    href.strip_prefix('#') == Some(id)
}

/// Picks the section under the scroll position plus a fixed lookahead.
#[derive(Debug, Clone)]
pub struct NavHighlighter {
    lookahead: f64,
    active: Option<String>,
}

impl NavHighlighter {
    #[must_use]
    pub fn new(lookahead: f64) -> Self {
        Self {
            lookahead,
            active: None,
        }
    }

    /// The section most recently marked active.
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Recompute for `scroll_y`.
    ///
    /// Returns the id to mark active. Sections are scanned in document order
    /// and the last match wins. With no match the previous state is kept and
    /// `None` is returned.
    pub fn update(&mut self, sections: &[SectionBounds], scroll_y: f64) -> Option<&str> {
        let effective = scroll_y + self.lookahead;
        let matched = sections
            .iter()
            .rev()
            .find(|section| section.contains(effective))?;
        self.active = Some(matched.id.clone());
        self.active.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Vec<SectionBounds> {
        vec![
            SectionBounds::new("about", 0.0, 300.0),
            SectionBounds::new("work", 300.0, 500.0),
            SectionBounds::new("contact", 800.0, 400.0),
        ]
    }

    #[test]
    fn lookahead_shifts_into_next_section() {
        let mut nav = NavHighlighter::new(200.0);
        assert_eq!(nav.update(&page(), 0.0), Some("about"));
        assert_eq!(nav.update(&page(), 100.0), Some("work"));
        assert_eq!(nav.update(&page(), 600.0), Some("contact"));
    }

    #[test]
    fn no_match_keeps_previous_state() {
        let mut nav = NavHighlighter::new(200.0);
        nav.update(&page(), 650.0);
        assert_eq!(nav.update(&page(), 5_000.0), None);
        assert_eq!(nav.active(), Some("contact"));
    }

    #[test]
    fn overlapping_sections_pick_last_in_document_order() {
        let sections = vec![
            SectionBounds::new("a", 0.0, 500.0),
            SectionBounds::new("b", 100.0, 500.0),
        ];
        let mut nav = NavHighlighter::new(0.0);
        assert_eq!(nav.update(&sections, 200.0), Some("b"));
    }

    #[test]
    fn section_end_is_exclusive() {
        let section = SectionBounds::new("a", 0.0, 300.0);
        assert!(section.contains(0.0));
        assert!(!section.contains(300.0));
    }

    #[test]
    fn links_match_by_fragment() {
        assert!(link_targets("#work", "work"));
        assert!(!link_targets("work", "work"));
        assert!(!link_targets("#work-2", "work"));
    }
}
