//! In-page link routing for smooth scrolling.

/// Fragment target of an in-page link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorTarget<'a> {
    id: &'a str,
}

impl<'a> AnchorTarget<'a> {
    /// Parse an `href`. Only `#<id>` with a non-empty id yields a target.
    #[must_use]
    pub fn from_href(href: &'a str) -> Option<Self> {
        let id = href.strip_prefix('#')?;
        if id.is_empty() {
            return None;
        }
        Some(Self { id })
    }

    #[must_use]
    pub const fn id(&self) -> &'a str {
        self.id
    }

    /// Resolve against the document; a missing element means no scroll.
    pub fn resolve<T>(&self, lookup: impl FnOnce(&str) -> Option<T>) -> Option<T> {
        lookup(self.id)
    }
}

/// Whether a click on a link with this `href` belongs to the router.
#[must_use]
pub fn is_in_page(href: &str) -> bool {
    href.starts_with('#')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fragment_links() {
        assert_eq!(AnchorTarget::from_href("#about").map(|t| t.id()), Some("about"));
        assert_eq!(AnchorTarget::from_href("#"), None);
        assert_eq!(AnchorTarget::from_href("/about"), None);
        assert_eq!(AnchorTarget::from_href("https://example.com/#x"), None);
    }

    #[test]
    fn missing_target_resolves_to_none() {
        let target = AnchorTarget::from_href("#nowhere").expect("fragment");
        let found: Option<u32> = target.resolve(|id| (id == "about").then_some(1));
        assert_eq!(found, None);
    }

    #[test]
    fn only_hash_links_are_routed() {
        assert!(is_in_page("#"));
        assert!(is_in_page("#x"));
        assert!(!is_in_page("mailto:me@example.com"));
    }
}
