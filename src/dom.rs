//! Document parsing and element access.
//!
//! There is no ambient browser, so the document is parsed markup addressed
//! through CSS selectors. Elements are identified by their position in
//! document order, which is stable for a given source string; bindings keyed
//! on an [`ElementId`] stay valid until the session replaces the document.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use crate::config::DECLARED_BINDING_SELECTOR_STR;

static ANY_ELEMENT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("*").expect("Failed to parse universal selector - this is a bug")
});

static DECLARED_BINDING_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(DECLARED_BINDING_SELECTOR_STR)
        .expect("Failed to parse declared binding selector - this is a bug")
});

/// Identity of an element within the current document.
///
/// The id is the element's position in document order. It is only meaningful
/// against the document it was taken from; a session drops all ids when it
/// loads a new document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// A parsed document.
///
/// Wraps `scraper::Html` with position-based element identity. `Html` is not
/// `Send`, so views are parsed and consulted inside synchronous scopes and
/// never held across await points.
pub struct DocumentView {
    html: Html,
}

impl DocumentView {
    /// Parses markup into a view.
    pub fn parse(source: &str) -> Self {
        DocumentView {
            html: Html::parse_document(source),
        }
    }

    /// Returns the ids of every element carrying the binding attribute, in
    /// document order.
    pub fn declared_elements(&self) -> Vec<ElementId> {
        self.html
            .select(&DECLARED_BINDING_SELECTOR)
            .filter_map(|element| self.position_of(element))
            .collect()
    }

    /// Returns the id of the first element matching the selector.
    ///
    /// An unparseable selector matches nothing.
    pub fn select_first(&self, selector_str: &str) -> Option<ElementId> {
        let selector = parse_selector_with_fallback(selector_str, "element lookup");
        self.html
            .select(&selector)
            .next()
            .and_then(|element| self.position_of(element))
    }

    /// Returns the ids of every element matching the selector, in document
    /// order.
    pub fn select_all(&self, selector_str: &str) -> Vec<ElementId> {
        let selector = parse_selector_with_fallback(selector_str, "element collection lookup");
        self.html
            .select(&selector)
            .filter_map(|element| self.position_of(element))
            .collect()
    }

    /// Resolves an id back to its element.
    ///
    /// Returns `None` when the id does not belong to this document.
    pub fn element(&self, id: ElementId) -> Option<ElementRef<'_>> {
        self.html.select(&ANY_ELEMENT_SELECTOR).nth(id.0)
    }

    fn position_of(&self, target: ElementRef<'_>) -> Option<ElementId> {
        self.html
            .select(&ANY_ELEMENT_SELECTOR)
            .position(|element| element.id() == target.id())
            .map(ElementId)
    }
}

/// Parses a CSS selector with a safe fallback.
///
/// If parsing fails, logs an error and returns a selector that matches
/// nothing (`*:not(*)`). This prevents panics while allowing the code to
/// continue.
pub(crate) fn parse_selector_with_fallback(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse CSS selector '{}' in {}: {}. Using fallback selector.",
            selector_str,
            context,
            e
        );
        Selector::parse("*:not(*)").expect(
            "Fallback selector '*:not(*)' should always parse - this is a programming error",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
            <a id="first" href="/one">one</a>
            <button id="act" data-request-method="post" data-request-uri="/x">go</button>
            <span id="plain">text</span>
            <a id="second" data-request-method="delete" href="/two">two</a>
        </body></html>
    "#;

    #[test]
    fn test_declared_elements_in_document_order() {
        let view = DocumentView::parse(PAGE);
        let declared = view.declared_elements();
        assert_eq!(declared.len(), 2);

        let first = view.element(declared[0]).unwrap();
        assert_eq!(first.value().attr("id"), Some("act"));
        let second = view.element(declared[1]).unwrap();
        assert_eq!(second.value().attr("id"), Some("second"));
    }

    #[test]
    fn test_select_first_and_roundtrip() {
        let view = DocumentView::parse(PAGE);
        let id = view.select_first("#act").expect("element should match");
        let element = view.element(id).expect("id should resolve");
        assert_eq!(element.value().name(), "button");
        assert_eq!(element.value().attr("data-request-uri"), Some("/x"));
    }

    #[test]
    fn test_select_first_no_match() {
        let view = DocumentView::parse(PAGE);
        assert!(view.select_first("#missing").is_none());
    }

    #[test]
    fn test_select_all_matches_collection() {
        let view = DocumentView::parse(PAGE);
        assert_eq!(view.select_all("a").len(), 2);
        assert_eq!(view.select_all("button").len(), 1);
        assert!(view.select_all("form").is_empty());
    }

    #[test]
    fn test_ids_stable_across_reparse() {
        let first = DocumentView::parse(PAGE);
        let second = DocumentView::parse(PAGE);
        assert_eq!(first.select_first("#act"), second.select_first("#act"));
    }

    #[test]
    fn test_invalid_selector_matches_nothing() {
        let view = DocumentView::parse(PAGE);
        assert!(view.select_first("[[not-a-selector").is_none());
        assert!(view.select_all("[[not-a-selector").is_empty());
    }
}
