//! Text content extraction
//!
//! Markup-stripping helpers shared by the fallback path and the
//! site-specific strategies.

use crate::error::ExtractionError;
use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose text never renders on the page
const INVISIBLE_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Content extraction functionality
pub struct ContentExtractor;

impl ContentExtractor {
    /// Parse a response body into an HTML tree
    pub fn parse(body: &str) -> Html {
        Html::parse_document(body)
    }

    /// Full visible text of the page with all markup stripped.
    ///
    /// Text nodes are concatenated in document order without separators;
    /// anything inside `script`, `style`, `noscript` or `template` is skipped.
    pub fn visible_text(page: &Html) -> String {
        let mut text = String::new();
        for node in page.root_element().descendants() {
            let Node::Text(chunk) = node.value() else {
                continue;
            };
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| INVISIBLE_ELEMENTS.contains(&el.name()))
            });
            if !hidden {
                text.push_str(chunk);
            }
        }
        text
    }

    /// Text of the first element matching `selector`
    pub fn select_text(page: &Html, selector: &str) -> Result<String, ExtractionError> {
        let element = Self::select_first(page, selector)?;
        Ok(Self::element_text(&element))
    }

    /// First element matching `selector`, or `ElementNotFound`
    pub fn select_first<'a>(
        page: &'a Html,
        selector: &str,
    ) -> Result<ElementRef<'a>, ExtractionError> {
        let parsed = Selector::parse(selector)
            .map_err(|e| ExtractionError::InvalidSelector(format!("{selector}: {e}")))?;
        page.select(&parsed)
            .next()
            .ok_or_else(|| ExtractionError::ElementNotFound(selector.to_string()))
    }

    /// Concatenated text of every descendant text node
    pub fn element_text(element: &ElementRef<'_>) -> String {
        element.text().collect()
    }
}
