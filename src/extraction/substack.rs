//! Substack post extraction

use crate::document::Metadata;
use crate::error::ExtractionError;
use crate::extraction::content::ContentExtractor;
use crate::extraction::strategy::ExtractionStrategy;
use scraper::Html;

const TITLE_SELECTOR: &str = "h1.post-title";
const SUBTITLE_SELECTOR: &str = "h3.subtitle";
const AUTHOR_SELECTOR: &str = "span.byline-names";
const BODY_SELECTOR: &str = "div.available-content";

/// Built-in strategy for Substack posts.
///
/// Every element is required; a page missing any of them fails with
/// [`ExtractionError::ElementNotFound`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstackStrategy;

impl SubstackStrategy {
    /// Hostname the strategy is registered under
    pub const HOSTNAME: &'static str = "substack.com";
    /// Metadata key for the post title
    pub const TITLE_KEY: &'static str = "Title of this Substack post";
    /// Metadata key for the subtitle
    pub const SUBTITLE_KEY: &'static str = "Subtitle";
    /// Metadata key for the byline
    pub const AUTHOR_KEY: &'static str = "Author";
}

impl ExtractionStrategy for SubstackStrategy {
    fn extract(&self, page: &Html) -> Result<(String, Metadata), ExtractionError> {
        let mut metadata = Metadata::new();
        metadata.insert(
            Self::TITLE_KEY.to_string(),
            ContentExtractor::select_text(page, TITLE_SELECTOR)?,
        );
        metadata.insert(
            Self::SUBTITLE_KEY.to_string(),
            ContentExtractor::select_text(page, SUBTITLE_SELECTOR)?,
        );
        metadata.insert(
            Self::AUTHOR_KEY.to_string(),
            ContentExtractor::select_text(page, AUTHOR_SELECTOR)?,
        );
        let text = ContentExtractor::select_text(page, BODY_SELECTOR)?;
        Ok((text, metadata))
    }
}
