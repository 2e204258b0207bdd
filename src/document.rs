//! Normalized document type handed to the index builder

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// String-to-string metadata attached to a document
pub type Metadata = BTreeMap<String, String>;

/// Metadata key holding the source URL of a web document
pub const URL_KEY: &str = "URL";

/// A unit of ingested content: text plus metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    text: String,
    metadata: Metadata,
}

impl Document {
    /// Create a document from extracted text and its metadata
    pub fn new<S: Into<String>>(text: S, metadata: Metadata) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }

    /// Extracted body content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Metadata map
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Source URL, present on every document produced from a web page
    pub fn url(&self) -> Option<&str> {
        self.metadata.get(URL_KEY).map(String::as_str)
    }

    /// Split into owned text and metadata
    pub fn into_parts(self) -> (String, Metadata) {
        (self.text, self.metadata)
    }
}
