//! Error types for webdoc-reader
//!
//! Every failure aborts the whole `load_data` call. Nothing is retried and
//! nothing is recovered locally, so each variant carries enough context (the
//! offending URL, the missing selector) to diagnose the batch from the error
//! alone.

use thiserror::Error;

/// The main error type for webdoc-reader operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required capability is unavailable or the reader was set up wrong
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The URL could not be retrieved (invalid URL, DNS, connection, timeout)
    #[error("Failed to fetch {url}: {message}")]
    Fetch {
        /// URL that failed
        url: String,
        /// Underlying transport error
        message: String,
    },

    /// The response body could not be parsed into a page
    #[error("Failed to parse page at {url}: {reason}")]
    Parse {
        /// URL whose body was rejected
        url: String,
        /// Why the body was rejected
        reason: String,
    },

    /// A site-specific strategy could not find the structure it expects
    #[error("Extraction failed for {url}: {source}")]
    Extraction {
        /// URL whose page did not match the strategy
        url: String,
        /// Strategy failure
        #[source]
        source: ExtractionError,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by extraction strategies
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// Element not found
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Invalid selector
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}

/// Result type alias for webdoc-reader operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error from a string
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Error::Configuration(msg.into())
    }

    /// Create a fetch error for `url`
    pub fn fetch<U: Into<String>, M: ToString>(url: U, message: M) -> Self {
        Error::Fetch {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// URL the error is attributed to, if any
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::Fetch { url, .. } | Error::Parse { url, .. } | Error::Extraction { url, .. } => {
                Some(url)
            }
            _ => None,
        }
    }
}
