//! webdoc-reader - Web Pages to Indexable Documents
//!
//! This crate turns web pages (and local files) into normalized documents,
//! text plus string metadata, ready to hand to an external indexing or
//! question-answering system.
//!
//! # Architecture
//!
//! ```text
//! URLs ──▶ Session (reqwest, Basic auth) ──▶ HTML parse (scraper)
//!                                                  │
//!                                                  ▼
//!                                        StrategyTable lookup
//!                                          │              │
//!                                    hostname hit     hostname miss
//!                                          │              │
//!                                          ▼              ▼
//!                                  site strategy     visible text
//!                                          │              │
//!                                          └──────┬───────┘
//!                                                 ▼
//!                                       Document { text, metadata }
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use webdoc_reader::WebDocumentExtractor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let extractor = WebDocumentExtractor::new(None)?;
//!     let docs = extractor
//!         .load_data(&["https://example.substack.com/p/my-post"], None, None, None)
//!         .await?;
//!
//!     for doc in &docs {
//!         println!("{:?}: {} chars", doc.url(), doc.text().len());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod document;
pub mod error;
pub mod extraction;
pub mod reader;

// Re-exports for convenience
pub use document::{Document, Metadata, URL_KEY};
pub use error::{Error, ExtractionError, Result};
pub use extraction::{ContentExtractor, ExtractionStrategy, StrategyTable, SubstackStrategy};
pub use reader::{Credentials, DirectoryReader, ExtractorConfig, WebDocumentExtractor};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
