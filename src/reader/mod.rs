//! Document readers
//!
//! The web reader fetches pages over HTTP and dispatches on hostname; the
//! directory reader loads local files.

pub mod config;
pub mod directory;
pub mod session;
pub mod web;

pub use config::{ExtractorConfig, ExtractorConfigBuilder};
pub use directory::DirectoryReader;
pub use session::{Credentials, FetchedPage, Session};
pub use web::WebDocumentExtractor;
