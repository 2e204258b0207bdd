//! Content extraction module
//!
//! Markup-to-text helpers, the hostname-keyed strategy registry and the
//! built-in site strategies.

pub mod content;
pub mod strategy;
pub mod substack;

pub use content::ContentExtractor;
pub use strategy::{ExtractionStrategy, StrategyTable};
pub use substack::SubstackStrategy;
