//! Hostname-keyed extraction strategies and their registry

use crate::document::Metadata;
use crate::error::{Error, ExtractionError, Result};
use crate::extraction::substack::SubstackStrategy;
use scraper::Html;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Site-specific rule for pulling text and metadata out of a parsed page
pub trait ExtractionStrategy: Send + Sync {
    /// Extract `(text, metadata)` from the page
    fn extract(&self, page: &Html) -> std::result::Result<(String, Metadata), ExtractionError>;
}

impl<F> ExtractionStrategy for F
where
    F: Fn(&Html) -> std::result::Result<(String, Metadata), ExtractionError> + Send + Sync,
{
    fn extract(&self, page: &Html) -> std::result::Result<(String, Metadata), ExtractionError> {
        self(page)
    }
}

/// Immutable mapping from hostname to extraction strategy.
///
/// Hostnames are stored lowercased. [`StrategyTable::with`] replaces any
/// existing entry for the same hostname.
#[derive(Clone, Default)]
pub struct StrategyTable {
    strategies: HashMap<String, Arc<dyn ExtractionStrategy>>,
}

impl StrategyTable {
    /// Empty table: every page falls back to whole-page text
    pub fn empty() -> Self {
        Self::default()
    }

    /// Built-in strategies
    pub fn defaults() -> Self {
        Self::empty().with(SubstackStrategy::HOSTNAME, SubstackStrategy)
    }

    /// Add or override the strategy for `hostname`
    pub fn with<H, S>(mut self, hostname: H, strategy: S) -> Self
    where
        H: AsRef<str>,
        S: ExtractionStrategy + 'static,
    {
        self.strategies
            .insert(hostname.as_ref().to_ascii_lowercase(), Arc::new(strategy));
        self
    }

    /// Copy every entry of `other` into this table, `other` winning on conflict
    pub fn merge(mut self, other: StrategyTable) -> Self {
        self.strategies.extend(other.strategies);
        self
    }

    /// Whether a strategy is registered under exactly `hostname`
    pub fn contains(&self, hostname: &str) -> bool {
        self.strategies.contains_key(&hostname.to_ascii_lowercase())
    }

    /// Registered hostnames, sorted
    pub fn hostnames(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.strategies.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered strategies
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// True when no strategy is registered
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Resolve the strategy for `hostname`.
    ///
    /// Tries the exact hostname first, then each parent domain, so
    /// `example.substack.com` resolves to an entry for `substack.com`.
    /// Returns the matched key alongside the strategy.
    pub fn resolve(&self, hostname: &str) -> Option<(&str, &dyn ExtractionStrategy)> {
        let host = hostname.trim_end_matches('.').to_ascii_lowercase();
        let mut candidate = host.as_str();
        loop {
            if let Some((key, strategy)) = self.strategies.get_key_value(candidate) {
                return Some((key.as_str(), strategy.as_ref()));
            }
            match candidate.split_once('.') {
                Some((_, parent)) if !parent.is_empty() => candidate = parent,
                _ => return None,
            }
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.strategies.keys().any(|h| h.trim().is_empty()) {
            return Err(Error::configuration(
                "strategy table contains an empty hostname",
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for StrategyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyTable")
            .field("hostnames", &self.hostnames())
            .finish()
    }
}
