//! Hostname-dispatched web page reader

use crate::document::{Document, Metadata, URL_KEY};
use crate::error::{Error, Result};
use crate::extraction::{ContentExtractor, StrategyTable};
use crate::reader::config::ExtractorConfig;
use crate::reader::session::{Credentials, Session};
use tracing::{debug, info, instrument, warn};

/// Turns web pages into [`Document`]s using per-hostname strategies.
///
/// The strategy table is fixed at construction. Each [`load_data`] call opens
/// one [`Session`] for the whole batch and processes URLs strictly in order;
/// the first failure aborts the call and no partial results are returned.
///
/// [`load_data`]: WebDocumentExtractor::load_data
#[derive(Debug, Clone)]
pub struct WebDocumentExtractor {
    strategies: StrategyTable,
    client: reqwest::Client,
    config: ExtractorConfig,
}

impl WebDocumentExtractor {
    /// Create an extractor with the default HTTP configuration.
    ///
    /// `None` selects [`StrategyTable::defaults`]. A supplied table is used as
    /// is; callers wanting defaults plus their own entries merge explicitly.
    pub fn new(strategies: Option<StrategyTable>) -> Result<Self> {
        Self::with_config(strategies, ExtractorConfig::default())
    }

    /// Create an extractor with an explicit HTTP configuration
    pub fn with_config(strategies: Option<StrategyTable>, config: ExtractorConfig) -> Result<Self> {
        let strategies = strategies.unwrap_or_else(StrategyTable::defaults);
        strategies.validate()?;
        let client = Session::build_client(&config)?;
        Ok(Self {
            strategies,
            client,
            config,
        })
    }

    /// Effective strategy table
    pub fn strategies(&self) -> &StrategyTable {
        &self.strategies
    }

    /// HTTP configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Fetch and extract every URL in `urls`, in order.
    ///
    /// `custom_hostname` replaces hostname detection for the whole batch; an
    /// empty or blank override counts as absent.
    /// When both `username` and `password` are given every request carries
    /// HTTP Basic Authentication.
    #[instrument(skip_all, fields(urls = urls.len(), custom_hostname = ?custom_hostname))]
    pub async fn load_data<S: AsRef<str>>(
        &self,
        urls: &[S],
        custom_hostname: Option<&str>,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Vec<Document>> {
        if urls.is_empty() {
            return Err(Error::configuration("load_data requires at least one url"));
        }

        let session = Session::new(
            self.client.clone(),
            Credentials::from_parts(username, password),
        );
        info!(
            "Loading {} url(s), authenticated={}",
            urls.len(),
            session.is_authenticated()
        );

        let custom_hostname = custom_hostname.map(str::trim).filter(|host| !host.is_empty());

        let mut documents = Vec::with_capacity(urls.len());
        for url in urls {
            let url = url.as_ref();
            let page = session.get(url).await?;
            if !page.is_success() {
                warn!("{} returned HTTP {}", url, page.status);
            }
            let hostname = custom_hostname
                .or_else(|| page.url.host_str())
                .unwrap_or_default();
            documents.push(self.extract_document(url, hostname, &page.body)?);
        }

        Ok(documents)
    }

    /// Build the document for one fetched body
    pub(crate) fn extract_document(&self, url: &str, hostname: &str, body: &str) -> Result<Document> {
        let page = ContentExtractor::parse(body);

        let mut metadata = Metadata::new();
        metadata.insert(URL_KEY.to_string(), url.to_string());

        let text = match self.strategies.resolve(hostname) {
            Some((key, strategy)) => {
                debug!("{} matched strategy {}", url, key);
                let (text, extra) = strategy.extract(&page).map_err(|source| Error::Extraction {
                    url: url.to_string(),
                    source,
                })?;
                metadata.extend(extra);
                text
            }
            None => {
                debug!("{} has no strategy for host {:?}, using page text", url, hostname);
                ContentExtractor::visible_text(&page)
            }
        };

        debug!("Extracted {} chars from {}", text.chars().count(), url);
        Ok(Document::new(text, metadata))
    }
}
