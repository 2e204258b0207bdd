//! HTTP configuration for the web reader

/// Default user agent sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("webdoc-reader/", env!("CARGO_PKG_VERSION"));

/// Configuration for the HTTP session used by a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Per-request timeout in milliseconds (default: 30000)
    pub timeout_ms: u64,
    /// User agent string (default: `webdoc-reader/<version>`)
    pub user_agent: String,
    /// Maximum redirects followed per request (default: 10)
    pub max_redirects: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: 10,
        }
    }
}

impl ExtractorConfig {
    /// Create a new config builder
    pub fn builder() -> ExtractorConfigBuilder {
        ExtractorConfigBuilder::default()
    }
}

/// Builder for ExtractorConfig
#[derive(Default)]
pub struct ExtractorConfigBuilder {
    config: ExtractorConfig,
}

impl ExtractorConfigBuilder {
    /// Set request timeout
    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.config.timeout_ms = ms;
        self
    }

    /// Set user agent
    pub fn user_agent<S: Into<String>>(mut self, ua: S) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    /// Set redirect limit; 0 disables redirects
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.config.max_redirects = max;
        self
    }

    /// Build the config
    pub fn build(self) -> ExtractorConfig {
        self.config
    }
}
