//! Shared HTTP session for one batch of fetches

use crate::error::{Error, Result};
use crate::reader::config::ExtractorConfig;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use std::fmt;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// HTTP Basic Authentication credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create credentials
    pub fn new<U: Into<String>, P: Into<String>>(username: U, password: P) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Credentials only when both parts are present and non-empty
    pub fn from_parts(username: Option<&str>, password: Option<&str>) -> Option<Self> {
        match (username, password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Some(Self::new(u, p)),
            _ => None,
        }
    }

    /// Username
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// A fetched page body
#[derive(Debug)]
pub struct FetchedPage {
    /// Parsed request URL
    pub url: Url,
    /// HTTP status code
    pub status: u16,
    /// Decoded response body
    pub body: String,
}

impl FetchedPage {
    /// Whether the server answered with a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Charset parameter of a `Content-Type` value, if any
pub fn declared_charset(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches('"').trim();
        (!value.is_empty()).then_some(value)
    })
}

fn is_utf8_label(charset: &str) -> bool {
    charset.eq_ignore_ascii_case("utf-8") || charset.eq_ignore_ascii_case("utf8")
}

/// Connection pool plus optional credentials, reused for every URL of a batch
#[derive(Debug, Clone)]
pub struct Session {
    client: reqwest::Client,
    credentials: Option<Credentials>,
}

impl Session {
    /// Build the HTTP client described by `config`
    pub fn build_client(config: &ExtractorConfig) -> Result<reqwest::Client> {
        let redirect = if config.max_redirects == 0 {
            Policy::none()
        } else {
            Policy::limited(config.max_redirects)
        };
        reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.as_str())
            .redirect(redirect)
            .build()
            .map_err(|e| Error::configuration(format!("failed to build HTTP client: {e}")))
    }

    /// Session over an existing client
    pub fn new(client: reqwest::Client, credentials: Option<Credentials>) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// Whether requests carry Basic Authentication
    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    /// GET `url` and decode the whole body.
    ///
    /// Invalid URLs and transport failures become [`Error::Fetch`]. Non-success
    /// statuses are returned like any other response. A body declared in a
    /// non-UTF-8 charset is decoded from that charset; otherwise the body must
    /// be valid UTF-8 or the call fails with [`Error::Parse`].
    pub async fn get(&self, url: &str) -> Result<FetchedPage> {
        let parsed = Url::parse(url).map_err(|e| Error::fetch(url, format!("invalid url: {e}")))?;

        let mut request = self.client.get(parsed.clone());
        if let Some(creds) = &self.credentials {
            request = request.basic_auth(&creds.username, Some(&creds.password));
        }

        let response = request.send().await.map_err(|e| Error::fetch(url, e))?;
        let status = response.status().as_u16();
        let charset = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(declared_charset)
            .map(str::to_string);

        let body = match charset {
            Some(label) if !is_utf8_label(&label) => {
                debug!("Decoding {} as {}", url, label);
                response.text().await.map_err(|e| Error::fetch(url, e))?
            }
            _ => {
                let bytes = response.bytes().await.map_err(|e| Error::fetch(url, e))?;
                String::from_utf8(bytes.to_vec()).map_err(|e| Error::Parse {
                    url: url.to_string(),
                    reason: format!("body is not valid UTF-8: {}", e.utf8_error()),
                })?
            }
        };
        debug!("Fetched {} ({} bytes, HTTP {})", url, body.len(), status);

        Ok(FetchedPage {
            url: parsed,
            status,
            body,
        })
    }
}
