//! Runtime configuration for the upstream endpoints
//!
//! Values come from command-line flags first, then environment variables, then
//! the built-in defaults.

use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_SEARCHFOX_BASE_URL: &str = "https://searchfox.org";
pub const DEFAULT_RAW_CONTENT_BASE_URL: &str = "https://raw.githubusercontent.com";

pub const ENV_SEARCHFOX_BASE_URL: &str = "SEARCHFOX_MCP_BASE_URL";
pub const ENV_RAW_CONTENT_BASE_URL: &str = "SEARCHFOX_MCP_RAW_CONTENT_URL";
pub const ENV_REQUEST_TIMEOUT: &str = "SEARCHFOX_MCP_REQUEST_TIMEOUT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Searchfox instance serving `/{repo}/search` and `/{repo}/source/...`
    pub searchfox_base_url: String,
    /// Host serving `/{owner}/{repo}/{branch}/{path}` raw file content
    pub raw_content_base_url: String,
    /// None leaves the HTTP client's own behaviour in place
    pub request_timeout: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            searchfox_base_url: DEFAULT_SEARCHFOX_BASE_URL.to_string(),
            raw_content_base_url: DEFAULT_RAW_CONTENT_BASE_URL.to_string(),
            request_timeout: None,
        }
    }
}

impl ServerConfig {
    pub fn new<T1: Into<String>, T2: Into<String>>(
        searchfox_base_url: T1,
        raw_content_base_url: T2,
    ) -> Self {
        Self {
            searchfox_base_url: trim_base_url(searchfox_base_url.into()),
            raw_content_base_url: trim_base_url(raw_content_base_url.into()),
            request_timeout: None,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Builds the configuration from explicit overrides, falling back to the
    /// environment and then to the defaults.
    pub fn resolve(
        searchfox_base_url: Option<String>,
        raw_content_base_url: Option<String>,
        request_timeout_secs: Option<u64>,
    ) -> Result<Self> {
        let searchfox_base_url = searchfox_base_url
            .or_else(|| std::env::var(ENV_SEARCHFOX_BASE_URL).ok())
            .unwrap_or_else(|| DEFAULT_SEARCHFOX_BASE_URL.to_string());

        let raw_content_base_url = raw_content_base_url
            .or_else(|| std::env::var(ENV_RAW_CONTENT_BASE_URL).ok())
            .unwrap_or_else(|| DEFAULT_RAW_CONTENT_BASE_URL.to_string());

        let request_timeout_secs = match request_timeout_secs {
            Some(secs) => Some(secs),
            None => match std::env::var(ENV_REQUEST_TIMEOUT) {
                Ok(value) => Some(value.trim().parse::<u64>().with_context(|| {
                    format!("{} must be a number of seconds, got '{}'", ENV_REQUEST_TIMEOUT, value)
                })?),
                Err(_) => None,
            },
        };

        let config = Self::new(searchfox_base_url, raw_content_base_url)
            .with_request_timeout(request_timeout_secs.map(Duration::from_secs));

        tracing::debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }

    /// Builds the HTTP client shared by the Searchfox and raw-content clients
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));

        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }

        builder.build().context("Failed to build HTTP client")
    }
}

fn trim_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
