//! HTTP client for the chart pages.

use std::time::Duration;

use url::Url;

use crate::{user_agent::get_user_agent, Error};

/// Request timeout used when `HOT100_TIMEOUT_SECS` is unset or invalid.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Transport settings for [`Client`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Reads `HOT100_TIMEOUT_SECS`, falling back to the default timeout.
    pub fn from_env() -> Self {
        Self {
            timeout: Duration::from_secs(env_u64("HOT100_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)),
        }
    }
}

/// HTTP client that downloads chart pages as HTML text.
///
/// Sends browser-like headers and a randomized user agent. A single
/// `reqwest::Client` is reused for every request so connections are pooled.
/// There is no retry here; callers decide what to do with a failure.
pub struct Client {
    http: reqwest::Client,
}

impl Client {
    /// Creates a client with the default timeout.
    pub fn new() -> Result<Self, Error> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client configured from the environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::with_config(ClientConfig::from_env())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http })
    }

    /// Fetches `url` and returns the response body as text.
    ///
    /// Non-success statuses become [`Error::HttpStatus`] with a truncated
    /// copy of the body.
    pub async fn get_html(&self, url: &str) -> Result<String, Error> {
        let target = Url::parse(url).map_err(|source| {
            tracing::error!("Invalid URL constructed: {}", url);
            Error::InvalidUrl {
                url: url.to_string(),
                source,
            }
        })?;

        tracing::debug!("GET {}", target);
        let resp = self
            .http
            .get(target)
            .header("accept", "text/html,application/xhtml+xml")
            .header("accept-language", "en-US,en;q=0.9")
            .header("upgrade-insecure-requests", "1")
            .header("cache-control", "no-cache")
            .header("pragma", "no-cache")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::Http(e)
            })?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(default)
}
