//! HTTP transport used by the session.
//!
//! The [`Transport`] trait is the only place where requests leave the
//! process. [`HttpTransport`] implements it on top of `reqwest`; tests swap
//! in an in-memory implementation.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::Config;
use crate::error::Result;

/// A GET-only transport returning the raw response body.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Issue a GET request to `url` with `query` appended, returning the body.
    ///
    /// Network failures and non-2xx statuses are errors.
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String>;
}

/// [`Transport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport using the user agent and timeout from `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wrap an already configured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

/// Strip the `access_token` query pair from `url` so it can be logged.
///
/// Deezer's `next` links embed the caller's token in their query string.
pub(crate) fn redact_token(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };

    let kept: Vec<&str> = query
        .split('&')
        .filter(|pair| pair.split('=').next() != Some("access_token"))
        .collect();

    if kept.is_empty() {
        base.to_string()
    } else {
        format!("{}?{}", base, kept.join("&"))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String> {
        debug!("GET {}", redact_token(url));

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }
}
