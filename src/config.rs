//! Client configuration.
//!
//! Every value has a default pointing at the production Deezer hosts.
//! [`Config::from_env`] lets the environment override any of them, which is
//! how the CLI and tests redirect traffic.

use std::env;
use std::time::Duration;

use crate::error::{DeezerError, Result};

/// Base URL for the Deezer REST API.
pub const DEFAULT_API_URL: &str = "https://api.deezer.com";

/// Base URL for the OAuth endpoints.
pub const DEFAULT_CONNECT_URL: &str = "https://connect.deezer.com/oauth";

/// Player widget endpoint.
pub const DEFAULT_WIDGET_URL: &str = "https://www.deezer.com/plugins/player";

/// Upper bound on pages followed by a single paginated fetch.
pub const DEFAULT_MAX_PAGES: usize = 1000;

const DEFAULT_USER_AGENT: &str = concat!("deezer-sdk/", env!("CARGO_PKG_VERSION"));

/// Settings shared by the session and its transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// REST API base, without trailing slash.
    pub api_url: String,
    /// OAuth base, without trailing slash.
    pub connect_url: String,
    /// Player widget endpoint.
    pub widget_url: String,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Optional per-request timeout. `None` keeps reqwest's default.
    pub timeout: Option<Duration>,
    /// Maximum number of pages a cursor walk may visit.
    pub max_pages: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            connect_url: DEFAULT_CONNECT_URL.to_string(),
            widget_url: DEFAULT_WIDGET_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl Config {
    /// Build a configuration from defaults overridden by `DEEZER_*` variables.
    ///
    /// Recognized: `DEEZER_API_URL`, `DEEZER_CONNECT_URL`, `DEEZER_WIDGET_URL`,
    /// `DEEZER_MAX_PAGES`, `DEEZER_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("DEEZER_API_URL") {
            config.api_url = trim_base(&url);
        }
        if let Some(url) = lookup("DEEZER_CONNECT_URL") {
            config.connect_url = trim_base(&url);
        }
        if let Some(url) = lookup("DEEZER_WIDGET_URL") {
            config.widget_url = url;
        }
        if let Some(pages) = lookup("DEEZER_MAX_PAGES") {
            config.max_pages = parse_number("DEEZER_MAX_PAGES", &pages)?;
            if config.max_pages == 0 {
                return Err(DeezerError::Config(
                    "DEEZER_MAX_PAGES must be at least 1".to_string(),
                ));
            }
        }
        if let Some(secs) = lookup("DEEZER_TIMEOUT_SECS") {
            let secs: u64 = parse_number("DEEZER_TIMEOUT_SECS", &secs)?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| DeezerError::Config(format!("{} is not a valid number: {:?}", key, value)))
}
