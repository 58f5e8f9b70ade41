//! Authenticated Deezer API session.
//!
//! [`Deezer`] holds the application id and the user's access token and
//! performs every request made on the user's behalf. Entities built by a
//! session keep a clone of it for their expand operations.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, warn};

use super::oauth::{self, OAuthToken};
use super::transport::{redact_token, HttpTransport, Transport};
use crate::config::{Config, DEFAULT_CONNECT_URL};
use crate::error::{DeezerError, Result};
use crate::models::common::data_rows;
use crate::models::{Album, Artist, Playlist, Track};
use crate::widget::{self, WidgetContent, WidgetSize};

/// Authenticated Deezer API client.
///
/// Cloning is cheap: clones share the transport and configuration.
///
/// # Example
///
/// ```rust,no_run
/// use deezer_sdk::Deezer;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let dz = Deezer::new("your_app_id", "your_access_token")?;
///     for track in dz.get_flow().await? {
///         println!("{} ({})", track.title, track.duration_formatted());
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Deezer {
    app_id: String,
    access_token: String,
    config: Arc<Config>,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Deezer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deezer")
            .field("app_id", &self.app_id)
            .field("access_token", &"<redacted>")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Deezer {
    /// Create a session against the production API.
    pub fn new(app_id: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        Self::with_config(app_id, access_token, Config::default())
    }

    /// Create a session with a custom configuration.
    pub fn with_config(
        app_id: impl Into<String>,
        access_token: impl Into<String>,
        config: Config,
    ) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(
            app_id,
            access_token,
            config,
            Arc::new(transport),
        ))
    }

    /// Create a session on top of an arbitrary transport.
    pub fn with_transport(
        app_id: impl Into<String>,
        access_token: impl Into<String>,
        config: Config,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            access_token: access_token.into(),
            config: Arc::new(config),
            transport,
        }
    }

    /// Application id this session was created with.
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the URL the user opens to log in and grant access to `app_id`.
    pub fn get_oauth_login_url(app_id: &str, redirect_uri: &str) -> String {
        oauth::login_url(DEFAULT_CONNECT_URL, app_id, redirect_uri)
    }

    /// Exchange the `code` received on the redirect URI for an access token.
    pub async fn get_oauth_token(app_id: &str, app_secret: &str, code: &str) -> Result<OAuthToken> {
        let transport = HttpTransport::new(&Config::default())?;
        oauth::exchange_code(&transport, DEFAULT_CONNECT_URL, app_id, app_secret, code).await
    }

    /// Login URL for this session's application, on the configured OAuth host.
    pub fn oauth_login_url(&self, redirect_uri: &str) -> String {
        oauth::login_url(&self.config.connect_url, &self.app_id, redirect_uri)
    }

    /// Exchange `code` through this session's transport and OAuth host.
    pub async fn exchange_oauth_code(&self, app_secret: &str, code: &str) -> Result<OAuthToken> {
        oauth::exchange_code(
            self.transport.as_ref(),
            &self.config.connect_url,
            &self.app_id,
            app_secret,
            code,
        )
        .await
    }

    /// Turn a relative API path into a full URL; absolute URLs pass through.
    fn resolve(&self, path_or_url: &str) -> String {
        if path_or_url.starts_with("http://") || path_or_url.starts_with("https://") {
            path_or_url.to_string()
        } else if path_or_url.starts_with('/') {
            format!("{}{}", self.config.api_url, path_or_url)
        } else {
            format!("{}/{}", self.config.api_url, path_or_url)
        }
    }

    /// Perform an authenticated GET and decode the JSON body.
    ///
    /// `path_or_url` is either a path relative to the API root (`/user/me/flow`)
    /// or an absolute URL such as a `next` or `tracklist` link.
    pub async fn req_get(&self, path_or_url: &str) -> Result<Value> {
        let url = self.resolve(path_or_url);
        let body = self
            .transport
            .get(&url, &[("access_token", self.access_token.as_str())])
            .await?;
        let data: Value = serde_json::from_str(&body)?;

        // Deezer reports errors in the body with a 200 status
        if let Some(error) = data.get("error") {
            let error_msg = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown error");
            error!("Deezer API error on {}: {}", redact_token(&url), error_msg);
            return Err(DeezerError::ApiError(error_msg.to_string()));
        }

        Ok(data)
    }

    /// Get the user's flow.
    pub async fn get_flow(&self) -> Result<Vec<Track>> {
        let response = self.req_get("/user/me/flow").await?;
        data_rows("track", &response)?
            .iter()
            .map(|row| Track::from_json(row, self))
            .collect()
    }

    /// Get the user's playlists.
    pub async fn get_my_playlists(&self) -> Result<Vec<Playlist>> {
        let response = self.req_get("/user/me/playlists").await?;
        data_rows("playlist", &response)?
            .iter()
            .map(|row| Playlist::from_json(row, self))
            .collect()
    }

    /// Get every artist the user follows, following pagination to the end.
    pub async fn get_my_favorite_artists(&self) -> Result<Vec<Artist>> {
        self.collect_pages("artist", "/user/me/artists", |row| {
            Artist::from_json(row, self)
        })
        .await
    }

    /// Get an artist by ID.
    pub async fn get_artist(&self, artist_id: u64) -> Result<Artist> {
        let response = self.req_get(&format!("/artist/{}", artist_id)).await?;
        Artist::from_json(&response, self)
    }

    /// Get an album by ID.
    pub async fn get_album(&self, album_id: u64) -> Result<Album> {
        let response = self.req_get(&format!("/album/{}", album_id)).await?;
        Album::from_json(&response, self)
    }

    /// Get a track by ID.
    pub async fn get_track(&self, track_id: u64) -> Result<Track> {
        let response = self.req_get(&format!("/track/{}", track_id)).await?;
        Track::from_json(&response, self)
    }

    /// Build a player widget URL for a list of tracks or a playlist.
    pub fn get_widget(&self, content: WidgetContent<'_>, size: WidgetSize) -> String {
        widget::widget_url(&self.config.widget_url, &self.app_id, content, size)
    }

    /// Walk a cursor-paginated listing, mapping every row of every page.
    ///
    /// Stops when a page has no `next`. Fails when `next` points at a page
    /// already visited or when more than `max_pages` pages would be fetched.
    async fn collect_pages<T, F>(&self, entity: &'static str, first: &str, mut map: F) -> Result<Vec<T>>
    where
        F: FnMut(&Value) -> Result<T>,
    {
        let mut items = Vec::new();
        let mut visited = HashSet::new();
        let mut target = self.resolve(first);
        visited.insert(target.clone());

        for page in 1.. {
            let response = self.req_get(&target).await?;
            for row in data_rows(entity, &response)? {
                items.push(map(row)?);
            }

            let next = match response.get("next").and_then(Value::as_str) {
                Some(next) if !next.is_empty() => next.to_string(),
                _ => {
                    debug!("Fetched {} {}s over {} page(s)", items.len(), entity, page);
                    break;
                }
            };

            if page >= self.config.max_pages {
                let shown = redact_token(first);
                warn!("Giving up on {} after {} pages", shown, page);
                return Err(DeezerError::Pagination(format!(
                    "more than {} pages for {}",
                    self.config.max_pages, shown
                )));
            }
            if !visited.insert(next.clone()) {
                let shown = redact_token(&next);
                warn!("Pagination cycle detected at {}", shown);
                return Err(DeezerError::Pagination(format!(
                    "next page {} was already visited",
                    shown
                )));
            }
            target = next;
        }

        Ok(items)
    }
}
