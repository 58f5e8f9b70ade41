//! # deezer-sdk
//!
//! A Rust client for the Deezer web API: the user's flow, playlists and
//! favorite artists, artist/album/track lookups, the OAuth login flow and
//! the embeddable player widget.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use deezer_sdk::{Deezer, OAuthToken};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Send the user here, then read `code` from the redirect
//!     println!("{}", Deezer::get_oauth_login_url("APP_ID", "https://example.com/cb"));
//!
//!     let token = match Deezer::get_oauth_token("APP_ID", "APP_SECRET", "CODE").await? {
//!         OAuthToken::Granted { access_token, .. } => access_token,
//!         OAuthToken::WrongCode => return Err("authorization code rejected".into()),
//!     };
//!
//!     let dz = Deezer::new("APP_ID", token)?;
//!     for artist in dz.get_my_favorite_artists().await? {
//!         let top = artist.get_tracks().await?;
//!         println!("{}: {} tracks", artist.name, top.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! Entities ([`Track`], [`Album`], [`Artist`], [`Playlist`]) are snapshots of
//! one response. Their `get_*` methods issue one more request each time they
//! are called; nothing is cached.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod widget;

pub use api::{Deezer, HttpTransport, OAuthToken, Transport};
pub use config::Config;
pub use error::DeezerError;
pub use models::{Album, Artist, Playlist, ReleaseDate, Track};
pub use widget::{WidgetContent, WidgetSize};
