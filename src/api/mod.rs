//! API clients for Deezer.
//!
//! - [`Deezer`]: authenticated session for the REST API
//! - [`oauth`]: login URL and code exchange
//! - [`transport`]: the HTTP seam every request goes through

pub mod oauth;
pub mod session;
pub mod transport;

pub use oauth::OAuthToken;
pub use session::Deezer;
pub use transport::{HttpTransport, Transport};
