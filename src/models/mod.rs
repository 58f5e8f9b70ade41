//! Entity views over Deezer API responses.
//!
//! Each entity is an immutable snapshot decoded from one JSON object. Entities
//! keep a handle to the [`Deezer`](crate::Deezer) session that built them so
//! related entities can be fetched on demand.

pub mod album;
pub mod artist;
pub mod common;
pub mod playlist;
pub mod track;

// Re-exports for convenience
pub use album::Album;
pub use artist::Artist;
pub use common::ReleaseDate;
pub use playlist::Playlist;
pub use track::Track;
