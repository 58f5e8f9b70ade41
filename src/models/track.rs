//! Track model.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::album::Album;
use super::artist::Artist;
use super::common::{self, ReleaseDate, Reference};
use crate::api::Deezer;
use crate::error::{DeezerError, Result};

const ENTITY: &str = "track";

#[derive(Debug, Deserialize)]
struct RawTrack {
    #[serde(deserialize_with = "common::id")]
    id: u64,
    title: String,
    duration: u32,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    album: Option<Reference>,
    #[serde(default)]
    artist: Option<Reference>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// A track as returned by any tracks listing or by `/track/{id}`.
#[derive(Debug, Clone)]
pub struct Track {
    /// Deezer track ID.
    pub id: u64,

    /// Track title.
    pub title: String,

    /// Duration in seconds.
    pub duration: u32,

    /// Release date, only present on full track objects.
    pub release_date: Option<ReleaseDate>,

    /// ID of the album containing this track.
    pub album_id: Option<u64>,

    /// Title of the album containing this track.
    pub album_title: Option<String>,

    /// ID of the main artist.
    pub artist_id: Option<u64>,

    session: Deezer,
}

impl Track {
    /// Build a track from a JSON object.
    pub fn from_json(json: &Value, session: &Deezer) -> Result<Self> {
        Self::decode(json, session, None, None)
    }

    /// Build a track listed under an album.
    ///
    /// Album track rows carry no nested `album` object, so the album's own id
    /// and title are used unless the row provides them.
    pub fn from_album_row(
        json: &Value,
        session: &Deezer,
        album_id: u64,
        album_title: &str,
    ) -> Result<Self> {
        Self::decode(json, session, Some(album_id), Some(album_title))
    }

    fn decode(
        json: &Value,
        session: &Deezer,
        album_id: Option<u64>,
        album_title: Option<&str>,
    ) -> Result<Self> {
        let raw: RawTrack = common::decode(ENTITY, json)?;
        common::log_ignored(ENTITY, &raw.extra);

        let album = raw.album.unwrap_or_default();

        Ok(Self {
            id: raw.id,
            title: raw.title,
            duration: raw.duration,
            release_date: raw.release_date.as_deref().and_then(ReleaseDate::parse),
            album_id: album.id.or(album_id),
            album_title: album.title.or_else(|| album_title.map(str::to_string)),
            artist_id: raw.artist.and_then(|a| a.id),
            session: session.clone(),
        })
    }

    /// Get duration formatted as MM:SS.
    pub fn duration_formatted(&self) -> String {
        format!("{:02}:{:02}", self.duration / 60, self.duration % 60)
    }

    /// Fetch the album containing this track.
    pub async fn get_album(&self) -> Result<Album> {
        let album_id = self.album_id.ok_or(DeezerError::MissingReference("album"))?;
        self.session.get_album(album_id).await
    }

    /// Fetch the main artist of this track.
    pub async fn get_artist(&self) -> Result<Artist> {
        let artist_id = self
            .artist_id
            .ok_or(DeezerError::MissingReference("artist"))?;
        self.session.get_artist(artist_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::mock::MockTransport;
    use crate::config::Config;
    use serde_json::json;
    use std::sync::Arc;

    fn session(mock: MockTransport) -> (Deezer, Arc<MockTransport>) {
        let mock = Arc::new(mock);
        let dz = Deezer::with_transport("app", "tok", Config::default(), mock.clone());
        (dz, mock)
    }

    #[test]
    fn test_track_from_full_object() {
        let (dz, _) = session(MockTransport::new());
        let json = json!({
            "id": 3135556,
            "title": "Harder, Better, Faster, Stronger",
            "duration": 224,
            "release_date": "2005-01-24",
            "explicit_lyrics": false,
            "album": {"id": 302127, "title": "Discovery", "cover": "x"},
            "artist": {"id": 27, "name": "Daft Punk"}
        });

        let track = Track::from_json(&json, &dz).unwrap();
        assert_eq!(track.id, 3135556);
        assert_eq!(track.duration, 224);
        assert_eq!(track.duration_formatted(), "03:44");
        assert_eq!(track.album_id, Some(302127));
        assert_eq!(track.album_title.as_deref(), Some("Discovery"));
        assert_eq!(track.artist_id, Some(27));
        assert_eq!(track.release_date.unwrap().year, 2005);
    }

    #[test]
    fn test_album_row_fallbacks() {
        let (dz, _) = session(MockTransport::new());
        let json = json!({"id": 1, "title": "Intro", "duration": 60});

        let track = Track::from_album_row(&json, &dz, 99, "Some Album").unwrap();
        assert_eq!(track.album_id, Some(99));
        assert_eq!(track.album_title.as_deref(), Some("Some Album"));
        assert_eq!(track.artist_id, None);
        assert!(track.release_date.is_none());
    }

    #[test]
    fn test_nested_album_overrides_fallback() {
        let (dz, _) = session(MockTransport::new());
        let json = json!({"id": 1, "title": "Intro", "duration": 60, "album": {"id": 5}});

        let track = Track::from_album_row(&json, &dz, 99, "Some Album").unwrap();
        assert_eq!(track.album_id, Some(5));
        assert_eq!(track.album_title.as_deref(), Some("Some Album"));
    }

    #[test]
    fn test_missing_title_is_malformed() {
        let (dz, _) = session(MockTransport::new());
        let err = Track::from_json(&json!({"id": 1, "duration": 3}), &dz).unwrap_err();
        assert!(matches!(
            err,
            DeezerError::MalformedResponse { entity: "track", .. }
        ));
    }

    #[tokio::test]
    async fn test_get_artist_follows_reference() {
        let (dz, mock) = session(MockTransport::new().route_json(
            "https://api.deezer.com/artist/27",
            json!({
                "id": 27,
                "name": "Daft Punk",
                "picture": "https://api.deezer.com/artist/27/image",
                "tracklist": "https://api.deezer.com/artist/27/top?limit=50"
            }),
        ));
        let track = Track::from_json(
            &json!({"id": 1, "title": "t", "duration": 1, "artist": {"id": 27}}),
            &dz,
        )
        .unwrap();

        let artist = track.get_artist().await.unwrap();
        assert_eq!(artist.name, "Daft Punk");

        // Expand operations are not cached.
        track.get_artist().await.unwrap();
        assert_eq!(mock.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_get_album_without_id() {
        let (dz, mock) = session(MockTransport::new());
        let track = Track::from_json(&json!({"id": 1, "title": "t", "duration": 1}), &dz).unwrap();

        let err = track.get_album().await.unwrap_err();
        assert!(matches!(err, DeezerError::MissingReference("album")));
        assert!(mock.calls().is_empty());
    }
}
