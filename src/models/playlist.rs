//! Playlist model.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::common;
use super::track::Track;
use crate::api::Deezer;
use crate::error::Result;

const ENTITY: &str = "playlist";

#[derive(Debug, Deserialize)]
struct RawPlaylist {
    #[serde(deserialize_with = "common::id")]
    id: u64,
    title: String,
    picture: String,
    is_loved_track: bool,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// A playlist owned or followed by the user.
#[derive(Debug, Clone)]
pub struct Playlist {
    /// Deezer playlist ID.
    pub id: u64,

    /// Playlist title.
    pub title: String,

    /// Picture URL.
    pub picture: String,

    /// Whether this is the user's implicit "loved tracks" playlist.
    pub is_loved_track: bool,

    session: Deezer,
}

impl Playlist {
    /// Build a playlist from a JSON object.
    pub fn from_json(json: &Value, session: &Deezer) -> Result<Self> {
        let raw: RawPlaylist = common::decode(ENTITY, json)?;
        common::log_ignored(ENTITY, &raw.extra);

        Ok(Self {
            id: raw.id,
            title: raw.title,
            picture: raw.picture,
            is_loved_track: raw.is_loved_track,
            session: session.clone(),
        })
    }

    /// Fetch the tracks of this playlist.
    pub async fn get_tracks(&self) -> Result<Vec<Track>> {
        let response = self
            .session
            .req_get(&format!("/playlist/{}/tracks", self.id))
            .await?;

        common::data_rows(ENTITY, &response)?
            .iter()
            .map(|row| Track::from_json(row, &self.session))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::mock::MockTransport;
    use crate::config::Config;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_loved_tracks_playlist() {
        let mock = Arc::new(MockTransport::new().route_json(
            "https://api.deezer.com/playlist/77/tracks",
            json!({"data": [
                {"id": 1, "title": "a", "duration": 10},
                {"id": 2, "title": "b", "duration": 20}
            ]}),
        ));
        let dz = Deezer::with_transport("app", "tok", Config::default(), mock);
        let playlist = Playlist::from_json(
            &json!({
                "id": 77,
                "title": "Loved Tracks",
                "picture": "https://api.deezer.com/playlist/77/image",
                "is_loved_track": true,
                "public": false
            }),
            &dz,
        )
        .unwrap();
        assert!(playlist.is_loved_track);

        let ids: Vec<u64> = playlist
            .get_tracks()
            .await
            .unwrap()
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_is_loved_track_must_be_bool() {
        let dz = Deezer::with_transport("app", "tok", Config::default(), Arc::new(MockTransport::new()));
        let result = Playlist::from_json(
            &json!({"id": 1, "title": "t", "picture": "p", "is_loved_track": "yes"}),
            &dz,
        );
        assert!(result.is_err());
    }
}
