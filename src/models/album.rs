//! Album model.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::artist::Artist;
use super::common::{self, Reference};
use super::track::Track;
use crate::api::Deezer;
use crate::error::{DeezerError, Result};

const ENTITY: &str = "album";

#[derive(Debug, Deserialize)]
struct TrackId {
    #[serde(deserialize_with = "common::id")]
    id: u64,
}

#[derive(Debug, Deserialize)]
struct TrackIds {
    data: Vec<TrackId>,
}

#[derive(Debug, Deserialize)]
struct RawAlbum {
    #[serde(deserialize_with = "common::id")]
    id: u64,
    title: String,
    nb_tracks: u32,
    cover: String,
    tracks: TrackIds,
    artist: Reference,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// An album as returned by `/album/{id}`.
#[derive(Debug, Clone)]
pub struct Album {
    /// Deezer album ID.
    pub id: u64,

    /// Album title.
    pub title: String,

    /// Number of tracks announced by Deezer.
    pub nb_tracks: u32,

    /// Cover URL.
    pub cover: String,

    /// Track IDs in album order.
    pub track_ids: Vec<u64>,

    /// ID of the album artist.
    pub artist_id: Option<u64>,

    session: Deezer,
}

impl Album {
    /// Build an album from a JSON object.
    pub fn from_json(json: &Value, session: &Deezer) -> Result<Self> {
        let raw: RawAlbum = common::decode(ENTITY, json)?;
        common::log_ignored(ENTITY, &raw.extra);

        Ok(Self {
            id: raw.id,
            title: raw.title,
            nb_tracks: raw.nb_tracks,
            cover: raw.cover,
            track_ids: raw.tracks.data.into_iter().map(|t| t.id).collect(),
            artist_id: raw.artist.id,
            session: session.clone(),
        })
    }

    /// Fetch the tracks of this album.
    pub async fn get_tracks(&self) -> Result<Vec<Track>> {
        let response = self
            .session
            .req_get(&format!("/album/{}/tracks", self.id))
            .await?;

        common::data_rows(ENTITY, &response)?
            .iter()
            .map(|row| Track::from_album_row(row, &self.session, self.id, &self.title))
            .collect()
    }

    /// Fetch the artist of this album.
    pub async fn get_artist(&self) -> Result<Artist> {
        let artist_id = self
            .artist_id
            .ok_or(DeezerError::MissingReference("artist"))?;
        self.session.get_artist(artist_id).await
    }
}
