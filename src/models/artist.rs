//! Artist model.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::common;
use super::track::Track;
use crate::api::Deezer;
use crate::error::Result;

const ENTITY: &str = "artist";

#[derive(Debug, Deserialize)]
struct RawArtist {
    #[serde(deserialize_with = "common::id")]
    id: u64,
    name: String,
    picture: String,
    tracklist: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// An artist, from `/artist/{id}` or a favorites listing.
#[derive(Debug, Clone)]
pub struct Artist {
    /// Deezer artist ID.
    pub id: u64,

    /// Artist name.
    pub name: String,

    /// Picture URL.
    pub picture: String,

    /// API URL of the artist's top tracks. Only followed by [`Artist::get_tracks`].
    pub tracklist_url: String,

    session: Deezer,
}

impl Artist {
    /// Build an artist from a JSON object.
    pub fn from_json(json: &Value, session: &Deezer) -> Result<Self> {
        let raw: RawArtist = common::decode(ENTITY, json)?;
        common::log_ignored(ENTITY, &raw.extra);

        Ok(Self {
            id: raw.id,
            name: raw.name,
            picture: raw.picture,
            tracklist_url: raw.tracklist,
            session: session.clone(),
        })
    }

    /// Fetch the artist's track list.
    pub async fn get_tracks(&self) -> Result<Vec<Track>> {
        let response = self.session.req_get(&self.tracklist_url).await?;

        common::data_rows(ENTITY, &response)?
            .iter()
            .map(|row| Track::from_json(row, &self.session))
            .collect()
    }
}
