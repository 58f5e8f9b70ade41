//! Player widget URL builder.
//!
//! The widget is an iframe served by deezer.com; this module only formats
//! its URL and never fetches it.

use crate::models::{Playlist, Track};

/// Default widget width in pixels.
pub const DEFAULT_WIDTH: u32 = 700;

/// Default widget height in pixels.
pub const DEFAULT_HEIGHT: u32 = 400;

/// What the widget plays.
#[derive(Debug, Clone, Copy)]
pub enum WidgetContent<'a> {
    /// An ad-hoc list of tracks, played in order.
    Tracks(&'a [Track]),
    /// A whole playlist.
    Playlist(&'a Playlist),
}

impl WidgetContent<'_> {
    fn kind(&self) -> &'static str {
        match self {
            WidgetContent::Tracks(_) => "tracks",
            WidgetContent::Playlist(_) => "playlist",
        }
    }

    fn ids(&self) -> String {
        match self {
            WidgetContent::Tracks(tracks) => format_id_list(tracks.iter().map(|t| t.id)),
            WidgetContent::Playlist(playlist) => playlist.id.to_string(),
        }
    }
}

/// Widget dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetSize {
    pub width: u32,
    pub height: u32,
}

impl Default for WidgetSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Format ids as `[1, 2, 3]`, the list syntax the widget expects.
pub fn format_id_list<I>(ids: I) -> String
where
    I: IntoIterator<Item = u64>,
{
    let joined = ids
        .into_iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", joined)
}

/// Build the embed URL for `content`.
pub fn widget_url(base: &str, app_id: &str, content: WidgetContent<'_>, size: WidgetSize) -> String {
    format!(
        "{base}?app_id={app_id}&format=classic&autoplay=true&playlist=true\
         &width={width}&height={height}&color=ff0000&layout=dark&size=medium\
         &type={kind}&id={ids}&popup=true&repeat=0&current_song_index=0\
         &current_song_time=2&playing=true",
        base = base,
        app_id = app_id,
        width = size.width,
        height = size.height,
        kind = content.kind(),
        ids = content.ids(),
    )
}
