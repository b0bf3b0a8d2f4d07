use crate::track::PlaylistTrack;
use crate::user::BasicUser;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A playlist or an album.
///
/// SoundCloud uses the same resource for both; `is_album` and `set_type`
/// tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: u64,
    pub urn: String,
    pub kind: String,
    pub title: String,
    pub permalink_url: String,
    pub track_count: u64,
    pub user: BasicUser,
    pub user_id: u64,
    #[serde(default)]
    pub is_album: bool,
    /// Total duration in milliseconds.
    pub duration: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub release_date: Option<String>,
    pub set_type: Option<String>,
    pub sharing: Option<String>,
    pub secret_token: Option<String>,
    pub artwork_url: Option<String>,
    pub description: Option<String>,
    pub likes_count: Option<u64>,
    pub reposts_count: Option<u64>,
    #[serde(default)]
    pub tracks: Vec<PlaylistTrack>,
}

impl Playlist {
    /// Ids of every entry, inlined or not, in playlist order.
    pub fn track_ids(&self) -> Vec<u64> {
        self.tracks.iter().map(PlaylistTrack::id).collect()
    }
}

/// Visibility of a newly created playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sharing {
    Public,
    Private,
}

impl fmt::Display for Sharing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sharing::Public => write!(f, "public"),
            Sharing::Private => write!(f, "private"),
        }
    }
}

crate::impl_decode!(Playlist);
