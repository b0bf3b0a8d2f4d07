use crate::user::BasicUser;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A fully populated track.
///
/// The `waveform_url` and `duration` fields are what distinguish a track
/// payload from a playlist payload when both are possible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: u64,
    pub urn: String,
    pub kind: String,
    pub title: String,
    pub permalink_url: String,
    /// Duration in milliseconds.
    pub duration: u64,
    pub waveform_url: String,
    pub user: BasicUser,
    pub user_id: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub tag_list: Option<String>,
    pub artwork_url: Option<String>,
    pub sharing: Option<String>,
    pub secret_token: Option<String>,
    pub streamable: Option<bool>,
    pub downloadable: Option<bool>,
    pub has_downloads_left: Option<bool>,
    pub playback_count: Option<u64>,
    pub likes_count: Option<u64>,
    pub reposts_count: Option<u64>,
    pub comment_count: Option<u64>,
    pub policy: Option<String>,
}

/// A track reference with only its identity.
///
/// Long playlists inline the first few tracks and list the rest as stubs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackStub {
    pub id: u64,
    pub kind: String,
    pub policy: Option<String>,
    pub monetization_model: Option<String>,
}

/// Temporary link to a track's original upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginalDownload {
    #[serde(rename = "redirectUri")]
    pub redirect_uri: String,
}

/// An entry of the listening history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Unix timestamp in milliseconds.
    pub played_at: u64,
    pub track_id: u64,
    pub track: Track,
}

crate::impl_decode!(Track, TrackStub, OriginalDownload, HistoryItem);

crate::one_of! {
    /// A playlist entry: a full track when inlined, otherwise a stub.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    #[serde(untagged)]
    pub enum PlaylistTrack {
        Full(Track),
        Stub(TrackStub),
    }
}

impl PlaylistTrack {
    pub fn id(&self) -> u64 {
        match self {
            PlaylistTrack::Full(track) => track.id,
            PlaylistTrack::Stub(stub) => stub.id,
        }
    }
}
