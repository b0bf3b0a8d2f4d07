//! Data types shared across the crate.
//!
//! This module contains the composite records returned by the API (unions,
//! conversations, GraphQL rows), client configuration, persisted session
//! state and the client event system.

use crate::comment::BasicComment;
use crate::decode::Decode;
use crate::playlist::Playlist;
use crate::track::Track;
use crate::user::{BasicUser, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};

// ================================================================================================
// UNION RESULTS
// ================================================================================================

crate::one_of! {
    /// Anything `/resolve` or `/search` can return.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    #[serde(untagged)]
    pub enum SearchItem {
        User(User),
        Track(Track),
        Playlist(Playlist),
    }
}

/// A like of a track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackLike {
    pub created_at: DateTime<Utc>,
    pub kind: String,
    pub track: Track,
}

/// A like of a playlist or album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistLike {
    pub created_at: DateTime<Utc>,
    pub kind: String,
    pub playlist: Playlist,
}

crate::one_of! {
    /// An entry of a user's likes.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    #[serde(untagged)]
    pub enum Like {
        Track(TrackLike),
        Playlist(PlaylistLike),
    }
}

/// A track upload or repost appearing in a stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackStreamItem {
    pub created_at: DateTime<Utc>,
    /// `track` or `track-repost`.
    #[serde(rename = "type")]
    pub item_type: String,
    pub user: BasicUser,
    pub uuid: String,
    pub caption: Option<String>,
    pub track: Track,
}

/// A playlist upload or repost appearing in a stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistStreamItem {
    pub created_at: DateTime<Utc>,
    /// `playlist` or `playlist-repost`.
    #[serde(rename = "type")]
    pub item_type: String,
    pub user: BasicUser,
    pub uuid: String,
    pub caption: Option<String>,
    pub playlist: Playlist,
}

crate::one_of! {
    /// An entry of the home stream or of a user's stream.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    #[serde(untagged)]
    pub enum StreamItem {
        Track(TrackStreamItem),
        Playlist(PlaylistStreamItem),
    }
}

impl StreamItem {
    pub fn is_repost(&self) -> bool {
        let item_type = match self {
            StreamItem::Track(item) => &item.item_type,
            StreamItem::Playlist(item) => &item.item_type,
        };
        item_type.ends_with("-repost")
    }
}

crate::one_of! {
    /// An entry of a user's reposts.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    #[serde(untagged)]
    pub enum RepostItem {
        Track(TrackStreamItem),
        Playlist(PlaylistStreamItem),
    }
}

crate::impl_decode!(TrackLike, PlaylistLike, TrackStreamItem, PlaylistStreamItem);

// ================================================================================================
// CONVERSATIONS
// ================================================================================================

/// A direct message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub content: String,
    pub conversation_id: String,
    pub sender: BasicUser,
    pub sender_urn: String,
    pub sender_type: String,
    pub sent_at: DateTime<Utc>,
}

/// A direct-message conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub last_message: Message,
    pub read: bool,
    pub started_at: DateTime<Utc>,
    pub summary: String,
    pub users: Vec<BasicUser>,
}

crate::impl_decode!(Message, Conversation);

// ================================================================================================
// EMPTY RESPONSES
// ================================================================================================

/// Result of a call whose response body carries nothing (e.g. a delete).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoContent {
    /// HTTP status of the response.
    pub status: u16,
}

impl Decode for NoContent {
    fn type_name() -> &'static str {
        "NoContent"
    }

    /// A body never carries the status, so decoding one is refused.
    /// Request shapes build this record through `from_status` instead.
    fn decode(_value: &serde_json::Value) -> crate::Result<Self> {
        Err(crate::SoundCloudError::decode(
            "NoContent",
            vec!["NoContent".to_string()],
            "built from the response status, not from a body",
        ))
    }

    fn from_status(status: u16) -> Option<Self> {
        Some(NoContent { status })
    }
}

// ================================================================================================
// GRAPHQL RECORDS
// ================================================================================================

/// Interaction type queried for comment reactions.
pub const REACTION_INTERACTION_TYPE: &str = "sc:interactiontype:reaction";

/// Interaction value of a like reaction.
pub const LIKE_INTERACTION_VALUE: &str = "sc:interactiontypevalue:like";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionCount {
    pub count: Option<u64>,
    pub interaction_type_value_urn: String,
}

/// Interaction state of one target (e.g. one comment).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInteraction {
    pub interaction_counts: Option<Vec<InteractionCount>>,
    pub interaction_type_urn: String,
    pub target_urn: String,
    /// Value urn of the interaction the requesting profile left, if any.
    pub user_interaction: Option<String>,
}

impl UserInteraction {
    /// Number of interactions with the given value urn.
    pub fn count_of(&self, value_urn: &str) -> u64 {
        self.interaction_counts
            .iter()
            .flatten()
            .filter(|c| c.interaction_type_value_urn == value_urn)
            .find_map(|c| c.count)
            .unwrap_or(0)
    }

    pub fn is(&self, value_urn: &str) -> bool {
        self.user_interaction.as_deref() == Some(value_urn)
    }
}

/// Variables of the `UserInteractions` GraphQL query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInteractionsVariables {
    pub created_by_profile_urn: String,
    pub interaction_type_urn: String,
    pub parent_urn: String,
    pub target_urns: Vec<String>,
}

/// `data` of the `UserInteractions` GraphQL query.
///
/// `user` holds the interactions as seen by the authenticated user and
/// `creator` the ones left by the track's creator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInteractionsResult {
    pub user: Vec<UserInteraction>,
    pub creator: Vec<UserInteraction>,
}

/// A track comment enriched with its reaction counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentWithInteractions {
    pub comment: BasicComment,
    pub likes: u64,
    pub liked_by_creator: bool,
    pub liked_by_user: bool,
}

crate::impl_decode!(UserInteractionsResult);

// ================================================================================================
// CLIENT CONFIGURATION
// ================================================================================================

/// Default REST origin.
pub const API_BASE: &str = "https://api-v2.soundcloud.com";
/// Default GraphQL endpoint.
pub const GRAPHQL_URL: &str = "https://graph.soundcloud.com/graphql";
/// Landing page scraped to bootstrap a client id.
pub const WEB_URL: &str = "https://soundcloud.com";
/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:93.0) Gecko/20100101 Firefox/93.0";

/// Configuration for [`SoundCloudClient::connect`](crate::SoundCloudClient::connect).
///
/// # Examples
///
/// ```rust
/// use asynccloud::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_client_id("abc123")
///     .with_auth_token("OAuth 2-000000-token");
///
/// assert_eq!(config.client_id.as_deref(), Some("abc123"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Client id sent with every request; scraped from the web app when `None`
    pub client_id: Option<String>,
    /// OAuth token, with or without the `OAuth ` prefix
    pub auth_token: Option<String>,
    pub user_agent: String,
    pub api_base: String,
    pub graphql_url: String,
    pub web_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            auth_token: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            api_base: API_BASE.to_string(),
            graphql_url: GRAPHQL_URL.to_string(),
            web_url: WEB_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn with_auth_token(mut self, auth_token: impl Into<String>) -> Self {
        self.auth_token = Some(auth_token.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Point the client at other origins, e.g. a local test server.
    pub fn with_origins(
        mut self,
        api_base: impl Into<String>,
        graphql_url: impl Into<String>,
        web_url: impl Into<String>,
    ) -> Self {
        self.api_base = api_base.into();
        self.graphql_url = graphql_url.into();
        self.web_url = web_url.into();
        self
    }
}

// ================================================================================================
// SESSION MANAGEMENT
// ================================================================================================

/// Serializable client credentials that can be persisted and restored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub client_id: String,
    pub auth_token: Option<String>,
}

impl StoredSession {
    pub fn new(client_id: String, auth_token: Option<String>) -> Self {
        Self {
            client_id,
            auth_token,
        }
    }

    /// Serialize session to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize session from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ================================================================================================
// EVENT SYSTEM
// ================================================================================================

/// Request information for client events
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestInfo {
    /// The HTTP method (GET, POST, etc.)
    pub method: String,
    /// The full URI being requested, with `client_id` redacted
    pub uri: String,
    /// Query parameters as key-value pairs
    pub query_params: Vec<(String, String)>,
    /// Path without query parameters
    pub path: String,
}

impl RequestInfo {
    /// Create RequestInfo from a parsed URL and method
    pub fn from_url_and_method(url: &http_types::Url, method: &str) -> Self {
        let query_params: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| {
                let v = if k == "client_id" {
                    "<redacted>".to_string()
                } else {
                    v.into_owned()
                };
                (k.into_owned(), v)
            })
            .collect();

        let mut redacted = url.clone();
        if !query_params.is_empty() {
            redacted
                .query_pairs_mut()
                .clear()
                .extend_pairs(query_params.iter());
        }

        Self {
            method: method.to_string(),
            uri: redacted.to_string(),
            query_params,
            path: url.path().to_string(),
        }
    }

    /// Get a short description of the request for logging
    pub fn short_description(&self) -> String {
        let mut desc = format!("{} {}", self.method, self.path);
        let params: Vec<String> = self
            .query_params
            .iter()
            .filter(|(k, _)| k != "client_id")
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        if !params.is_empty() {
            if params.len() <= 2 {
                desc.push_str(&format!("?{}", params.join("&")));
            } else {
                desc.push_str(&format!("?{}...", params[0]));
            }
        }
        desc
    }
}

/// Events emitted by the client around every HTTP call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ClientEvent {
    /// Request started
    RequestStarted {
        /// Request details
        request: RequestInfo,
    },
    /// Request completed with a response (of any status)
    RequestCompleted {
        /// Request details
        request: RequestInfo,
        /// HTTP status code
        status_code: u16,
        /// Duration of the request in milliseconds
        duration_ms: u64,
    },
}

/// Type alias for the broadcast receiver
pub type ClientEventReceiver = broadcast::Receiver<ClientEvent>;

/// Type alias for the watch receiver
pub type ClientEventWatcher = watch::Receiver<Option<ClientEvent>>;

/// Shared event broadcasting state that persists across client clones
pub struct SharedEventBroadcaster {
    event_tx: broadcast::Sender<ClientEvent>,
    last_event_tx: watch::Sender<Option<ClientEvent>>,
}

impl SharedEventBroadcaster {
    /// Create a new shared event broadcaster
    pub fn new() -> Self {
        let (event_tx, _) = broadcast::channel(100);
        let (last_event_tx, _) = watch::channel(None);

        Self {
            event_tx,
            last_event_tx,
        }
    }

    /// Broadcast an event to all subscribers
    pub fn broadcast_event(&self, event: ClientEvent) {
        let _ = self.event_tx.send(event.clone());
        self.last_event_tx.send_replace(Some(event));
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> ClientEventReceiver {
        self.event_tx.subscribe()
    }

    /// Watch the most recent event
    pub fn watch(&self) -> ClientEventWatcher {
        self.last_event_tx.subscribe()
    }

    /// Get the latest event
    pub fn latest_event(&self) -> Option<ClientEvent> {
        self.last_event_tx.borrow().clone()
    }
}

impl Default for SharedEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SharedEventBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedEventBroadcaster")
            .field("subscribers", &self.event_tx.receiver_count())
            .finish()
    }
}

// ================================================================================================
// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::tests::track_json;
    use serde_json::json;

    fn user_json() -> serde_json::Value {
        json!({
            "id": 3,
            "urn": "soundcloud:users:3",
            "username": "resolved",
            "permalink": "resolved",
            "permalink_url": "https://soundcloud.com/resolved",
            "kind": "user"
        })
    }

    fn playlist_json() -> serde_json::Value {
        json!({
            "id": 10,
            "urn": "soundcloud:playlists:10",
            "kind": "playlist",
            "title": "Set",
            "permalink_url": "https://soundcloud.com/artist/sets/set",
            "duration": 500000,
            "track_count": 0,
            "user_id": 77,
            "user": {
                "id": 77,
                "urn": "soundcloud:users:77",
                "username": "artist",
                "permalink": "artist",
                "permalink_url": "https://soundcloud.com/artist",
                "kind": "user"
            }
        })
    }

    #[test]
    fn test_search_item_variants() {
        assert!(matches!(
            SearchItem::decode(&user_json()).unwrap(),
            SearchItem::User(u) if u.username == "resolved"
        ));
        assert!(matches!(
            SearchItem::decode(&track_json(1, "Song")).unwrap(),
            SearchItem::Track(t) if t.title == "Song"
        ));
        assert!(matches!(
            SearchItem::decode(&playlist_json()).unwrap(),
            SearchItem::Playlist(p) if p.title == "Set"
        ));
    }

    #[test]
    fn test_search_item_rejects_unknown_shape() {
        let err = SearchItem::decode(&json!({"kind": "station"})).unwrap_err();
        match err {
            crate::SoundCloudError::Decode { attempted, .. } => {
                assert_eq!(attempted, vec!["User", "Track", "Playlist"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_stream_item_repost() {
        let value = json!({
            "created_at": "2024-02-02T00:00:00Z",
            "type": "track-repost",
            "user": user_json(),
            "uuid": "abc",
            "track": track_json(4, "Reposted")
        });
        let item = StreamItem::decode(&value).unwrap();
        assert!(item.is_repost());
        assert!(matches!(item, StreamItem::Track(_)));
    }

    #[test]
    fn test_like_nested_union() {
        let value = json!({
            "created_at": "2024-02-02T00:00:00Z",
            "kind": "like",
            "playlist": playlist_json()
        });
        assert!(matches!(Like::decode(&value).unwrap(), Like::Playlist(_)));
    }

    #[test]
    fn test_no_content_from_status() {
        assert_eq!(NoContent::from_status(204), Some(NoContent { status: 204 }));
        assert!(matches!(
            NoContent::decode(&json!({})),
            Err(crate::SoundCloudError::Decode { .. })
        ));
    }

    #[test]
    fn test_interaction_counts() {
        let row: UserInteraction = serde_json::from_value(json!({
            "interactionCounts": [
                {"count": 4, "interactionTypeValueUrn": LIKE_INTERACTION_VALUE},
                {"count": 1, "interactionTypeValueUrn": "sc:interactiontypevalue:fire"}
            ],
            "interactionTypeUrn": REACTION_INTERACTION_TYPE,
            "targetUrn": "soundcloud:comments:1",
            "userInteraction": LIKE_INTERACTION_VALUE
        }))
        .unwrap();
        assert_eq!(row.count_of(LIKE_INTERACTION_VALUE), 4);
        assert_eq!(row.count_of("sc:interactiontypevalue:unknown"), 0);
        assert!(row.is(LIKE_INTERACTION_VALUE));
    }

    #[test]
    fn test_variables_serialize_camel_case() {
        let vars = UserInteractionsVariables {
            created_by_profile_urn: "soundcloud:users:1".to_string(),
            interaction_type_urn: REACTION_INTERACTION_TYPE.to_string(),
            parent_urn: "soundcloud:tracks:2".to_string(),
            target_urns: vec!["soundcloud:comments:3".to_string()],
        };
        let value = serde_json::to_value(&vars).unwrap();
        assert_eq!(value["createdByProfileUrn"], "soundcloud:users:1");
        assert_eq!(value["targetUrns"][0], "soundcloud:comments:3");
    }

    #[test]
    fn test_stored_session_serialization() {
        let session = StoredSession::new("client".to_string(), Some("token".to_string()));
        let json = session.to_json().unwrap();
        assert_eq!(StoredSession::from_json(&json).unwrap(), session);
    }

    #[test]
    fn test_request_info_redacts_client_id() {
        let url: http_types::Url = "https://api-v2.soundcloud.com/search?q=moon&client_id=secret"
            .parse()
            .unwrap();
        let info = RequestInfo::from_url_and_method(&url, "GET");
        assert_eq!(info.path, "/search");
        assert!(!info.uri.contains("secret"));
        assert_eq!(info.short_description(), "GET /search?q=moon");
    }
}
