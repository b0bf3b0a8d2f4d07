//! # asynccloud
//!
//! Async typed client for the SoundCloud v2 REST and GraphQL APIs.
//!
//! Every endpoint is one of a few request shapes: a single resource, a
//! paginated collection followed through `next_href` cursors, a bulk list or a
//! GraphQL query. Results decode into typed records; endpoints that can return
//! several kinds of resource decode into ordered unions such as [`SearchItem`].
//!
//! ```rust,no_run
//! use asynccloud::{AsyncPaginatedIterator, ClientConfig, Params, SoundCloudClient};
//!
//! #[tokio::main]
//! async fn main() -> asynccloud::Result<()> {
//!     let http_client = http_client::native::NativeClient::new();
//!     let client = SoundCloudClient::connect(Box::new(http_client), ClientConfig::new()).await?;
//!
//!     let mut tracks = client.search_tracks("lofi", Params::new().limit(20));
//!     for track in tracks.take(5).await? {
//!         println!("{} ({} ms)", track.title, track.duration);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod bootstrap;
pub mod client;
pub mod comment;
pub mod decode;
pub mod endpoints;
pub mod error;
pub mod graphql;
pub mod headers;
pub mod iterator;
pub mod params;
pub mod playlist;
pub mod request;
pub mod session_persistence;
pub mod template;
pub mod test_utils;
pub mod track;
pub mod types;
pub mod user;

pub use auth::AuthState;
pub use client::SoundCloudClient;
pub use comment::{BasicComment, Comment, CommentTrack, SelfReference};
pub use decode::Decode;
pub use error::SoundCloudError;
pub use graphql::GraphQlRequest;
pub use iterator::{
    into_stream, AsyncPaginatedIterator, CollectionIterator, CommentsWithInteractions,
    COMMENT_BATCH_SIZE,
};
pub use params::Params;
pub use playlist::{Playlist, Sharing};
pub use request::{CollectionRequest, ListRequest, SingleRequest};
pub use session_persistence::SessionPersistence;
pub use track::{HistoryItem, OriginalDownload, PlaylistTrack, Track, TrackStub};
pub use types::{
    ClientConfig, ClientEvent, ClientEventReceiver, ClientEventWatcher, CommentWithInteractions,
    Conversation, InteractionCount, Like, Message, NoContent, PlaylistLike, PlaylistStreamItem,
    RepostItem, RequestInfo, SearchItem, SharedEventBroadcaster, StoredSession, StreamItem,
    TrackLike, TrackStreamItem, UserInteraction, UserInteractionsResult,
    UserInteractionsVariables, LIKE_INTERACTION_VALUE, REACTION_INTERACTION_TYPE,
};
pub use user::{BasicUser, User, UserEmail, WebProfile};

#[cfg(feature = "mock")]
pub use iterator::MockAsyncPaginatedIterator;

pub type Result<T> = std::result::Result<T, SoundCloudError>;

#[doc(hidden)]
pub mod __private {
    pub use serde;
    pub use serde_json;
}
