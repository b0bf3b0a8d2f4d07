//! SoundCloud v2 endpoint definitions.
//!
//! Placeholders in the paths are filled from the call's [`Params`](crate::Params).

use crate::comment::{BasicComment, Comment};
use crate::playlist::Playlist;
use crate::request::{CollectionRequest, ListRequest, SingleRequest};
use crate::track::{HistoryItem, OriginalDownload, Track};
use crate::types::{Conversation, Like, Message, NoContent, RepostItem, SearchItem, StreamItem};
use crate::user::{User, UserEmail, WebProfile};
use http_types::Method;

// Me
pub const ME: SingleRequest<User> = SingleRequest::new("/me");
pub const ME_HISTORY: CollectionRequest<HistoryItem> =
    CollectionRequest::new("/me/play-history/tracks");
pub const ME_STREAM: CollectionRequest<StreamItem> = CollectionRequest::new("/stream");

// Resolve and search
pub const RESOLVE: SingleRequest<SearchItem> = SingleRequest::new("/resolve");
pub const SEARCH: CollectionRequest<SearchItem> = CollectionRequest::new("/search");
pub const SEARCH_ALBUMS: CollectionRequest<Playlist> = CollectionRequest::new("/search/albums");
pub const SEARCH_PLAYLISTS: CollectionRequest<Playlist> =
    CollectionRequest::new("/search/playlists_without_albums");
pub const SEARCH_TRACKS: CollectionRequest<Track> = CollectionRequest::new("/search/tracks");
pub const SEARCH_USERS: CollectionRequest<User> = CollectionRequest::new("/search/users");
pub const TAG_RECENT_TRACKS: CollectionRequest<Track> =
    CollectionRequest::new("/recent-tracks/{tag}");

// Playlists
pub const PLAYLIST: SingleRequest<Playlist> = SingleRequest::new("/playlists/{playlist_id}");
pub const POST_PLAYLIST: SingleRequest<Playlist> =
    SingleRequest::with_method("/playlists", Method::Post);
pub const DELETE_PLAYLIST: SingleRequest<NoContent> =
    SingleRequest::with_method("/playlists/{playlist_id}", Method::Delete);
pub const PLAYLIST_LIKERS: CollectionRequest<User> =
    CollectionRequest::new("/playlists/{playlist_id}/likers");
pub const PLAYLIST_REPOSTERS: CollectionRequest<User> =
    CollectionRequest::new("/playlists/{playlist_id}/reposters");

// Tracks
pub const TRACK: SingleRequest<Track> = SingleRequest::new("/tracks/{track_id}");
pub const TRACKS: ListRequest<Track> = ListRequest::new("/tracks");
pub const TRACK_ALBUMS: CollectionRequest<Playlist> =
    CollectionRequest::new("/tracks/{track_id}/albums");
pub const TRACK_PLAYLISTS: CollectionRequest<Playlist> =
    CollectionRequest::new("/tracks/{track_id}/playlists_without_albums");
pub const TRACK_COMMENTS: CollectionRequest<BasicComment> =
    CollectionRequest::new("/tracks/{track_id}/comments");
pub const TRACK_LIKERS: CollectionRequest<User> =
    CollectionRequest::new("/tracks/{track_id}/likers");
pub const TRACK_RELATED: CollectionRequest<Track> =
    CollectionRequest::new("/tracks/{track_id}/related");
pub const TRACK_REPOSTERS: CollectionRequest<User> =
    CollectionRequest::new("/tracks/{track_id}/reposters");
pub const TRACK_ORIGINAL_DOWNLOAD: SingleRequest<OriginalDownload> =
    SingleRequest::new("/tracks/{track_id}/download");

// Users
pub const USER: SingleRequest<User> = SingleRequest::new("/users/{user_id}");
pub const USER_COMMENTS: CollectionRequest<Comment> =
    CollectionRequest::new("/users/{user_id}/comments");
pub const USER_CONVERSATION_MESSAGES: CollectionRequest<Message> =
    CollectionRequest::new("/users/{user_id}/conversations/{conversation_id}/messages");
pub const USER_CONVERSATIONS: CollectionRequest<Conversation> =
    CollectionRequest::new("/users/{user_id}/conversations");
pub const USER_CONVERSATIONS_UNREAD: CollectionRequest<Conversation> =
    CollectionRequest::new("/users/{user_id}/conversations/unread");
pub const USER_EMAILS: CollectionRequest<UserEmail> =
    CollectionRequest::new("/users/{user_id}/emails");
pub const USER_FEATURED_PROFILES: CollectionRequest<User> =
    CollectionRequest::new("/users/{user_id}/featured-profiles");
pub const USER_FOLLOWERS: CollectionRequest<User> =
    CollectionRequest::new("/users/{user_id}/followers");
pub const USER_FOLLOWINGS: CollectionRequest<User> =
    CollectionRequest::new("/users/{user_id}/followings");
pub const USER_LIKES: CollectionRequest<Like> = CollectionRequest::new("/users/{user_id}/likes");
pub const USER_RELATED_ARTISTS: CollectionRequest<User> =
    CollectionRequest::new("/users/{user_id}/relatedartists");
pub const USER_REPOSTS: CollectionRequest<RepostItem> =
    CollectionRequest::new("/stream/users/{user_id}/reposts");
pub const USER_STREAM: CollectionRequest<StreamItem> =
    CollectionRequest::new("/stream/users/{user_id}");
pub const USER_TRACKS: CollectionRequest<Track> =
    CollectionRequest::new("/users/{user_id}/tracks");
pub const USER_TOP_TRACKS: CollectionRequest<Track> =
    CollectionRequest::new("/users/{user_id}/toptracks");
pub const USER_ALBUMS: CollectionRequest<Playlist> =
    CollectionRequest::new("/users/{user_id}/albums");
pub const USER_PLAYLISTS: CollectionRequest<Playlist> =
    CollectionRequest::new("/users/{user_id}/playlists_without_albums");
pub const USER_WEB_PROFILES: ListRequest<WebProfile> =
    ListRequest::new("/users/{user_urn}/web-profiles");
