use crate::comment::{BasicComment, Comment};
use crate::endpoints;
use crate::iterator::{CollectionIterator, CommentsWithInteractions};
use crate::playlist::{Playlist, Sharing};
use crate::track::{HistoryItem, Track};
use crate::types::{Conversation, Like, Message, NoContent, RepostItem, SearchItem, StreamItem};
use crate::user::{User, UserEmail, WebProfile};
use crate::{Params, Result, SoundCloudClient};
use serde_json::json;

// =============================================================================
// Authenticated user
// =============================================================================

impl SoundCloudClient {
    /// The user the auth token belongs to.
    pub async fn get_me(&self) -> Result<Option<User>> {
        endpoints::ME.call(self, Params::new(), None).await
    }

    /// Recently played tracks of the authenticated user.
    pub fn get_my_history(&self, params: Params) -> CollectionIterator<HistoryItem> {
        endpoints::ME_HISTORY.call(self, params)
    }

    /// Recent uploads and reposts from accounts the authenticated user follows.
    pub fn get_my_stream(&self, params: Params) -> CollectionIterator<StreamItem> {
        endpoints::ME_STREAM.call(self, params)
    }
}

// =============================================================================
// Resolve and search
// =============================================================================

impl SoundCloudClient {
    /// The resource behind a soundcloud.com URL, if any.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use asynccloud::{SearchItem, SoundCloudClient};
    ///
    /// # tokio_test::block_on(async {
    /// let http_client = http_client::native::NativeClient::new();
    /// let client = SoundCloudClient::new(Box::new(http_client), "my-client-id");
    ///
    /// match client.resolve("https://soundcloud.com/forss/flickermood").await? {
    ///     Some(SearchItem::Track(track)) => println!("track {}", track.title),
    ///     Some(other) => println!("something else: {other:?}"),
    ///     None => println!("nothing there"),
    /// }
    /// # Ok::<(), asynccloud::SoundCloudError>(())
    /// # });
    /// ```
    pub async fn resolve(&self, url: &str) -> Result<Option<SearchItem>> {
        endpoints::RESOLVE
            .call(self, Params::new().with("url", url), None)
            .await
    }

    /// Search users, tracks and playlists at once.
    pub fn search(&self, query: &str, params: Params) -> CollectionIterator<SearchItem> {
        endpoints::SEARCH.call(self, params.with("q", query))
    }

    pub fn search_albums(&self, query: &str, params: Params) -> CollectionIterator<Playlist> {
        endpoints::SEARCH_ALBUMS.call(self, params.with("q", query))
    }

    /// Search playlists, excluding albums.
    pub fn search_playlists(&self, query: &str, params: Params) -> CollectionIterator<Playlist> {
        endpoints::SEARCH_PLAYLISTS.call(self, params.with("q", query))
    }

    pub fn search_tracks(&self, query: &str, params: Params) -> CollectionIterator<Track> {
        endpoints::SEARCH_TRACKS.call(self, params.with("q", query))
    }

    pub fn search_users(&self, query: &str, params: Params) -> CollectionIterator<User> {
        endpoints::SEARCH_USERS.call(self, params.with("q", query))
    }

    /// Most recent tracks carrying `tag`.
    pub fn get_tag_tracks_recent(&self, tag: &str, params: Params) -> CollectionIterator<Track> {
        endpoints::TAG_RECENT_TRACKS.call(self, params.with("tag", tag))
    }
}

// =============================================================================
// Playlists
// =============================================================================

impl SoundCloudClient {
    pub async fn get_playlist(&self, playlist_id: u64) -> Result<Option<Playlist>> {
        endpoints::PLAYLIST
            .call(self, Params::new().with("playlist_id", playlist_id), None)
            .await
    }

    /// Create a playlist. Requires authentication.
    pub async fn post_playlist(
        &self,
        sharing: Sharing,
        title: &str,
        track_ids: &[u64],
    ) -> Result<Option<Playlist>> {
        let body = json!({
            "playlist": {
                "sharing": sharing,
                "title": title,
                "tracks": track_ids,
            }
        });
        endpoints::POST_PLAYLIST
            .call(self, Params::new(), Some(&body))
            .await
    }

    /// Delete a playlist. Requires authentication.
    pub async fn delete_playlist(&self, playlist_id: u64) -> Result<Option<NoContent>> {
        endpoints::DELETE_PLAYLIST
            .call(self, Params::new().with("playlist_id", playlist_id), None)
            .await
    }

    pub fn get_playlist_likers(&self, playlist_id: u64, params: Params) -> CollectionIterator<User> {
        endpoints::PLAYLIST_LIKERS.call(self, params.with("playlist_id", playlist_id))
    }

    pub fn get_playlist_reposters(
        &self,
        playlist_id: u64,
        params: Params,
    ) -> CollectionIterator<User> {
        endpoints::PLAYLIST_REPOSTERS.call(self, params.with("playlist_id", playlist_id))
    }
}

// =============================================================================
// Tracks
// =============================================================================

impl SoundCloudClient {
    pub async fn get_track(&self, track_id: u64) -> Result<Option<Track>> {
        endpoints::TRACK
            .call(self, Params::new().with("track_id", track_id), None)
            .await
    }

    /// Fetch several tracks in one request.
    ///
    /// Passing the playlist id and its secret token gives access to hidden
    /// tracks of a private playlist.
    pub async fn get_tracks(
        &self,
        track_ids: &[u64],
        playlist_id: Option<u64>,
        playlist_secret_token: Option<&str>,
    ) -> Result<Vec<Track>> {
        let ids = track_ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let mut params = Params::new().with("ids", ids);
        if let Some(playlist_id) = playlist_id {
            params.insert("playlistId", playlist_id);
        }
        if let Some(token) = playlist_secret_token {
            params.insert("playlistSecretToken", token);
        }
        endpoints::TRACKS.call(self, params).await
    }

    /// Albums containing this track.
    pub fn get_track_albums(&self, track_id: u64, params: Params) -> CollectionIterator<Playlist> {
        endpoints::TRACK_ALBUMS.call(self, params.with("track_id", track_id))
    }

    /// Playlists (not albums) containing this track.
    pub fn get_track_playlists(
        &self,
        track_id: u64,
        params: Params,
    ) -> CollectionIterator<Playlist> {
        endpoints::TRACK_PLAYLISTS.call(self, params.with("track_id", track_id))
    }

    /// Comments on a track. `threaded` is passed through as the API's flag.
    pub fn get_track_comments(
        &self,
        track_id: u64,
        threaded: u8,
        params: Params,
    ) -> CollectionIterator<BasicComment> {
        endpoints::TRACK_COMMENTS.call(
            self,
            params.with("track_id", track_id).with("threaded", threaded),
        )
    }

    /// Comments on a track together with their like counts and whether the
    /// authenticated user and the track's creator liked them.
    ///
    /// Requires authentication. Yields nothing when the track does not exist.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use asynccloud::{AsyncPaginatedIterator, Params, SoundCloudClient};
    ///
    /// # tokio_test::block_on(async {
    /// let http_client = http_client::native::NativeClient::new();
    /// let client = SoundCloudClient::new(Box::new(http_client), "my-client-id");
    /// client.set_auth_token("OAuth 2-000000-token");
    ///
    /// let mut comments = client.get_track_comments_with_interactions(1032303631, 0, Params::new());
    /// for entry in comments.take(20).await? {
    ///     println!("{} likes: {}", entry.likes, entry.comment.body);
    /// }
    /// # Ok::<(), asynccloud::SoundCloudError>(())
    /// # });
    /// ```
    pub fn get_track_comments_with_interactions(
        &self,
        track_id: u64,
        threaded: u8,
        params: Params,
    ) -> CommentsWithInteractions {
        CommentsWithInteractions::new(self.clone(), track_id, threaded, params)
    }

    pub fn get_track_likers(&self, track_id: u64, params: Params) -> CollectionIterator<User> {
        endpoints::TRACK_LIKERS.call(self, params.with("track_id", track_id))
    }

    pub fn get_track_related(&self, track_id: u64, params: Params) -> CollectionIterator<Track> {
        endpoints::TRACK_RELATED.call(self, params.with("track_id", track_id))
    }

    pub fn get_track_reposters(&self, track_id: u64, params: Params) -> CollectionIterator<User> {
        endpoints::TRACK_REPOSTERS.call(self, params.with("track_id", track_id))
    }

    /// Temporary link to the original upload of a track.
    ///
    /// Private tracks need their secret token (the last segment of the
    /// secret URL). Requires authentication.
    pub async fn get_track_original_download(
        &self,
        track_id: u64,
        secret_token: Option<&str>,
    ) -> Result<Option<String>> {
        let mut params = Params::new().with("track_id", track_id);
        if let Some(token) = secret_token {
            params.insert("secret_token", token);
        }
        let download = endpoints::TRACK_ORIGINAL_DOWNLOAD
            .call(self, params, None)
            .await?;
        Ok(download.map(|d| d.redirect_uri))
    }
}

// =============================================================================
// Users
// =============================================================================

impl SoundCloudClient {
    pub async fn get_user(&self, user_id: u64) -> Result<Option<User>> {
        endpoints::USER
            .call(self, Params::new().with("user_id", user_id), None)
            .await
    }

    /// Look a user up by permalink.
    ///
    /// Returns `None` when the permalink does not exist or resolves to
    /// something other than a user.
    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let url = format!(
            "{}/{}",
            self.web_url().trim_end_matches('/'),
            urlencoding::encode(username)
        );
        match self.resolve(&url).await? {
            Some(SearchItem::User(user)) => Ok(Some(user)),
            _ => Ok(None),
        }
    }

    pub fn get_user_comments(&self, user_id: u64, params: Params) -> CollectionIterator<Comment> {
        endpoints::USER_COMMENTS.call(self, params.with("user_id", user_id))
    }

    /// Messages of one conversation. Requires authentication.
    pub fn get_conversation_messages(
        &self,
        user_id: u64,
        conversation_id: &str,
        params: Params,
    ) -> CollectionIterator<Message> {
        endpoints::USER_CONVERSATION_MESSAGES.call(
            self,
            params
                .with("user_id", user_id)
                .with("conversation_id", conversation_id),
        )
    }

    /// Requires authentication.
    pub fn get_conversations(
        &self,
        user_id: u64,
        params: Params,
    ) -> CollectionIterator<Conversation> {
        endpoints::USER_CONVERSATIONS.call(self, params.with("user_id", user_id))
    }

    /// Requires authentication.
    pub fn get_unread_conversations(
        &self,
        user_id: u64,
        params: Params,
    ) -> CollectionIterator<Conversation> {
        endpoints::USER_CONVERSATIONS_UNREAD.call(self, params.with("user_id", user_id))
    }

    /// Email addresses of the account. Requires authentication.
    pub fn get_user_emails(&self, user_id: u64, params: Params) -> CollectionIterator<UserEmail> {
        endpoints::USER_EMAILS.call(self, params.with("user_id", user_id))
    }

    pub fn get_user_featured_profiles(
        &self,
        user_id: u64,
        params: Params,
    ) -> CollectionIterator<User> {
        endpoints::USER_FEATURED_PROFILES.call(self, params.with("user_id", user_id))
    }

    pub fn get_user_followers(&self, user_id: u64, params: Params) -> CollectionIterator<User> {
        endpoints::USER_FOLLOWERS.call(self, params.with("user_id", user_id))
    }

    pub fn get_user_following(&self, user_id: u64, params: Params) -> CollectionIterator<User> {
        endpoints::USER_FOLLOWINGS.call(self, params.with("user_id", user_id))
    }

    pub fn get_user_likes(&self, user_id: u64, params: Params) -> CollectionIterator<Like> {
        endpoints::USER_LIKES.call(self, params.with("user_id", user_id))
    }

    pub fn get_user_related_artists(
        &self,
        user_id: u64,
        params: Params,
    ) -> CollectionIterator<User> {
        endpoints::USER_RELATED_ARTISTS.call(self, params.with("user_id", user_id))
    }

    pub fn get_user_reposts(&self, user_id: u64, params: Params) -> CollectionIterator<RepostItem> {
        endpoints::USER_REPOSTS.call(self, params.with("user_id", user_id))
    }

    /// Uploads and reposts of a user, newest first.
    pub fn get_user_stream(&self, user_id: u64, params: Params) -> CollectionIterator<StreamItem> {
        endpoints::USER_STREAM.call(self, params.with("user_id", user_id))
    }

    pub fn get_user_tracks(&self, user_id: u64, params: Params) -> CollectionIterator<Track> {
        endpoints::USER_TRACKS.call(self, params.with("user_id", user_id))
    }

    /// A user's most played tracks.
    pub fn get_user_popular_tracks(
        &self,
        user_id: u64,
        params: Params,
    ) -> CollectionIterator<Track> {
        endpoints::USER_TOP_TRACKS.call(self, params.with("user_id", user_id))
    }

    pub fn get_user_albums(&self, user_id: u64, params: Params) -> CollectionIterator<Playlist> {
        endpoints::USER_ALBUMS.call(self, params.with("user_id", user_id))
    }

    /// Playlists (not albums) created by a user.
    pub fn get_user_playlists(&self, user_id: u64, params: Params) -> CollectionIterator<Playlist> {
        endpoints::USER_PLAYLISTS.call(self, params.with("user_id", user_id))
    }

    /// Links shown on a user's profile. Takes the user's urn, not its id.
    pub async fn get_user_links(&self, user_urn: &str, params: Params) -> Result<Vec<WebProfile>> {
        endpoints::USER_WEB_PROFILES
            .call(self, params.with("user_urn", user_urn))
            .await
    }
}
