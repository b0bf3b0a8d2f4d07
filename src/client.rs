use crate::auth::{AuthState, Credentials};
use crate::types::{
    ClientConfig, ClientEvent, ClientEventReceiver, ClientEventWatcher, RequestInfo,
    SharedEventBroadcaster, StoredSession,
};
use crate::{bootstrap, endpoints, headers, template, Params, Result, SoundCloudError};
use http_client::{HttpClient, Request, Response};
use http_types::Url;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// HTTP statuses every request shape treats as "nothing here".
pub const EMPTY_STATUSES: [u16; 3] = [400, 404, 500];

/// Track fetched to check whether a client id is accepted.
const PROBE_TRACK_ID: u64 = 1032303631;

type Transport = Arc<dyn HttpClient + Send + Sync>;

/// Async client for the SoundCloud v2 API.
///
/// The client is cheap to clone: clones share the HTTP transport, the
/// credentials and the event broadcaster.
///
/// # Examples
///
/// ```rust,no_run
/// use asynccloud::{ClientConfig, SoundCloudClient, Result};
///
/// #[tokio::main]
/// async fn main() -> Result<()> {
///     let http_client = http_client::native::NativeClient::new();
///
///     // Scrapes a client id from soundcloud.com because none is configured
///     let client = SoundCloudClient::connect(Box::new(http_client), ClientConfig::new()).await?;
///
///     if let Some(track) = client.get_track(1032303631).await? {
///         println!("{} by {}", track.title, track.user.username);
///     }
///
///     client.shutdown();
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct SoundCloudClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: RwLock<Option<Transport>>,
    client_id: RwLock<String>,
    credentials: RwLock<Credentials>,
    user_agent: String,
    api_base: String,
    graphql_url: String,
    web_url: String,
    broadcaster: Arc<SharedEventBroadcaster>,
}

/// A 2xx response with its body read.
pub(crate) struct Reply {
    pub status: u16,
    pub body: String,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl SoundCloudClient {
    /// Create a client with a known client id and default settings.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use asynccloud::SoundCloudClient;
    ///
    /// let http_client = http_client::native::NativeClient::new();
    /// let client = SoundCloudClient::new(Box::new(http_client), "my-client-id");
    /// assert_eq!(client.client_id(), "my-client-id");
    /// ```
    pub fn new(client: Box<dyn HttpClient + Send + Sync>, client_id: impl Into<String>) -> Self {
        Self::build(client, client_id.into(), &ClientConfig::default())
    }

    /// Create a client from `config`, scraping a client id from the web app
    /// when the config does not carry one.
    pub async fn connect(
        client: Box<dyn HttpClient + Send + Sync>,
        config: ClientConfig,
    ) -> Result<Self> {
        let client_id = config.client_id.clone().unwrap_or_default();
        let soundcloud = Self::build(client, client_id, &config);

        if config.client_id.is_none() {
            let client_id = bootstrap::generate_client_id(&soundcloud).await?;
            log::debug!("Bootstrapped client id");
            soundcloud.set_client_id(client_id);
        }

        Ok(soundcloud)
    }

    /// Restore a client from previously saved credentials.
    pub fn with_session(
        client: Box<dyn HttpClient + Send + Sync>,
        session: StoredSession,
        config: ClientConfig,
    ) -> Self {
        let config = ClientConfig {
            client_id: Some(session.client_id.clone()),
            auth_token: session.auth_token,
            ..config
        };
        Self::build(client, session.client_id, &config)
    }

    /// Create a client on another transport that shares this client's
    /// credentials, settings and event broadcaster.
    pub fn with_shared_broadcaster(&self, client: Box<dyn HttpClient + Send + Sync>) -> Self {
        let credentials = read(&self.inner.credentials).clone();
        Self {
            inner: Arc::new(ClientInner {
                transport: RwLock::new(Some(Arc::from(client))),
                client_id: RwLock::new(self.client_id()),
                credentials: RwLock::new(credentials),
                user_agent: self.inner.user_agent.clone(),
                api_base: self.inner.api_base.clone(),
                graphql_url: self.inner.graphql_url.clone(),
                web_url: self.inner.web_url.clone(),
                broadcaster: self.inner.broadcaster.clone(),
            }),
        }
    }

    fn build(
        client: Box<dyn HttpClient + Send + Sync>,
        client_id: String,
        config: &ClientConfig,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                transport: RwLock::new(Some(Arc::from(client))),
                client_id: RwLock::new(client_id),
                credentials: RwLock::new(Credentials::new(config.auth_token.as_deref())),
                user_agent: config.user_agent.clone(),
                api_base: config.api_base.trim_end_matches('/').to_string(),
                graphql_url: config.graphql_url.clone(),
                web_url: config.web_url.clone(),
                broadcaster: Arc::new(SharedEventBroadcaster::new()),
            }),
        }
    }

    // ============================================================================================
    // Credentials
    // ============================================================================================

    pub fn client_id(&self) -> String {
        read(&self.inner.client_id).clone()
    }

    pub fn set_client_id(&self, client_id: impl Into<String>) {
        *write(&self.inner.client_id) = client_id.into();
    }

    /// The stored auth token, normalized and without the `OAuth` prefix.
    ///
    /// A token is kept even while authentication is switched off with
    /// [`set_use_auth`](Self::set_use_auth).
    pub fn auth_token(&self) -> Option<String> {
        read(&self.inner.credentials).token().map(str::to_string)
    }

    /// Set the auth token and start sending it.
    ///
    /// Accepts the token with or without its `OAuth` prefix. An empty token
    /// is the same as [`clear_auth_token`](Self::clear_auth_token).
    pub fn set_auth_token(&self, token: &str) {
        write(&self.inner.credentials).set_token(token);
    }

    pub fn clear_auth_token(&self) {
        write(&self.inner.credentials).clear_token();
    }

    /// Whether the `Authorization` header is currently sent.
    pub fn use_auth(&self) -> bool {
        read(&self.inner.credentials).use_auth()
    }

    /// Switch sending the stored token on or off.
    ///
    /// Fails with [`SoundCloudError::Configuration`] when no token was set.
    pub fn set_use_auth(&self, enabled: bool) -> Result<()> {
        write(&self.inner.credentials).set_use_auth(enabled)
    }

    pub fn auth_state(&self) -> AuthState {
        read(&self.inner.credentials).state()
    }

    /// Snapshot of the credentials, for persistence.
    pub fn get_session(&self) -> StoredSession {
        StoredSession::new(self.client_id(), self.auth_token())
    }

    /// Whether the current client id is accepted by the API.
    ///
    /// A 401 answer yields `Ok(false)`; other failures are propagated.
    pub async fn is_client_id_valid(&self) -> Result<bool> {
        let params = Params::new().with("track_id", PROBE_TRACK_ID);
        probe(endpoints::TRACK.call(self, params, None).await)
    }

    /// Whether the current auth token is accepted by the API.
    ///
    /// A 401 answer yields `Ok(false)`; other failures are propagated.
    pub async fn is_auth_token_valid(&self) -> Result<bool> {
        probe(endpoints::ME.call(self, Params::new(), None).await)
    }

    // ============================================================================================
    // Events
    // ============================================================================================

    /// Subscribe to request events.
    pub fn subscribe(&self) -> ClientEventReceiver {
        self.inner.broadcaster.subscribe()
    }

    /// Watch the most recent request event.
    pub fn watch_events(&self) -> ClientEventWatcher {
        self.inner.broadcaster.watch()
    }

    pub fn latest_event(&self) -> Option<ClientEvent> {
        self.inner.broadcaster.latest_event()
    }

    // ============================================================================================
    // Lifecycle
    // ============================================================================================

    /// Release the HTTP transport.
    ///
    /// Calling this again is a no-op. Every request issued afterwards, from
    /// this handle or any clone, fails with [`SoundCloudError::Configuration`].
    pub fn shutdown(&self) {
        if write(&self.inner.transport).take().is_some() {
            log::debug!("SoundCloud client shut down");
        }
    }

    pub fn is_shut_down(&self) -> bool {
        read(&self.inner.transport).is_none()
    }

    // ============================================================================================
    // Request plumbing
    // ============================================================================================

    pub(crate) fn web_url(&self) -> &str {
        &self.inner.web_url
    }

    pub(crate) fn user_agent(&self) -> &str {
        &self.inner.user_agent
    }

    /// Resolve `template` under the REST origin; leftover params become the query.
    pub(crate) fn api_url(&self, template: &str, params: Params) -> Result<Url> {
        let (resolved, rest) = template::resolve(&self.inner.api_base, template, params)?;
        self.with_query(&resolved, rest.iter())
    }

    pub(crate) fn graphql_endpoint(&self) -> Result<Url> {
        self.with_query(&self.inner.graphql_url, std::iter::empty())
    }

    /// Turn a `next_href` cursor into the URL of the following page.
    ///
    /// The cursor's query string is kept as is and `client_id` is added back.
    pub(crate) fn cursor_url(&self, next_href: &str) -> Result<Url> {
        let cursor = match Url::parse(next_href) {
            Ok(url) => url,
            Err(_) => Url::parse(&self.inner.api_base)
                .and_then(|base| base.join(next_href))
                .map_err(|e| {
                    SoundCloudError::Template(format!("invalid next_href `{next_href}`: {e}"))
                })?,
        };

        let pairs: Vec<(String, String)> = cursor
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        log::trace!("Cursor parameters: {pairs:?}");

        let mut base = cursor;
        base.set_query(None);
        self.with_query(
            base.as_str(),
            pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        )
    }

    fn with_query<'a>(
        &self,
        base: &str,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Url> {
        let mut url = Url::parse(base)
            .map_err(|e| SoundCloudError::Template(format!("invalid URL `{base}`: {e}")))?;
        let client_id = self.client_id();
        {
            let mut query = url.query_pairs_mut();
            for (name, value) in pairs {
                if name != "client_id" {
                    query.append_pair(name, value);
                }
            }
            query.append_pair("client_id", &client_id);
        }
        Ok(url)
    }

    /// Send an API request and classify its status.
    ///
    /// Adds the default headers and the current `Authorization` header.
    /// Returns `None` for [`EMPTY_STATUSES`].
    pub(crate) async fn execute(&self, mut request: Request) -> Result<Option<Reply>> {
        let authorization = self.auth_state().authorization_header();
        headers::add_api_headers(&mut request, &self.inner.user_agent, authorization.as_deref());

        let url = RequestInfo::from_url_and_method(request.url(), "").uri;
        let mut response = self.send(request).await?;
        let status: u16 = response.status().into();

        match status {
            200..=299 => {
                let body = response
                    .body_string()
                    .await
                    .map_err(|e| SoundCloudError::Transport(e.to_string()))?;
                Ok(Some(Reply { status, body }))
            }
            s if EMPTY_STATUSES.contains(&s) => {
                log::debug!("Treating HTTP {status} from {url} as empty");
                Ok(None)
            }
            401 => Err(SoundCloudError::Unauthorized { url }),
            _ => Err(SoundCloudError::Http { status, url }),
        }
    }

    /// Hand a request to the transport, emitting request events around it.
    pub(crate) async fn send(&self, request: Request) -> Result<Response> {
        let transport = read(&self.inner.transport).clone().ok_or_else(|| {
            SoundCloudError::Configuration("client has been shut down".to_string())
        })?;

        let request_info =
            RequestInfo::from_url_and_method(request.url(), &request.method().to_string());
        log::debug!("{}", request_info.short_description());
        let request_start = std::time::Instant::now();

        self.inner
            .broadcaster
            .broadcast_event(ClientEvent::RequestStarted {
                request: request_info.clone(),
            });

        let response = transport
            .send(request)
            .await
            .map_err(|e| SoundCloudError::Transport(e.to_string()))?;

        self.inner
            .broadcaster
            .broadcast_event(ClientEvent::RequestCompleted {
                request: request_info,
                status_code: response.status().into(),
                duration_ms: request_start.elapsed().as_millis() as u64,
            });

        Ok(response)
    }
}

fn probe<T>(result: Result<T>) -> Result<bool> {
    match result {
        Ok(_) => Ok(true),
        Err(e) if e.is_unauthorized() => Ok(false),
        Err(e) => Err(e),
    }
}

impl fmt::Debug for SoundCloudClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoundCloudClient")
            .field("api_base", &self.inner.api_base)
            .field("authenticated", &self.auth_state().is_authenticated())
            .field("shut_down", &self.is_shut_down())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ScriptedTransport;

    fn client() -> SoundCloudClient {
        SoundCloudClient::new(Box::new(ScriptedTransport::new()), "cid")
    }

    #[test]
    fn test_api_url_appends_client_id_last() {
        let params = Params::new()
            .with("track_id", 5)
            .with("client_id", "caller")
            .with("threaded", 0);
        let url = client()
            .api_url("/tracks/{track_id}/comments", params)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api-v2.soundcloud.com/tracks/5/comments?threaded=0&client_id=cid"
        );
    }

    #[test]
    fn test_cursor_url_keeps_cursor_params() {
        let url = client()
            .cursor_url("https://api-v2.soundcloud.com/search?q=moon&offset=20&limit=10")
            .unwrap();
        assert_eq!(url.path(), "/search");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "moon".to_string()),
                ("offset".to_string(), "20".to_string()),
                ("limit".to_string(), "10".to_string()),
                ("client_id".to_string(), "cid".to_string()),
            ]
        );
    }

    #[test]
    fn test_cursor_url_relative() {
        let url = client().cursor_url("/stream?offset=abc").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api-v2.soundcloud.com/stream?offset=abc&client_id=cid"
        );
    }

    #[test]
    fn test_auth_setters() {
        let client = client();
        assert!(!client.use_auth());
        client.set_auth_token("OAuth abc");
        assert_eq!(client.auth_token().as_deref(), Some("abc"));
        assert!(client.use_auth());
        client.clear_auth_token();
        assert_eq!(client.auth_state(), AuthState::Unauthenticated);
        assert!(client.set_use_auth(true).is_err());
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let client = client();
        let clone = client.clone();
        client.shutdown();
        client.shutdown();
        assert!(clone.is_shut_down());
    }

    #[test]
    fn test_session_snapshot() {
        let client = client();
        client.set_auth_token("tok");
        assert_eq!(
            client.get_session(),
            StoredSession::new("cid".to_string(), Some("tok".to_string()))
        );
    }
}
