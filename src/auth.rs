use crate::{Result, SoundCloudError};

/// Scheme prefix SoundCloud uses in the `Authorization` header.
const SCHEME: &str = "OAuth";

/// Authentication state of a client.
///
/// The `Authorization` header is derived from this state and never stored
/// on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    Authenticated(String),
}

impl AuthState {
    /// Build a state from a raw token, with or without the `OAuth` prefix.
    pub fn from_token(raw: Option<&str>) -> Self {
        match raw.and_then(normalize_token) {
            Some(token) => AuthState::Authenticated(token),
            None => AuthState::Unauthenticated,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            AuthState::Authenticated(token) => Some(token),
            AuthState::Unauthenticated => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    /// Value of the `Authorization` header, if any.
    pub fn authorization_header(&self) -> Option<String> {
        self.token().map(|token| format!("{SCHEME} {token}"))
    }
}

/// Strip surrounding whitespace and an optional `OAuth` scheme prefix.
///
/// Returns `None` for tokens that are empty once normalized.
pub fn normalize_token(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let token = match trimmed.strip_prefix(SCHEME) {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim(),
        _ => trimmed,
    };
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Token bookkeeping behind the client's auth setters.
///
/// A token can be parked while authentication is switched off and
/// re-enabled later without setting it again.
#[derive(Debug, Clone, Default)]
pub(crate) struct Credentials {
    token: Option<String>,
    use_auth: bool,
}

impl Credentials {
    pub(crate) fn new(raw: Option<&str>) -> Self {
        let mut credentials = Self::default();
        if let Some(raw) = raw {
            credentials.set_token(raw);
        }
        credentials
    }

    pub(crate) fn state(&self) -> AuthState {
        match (&self.token, self.use_auth) {
            (Some(token), true) => AuthState::Authenticated(token.clone()),
            _ => AuthState::Unauthenticated,
        }
    }

    pub(crate) fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub(crate) fn set_token(&mut self, raw: &str) {
        self.token = normalize_token(raw);
        self.use_auth = self.token.is_some();
    }

    pub(crate) fn clear_token(&mut self) {
        self.token = None;
        self.use_auth = false;
    }

    pub(crate) fn use_auth(&self) -> bool {
        self.use_auth
    }

    pub(crate) fn set_use_auth(&mut self, enabled: bool) -> Result<()> {
        if self.token.is_none() {
            return Err(SoundCloudError::Configuration(format!(
                "cannot {} authentication: no auth token has been set",
                if enabled { "enable" } else { "disable" }
            )));
        }
        self.use_auth = enabled;
        Ok(())
    }
}
