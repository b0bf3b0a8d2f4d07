use thiserror::Error;

/// Error types for SoundCloud operations.
///
/// HTTP statuses 400, 404 and 500 never show up here: every request shape
/// turns them into an absent value or an empty collection. Everything else
/// is propagated unchanged so callers can decide whether to retry.
///
/// # Error Handling Examples
///
/// ```rust,no_run
/// use asynccloud::{SoundCloudClient, SoundCloudError};
///
/// # tokio_test::block_on(async {
/// let http_client = http_client::native::NativeClient::new();
/// let client = SoundCloudClient::new(Box::new(http_client), "my-client-id");
///
/// match client.get_me().await {
///     Ok(Some(user)) => println!("Logged in as {}", user.username),
///     Ok(None) => println!("No such user"),
///     Err(SoundCloudError::Unauthorized { .. }) => eprintln!("Token rejected"),
///     Err(SoundCloudError::Http { status, .. }) => eprintln!("Server said {status}"),
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// # });
/// ```
#[derive(Error, Debug)]
pub enum SoundCloudError {
    /// A path template could not be resolved.
    ///
    /// Raised when a `{placeholder}` has no matching parameter, when the
    /// template has unbalanced braces, or when the substituted URL is not a
    /// valid URL.
    #[error("Template error: {0}")]
    Template(String),

    /// None of the candidate record types matched the payload.
    ///
    /// This signals a contract mismatch between the client and the API and is
    /// never swallowed.
    #[error("Failed to decode {type_name} (tried {attempted:?}): {reason}")]
    Decode {
        /// The type that was requested
        type_name: String,
        /// Candidate types tried, in declaration order
        attempted: Vec<String>,
        /// Reason the last candidate failed
        reason: String,
    },

    /// The client id could not be scraped from the SoundCloud web app.
    #[error("Client ID generation failed: {0}")]
    ClientIdGeneration(String),

    /// Invalid client state transition or use of a closed client.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The API answered with HTTP 401.
    ///
    /// Validity probes turn this into `false`; everywhere else it is
    /// propagated.
    #[error("Authentication failed for {url}")]
    Unauthorized {
        /// The URL that was rejected
        url: String,
    },

    /// The API answered with an unexpected non-2xx status.
    #[error("HTTP {status} for {url}")]
    Http {
        /// HTTP status code
        status: u16,
        /// The URL that failed (with `client_id` redacted)
        url: String,
    },

    /// Network-level failure reported by the HTTP transport.
    #[error("Transport error: {0}")]
    Transport(String),

    /// File system I/O errors.
    ///
    /// This can occur when saving or loading a persisted session.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SoundCloudError {
    /// Whether this error is an HTTP 401.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, SoundCloudError::Unauthorized { .. })
    }

    pub(crate) fn decode(
        type_name: impl Into<String>,
        attempted: Vec<String>,
        reason: impl Into<String>,
    ) -> Self {
        SoundCloudError::Decode {
            type_name: type_name.into(),
            attempted,
            reason: reason.into(),
        }
    }
}
