//! Error taxonomy for moodlist.
//!
//! Transport and authorization failures surface to the user; scoring-pipeline
//! failures degrade silently to a popularity sort and never appear here.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Missing or unusable configuration (client id/secret, addresses).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The OAuth state returned by the provider does not match the nonce we
    /// persisted before redirecting. The login attempt is aborted.
    #[error("authorization state mismatch")]
    StateMismatch,

    /// The provider rejected the authorization-code exchange.
    #[error("token exchange rejected: {0}")]
    AuthExchange(String),

    /// The provider rejected a refresh-token request. The stored credential
    /// is cleared and the user must re-run `moodlist auth`.
    #[error("token refresh rejected: {0}")]
    TokenRefresh(String),

    /// Catalog search transport failure. Not retried beyond the documented
    /// primary-genre fallback.
    #[error("catalog search failed: {0}")]
    Search(String),

    /// The feature-range resolver call failed or returned invalid ranges.
    /// Callers map this to the default ranges instead of surfacing it.
    #[error("resolver error: {0}")]
    Resolver(String),

    /// Playlist creation aborted. Partial provider-side state (an empty
    /// playlist) may remain; it is not rolled back.
    #[error("playlist creation failed: {0}")]
    PlaylistCreation(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}
