//! Configuration management for moodlist.
//!
//! Configuration is read from environment variables, optionally seeded from a
//! `.env` file in the platform local data directory (`moodlist/.env`). Endpoint
//! URLs carry sensible defaults pointing at the public Spotify endpoints; the
//! client id and secret have no default and missing values surface as
//! [`Error::Configuration`].

use std::{env, path::PathBuf};

use dotenv;

use crate::error::{Error, Result};

/// The fixed OAuth scope list requested during login, space-joined.
pub const SPOTIFY_SCOPES: [&str; 5] = [
    "playlist-modify-public",
    "playlist-modify-private",
    "user-read-private",
    "user-read-email",
    "user-read-playback-state",
];

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the directory if needed and seeds the process environment from the
/// file. A missing file is not an error; values may come from the process
/// environment instead, and every endpoint getter carries a default.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/moodlist/.env`
/// - macOS: `~/Library/Application Support/moodlist/.env`
/// - Windows: `%LOCALAPPDATA%/moodlist/.env`
///
/// # Returns
///
/// Returns `Ok(())` once the directory exists and any present file has been
/// applied.
///
/// # Errors
///
/// Returns an error only when the parent directory cannot be created.
///
/// # Example
///
/// ```
/// use moodlist::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<()> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("moodlist/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    let _ = dotenv::from_path(path);
    Ok(())
}

/// Returns the bind address for the local OAuth callback server.
///
/// # Example
///
/// ```
/// let addr = server_addr(); // e.g., "127.0.0.1:8888"
/// ```
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8888".to_string())
}

/// Returns the Spotify application client ID.
///
/// Required; there is no default. Register an application with Spotify's
/// developer platform to obtain one.
///
/// # Returns
///
/// The value of `SPOTIFY_CLIENT_ID`.
///
/// # Errors
///
/// Returns [`Error::Configuration`] when the variable is not set.
pub fn spotify_client_id() -> Result<String> {
    env::var("SPOTIFY_CLIENT_ID")
        .map_err(|_| Error::Configuration("SPOTIFY_CLIENT_ID is not set".to_string()))
}

/// Returns the Spotify application client secret.
///
/// Required for the confidential-client token exchange. Keep it out of logs
/// and version control.
pub fn spotify_client_secret() -> Result<String> {
    env::var("SPOTIFY_CLIENT_SECRET")
        .map_err(|_| Error::Configuration("SPOTIFY_CLIENT_SECRET is not set".to_string()))
}

/// Returns the OAuth redirect URI. Must match the URI registered for the
/// application.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_REDIRECT_URI")
        .unwrap_or_else(|_| "http://127.0.0.1:8888/callback".to_string())
}

/// Returns the space-joined OAuth scope string.
pub fn spotify_scope() -> String {
    SPOTIFY_SCOPES.join(" ")
}

/// Returns the Spotify OAuth authorization endpoint.
pub fn spotify_auth_url() -> String {
    env::var("SPOTIFY_AUTH_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/authorize".to_string())
}

/// Returns the Spotify OAuth token endpoint.
pub fn spotify_token_url() -> String {
    env::var("SPOTIFY_TOKEN_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/api/token".to_string())
}

/// Returns the Spotify Web API base URL.
pub fn spotify_api_url() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| "https://api.spotify.com/v1".to_string())
}

/// Returns the catalog market used for track search.
pub fn spotify_market() -> String {
    env::var("SPOTIFY_MARKET").unwrap_or_else(|_| "US".to_string())
}

/// Returns the feature-range resolver endpoint, if configured.
///
/// When absent the recommendation pipeline skips the resolver call and uses
/// the default feature ranges directly.
pub fn mood_resolver_url() -> Option<String> {
    env::var("MOOD_RESOLVER_URL").ok()
}
