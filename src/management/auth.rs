//! Credential lifecycle: the token store.
//!
//! The access token and its expiry are process-local; only the refresh token
//! is persisted, so every new process starts with a single refresh. An access
//! token counts as usable while `now < expiry - 60s`.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    spotify,
    types::Token,
};

/// Safety margin subtracted from the expiry instant to absorb clock drift
/// and request latency.
pub const EXPIRY_SKEW_SECS: u64 = 60;

/// The refresh transport behind the token store. `get_valid_token` runs
/// against the real provider; tests hand in a backend that records how often
/// it was asked to refresh.
#[async_trait]
pub trait RefreshBackend {
    async fn refresh(&mut self, refresh_token: &str) -> Result<Token>;
}

/// The real backend: the provider's token endpoint.
pub struct SpotifyRefresh;

#[async_trait]
impl RefreshBackend for SpotifyRefresh {
    async fn refresh(&mut self, refresh_token: &str) -> Result<Token> {
        spotify::auth::refresh_token(refresh_token).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedCredential {
    refresh_token: String,
}

/// Singly-owned store for the current credential. Mutated only by the
/// authorization flow and by its own refresh logic.
pub struct TokenManager {
    access_token: Option<String>,
    expires_at: u64,
    refresh_token: Option<String>,
}

impl TokenManager {
    pub fn new() -> Self {
        Self {
            access_token: None,
            expires_at: 0,
            refresh_token: None,
        }
    }

    /// Builds a store around an already known refresh token, without touching
    /// disk. The access token starts absent, as after [`TokenManager::load`].
    pub fn with_refresh_token(refresh_token: String) -> Self {
        Self {
            access_token: None,
            expires_at: 0,
            refresh_token: Some(refresh_token),
        }
    }

    /// Loads the persisted refresh token. The access token is session-scoped
    /// and starts absent, so the first `get_valid_token` call refreshes.
    pub async fn load() -> Result<Self> {
        let content = async_fs::read_to_string(Self::credential_path()).await?;
        let persisted: PersistedCredential = serde_json::from_str(&content)?;
        Ok(Self {
            access_token: None,
            expires_at: 0,
            refresh_token: Some(persisted.refresh_token),
        })
    }

    /// Stores a freshly exchanged credential and persists its refresh token.
    pub async fn set_credential(&mut self, token: &Token) -> Result<()> {
        self.access_token = Some(token.access_token.clone());
        self.expires_at = token.obtained_at + token.expires_in;
        self.refresh_token = Some(token.refresh_token.clone());
        self.persist().await
    }

    /// Returns the cached access token unless it is absent or within the
    /// expiry skew, in which case exactly one refresh is attempted. A
    /// provider-rejected refresh is terminal: the store clears itself and
    /// `None` is returned, forcing a re-login upstream.
    ///
    /// Idempotent-safe: calling again on a fresh token re-checks the expiry
    /// and no-ops.
    ///
    /// # Returns
    ///
    /// `Some(access_token)` when a usable token is available, `None` when the
    /// caller must send the user through the login flow again.
    ///
    /// # Errors
    ///
    /// Transport failures during the refresh propagate; they do not clear the
    /// stored credential, which may still be good.
    pub async fn get_valid_token(&mut self) -> Result<Option<String>> {
        self.get_valid_token_with(&mut SpotifyRefresh).await
    }

    /// [`TokenManager::get_valid_token`] over an explicit refresh backend.
    pub async fn get_valid_token_with<B: RefreshBackend>(
        &mut self,
        backend: &mut B,
    ) -> Result<Option<String>> {
        let now = Utc::now().timestamp() as u64;

        if let Some(access) = &self.access_token {
            if !needs_refresh(self.expires_at, now) {
                return Ok(Some(access.clone()));
            }
        }

        let Some(refresh) = self.refresh_token.clone() else {
            return Ok(None);
        };

        match backend.refresh(&refresh).await {
            Ok(token) => {
                self.access_token = Some(token.access_token.clone());
                self.expires_at = token.obtained_at + token.expires_in;
                // The provider may rotate the refresh token.
                if !token.refresh_token.is_empty() {
                    self.refresh_token = Some(token.refresh_token.clone());
                }
                self.persist().await?;
                Ok(Some(token.access_token))
            }
            Err(Error::TokenRefresh(_)) => {
                self.clear().await?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Drops the in-memory credential and removes the persisted refresh
    /// token.
    pub async fn clear(&mut self) -> Result<()> {
        self.access_token = None;
        self.expires_at = 0;
        self.refresh_token = None;

        let path = Self::credential_path();
        if path.exists() {
            async_fs::remove_file(path).await?;
        }
        Ok(())
    }

    pub fn has_refresh_token(&self) -> bool {
        self.refresh_token.is_some()
    }

    async fn persist(&self) -> Result<()> {
        let Some(refresh_token) = &self.refresh_token else {
            return Ok(());
        };

        let path = Self::credential_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&PersistedCredential {
            refresh_token: refresh_token.clone(),
        })?;
        async_fs::write(path, json).await?;
        Ok(())
    }

    fn credential_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("moodlist/cache/refresh_token.json");
        path
    }
}

impl Default for TokenManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Freshness check: a token within [`EXPIRY_SKEW_SECS`] of its expiry is
/// treated as expired.
pub fn needs_refresh(expires_at: u64, now: u64) -> bool {
    now + EXPIRY_SKEW_SECS >= expires_at
}
