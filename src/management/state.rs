//! Persistence for the OAuth state nonce.
//!
//! The nonce is written before the authorize redirect and stays on disk until
//! the callback consumes it, so the CSRF check survives the round trip
//! through the user's browser.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Serialize, Deserialize)]
struct PersistedState {
    state: String,
}

pub struct AuthStateManager;

impl AuthStateManager {
    /// Persists the nonce for the pending login.
    pub async fn persist(nonce: &str) -> Result<()> {
        let path = Self::state_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&PersistedState {
            state: nonce.to_string(),
        })?;
        async_fs::write(path, json).await?;
        Ok(())
    }

    /// Loads the pending nonce without consuming it.
    pub async fn load() -> Result<String> {
        let content = async_fs::read_to_string(Self::state_path()).await?;
        let persisted: PersistedState = serde_json::from_str(&content)?;
        Ok(persisted.state)
    }

    /// Removes the persisted nonce. Called once a login attempt completes,
    /// successfully or not.
    pub async fn clear() -> Result<()> {
        let path = Self::state_path();
        if path.exists() {
            async_fs::remove_file(path).await?;
        }
        Ok(())
    }

    fn state_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("moodlist/cache/auth_state.json");
        path
    }
}
