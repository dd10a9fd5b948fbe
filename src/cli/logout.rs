use crate::{error, management::{AuthStateManager, TokenManager}, success};

pub async fn logout() {
    let mut token_mgr = TokenManager::load().await.unwrap_or_default();
    if let Err(e) = token_mgr.clear().await {
        error!("Failed to clear credentials: {}", e);
    }
    if let Err(e) = AuthStateManager::clear().await {
        error!("Failed to clear pending login state: {}", e);
    }

    success!("Logged out. Stored credentials removed.");
}
