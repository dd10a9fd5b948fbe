use crate::{config, info, management::TokenManager};

pub async fn info() {
    let client_id = match config::spotify_client_id() {
        Ok(_) => "configured",
        Err(_) => "missing",
    };
    let client_secret = match config::spotify_client_secret() {
        Ok(_) => "configured",
        Err(_) => "missing",
    };

    info!("Client ID: {}", client_id);
    info!("Client secret: {}", client_secret);
    info!("Redirect URI: {}", config::spotify_redirect_uri());
    info!("Catalog market: {}", config::spotify_market());

    match config::mood_resolver_url() {
        Some(url) => info!("Feature-range resolver: {}", url),
        None => info!("Feature-range resolver: not configured (using default ranges)"),
    }

    match TokenManager::load().await {
        Ok(mgr) if mgr.has_refresh_token() => info!("Credential: refresh token present"),
        _ => info!("Credential: none (run moodlist auth)"),
    }
}
