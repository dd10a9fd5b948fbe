//! OAuth 2.0 authorization-code flow (confidential client).
//!
//! Login builds an authorize URL carrying a random state nonce, opens it in
//! the browser, and waits for the local callback server to exchange the
//! returned code for tokens. The exchange authenticates with Basic auth
//! (`base64(client_id:client_secret)`); no PKCE is involved, so a deployed
//! binary needs the client secret in its environment.

use std::{sync::Arc, time::Duration};

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::{Client, Url};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::{
    config,
    error::{Error, Result},
    management::{AuthStateManager, TokenManager},
    server::start_api_server,
    success,
    types::{AuthFlow, Token},
    utils, warning,
};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
    refresh_token: Option<String>,
}

/// Runs the complete login flow: generate and persist the state nonce, start
/// the local callback server, open the authorize URL in the browser, wait for
/// the callback to finish the exchange, and persist the credential.
///
/// # Arguments
///
/// * `shared_state` - Flow state shared with the callback handler; the
///   callback deposits the exchanged token here.
///
/// # Returns
///
/// Returns `Ok(())` once a credential is stored.
///
/// # Errors
///
/// Returns [`Error::Configuration`] when no client id is configured, and
/// [`Error::AuthExchange`] when the callback never delivered a token within
/// the 60 second window (denied consent, closed browser, failed exchange).
pub async fn login(shared_state: Arc<Mutex<Option<AuthFlow>>>) -> Result<()> {
    let state_nonce = utils::generate_state_nonce();
    AuthStateManager::persist(&state_nonce).await?;

    let auth_url = build_authorize_url(&state_nonce)?;

    // Mark the login as pending before the redirect
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(AuthFlow { token: None });
    }

    // start API server
    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        start_api_server(server_state).await;
    });

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    // wait for callback to be hit
    let token = wait_for_token(shared_state).await;
    AuthStateManager::clear().await?;

    match token {
        Some(t) => {
            let mut token_manager = TokenManager::new();
            token_manager.set_credential(&t).await?;
            success!("Authentication successful!");
            Ok(())
        }
        None => Err(Error::AuthExchange(
            "authentication failed or timed out".to_string(),
        )),
    }
}

/// Builds the provider authorize URL with `response_type=code`, the fixed
/// scope list and the given state nonce. Fails when no client id is
/// configured.
pub fn build_authorize_url(state_nonce: &str) -> Result<String> {
    let client_id = config::spotify_client_id()?;

    let url = Url::parse_with_params(
        &config::spotify_auth_url(),
        &[
            ("response_type", "code"),
            ("client_id", client_id.as_str()),
            ("scope", config::spotify_scope().as_str()),
            ("redirect_uri", config::spotify_redirect_uri().as_str()),
            ("state", state_nonce),
        ],
    )
    .map_err(|e| Error::Configuration(format!("invalid authorize URL: {}", e)))?;

    Ok(url.to_string())
}

/// The CSRF check: the state returned by the provider must equal the nonce
/// persisted before the redirect. Pure, and checked before any network call.
pub fn verify_state(received: &str, expected: &str) -> Result<()> {
    if received != expected {
        return Err(Error::StateMismatch);
    }
    Ok(())
}

/// Completes the login: verifies `state` against the persisted nonce (a
/// mismatch short-circuits before any network call), then exchanges the code.
pub async fn complete_login(code: &str, state: &str) -> Result<Token> {
    let expected = AuthStateManager::load()
        .await
        .map_err(|_| Error::StateMismatch)?;
    verify_state(state, &expected)?;

    exchange_code(code).await
}

/// Exchanges an authorization code for tokens at the provider token endpoint.
///
/// The request is a form POST authenticated with
/// `Basic base64(client_id:client_secret)`; the registered redirect URI must
/// be repeated in the body for the provider to accept the code.
///
/// # Returns
///
/// The fresh [`Token`], stamped with the local time it was obtained.
///
/// # Errors
///
/// Returns [`Error::Configuration`] when client id or secret are missing and
/// [`Error::AuthExchange`] when the provider answers non-2xx.
pub async fn exchange_code(code: &str) -> Result<Token> {
    let redirect_uri = config::spotify_redirect_uri();

    let client = Client::new();
    let response = client
        .post(config::spotify_token_url())
        .header("Authorization", basic_auth_header()?)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(Error::AuthExchange(format!(
            "token endpoint returned {}",
            response.status()
        )));
    }

    let data = response.json::<TokenResponse>().await?;
    Ok(token_from_response(data))
}

/// Exchanges a refresh token for a new access token. A non-2xx response is
/// terminal for the credential; the token store handles the cleanup.
pub async fn refresh_token(refresh_token: &str) -> Result<Token> {
    let client = Client::new();
    let response = client
        .post(config::spotify_token_url())
        .header("Authorization", basic_auth_header()?)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(Error::TokenRefresh(format!(
            "token endpoint returned {}",
            response.status()
        )));
    }

    let data = response.json::<TokenResponse>().await?;
    Ok(token_from_response(data))
}

fn token_from_response(data: TokenResponse) -> Token {
    Token {
        access_token: data.access_token,
        refresh_token: data.refresh_token.unwrap_or_default(),
        expires_in: data.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    }
}

fn basic_auth_header() -> Result<String> {
    let client_id = config::spotify_client_id()?;
    let client_secret = config::spotify_client_secret()?;
    let credentials = STANDARD.encode(format!("{}:{}", client_id, client_secret));
    Ok(format!("Basic {}", credentials))
}

async fn wait_for_token(shared_state: Arc<Mutex<Option<AuthFlow>>>) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(flow) = lock.as_ref() {
            if let Some(token) = &flow.token {
                return Some(token.clone());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}
