//! OAuth callback handler.
//!
//! Completes the login via [`spotify::auth::complete_login`], which compares
//! the returned state against the persisted nonce before any token request
//! leaves this process.

use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{error::Error, spotify, types::AuthFlow, warning};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<AuthFlow>>>>,
) -> Html<&'static str> {
    if let Some(e) = params.get("error") {
        warning!("Authorization denied by provider: {}", e);
        return Html("<h4>Authorization denied.</h4>");
    }

    let (Some(code), Some(state)) = (params.get("code"), params.get("state")) else {
        return Html("<h4>Missing code or state parameter.</h4>");
    };

    let mut lock = shared_state.lock().await;
    let Some(ref mut flow) = lock.as_mut() else {
        return Html("<h4>No login in progress.</h4>");
    };

    match spotify::auth::complete_login(code, state).await {
        Ok(token) => {
            flow.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>Close this browser window.</p>")
        }
        Err(Error::StateMismatch) => {
            warning!("State mismatch on OAuth callback; aborting login.");
            Html("<h4>State mismatch. Login aborted.</h4>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
