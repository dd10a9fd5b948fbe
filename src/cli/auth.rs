use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{error, spotify, types::AuthFlow};

pub async fn auth(shared_state: Arc<Mutex<Option<AuthFlow>>>) {
    if let Err(e) = spotify::auth::login(shared_state).await {
        error!("Authentication failed: {}", e);
    }
}
