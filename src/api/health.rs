//! Liveness probe for the local callback server.
//!
//! Lets the login flow (or a curious user) confirm the server came up on the
//! configured address while the browser round trip is in flight.

use axum::response::Json;
use serde_json::{Value, json};

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
