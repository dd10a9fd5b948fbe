mod auth;
mod state;

pub use auth::{EXPIRY_SKEW_SECS, RefreshBackend, SpotifyRefresh, TokenManager, needs_refresh};
pub use state::AuthStateManager;
