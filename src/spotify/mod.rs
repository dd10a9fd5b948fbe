//! # Spotify Integration Module
//!
//! The integration layer between moodlist and the Spotify Web API: the
//! confidential-client OAuth 2.0 authorization-code flow, catalog search with
//! audio-descriptor enrichment, the mood-ranked recommendation pipeline, and
//! playlist creation.
//!
//! ## Submodules
//!
//! - [`auth`] - Authorize-URL construction with a CSRF state nonce, the
//!   code-for-token exchange (Basic auth, no PKCE) and refresh requests
//! - [`search`] - Track search by genre filter plus mood keywords, and the
//!   batched audio-features fetch (≤50 ids per request)
//! - [`recommend`] - The search → dedupe → score → rank pipeline
//! - [`playlist`] - Playlist creation and bulk track insertion
//!
//! ## Error handling
//!
//! Transport and authorization failures surface as [`crate::error::Error`]
//! variants. The descriptor fetch is the exception: a failed batch only
//! degrades scoring for its tracks, it never aborts a recommendation.
//!
//! ## Endpoints used
//!
//! - `GET /authorize`, `POST /api/token` (accounts service)
//! - `GET /search`, `GET /audio-features`
//! - `GET /me`, `POST /users/{id}/playlists`, `POST /playlists/{id}/tracks`

pub mod auth;
pub mod playlist;
pub mod recommend;
pub mod search;
