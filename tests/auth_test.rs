use async_trait::async_trait;
use chrono::Utc;

use moodlist::error::{Error, Result};
use moodlist::management::{EXPIRY_SKEW_SECS, RefreshBackend, TokenManager, needs_refresh};
use moodlist::spotify::auth::verify_state;
use moodlist::types::Token;

/// Provider stand-in that counts how often a refresh was requested.
struct CountingRefresher {
    calls: usize,
    reject: bool,
}

#[async_trait]
impl RefreshBackend for CountingRefresher {
    async fn refresh(&mut self, _refresh_token: &str) -> Result<Token> {
        self.calls += 1;
        if self.reject {
            Err(Error::TokenRefresh("invalid_grant".to_string()))
        } else {
            Ok(Token {
                access_token: "fresh-access".to_string(),
                refresh_token: "rotated".to_string(),
                expires_in: 3600,
                obtained_at: Utc::now().timestamp() as u64,
            })
        }
    }
}

#[test]
fn test_verify_state_match() {
    assert!(verify_state("abcDEF1234567890", "abcDEF1234567890").is_ok());
}

#[test]
fn test_verify_state_mismatch() {
    // The check is pure: no client, no configuration, no network
    let result = verify_state("attacker-supplied", "abcDEF1234567890");
    assert!(matches!(result, Err(Error::StateMismatch)));
}

#[test]
fn test_token_near_expiry_needs_refresh() {
    let now = Utc::now().timestamp() as u64;

    // 30 seconds of life left is inside the 60 second skew
    assert!(needs_refresh(now + 30, now));

    // An hour of life left is fresh
    assert!(!needs_refresh(now + 3600, now));
}

#[test]
fn test_refresh_boundary_is_the_skew() {
    let now = 1_000_000u64;
    assert!(needs_refresh(now + EXPIRY_SKEW_SECS, now));
    assert!(!needs_refresh(now + EXPIRY_SKEW_SECS + 1, now));
    assert!(needs_refresh(now, now));
}

#[tokio::test]
async fn test_token_within_skew_refreshes_exactly_once() {
    let mut mgr = TokenManager::new();
    let mut backend = CountingRefresher {
        calls: 0,
        reject: false,
    };

    // 30 seconds of life left is inside the skew
    mgr.set_credential(&Token {
        access_token: "stale".to_string(),
        refresh_token: "seed".to_string(),
        expires_in: 30,
        obtained_at: Utc::now().timestamp() as u64,
    })
    .await
    .unwrap();

    let token = mgr.get_valid_token_with(&mut backend).await.unwrap();
    assert_eq!(token.as_deref(), Some("fresh-access"));
    assert_eq!(backend.calls, 1);

    // The refreshed token is fresh, so asking again does not refresh
    let token = mgr.get_valid_token_with(&mut backend).await.unwrap();
    assert_eq!(token.as_deref(), Some("fresh-access"));
    assert_eq!(backend.calls, 1);
}

#[tokio::test]
async fn test_session_start_refreshes_exactly_once() {
    // A new process holds only the refresh token
    let mut mgr = TokenManager::with_refresh_token("seed".to_string());
    let mut backend = CountingRefresher {
        calls: 0,
        reject: false,
    };

    let token = mgr.get_valid_token_with(&mut backend).await.unwrap();
    assert_eq!(token.as_deref(), Some("fresh-access"));
    assert_eq!(backend.calls, 1);

    let token = mgr.get_valid_token_with(&mut backend).await.unwrap();
    assert_eq!(token.as_deref(), Some("fresh-access"));
    assert_eq!(backend.calls, 1);
}

#[tokio::test]
async fn test_rejected_refresh_is_terminal() {
    let mut mgr = TokenManager::with_refresh_token("revoked".to_string());
    let mut backend = CountingRefresher {
        calls: 0,
        reject: true,
    };

    let token = mgr.get_valid_token_with(&mut backend).await.unwrap();
    assert!(token.is_none());
    assert_eq!(backend.calls, 1);
    assert!(!mgr.has_refresh_token());

    // The credential is gone; a second ask cannot retry the refresh
    let token = mgr.get_valid_token_with(&mut backend).await.unwrap();
    assert!(token.is_none());
    assert_eq!(backend.calls, 1);
}
