//! Playlist creation against the user's account.
//!
//! Three steps, all required: resolve the current user id, create an empty
//! private playlist, append all track URIs in one bulk call. Any non-2xx
//! aborts the whole operation; a partially created playlist is left behind
//! on the provider and not rolled back.

use chrono::Local;
use reqwest::Client;

use crate::{
    config,
    error::{Error, Result},
    types::{
        AddTracksRequest, AddTracksResponse, CreatePlaylistRequest, CreatePlaylistResponse,
        RankedTrack, UserProfile,
    },
};

/// Creates a private playlist with the given tracks and returns its id.
/// The default description carries the generation date.
pub async fn create(
    tracks: &[RankedTrack],
    name: &str,
    description: Option<&str>,
    token: &str,
) -> Result<String> {
    let user = current_user(token).await?;

    let default_description = format!("Generated on {}", Local::now().format("%Y-%m-%d %H:%M"));
    let description = description.unwrap_or(&default_description);

    let playlist_id = create_empty(&user.id, name, description, token).await?;

    let uris: Vec<String> = tracks.iter().map(|rt| rt.track.uri.clone()).collect();
    add_tracks(&playlist_id, uris, token).await?;

    Ok(playlist_id)
}

/// Resolves the authenticated user's id via `/me`.
pub async fn current_user(token: &str) -> Result<UserProfile> {
    let client = Client::new();
    let response = client
        .get(format!("{}/me", config::spotify_api_url()))
        .bearer_auth(token)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(Error::PlaylistCreation(format!(
            "failed to get user profile: {}",
            response.status()
        )));
    }

    Ok(response.json::<UserProfile>().await?)
}

async fn create_empty(user_id: &str, name: &str, description: &str, token: &str) -> Result<String> {
    let client = Client::new();
    let response = client
        .post(format!(
            "{}/users/{}/playlists",
            config::spotify_api_url(),
            user_id
        ))
        .bearer_auth(token)
        .json(&CreatePlaylistRequest {
            name: name.to_string(),
            description: description.to_string(),
            public: false,
        })
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(Error::PlaylistCreation(format!(
            "failed to create playlist: {}",
            response.status()
        )));
    }

    let playlist = response.json::<CreatePlaylistResponse>().await?;
    Ok(playlist.id)
}

async fn add_tracks(playlist_id: &str, uris: Vec<String>, token: &str) -> Result<AddTracksResponse> {
    let client = Client::new();
    let response = client
        .post(format!(
            "{}/playlists/{}/tracks",
            config::spotify_api_url(),
            playlist_id
        ))
        .bearer_auth(token)
        .json(&AddTracksRequest { uris })
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(Error::PlaylistCreation(format!(
            "failed to add tracks: {}",
            response.status()
        )));
    }

    Ok(response.json::<AddTracksResponse>().await?)
}
