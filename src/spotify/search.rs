//! Catalog search and audio-descriptor retrieval.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::{
    config,
    error::{Error, Result},
    mood,
    types::{AudioFeatures, AudioFeaturesResponse, SearchResponse, Track},
    utils, warning,
};

/// Fixed page size for catalog search requests.
pub const SEARCH_PAGE_SIZE: u32 = 50;

/// Maximum ids per audio-features request (catalog API constraint).
pub const FEATURES_BATCH_SIZE: usize = 50;

/// The catalog transport behind the recommendation pipeline. The pipeline
/// takes it as a parameter so tests can observe how often each call happens.
#[async_trait]
pub trait SearchBackend {
    async fn search_tracks(&mut self, query: &str, token: &str) -> Result<Vec<Track>>;
    async fn fetch_audio_features(
        &mut self,
        ids: &[String],
        token: &str,
    ) -> HashMap<String, AudioFeatures>;
}

/// The real backend: HTTP calls against the configured Spotify API.
pub struct SpotifySearch;

#[async_trait]
impl SearchBackend for SpotifySearch {
    async fn search_tracks(&mut self, query: &str, token: &str) -> Result<Vec<Track>> {
        search_tracks(query, token).await
    }

    async fn fetch_audio_features(
        &mut self,
        ids: &[String],
        token: &str,
    ) -> HashMap<String, AudioFeatures> {
        fetch_audio_features(ids, token).await
    }
}

/// Builds the search query for one user-facing genre: its taxonomy terms as
/// an OR-joined `genre:` filter, with the mood keywords layered on.
pub fn build_search_query(genre: &str, keywords: &[&str]) -> String {
    let genre_filters = mood::catalog_genres(genre)
        .iter()
        .map(|g| format!("genre:{}", g))
        .collect::<Vec<String>>()
        .join(" OR ");

    if keywords.is_empty() {
        format!("({})", genre_filters)
    } else {
        format!("({}) {}", genre_filters, keywords.join(" "))
    }
}

/// The retry query used when the full genre filter matched nothing: only the
/// primary genre's first taxonomy term, no keywords.
pub fn fallback_query(primary_genre: &str) -> String {
    let genres = mood::catalog_genres(primary_genre);
    format!("genre:{}", genres[0])
}

/// Runs one track search against the catalog. A non-2xx response is a hard
/// failure; the recommendation pipeline does not degrade past it.
pub async fn search_tracks(query: &str, token: &str) -> Result<Vec<Track>> {
    let url = Url::parse_with_params(
        &format!("{}/search", config::spotify_api_url()),
        &[
            ("q", query),
            ("type", "track"),
            ("limit", SEARCH_PAGE_SIZE.to_string().as_str()),
            ("market", config::spotify_market().as_str()),
        ],
    )
    .map_err(|e| Error::Search(format!("invalid search URL: {}", e)))?;

    let client = Client::new();
    let response = client.get(url).bearer_auth(token).send().await?;

    if !response.status().is_success() {
        return Err(Error::Search(format!(
            "search returned {}",
            response.status()
        )));
    }

    let data = response.json::<SearchResponse>().await?;
    Ok(data.tracks.items)
}

/// Fetches audio descriptors for the given track ids in sequential batches of
/// at most [`FEATURES_BATCH_SIZE`].
///
/// Batch failures are logged and degrade those tracks to "no descriptor";
/// they never abort the operation, so the result may cover only part of the
/// input.
pub async fn fetch_audio_features(ids: &[String], token: &str) -> HashMap<String, AudioFeatures> {
    let client = Client::new();
    let mut features = HashMap::new();

    for batch in utils::chunk_ids(ids, FEATURES_BATCH_SIZE) {
        let url = format!(
            "{}/audio-features?ids={}",
            config::spotify_api_url(),
            batch.join(",")
        );

        let response = match client.get(&url).bearer_auth(token).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warning!("Audio-features batch failed: {}", e);
                continue;
            }
        };

        if !response.status().is_success() {
            warning!("Audio-features batch returned {}", response.status());
            continue;
        }

        match response.json::<AudioFeaturesResponse>().await {
            Ok(data) => {
                for f in data.audio_features.into_iter().flatten() {
                    features.insert(f.id.clone(), f);
                }
            }
            Err(e) => warning!("Audio-features batch unreadable: {}", e),
        }
    }

    features
}
