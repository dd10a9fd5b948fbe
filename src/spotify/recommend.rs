//! The recommendation pipeline: search, dedupe, descriptor fetch, rank.
//!
//! An empty result is a valid terminal outcome, not an error. Only the
//! search step can fail hard; descriptor and scoring problems degrade to a
//! popularity ranking.

use rand::Rng;

use crate::{
    error::Result,
    mood::{self, MoodClass},
    scoring,
    spotify::search::{self, SearchBackend, SpotifySearch},
    types::{FeatureRanges, RankedTrack},
};

/// Canonical entry point: recommends tracks for pre-resolved feature ranges
/// against the live catalog.
pub async fn recommend<R: Rng>(
    class: MoodClass,
    ranges: &FeatureRanges,
    limit: usize,
    token: &str,
    rng: &mut R,
) -> Result<Vec<RankedTrack>> {
    recommend_with(&mut SpotifySearch, class, ranges, limit, token, rng).await
}

/// The pipeline over an explicit backend.
///
/// Searches once per genre in the resolved list, aggregates and dedupes by
/// track id (first-seen order). An empty aggregate triggers exactly one
/// fallback search on the primary genre before giving up. Candidates are
/// then scored against the mood class and truncated to `limit`.
pub async fn recommend_with<S: SearchBackend, R: Rng>(
    backend: &mut S,
    class: MoodClass,
    ranges: &FeatureRanges,
    limit: usize,
    token: &str,
    rng: &mut R,
) -> Result<Vec<RankedTrack>> {
    let keywords = mood::mood_keywords(ranges);

    let mut candidates = Vec::new();
    for genre in &ranges.genres {
        let query = search::build_search_query(genre, &keywords);
        let tracks = backend.search_tracks(&query, token).await?;
        candidates.extend(tracks);
    }
    scoring::dedupe_tracks(&mut candidates);

    if candidates.is_empty() {
        if let Some(primary) = ranges.genres.first() {
            let query = search::fallback_query(primary);
            candidates = backend.search_tracks(&query, token).await?;
            scoring::dedupe_tracks(&mut candidates);
        }
    }

    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<String> = candidates.iter().map(|t| t.id.clone()).collect();
    let features = backend.fetch_audio_features(&ids, token).await;

    Ok(scoring::rank_tracks(candidates, &features, class, limit, rng))
}
