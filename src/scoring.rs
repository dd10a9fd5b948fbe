//! Dedupe / score / rank stages of the recommendation pipeline.
//!
//! Scoring never fails: tracks without a descriptor fall back to their
//! popularity, and when no descriptors were obtainable at all the ranking
//! degrades to a popularity sort with a random perturbation from the injected
//! RNG, so repeated searches do not return an identical top-N.

use std::collections::{HashMap, HashSet};

use rand::Rng;

use crate::{
    mood::{MoodClass, profile_for},
    types::{AudioFeatures, RankedTrack, Track},
};

/// Magnitude of the popularity perturbation used when ranking without any
/// descriptors. Popularity is on a 0-100 scale.
const PERTURBATION: f32 = 10.0;

/// Removes duplicate tracks by catalog id, preserving first-seen order.
pub fn dedupe_tracks(tracks: &mut Vec<Track>) {
    let mut seen_ids = HashSet::new();
    tracks.retain(|track| seen_ids.insert(track.id.clone()));
}

/// Scores a single candidate: popularity base in [0,1] plus the
/// mood-conditioned descriptor bonus. No descriptor means popularity alone.
pub fn score_track(class: MoodClass, track: &Track, features: Option<&AudioFeatures>) -> f32 {
    let base = track.popularity as f32 / 100.0;
    match features {
        Some(f) => base + profile_for(class).bonus(f),
        None => base,
    }
}

/// Ranks candidates descending by score and truncates to `limit`.
///
/// `features` maps track id to descriptor. An empty map switches to the
/// popularity-with-perturbation fallback; a partially filled map scores the
/// uncovered tracks on popularity alone.
pub fn rank_tracks<R: Rng>(
    tracks: Vec<Track>,
    features: &HashMap<String, AudioFeatures>,
    class: MoodClass,
    limit: usize,
    rng: &mut R,
) -> Vec<RankedTrack> {
    let mut ranked: Vec<RankedTrack> = if features.is_empty() {
        tracks
            .into_iter()
            .map(|track| {
                let jitter = rng.random_range(-PERTURBATION..PERTURBATION);
                let score = (track.popularity as f32 + jitter) / 100.0;
                RankedTrack { track, score }
            })
            .collect()
    } else {
        tracks
            .into_iter()
            .map(|track| {
                let score = score_track(class, &track, features.get(&track.id));
                RankedTrack { track, score }
            })
            .collect()
    };

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(limit);
    ranked
}
