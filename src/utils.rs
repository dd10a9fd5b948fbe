use rand::{Rng, distr::Alphanumeric};

use crate::types::{RankedTrack, TrackTableRow};

/// Average track length assumed when deriving a track count from a requested
/// playlist duration.
pub const AVERAGE_TRACK_MINUTES: f32 = 3.5;

/// Generates the CSRF state nonce sent with the authorize redirect:
/// 16 characters from an alphanumeric alphabet.
pub fn generate_state_nonce() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

/// Number of tracks needed to fill `duration_min` minutes, rounded up.
pub fn calculate_track_count(duration_min: u32) -> usize {
    (duration_min as f32 / AVERAGE_TRACK_MINUTES).ceil() as usize
}

/// Splits track ids into request-sized chunks. The descriptor endpoint caps
/// at 50 ids per call.
pub fn chunk_ids(ids: &[String], size: usize) -> Vec<Vec<String>> {
    ids.chunks(size).map(|c| c.to_vec()).collect()
}

pub fn build_track_rows(tracks: &[RankedTrack]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, rt)| TrackTableRow {
            rank: i + 1,
            title: rt.track.name.clone(),
            artists: rt.track.artist_names(),
            score: format!("{:.3}", rt.score),
            popularity: rt.track.popularity,
        })
        .collect()
}
