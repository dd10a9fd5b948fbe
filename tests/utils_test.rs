use moodlist::types::{RankedTrack, Track, TrackArtist};
use moodlist::utils::*;

fn create_test_track(id: &str, name: &str, popularity: u32) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        artists: vec![TrackArtist {
            name: format!("{}_artist", id),
        }],
        uri: format!("spotify:track:{}", id),
        duration_ms: 210_000,
        popularity,
    }
}

#[test]
fn test_generate_state_nonce() {
    let nonce = generate_state_nonce();

    // Should be exactly 16 characters
    assert_eq!(nonce.len(), 16);

    // Should contain only alphanumeric characters
    assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated nonces should be different
    let nonce2 = generate_state_nonce();
    assert_ne!(nonce, nonce2);
}

#[test]
fn test_calculate_track_count() {
    // 105 minutes at 3.5 minutes per track -> ceiling of 30
    assert_eq!(calculate_track_count(105), 30);

    // Partial tracks round up
    assert_eq!(calculate_track_count(1), 1);
    assert_eq!(calculate_track_count(8), 3);

    assert_eq!(calculate_track_count(0), 0);
}

#[test]
fn test_chunk_ids_batching() {
    let ids: Vec<String> = (0..120).map(|i| format!("id{}", i)).collect();
    let chunks = chunk_ids(&ids, 50);

    // 120 ids must become exactly 3 requests of 50, 50, 20
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].len(), 50);
    assert_eq!(chunks[1].len(), 50);
    assert_eq!(chunks[2].len(), 20);

    // Order is preserved
    assert_eq!(chunks[0][0], "id0");
    assert_eq!(chunks[2][19], "id119");
}

#[test]
fn test_chunk_ids_small_input() {
    let ids: Vec<String> = (0..3).map(|i| format!("id{}", i)).collect();
    let chunks = chunk_ids(&ids, 50);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].len(), 3);

    let empty: Vec<String> = Vec::new();
    assert!(chunk_ids(&empty, 50).is_empty());
}

#[test]
fn test_build_track_rows() {
    let tracks = vec![
        RankedTrack {
            track: create_test_track("a", "First", 80),
            score: 0.91234,
        },
        RankedTrack {
            track: create_test_track("b", "Second", 60),
            score: 0.5,
        },
    ];

    let rows = build_track_rows(&tracks);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].rank, 1);
    assert_eq!(rows[0].title, "First");
    assert_eq!(rows[0].score, "0.912");
    assert_eq!(rows[1].rank, 2);
    assert_eq!(rows[1].popularity, 60);
}
