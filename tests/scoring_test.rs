use std::collections::HashMap;

use rand::{SeedableRng, rngs::StdRng};

use moodlist::mood::MoodClass;
use moodlist::scoring::*;
use moodlist::types::{AudioFeatures, Track, TrackArtist};

fn create_test_track(id: &str, popularity: u32) -> Track {
    Track {
        id: id.to_string(),
        name: format!("track {}", id),
        artists: vec![TrackArtist {
            name: "artist".to_string(),
        }],
        uri: format!("spotify:track:{}", id),
        duration_ms: 200_000,
        popularity,
    }
}

fn create_features(id: &str, energy: f32, valence: f32, acousticness: f32) -> AudioFeatures {
    AudioFeatures {
        id: id.to_string(),
        energy,
        valence,
        danceability: 0.5,
        acousticness,
        speechiness: 0.5,
        tempo: 120.0,
    }
}

#[test]
fn test_dedupe_preserves_first_seen_order() {
    let mut tracks = vec![
        create_test_track("a", 10),
        create_test_track("b", 20),
        create_test_track("a", 99),
        create_test_track("c", 30),
        create_test_track("b", 5),
    ];

    dedupe_tracks(&mut tracks);

    let ids: Vec<&str> = tracks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    // The first occurrence survives
    assert_eq!(tracks[0].popularity, 10);
}

#[test]
fn test_score_without_descriptor_is_popularity_only() {
    let track = create_test_track("a", 73);
    let score = score_track(MoodClass::Sad, &track, None);
    assert!((score - 0.73).abs() < 1e-6);
}

#[test]
fn test_sad_mood_ranks_low_valence_acoustic_track_higher() {
    // Identical popularity; only the descriptors differ
    let tracks = vec![create_test_track("gloomy", 50), create_test_track("bright", 50)];

    let mut features = HashMap::new();
    features.insert("gloomy".to_string(), create_features("gloomy", 0.2, 0.1, 0.9));
    features.insert("bright".to_string(), create_features("bright", 0.8, 0.9, 0.1));

    let mut rng = StdRng::seed_from_u64(7);
    let ranked = rank_tracks(tracks, &features, MoodClass::Sad, 10, &mut rng);

    assert_eq!(ranked[0].track.id, "gloomy");
    assert!(ranked[0].score > ranked[1].score);
}

#[test]
fn test_partial_descriptors_fall_back_to_popularity_per_track() {
    let tracks = vec![create_test_track("covered", 40), create_test_track("bare", 40)];

    let mut features = HashMap::new();
    features.insert(
        "covered".to_string(),
        create_features("covered", 0.2, 0.1, 0.9),
    );

    let mut rng = StdRng::seed_from_u64(7);
    let ranked = rank_tracks(tracks, &features, MoodClass::Sad, 10, &mut rng);

    // The sad bonus is strictly positive here, so the covered track wins
    assert_eq!(ranked[0].track.id, "covered");
    assert!((ranked[1].score - 0.4).abs() < 1e-6);
}

#[test]
fn test_rank_without_any_descriptors_perturbs_popularity() {
    let tracks: Vec<Track> = (0..20)
        .map(|i| create_test_track(&format!("t{}", i), (i * 5) as u32))
        .collect();

    let features = HashMap::new();
    let mut rng = StdRng::seed_from_u64(42);
    let ranked = rank_tracks(tracks.clone(), &features, MoodClass::Other, 20, &mut rng);

    assert_eq!(ranked.len(), 20);

    // The perturbation is bounded by ±10 popularity points, so a gap larger
    // than 20 can never flip: popularity 95 must beat popularity 0.
    let pos_best = ranked.iter().position(|r| r.track.id == "t19").unwrap();
    let pos_worst = ranked.iter().position(|r| r.track.id == "t0").unwrap();
    assert!(pos_best < pos_worst);

    // A different seed may order ties differently but keeps the same set
    let mut rng2 = StdRng::seed_from_u64(43);
    let ranked2 = rank_tracks(tracks, &features, MoodClass::Other, 20, &mut rng2);
    assert_eq!(ranked2.len(), 20);
}

#[test]
fn test_rank_truncates_to_limit() {
    let tracks: Vec<Track> = (0..30)
        .map(|i| create_test_track(&format!("t{}", i), 50))
        .collect();

    let features = HashMap::new();
    let mut rng = StdRng::seed_from_u64(1);
    let ranked = rank_tracks(tracks, &features, MoodClass::Other, 10, &mut rng);

    assert_eq!(ranked.len(), 10);
}
