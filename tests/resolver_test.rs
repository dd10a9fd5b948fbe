use moodlist::error::Error;
use moodlist::resolver::*;
use moodlist::types::FeatureRanges;

fn valid_ranges(genres: Vec<&str>) -> FeatureRanges {
    FeatureRanges {
        valence: [0.1, 0.3],
        energy: [0.2, 0.4],
        tempo: [70.0, 100.0],
        acousticness: [0.6, 0.9],
        genres: genres.into_iter().map(|g| g.to_string()).collect(),
    }
}

fn selected(genres: &[&str]) -> Vec<String> {
    genres.iter().map(|g| g.to_string()).collect()
}

#[test]
fn test_default_ranges_shape() {
    let defaults = FeatureRanges::default_for(&[]);
    assert_eq!(defaults.valence, [0.4, 0.6]);
    assert_eq!(defaults.energy, [0.4, 0.6]);
    assert_eq!(defaults.tempo, [90.0, 130.0]);
    assert_eq!(defaults.acousticness, [0.3, 0.7]);
    assert_eq!(defaults.genres, vec!["pop"]);
}

#[test]
fn test_resolver_failure_keeps_selected_genres() {
    // A resolver failure must fall back to the user's picks, not to "pop"
    let ranges = apply_fallback_policy(
        &selected(&["Jazz", "Lofi"]),
        Err(Error::Resolver("boom".to_string())),
    );

    assert_eq!(ranges.genres, vec!["Jazz", "Lofi"]);
    assert_eq!(ranges.valence, [0.4, 0.6]);
    assert_eq!(ranges.tempo, [90.0, 130.0]);
}

#[test]
fn test_resolver_failure_without_selection_defaults_to_pop() {
    let ranges = apply_fallback_policy(&[], Err(Error::Resolver("boom".to_string())));
    assert_eq!(ranges.genres, vec!["pop"]);
}

#[test]
fn test_inverted_interval_triggers_default_substitution() {
    let mut bad = valid_ranges(vec!["rock"]);
    bad.valence = [0.9, 0.1];

    let ranges = apply_fallback_policy(&selected(&["Rock"]), Ok(bad));
    assert_eq!(ranges.valence, [0.4, 0.6]);
    assert_eq!(ranges.genres, vec!["Rock"]);
}

#[test]
fn test_out_of_domain_tempo_triggers_default_substitution() {
    let mut bad = valid_ranges(vec!["rock"]);
    bad.tempo = [30.0, 100.0];

    let ranges = apply_fallback_policy(&selected(&["Rock"]), Ok(bad));
    assert_eq!(ranges.tempo, [90.0, 130.0]);
}

#[test]
fn test_valid_ranges_pass_through() {
    let ranges = apply_fallback_policy(&[], Ok(valid_ranges(vec!["indie", "folk"])));
    assert_eq!(ranges.valence, [0.1, 0.3]);
    assert_eq!(ranges.acousticness, [0.6, 0.9]);
    assert_eq!(ranges.genres, vec!["indie", "folk"]);
}

#[test]
fn test_user_genres_rank_first_in_resolved_list() {
    let ranges = apply_fallback_policy(
        &selected(&["Jazz"]),
        Ok(valid_ranges(vec!["indie", "jazz", "folk"])),
    );

    // User pick first, resolver additions after, no duplicate jazz
    assert_eq!(ranges.genres, vec!["Jazz", "indie", "folk"]);
}

#[test]
fn test_prioritize_user_genres() {
    let merged = prioritize_user_genres(
        &selected(&["Rock", "Pop"]),
        vec!["pop".to_string(), "metal".to_string()],
    );
    assert_eq!(merged, vec!["Rock", "Pop", "metal"]);
}

#[test]
fn test_is_valid_domains() {
    assert!(valid_ranges(vec!["pop"]).is_valid());

    let mut bad = valid_ranges(vec!["pop"]);
    bad.energy = [0.5, 1.2];
    assert!(!bad.is_valid());

    let mut bad = valid_ranges(vec!["pop"]);
    bad.acousticness = [-0.1, 0.5];
    assert!(!bad.is_valid());

    let mut bad = valid_ranges(vec!["pop"]);
    bad.tempo = [120.0, 220.0];
    assert!(!bad.is_valid());
}
