use moodlist::spotify::search::*;

#[test]
fn test_build_search_query_with_keywords() {
    let query = build_search_query("Jazz", &["upbeat", "energetic"]);
    assert_eq!(
        query,
        "(genre:jazz OR genre:jazz-funk OR genre:bebop) upbeat energetic"
    );
}

#[test]
fn test_build_search_query_without_keywords() {
    let query = build_search_query("Rock", &[]);
    assert_eq!(query, "(genre:rock OR genre:alternative OR genre:hard-rock)");
}

#[test]
fn test_build_search_query_unknown_genre() {
    let query = build_search_query("Lofi", &["melancholic", "ambient"]);
    assert_eq!(query, "(genre:lofi) melancholic ambient");
}

#[test]
fn test_fallback_query_uses_primary_taxonomy_term_only() {
    // The retry after an empty aggregate drops keywords and secondary terms
    assert_eq!(fallback_query("Jazz"), "genre:jazz");
    assert_eq!(fallback_query("Electronic"), "genre:electronic");
    assert_eq!(fallback_query("Lofi"), "genre:lofi");
}

#[test]
fn test_batch_size_matches_catalog_constraint() {
    assert_eq!(FEATURES_BATCH_SIZE, 50);
    assert_eq!(SEARCH_PAGE_SIZE, 50);
}
