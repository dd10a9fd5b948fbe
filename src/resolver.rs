//! Feature-range resolver boundary.
//!
//! The resolver is an external service that turns a mood context into target
//! audio-feature ranges. Whatever goes wrong on that boundary (transport
//! failure, non-2xx status, out-of-domain ranges) the caller degrades
//! silently to the fixed default ranges; resolver errors never reach the UI.

use reqwest::Client;

use crate::{
    config,
    error::{Error, Result},
    types::{FeatureRanges, MoodContext},
    warning,
};

/// Calls the configured resolver endpoint. Transport only: the returned
/// ranges are not validated here, the caller owns the fallback policy.
pub async fn resolve(context: &MoodContext) -> Result<FeatureRanges> {
    let url = config::mood_resolver_url()
        .ok_or_else(|| Error::Resolver("MOOD_RESOLVER_URL is not set".to_string()))?;

    let client = Client::new();
    let response = client.post(&url).json(context).send().await?;

    if !response.status().is_success() {
        return Err(Error::Resolver(format!(
            "resolver returned {}",
            response.status()
        )));
    }

    let ranges = response.json::<FeatureRanges>().await?;
    Ok(ranges)
}

/// The substitution policy as a pure function: a failed resolution or
/// out-of-domain ranges become the fixed defaults, keeping the user's genre
/// selection; valid ranges pass through with the user's picks moved to the
/// front of the genre list.
pub fn apply_fallback_policy(
    selected_genres: &[String],
    outcome: Result<FeatureRanges>,
) -> FeatureRanges {
    match outcome {
        Ok(ranges) if ranges.is_valid() => FeatureRanges {
            genres: prioritize_user_genres(selected_genres, ranges.genres.clone()),
            ..ranges
        },
        Ok(_) => FeatureRanges::default_for(selected_genres),
        Err(_) => FeatureRanges::default_for(selected_genres),
    }
}

/// Resolves feature ranges, substituting the defaults on any failure. The
/// underlying error is logged but never propagated.
pub async fn resolve_or_default(context: &MoodContext) -> FeatureRanges {
    let outcome = resolve(context).await;
    if let Err(e) = &outcome {
        warning!("Feature-range resolver unavailable, using defaults: {}", e);
    }
    apply_fallback_policy(&context.selected_genres, outcome)
}

/// User-selected genres rank first, in selection order; resolver additions
/// follow in their returned order, without duplicates.
pub fn prioritize_user_genres(selected: &[String], resolved: Vec<String>) -> Vec<String> {
    let mut ordered: Vec<String> = selected.to_vec();
    for genre in resolved {
        if !ordered.iter().any(|g| g.eq_ignore_ascii_case(&genre)) {
            ordered.push(genre);
        }
    }
    ordered
}
