//! Mood classification and the data-driven scoring policy.
//!
//! Free-text moods collapse into a closed set of classes; each class maps to
//! a weighting profile over the track descriptor fields. The table is the
//! single place where the ranking policy lives, so tests can enumerate it.

use crate::types::{AudioFeatures, FeatureRanges};

/// Closed mood classification. Unmapped text lands in `Other`, which carries
/// an explicit default row in the weight table rather than no weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodClass {
    Energetic,
    Calm,
    Sad,
    Focused,
    Other,
}

impl MoodClass {
    /// Case-insensitive classification of a free-text mood label.
    pub fn classify(mood: &str) -> Self {
        match mood.trim().to_lowercase().as_str() {
            "happy" | "energetic" | "excited" | "confident" | "upbeat" => MoodClass::Energetic,
            "calm" | "relaxed" | "peaceful" | "chill" => MoodClass::Calm,
            "sad" | "melancholic" | "melancholy" | "gloomy" => MoodClass::Sad,
            "focused" | "focus" | "concentrated" | "studying" => MoodClass::Focused,
            _ => MoodClass::Other,
        }
    }
}

/// How a descriptor field contributes to the mood bonus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Reward values near 1.
    High,
    /// Reward values near 0.
    Low,
    /// Reward values near 0.5.
    Mid,
}

impl Shape {
    fn score(&self, value: f32) -> f32 {
        match self {
            Shape::High => value,
            Shape::Low => 1.0 - value,
            Shape::Mid => 1.0 - 2.0 * (value - 0.5).abs(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FeatureWeight {
    pub weight: f32,
    pub shape: Shape,
}

impl FeatureWeight {
    const fn new(weight: f32, shape: Shape) -> Self {
        Self { weight, shape }
    }

    fn apply(&self, value: f32) -> f32 {
        self.weight * self.shape.score(value)
    }
}

/// Per-mood weighting over the descriptor fields. Unused fields are `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoodProfile {
    pub energy: Option<FeatureWeight>,
    pub valence: Option<FeatureWeight>,
    pub danceability: Option<FeatureWeight>,
    pub acousticness: Option<FeatureWeight>,
    pub speechiness: Option<FeatureWeight>,
}

impl MoodProfile {
    /// Weighted bonus for a descriptor, added on top of the popularity base.
    pub fn bonus(&self, features: &AudioFeatures) -> f32 {
        let mut bonus = 0.0;
        if let Some(w) = &self.energy {
            bonus += w.apply(features.energy);
        }
        if let Some(w) = &self.valence {
            bonus += w.apply(features.valence);
        }
        if let Some(w) = &self.danceability {
            bonus += w.apply(features.danceability);
        }
        if let Some(w) = &self.acousticness {
            bonus += w.apply(features.acousticness);
        }
        if let Some(w) = &self.speechiness {
            bonus += w.apply(features.speechiness);
        }
        bonus
    }
}

/// The ranking policy table. Weights are tuning values; the directions are
/// fixed: energetic moods reward energy, valence and danceability, calm moods
/// reward quiet mid-valence tracks, sad moods reward low valence and energy
/// with high acousticness, focused moods reward moderate energy with little
/// danceability or speech. Everything else gets an energy-only bonus.
pub fn profile_for(class: MoodClass) -> MoodProfile {
    const W: f32 = 0.15;

    match class {
        MoodClass::Energetic => MoodProfile {
            energy: Some(FeatureWeight::new(W, Shape::High)),
            valence: Some(FeatureWeight::new(W, Shape::High)),
            danceability: Some(FeatureWeight::new(W, Shape::High)),
            ..Default::default()
        },
        MoodClass::Calm => MoodProfile {
            energy: Some(FeatureWeight::new(W, Shape::Low)),
            valence: Some(FeatureWeight::new(W, Shape::Mid)),
            danceability: Some(FeatureWeight::new(W, Shape::Low)),
            ..Default::default()
        },
        MoodClass::Sad => MoodProfile {
            valence: Some(FeatureWeight::new(W, Shape::Low)),
            energy: Some(FeatureWeight::new(W, Shape::Low)),
            acousticness: Some(FeatureWeight::new(W, Shape::High)),
            ..Default::default()
        },
        MoodClass::Focused => MoodProfile {
            energy: Some(FeatureWeight::new(W, Shape::Mid)),
            danceability: Some(FeatureWeight::new(W, Shape::Low)),
            speechiness: Some(FeatureWeight::new(W, Shape::Low)),
            ..Default::default()
        },
        MoodClass::Other => MoodProfile {
            energy: Some(FeatureWeight::new(0.2, Shape::High)),
            ..Default::default()
        },
    }
}

/// Search keywords layered onto the genre filter, derived from the energy and
/// valence midpoints of the resolved ranges.
pub fn mood_keywords(ranges: &FeatureRanges) -> Vec<&'static str> {
    let energy = ranges.mid_energy();
    let valence = ranges.mid_valence();

    if energy > 0.7 && valence > 0.7 {
        vec!["upbeat", "energetic"]
    } else if energy > 0.7 && valence < 0.3 {
        vec!["intense", "powerful"]
    } else if energy < 0.3 && valence > 0.7 {
        vec!["peaceful", "gentle"]
    } else if energy < 0.3 && valence < 0.3 {
        vec!["melancholic", "ambient"]
    } else {
        Vec::new()
    }
}

/// Maps a user-facing genre label onto Spotify's genre taxonomy. Labels with
/// no table entry fall back to their slugified form, so unknown genres still
/// make a usable `genre:` filter.
pub fn catalog_genres(genre: &str) -> Vec<String> {
    let mapped: Option<&[&str]> = match genre.trim().to_lowercase().as_str() {
        "pop" => Some(&["pop", "dance-pop", "power-pop"]),
        "rock" => Some(&["rock", "alternative", "hard-rock"]),
        "hip hop" | "hip-hop" => Some(&["hip-hop", "rap", "trap"]),
        "jazz" => Some(&["jazz", "jazz-funk", "bebop"]),
        "classical" => Some(&["classical", "orchestra", "opera"]),
        "electronic" => Some(&["electronic", "edm", "house"]),
        "r&b" | "rnb" => Some(&["r-n-b", "soul", "funk"]),
        "country" => Some(&["country", "folk", "americana"]),
        _ => None,
    };

    match mapped {
        Some(genres) => genres.iter().map(|g| g.to_string()).collect(),
        None => vec![genre.trim().to_lowercase().replace(' ', "-")],
    }
}
