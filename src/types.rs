use chrono::Utc;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Shared state of an in-flight login. Present while a login attempt is
/// pending; holds the token once the callback completed the exchange. The
/// CSRF nonce itself lives with `AuthStateManager`, which survives the
/// browser round trip.
#[derive(Debug, Clone)]
pub struct AuthFlow {
    pub token: Option<Token>,
}

/// A user's mood submission. Immutable once built; duration or comment edits
/// produce a new value.
#[derive(Debug, Clone)]
pub struct MoodInput {
    pub mood: String,
    /// Ordered, unique genre preferences; the user's picks rank first.
    pub genres: Vec<String>,
    pub duration_min: Option<u32>,
    pub comment: Option<String>,
    pub created_at: i64,
}

impl MoodInput {
    pub fn new(mood: String, genres: Vec<String>) -> Self {
        // Genre picks are unique and order-significant
        let mut seen = std::collections::HashSet::new();
        let genres = genres
            .into_iter()
            .filter(|g| seen.insert(g.to_lowercase()))
            .collect();

        Self {
            mood,
            genres,
            duration_min: None,
            comment: None,
            created_at: Utc::now().timestamp(),
        }
    }

    pub fn with_duration(mut self, duration_min: Option<u32>) -> Self {
        self.duration_min = duration_min;
        self
    }

    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weather {
    pub temperature: f32,
    pub condition: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarStatus {
    #[serde(rename = "isBusy")]
    pub is_busy: bool,
    #[serde(rename = "eventCount")]
    pub event_count: u32,
}

/// Request body for the feature-range resolver boundary.
#[derive(Debug, Clone, Serialize)]
pub struct MoodContext {
    pub mood: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<Weather>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar: Option<CalendarStatus>,
    #[serde(rename = "selectedGenres")]
    pub selected_genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

/// Target audio-feature intervals used to bias track selection.
///
/// Each interval is closed and non-decreasing: valence, energy and
/// acousticness live in [0,1], tempo in [60,200] BPM. Produced once per mood
/// submission and never mutated, only replaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureRanges {
    pub valence: [f32; 2],
    pub energy: [f32; 2],
    pub tempo: [f32; 2],
    pub acousticness: [f32; 2],
    pub genres: Vec<String>,
}

impl FeatureRanges {
    /// The fixed fallback ranges substituted whenever resolution fails or
    /// returns out-of-domain intervals. The user's selected genres survive
    /// the substitution; only an empty selection falls back to `pop`.
    pub fn default_for(selected_genres: &[String]) -> Self {
        let genres = if selected_genres.is_empty() {
            vec!["pop".to_string()]
        } else {
            selected_genres.to_vec()
        };

        Self {
            valence: [0.4, 0.6],
            energy: [0.4, 0.6],
            tempo: [90.0, 130.0],
            acousticness: [0.3, 0.7],
            genres,
        }
    }

    /// Checks that every interval is non-decreasing and contained in its
    /// domain. Enforced by callers of the resolver, not the resolver itself.
    pub fn is_valid(&self) -> bool {
        fn within(range: &[f32; 2], lo: f32, hi: f32) -> bool {
            range[0] <= range[1] && range[0] >= lo && range[1] <= hi
        }

        within(&self.valence, 0.0, 1.0)
            && within(&self.energy, 0.0, 1.0)
            && within(&self.tempo, 60.0, 200.0)
            && within(&self.acousticness, 0.0, 1.0)
    }

    pub fn mid_energy(&self) -> f32 {
        (self.energy[0] + self.energy[1]) / 2.0
    }

    pub fn mid_valence(&self) -> f32 {
        (self.valence[0] + self.valence[1]) / 2.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artists: Vec<TrackArtist>,
    pub uri: String,
    pub duration_ms: u64,
    pub popularity: u32,
}

impl Track {
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.clone())
            .collect::<Vec<String>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub tracks: TrackPage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackPage {
    pub items: Vec<Track>,
}

/// Per-track audio descriptor supplied by the catalog provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub id: String,
    pub energy: f32,
    pub valence: f32,
    pub danceability: f32,
    pub acousticness: f32,
    pub speechiness: f32,
    pub tempo: f32,
}

/// Batch descriptor response. Unknown ids come back as `null` entries.
#[derive(Debug, Clone, Deserialize)]
pub struct AudioFeaturesResponse {
    pub audio_features: Vec<Option<AudioFeatures>>,
}

/// A scored candidate; the ranked list keeps its final order.
#[derive(Debug, Clone)]
pub struct RankedTrack {
    pub track: Track,
    pub score: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksResponse {
    pub snapshot_id: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    pub title: String,
    pub artists: String,
    pub score: String,
    pub popularity: u32,
}
