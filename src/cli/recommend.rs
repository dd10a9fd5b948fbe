use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error, info,
    management::TokenManager,
    mood::MoodClass,
    resolver, spotify,
    types::{CalendarStatus, MoodContext, MoodInput, RankedTrack, Weather},
    utils, warning,
};

/// Everything a recommendation run needs, gathered from the CLI flags.
#[derive(Debug, Clone)]
pub struct MoodRequest {
    pub mood: String,
    pub genres: Vec<String>,
    pub duration: Option<u32>,
    pub comment: Option<String>,
    pub limit: Option<usize>,
    pub weather: Option<Weather>,
    pub calendar: Option<CalendarStatus>,
}

pub async fn recommend(request: MoodRequest) {
    let (input, tracks, _) = build_recommendation(&request).await;

    if tracks.is_empty() {
        warning!("No tracks matched mood '{}'.", input.mood);
        return;
    }

    let rows = utils::build_track_rows(&tracks);
    let table = Table::new(rows);
    println!("Mood: {mood}\n{table}\n", mood = input.mood, table = table);
}

/// Shared pipeline front end for `recommend` and `playlist`: authenticates,
/// resolves feature ranges (silent default on failure) and runs the
/// search-and-rank pipeline. Hands the access token back so the playlist
/// path reuses it instead of refreshing a second time.
pub(crate) async fn build_recommendation(
    request: &MoodRequest,
) -> (MoodInput, Vec<RankedTrack>, String) {
    let token = require_token().await;

    let input = MoodInput::new(request.mood.clone(), request.genres.clone())
        .with_duration(request.duration)
        .with_comment(request.comment.clone());

    let context = MoodContext {
        mood: input.mood.clone(),
        weather: request.weather.clone(),
        calendar: request.calendar.clone(),
        selected_genres: input.genres.clone(),
        comments: input.comment.clone(),
    };

    let pb = spinner("Resolving feature ranges...");
    let ranges = resolver::resolve_or_default(&context).await;
    pb.finish_and_clear();

    let limit = request
        .limit
        .or(input.duration_min.map(utils::calculate_track_count))
        .unwrap_or(10);

    let class = MoodClass::classify(&input.mood);
    info!(
        "Searching for {} tracks in genres: {}",
        limit,
        ranges.genres.join(", ")
    );

    let pb = spinner("Searching and ranking tracks...");
    let mut rng = rand::rng();
    let result = spotify::recommend::recommend(class, &ranges, limit, &token, &mut rng).await;
    pb.finish_and_clear();

    match result {
        Ok(tracks) => (input, tracks, token),
        Err(e) => error!("Track search failed: {}", e),
    }
}

/// Loads the token store and returns a fresh access token, terminating with
/// a pointer to `moodlist auth` when none is available.
pub(crate) async fn require_token() -> String {
    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(_) => error!("No credentials found. Please run moodlist auth"),
    };

    match token_mgr.get_valid_token().await {
        Ok(Some(token)) => token,
        Ok(None) => error!("Session expired. Please run moodlist auth"),
        Err(e) => error!("Failed to obtain access token: {}", e),
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
