use crate::{
    cli::recommend::{MoodRequest, build_recommendation},
    error, info, spotify, success, warning,
};

pub async fn playlist(request: MoodRequest, name: Option<String>, description: Option<String>) {
    let (input, tracks, token) = build_recommendation(&request).await;

    if tracks.is_empty() {
        warning!(
            "No tracks matched mood '{}'; no playlist created.",
            input.mood
        );
        return;
    }

    let name = name.unwrap_or_else(|| format!("Mood Music – {}", input.mood));
    info!("Creating playlist '{}' with {} tracks", name, tracks.len());

    match spotify::playlist::create(&tracks, &name, description.as_deref(), &token).await {
        Ok(playlist_id) => {
            success!(
                "Playlist created: https://open.spotify.com/playlist/{}",
                playlist_id
            );
        }
        Err(e) => error!("{}", e),
    }
}
