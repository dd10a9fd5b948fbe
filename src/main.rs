use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use moodlist::{
    cli, config, error,
    types::{AuthFlow, CalendarStatus, Weather},
};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[clap(about = "Log in to Spotify via the authorization-code flow")]
    Auth,

    #[clap(about = "Remove stored credentials")]
    Logout,

    #[clap(about = "Rank catalog tracks against your mood")]
    Recommend(MoodOptions),

    #[clap(about = "Create a playlist from a mood recommendation")]
    Playlist(PlaylistOptions),

    #[clap(about = "Show configuration and credential status")]
    Info,

    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct MoodOptions {
    /// Free-text mood, e.g. "happy", "sad", "focused"
    #[clap(long)]
    pub mood: String,

    /// Preferred genre; repeat for more, your picks rank first
    #[clap(long = "genre")]
    pub genres: Vec<String>,

    /// Desired playlist duration in minutes (determines the track count)
    #[clap(long)]
    pub duration: Option<u32>,

    /// Additional free-text context for the feature-range resolver
    #[clap(long)]
    pub comment: Option<String>,

    /// Explicit track count (overrides --duration)
    #[clap(long)]
    pub limit: Option<usize>,

    /// Current temperature in °F (weather context)
    #[clap(long, requires = "condition")]
    pub temperature: Option<f32>,

    /// Current weather condition, e.g. "rain" or "sunny"
    #[clap(long, requires = "temperature")]
    pub condition: Option<String>,

    /// Mark the calendar as busy today
    #[clap(long)]
    pub busy: bool,

    /// Number of calendar events today
    #[clap(long)]
    pub events: Option<u32>,
}

impl MoodOptions {
    fn into_request(self) -> cli::MoodRequest {
        let weather = match (self.temperature, self.condition) {
            (Some(temperature), Some(condition)) => Some(Weather {
                temperature,
                condition,
            }),
            _ => None,
        };

        let calendar = if self.busy || self.events.is_some() {
            Some(CalendarStatus {
                is_busy: self.busy,
                event_count: self.events.unwrap_or(0),
            })
        } else {
            None
        };

        cli::MoodRequest {
            mood: self.mood,
            genres: self.genres,
            duration: self.duration,
            comment: self.comment,
            limit: self.limit,
            weather,
            calendar,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    #[clap(flatten)]
    pub mood: MoodOptions,

    /// Playlist name (defaults to one derived from the mood)
    #[clap(long)]
    pub name: Option<String>,

    /// Playlist description (defaults to a generation timestamp)
    #[clap(long)]
    pub description: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<AuthFlow>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Logout => cli::logout().await,
        Command::Recommend(opt) => cli::recommend(opt.into_request()).await,
        Command::Playlist(opt) => {
            cli::playlist(opt.mood.into_request(), opt.name, opt.description).await
        }
        Command::Info => cli::info().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
