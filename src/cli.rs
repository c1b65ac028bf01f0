use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use log::info;
use spotify_top_badge::badge::{size::SizeClass, theme::ThemeRegistry};
use spotify_top_badge::clients::{
    BadgeWriter, SpotifyClient, entities,
    errors::{Error, Result},
    spotify::RankingWindow,
};
use spotify_top_badge::generator::{Config, ConfigBuilder, Generator};

#[derive(Parser)]
#[command(name = "spotify-top-badge")]
#[command(version, about = "Render your top Spotify tracks as SVG badges", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch top tracks from Spotify and write one badge per theme and size
    Render {
        #[command(flatten)]
        spotify: SpotifyArgs,
        #[command(flatten)]
        badge: BadgeArgs,
    },
    /// Render badges from a saved top-tracks JSON file, without network access
    Preview {
        /// Either the `items` array of a top-tracks response or the whole response
        #[arg(long)]
        tracks: PathBuf,
        #[command(flatten)]
        badge: BadgeArgs,
    },
    /// List available theme names
    Themes {
        #[arg(long, env = "SPOTIFY_THEME_FILE")]
        theme_file: Option<PathBuf>,
    },
}

#[derive(Args)]
struct SpotifyArgs {
    #[arg(long, env = "SPOTIFY_CLIENT_ID", hide_env_values = true)]
    client_id: String,
    #[arg(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
    client_secret: String,
    #[arg(long, env = "SPOTIFY_REFRESH_TOKEN", hide_env_values = true)]
    refresh_token: String,
    /// Number of tracks to request
    #[arg(long, env = "SPOTIFY_LIMIT", default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=50))]
    limit: u32,
    /// Upper bound for each Spotify request, in seconds
    #[arg(long, env = "SPOTIFY_TIMEOUT_SECS", default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: u64,
}

#[derive(Args)]
struct BadgeArgs {
    #[arg(long, env = "SPOTIFY_TIME_RANGE", value_enum, default_value_t = RankingWindow::ShortTerm)]
    time_range: RankingWindow,
    /// Comma separated theme names; all known themes when empty
    #[arg(long, env = "SPOTIFY_THEMES", value_delimiter = ',')]
    themes: Vec<String>,
    /// Comma separated size classes: small, medium, large
    #[arg(long, env = "SPOTIFY_SIZES", value_delimiter = ',', default_value = "medium", value_parser = parse_size)]
    sizes: Vec<SizeClass>,
    #[arg(long, env = "SPOTIFY_OUTPUT_DIR", default_value = "assets")]
    output_dir: PathBuf,
    /// JSON file with extra palettes
    #[arg(long, env = "SPOTIFY_THEME_FILE")]
    theme_file: Option<PathBuf>,
}

fn parse_size(s: &str) -> std::result::Result<SizeClass, String> {
    s.parse().map_err(|e: Error| e.to_string())
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Render { spotify, badge } => render_badges(spotify, badge).await,
        Commands::Preview { tracks, badge } => preview_badges(tracks, badge).await,
        Commands::Themes { theme_file } => {
            let registry = load_registry(theme_file.as_deref()).await?;
            for name in registry.names() {
                println!("{name}");
            }
            Ok(())
        }
    }
}

async fn load_registry(theme_file: Option<&Path>) -> Result<ThemeRegistry> {
    let mut registry = ThemeRegistry::builtin();
    if let Some(path) = theme_file {
        registry.load_file(path).await?;
    }
    Ok(registry)
}

async fn build_config(args: &BadgeArgs) -> Result<Config> {
    let registry = load_registry(args.theme_file.as_deref()).await?;
    let requested: Vec<&str> = args
        .themes
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    let themes = if requested.is_empty() {
        registry.all()
    } else {
        requested
            .into_iter()
            .map(|name| registry.resolve(name))
            .collect::<Result<Vec<_>>>()?
    };

    ConfigBuilder::new()
        .themes(themes)
        .sizes(args.sizes.clone())
        .window(args.time_range.as_str())
        .writer(BadgeWriter::new(&args.output_dir))
        .build()
}

fn report(paths: &[PathBuf]) {
    for path in paths {
        println!("Wrote {}", path.display());
    }
}

async fn render_badges(spotify: &SpotifyArgs, badge: &BadgeArgs) -> Result<()> {
    info!("Building config ...");
    // Bad themes or sizes fail here, before any request is made
    let generator = Generator::new(build_config(badge).await?);
    let client = SpotifyClient::with_refresh_token(
        &spotify.client_id,
        &spotify.client_secret,
        &spotify.refresh_token,
        Duration::from_secs(spotify.timeout_secs),
    )?;

    info!("Authorizing Spotify client ...");
    client.authorize_client().await?;

    info!("Fetching top tracks ...");
    let tracks = client
        .get_top_tracks(badge.time_range, spotify.limit)
        .await?;
    info!("Fetched {} tracks from Spotify", tracks.len());

    let paths = generator.generate(&tracks, Utc::now()).await?;
    report(&paths);
    Ok(())
}

async fn preview_badges(tracks_path: &Path, badge: &BadgeArgs) -> Result<()> {
    let generator = Generator::new(build_config(badge).await?);
    let json = tokio::fs::read_to_string(tracks_path).await.map_err(|e| {
        Error::ConfigurationError(format!("cannot read track file {tracks_path:?}: {e}"))
    })?;
    let tracks = entities::tracks_from_json(&json)?;
    info!("Loaded {} tracks from {tracks_path:?}", tracks.len());

    let paths = generator.generate(&tracks, Utc::now()).await?;
    report(&paths);
    Ok(())
}
