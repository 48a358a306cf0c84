/// Tilawa - Quran reading and recitation companion (terminal front end)
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tilawa_cli::{
    adapters::LogNotifier,
    commands::{bookmarks, juz, prefs, qibla, recite},
    AppConfig,
};
use tilawa_core::Bookmark;
use tilawa_storage::{Bookmarks, FileStore, Preferences};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tilawa")]
#[command(about = "Qibla direction, juz search, bookmarks, preferences, and recitation", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./tilawa.toml if present)
    #[arg(short, long, global = true, env = "TILAWA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Direction of the Kaaba from a position
    Qibla {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Current compass heading, to print the indicator rotation
        #[arg(long, allow_hyphen_values = true)]
        heading: Option<f64>,
    },
    /// List the thirty juz, optionally filtered by a search query
    Juz {
        /// Case-insensitive text to look for in the names
        query: Option<String>,
    },
    /// Manage bookmarked verses
    Bookmarks {
        #[command(subcommand)]
        action: BookmarkAction,
    },
    /// Show or change preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
    /// Recite a list of audio resources in order
    Recite {
        /// Resource URLs, one per verse
        #[arg(required = true)]
        resources: Vec<String>,
        /// Playback rate (default: stored preference)
        #[arg(long)]
        rate: Option<f32>,
        /// Index of the first verse to play
        #[arg(long, default_value_t = 0)]
        start: usize,
    },
}

#[derive(Subcommand)]
enum BookmarkAction {
    /// List bookmarks, oldest first
    List,
    /// Bookmark a verse
    Add {
        #[arg(long)]
        surah: u16,
        #[arg(long)]
        ayah: u32,
        #[arg(long)]
        arabic: String,
        #[arg(long)]
        translation: String,
        #[arg(long)]
        tafsir: Option<String>,
    },
    /// Remove the bookmark at a list position
    Remove { index: usize },
    /// Remove every bookmark
    Clear,
}

#[derive(Subcommand)]
enum PrefsAction {
    /// Print all preferences
    Show,
    /// Theme commands
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Set the playback rate
    Rate { value: f32 },
    /// Set the reciter (audio edition), e.g. ar.alafasy
    Reciter { edition: String },
    /// Set the translation edition, e.g. en.sahih
    Translation { edition: String },
    /// Turn the daily verse reminder on or off
    Notifications {
        #[arg(value_enum)]
        state: Switch,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Switch {
    On,
    Off,
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Switch between light and dark
    Toggle,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load(cli.config.as_deref())?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("tilawa={}", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Qibla { lat, lon, heading } => {
            let report = qibla::lookup(&config, lat, lon, heading).await?;
            qibla::render(&report, &mut out)?;
        }
        Commands::Juz { query } => {
            let store = Arc::new(FileStore::open(config.store_path()).await?);
            juz::search(&Preferences::new(store), query.as_deref(), &mut out).await?;
        }
        Commands::Bookmarks { action } => {
            let store = Arc::new(FileStore::open(config.store_path()).await?);
            let list = Bookmarks::new(store);
            match action {
                BookmarkAction::List => {
                    bookmarks::list(&list, &mut out).await?;
                }
                BookmarkAction::Add {
                    surah,
                    ayah,
                    arabic,
                    translation,
                    tafsir,
                } => {
                    let bookmark = Bookmark::new(surah, ayah, arabic, translation, tafsir);
                    bookmarks::add(&list, bookmark, &mut out).await?;
                }
                BookmarkAction::Remove { index } => {
                    bookmarks::remove(&list, index, &mut out).await?;
                }
                BookmarkAction::Clear => {
                    bookmarks::clear(&list, &mut out).await?;
                }
            }
        }
        Commands::Prefs { action } => {
            let store = Arc::new(FileStore::open(config.store_path()).await?);
            let preferences = Preferences::new(store);
            match action {
                PrefsAction::Show => prefs::show(&preferences, &mut out).await?,
                PrefsAction::Theme {
                    action: ThemeAction::Toggle,
                } => {
                    prefs::toggle_theme(&preferences, &mut out).await?;
                }
                PrefsAction::Rate { value } => {
                    prefs::set_rate(&preferences, value, &mut out).await?;
                }
                PrefsAction::Reciter { edition } => {
                    prefs::set_reciter(&preferences, &edition, &mut out).await?;
                }
                PrefsAction::Translation { edition } => {
                    prefs::set_translation(&preferences, &edition, &mut out).await?;
                }
                PrefsAction::Notifications { state } => {
                    let enabled = matches!(state, Switch::On);
                    let notifier = LogNotifier::new();
                    prefs::set_notifications(&preferences, enabled, &notifier, &mut out).await?;
                }
            }
        }
        Commands::Recite {
            resources,
            rate,
            start,
        } => {
            let rate = match rate {
                Some(rate) => rate,
                None => {
                    let store = Arc::new(FileStore::open(config.store_path()).await?);
                    Preferences::new(store)
                        .playback_rate_or(config.playback.default_rate)
                        .await?
                }
            };
            let summary = recite::run(&config, resources, rate, start, &mut out).await?;
            tracing::info!(
                started = summary.started.len(),
                finished = summary.finished.len(),
                errors = summary.errors.len(),
                "Recitation finished"
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qibla_accepts_negative_values() {
        let cli = Cli::try_parse_from([
            "tilawa", "qibla", "--lat", "-33.8688", "--lon", "-74", "--heading", "-30",
        ])
        .unwrap();
        match cli.command {
            Commands::Qibla { lat, lon, heading } => {
                assert_eq!(lat, -33.8688);
                assert_eq!(lon, -74.0);
                assert_eq!(heading, Some(-30.0));
            }
            _ => panic!("expected qibla command"),
        }
    }

    #[test]
    fn notifications_switch_parses() {
        let cli = Cli::try_parse_from(["tilawa", "prefs", "notifications", "on"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Prefs {
                action: PrefsAction::Notifications { state: Switch::On }
            }
        ));
        assert!(Cli::try_parse_from(["tilawa", "prefs", "notifications", "maybe"]).is_err());
    }
}
