/// CLI configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Store document name inside `storage.data_dir`
pub const STORE_FILE: &str = "tilawa.json";

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "tilawa.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,

    #[serde(default = "default_compass")]
    pub compass: CompassSettings,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_load_timeout_secs")]
    pub load_timeout_secs: u64,

    #[serde(default = "default_rate")]
    pub default_rate: f32,

    /// Length of every track played by the simulated renderer
    #[serde(default = "default_simulated_track_ms")]
    pub simulated_track_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompassSettings {
    #[serde(default = "default_heading_interval_ms")]
    pub heading_interval_ms: u64,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// `path` must exist when given; otherwise `tilawa.toml` is read if present.
    /// `TILAWA_`-prefixed environment variables override both, with `__`
    /// between section and key (`TILAWA_PLAYBACK__DEFAULT_RATE=1.25`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("TILAWA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let rate = self.playback.default_rate;
        if !(rate.is_finite() && rate > 0.0) {
            return Err(CliError::Config(format!(
                "playback.default_rate must be positive, got {rate}"
            )));
        }

        if self.playback.load_timeout_secs == 0 {
            return Err(CliError::Config(
                "playback.load_timeout_secs must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Path of the key-value store document
    pub fn store_path(&self) -> PathBuf {
        self.storage.data_dir.join(STORE_FILE)
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.playback.load_timeout_secs)
    }

    pub fn simulated_track(&self) -> Duration {
        Duration::from_millis(self.playback.simulated_track_ms)
    }

    pub fn heading_interval(&self) -> Duration {
        Duration::from_millis(self.compass.heading_interval_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: default_storage(),
            playback: default_playback(),
            compass: default_compass(),
            log_level: default_log_level(),
        }
    }
}

// Default values
fn default_storage() -> StorageSettings {
    StorageSettings {
        data_dir: default_data_dir(),
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        load_timeout_secs: default_load_timeout_secs(),
        default_rate: default_rate(),
        simulated_track_ms: default_simulated_track_ms(),
    }
}

fn default_load_timeout_secs() -> u64 {
    15
}

fn default_rate() -> f32 {
    1.0
}

fn default_simulated_track_ms() -> u64 {
    1500
}

fn default_compass() -> CompassSettings {
    CompassSettings {
        heading_interval_ms: default_heading_interval_ms(),
    }
}

fn default_heading_interval_ms() -> u64 {
    500
}

fn default_log_level() -> String {
    "info".to_string()
}
