//! Application-level configuration loading: round duration, storage backend
//! and the marker that excludes teams from the wheel.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "WORD_WHEEL_CONFIG_PATH";
/// Environment variable that overrides the configured data directory.
const DATA_DIR_ENV: &str = "WORD_WHEEL_DATA_DIR";
const DEFAULT_ROUND_DURATION_SECS: u64 = 60;
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_EXCLUDED_MARKER: &str = "feedback";

/// Storage backend selected at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    /// JSON files under the data directory.
    File,
    /// Process-resident tables, lost on restart.
    Memory,
}

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    round_duration: Duration,
    data_dir: PathBuf,
    store: StoreKind,
    excluded_team_marker: String,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        let mut config = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        round_duration_secs = app_config.round_duration.as_secs(),
                        "loaded configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        };

        if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|dir| !dir.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        config
    }

    /// Override the round duration, mostly useful for tests.
    pub fn with_round_duration(mut self, duration: Duration) -> Self {
        self.round_duration = duration;
        self
    }

    /// Length of a team countdown.
    pub fn round_duration(&self) -> Duration {
        self.round_duration
    }

    /// Directory holding the JSON tables of the file store.
    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    /// Storage backend to install at startup.
    pub fn store(&self) -> &StoreKind {
        &self.store
    }

    /// Whether `team_name` is a feedback-only entry that never gets drawn.
    ///
    /// The check ignores case, so "Feedback" and "FEEDBACK desk" are both excluded.
    pub fn is_excluded_team(&self, team_name: &str) -> bool {
        team_name
            .to_lowercase()
            .contains(&self.excluded_team_marker)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            round_duration: Duration::from_secs(DEFAULT_ROUND_DURATION_SECS),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            store: StoreKind::File,
            excluded_team_marker: DEFAULT_EXCLUDED_MARKER.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    round_duration_secs: Option<u64>,
    data_dir: Option<PathBuf>,
    store: Option<StoreKind>,
    excluded_team_marker: Option<String>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();
        Self {
            round_duration: value
                .round_duration_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.round_duration),
            data_dir: value.data_dir.unwrap_or(defaults.data_dir),
            store: value.store.unwrap_or(defaults.store),
            excluded_team_marker: value
                .excluded_team_marker
                .filter(|marker| !marker.trim().is_empty())
                .map(|marker| marker.to_lowercase())
                .unwrap_or(defaults.excluded_team_marker),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
