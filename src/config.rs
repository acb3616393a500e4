//! Application-level configuration loading, including the runtime team colors
//! set and the sync tuning knobs.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use tracing::{info, warn};

use crate::state::session::TeamColor;

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "PATTERN_QUIZ_BACK_CONFIG_PATH";
/// Poll interval used by the hydration listener when the config does not set
/// one. Sub-second so a missed notification only delays a viewer briefly.
const DEFAULT_SYNC_POLL_INTERVAL: Duration = Duration::from_millis(750);
/// Fallback color returned when the colors set is exhausted.
const DEFAULT_COLOR: TeamColor = TeamColor {
    h: 0.0,
    s: 0.0,
    v: 1.0,
};

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    colors: Vec<TeamColor>,
    sync_poll_interval: Duration,
    session_file: Option<PathBuf>,
    catalog_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in
    /// defaults when the file is absent or unparsable.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        colors = config.colors.len(),
                        poll_ms = config.sync_poll_interval.as_millis() as u64,
                        "loaded configuration"
                    );
                    config
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
        }
    }

    /// Interval at which the hydration listener re-reads the shared store as
    /// a fallback for missed change notifications.
    pub fn sync_poll_interval(&self) -> Duration {
        self.sync_poll_interval
    }

    /// Path of the file-backed session slot, when one is configured.
    pub fn session_file(&self) -> Option<&Path> {
        self.session_file.as_deref()
    }

    /// Path of the example catalogue file, when one is configured.
    pub fn catalog_path(&self) -> Option<&Path> {
        self.catalog_path.as_deref()
    }

    /// Return the first color of the colors set that is not already listed in
    /// `used`.
    ///
    /// When every entry is taken we fall back to [`DEFAULT_COLOR`] so callers
    /// always receive a value.
    pub fn first_unused_color(&self, used: &[TeamColor]) -> TeamColor {
        self.colors
            .iter()
            .find(|candidate| used.iter().all(|existing| existing != *candidate))
            .copied()
            .unwrap_or(DEFAULT_COLOR)
    }

    /// Override the sync poll interval; handy for tests exercising the
    /// hydration listener with a tight loop.
    pub fn with_sync_poll_interval(mut self, interval: Duration) -> Self {
        self.sync_poll_interval = interval;
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            colors: default_colors(),
            sync_poll_interval: DEFAULT_SYNC_POLL_INTERVAL,
            session_file: None,
            catalog_path: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
/// JSON representation of the configuration file located at
/// [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    colors: Vec<RawColor>,
    sync_poll_interval_ms: Option<u64>,
    session_file: Option<PathBuf>,
    catalog_path: Option<PathBuf>,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            colors: Vec::new(),
            sync_poll_interval_ms: None,
            session_file: None,
            catalog_path: None,
        }
    }
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let colors = if value.colors.is_empty() {
            default_colors()
        } else {
            value.colors.into_iter().map(Into::into).collect()
        };

        Self {
            colors,
            sync_poll_interval: value
                .sync_poll_interval_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_SYNC_POLL_INTERVAL),
            session_file: value.session_file,
            catalog_path: value.catalog_path,
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of a single HSV entry inside the configuration file.
struct RawColor {
    hue: f32,
    saturation: f32,
    value: f32,
}

impl From<RawColor> for TeamColor {
    fn from(value: RawColor) -> Self {
        Self {
            h: value.hue,
            s: value.saturation,
            v: value.value,
        }
    }
}

/// Resolve the configuration path taking the environment override into
/// account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Built-in colors set shipped with the binary.
fn default_colors() -> Vec<TeamColor> {
    vec![
        TeamColor {
            h: 4.2,
            s: 0.85,
            v: 1.0,
        },
        TeamColor {
            h: 207.5,
            s: 0.9,
            v: 1.0,
        },
        TeamColor {
            h: 130.8,
            s: 0.75,
            v: 0.95,
        },
        TeamColor {
            h: 47.3,
            s: 0.95,
            v: 1.0,
        },
        TeamColor {
            h: 283.1,
            s: 0.6,
            v: 0.95,
        },
        TeamColor {
            h: 174.6,
            s: 0.8,
            v: 0.9,
        },
        TeamColor {
            h: 329.4,
            s: 0.65,
            v: 1.0,
        },
        TeamColor {
            h: 24.9,
            s: 0.9,
            v: 0.95,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_unused_color_walks_the_set_in_order() {
        let config = AppConfig::default();
        let first = config.first_unused_color(&[]);
        let second = config.first_unused_color(&[first]);
        assert_ne!(first, second);
    }

    #[test]
    fn exhausted_colors_fall_back_to_the_default() {
        let config = AppConfig::default();
        let used = default_colors();
        assert_eq!(config.first_unused_color(&used), DEFAULT_COLOR);
    }
}
