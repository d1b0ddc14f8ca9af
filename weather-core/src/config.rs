use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::debug;

use crate::{error::WeatherError, model::WeatherObservation};

pub const DEFAULT_SETTINGS_PATH: &str = "./weather-settings.json";
pub const ICON_TABLE_FILE: &str = "weather-icons.json";

/// Which side of the temperature the icon is printed on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IconPosition {
    Left,
    #[default]
    Right,
}

impl<'de> Deserialize<'de> for IconPosition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;

        // Only "left" is special; anything else keeps the icon on the right.
        if raw.eq_ignore_ascii_case("left") {
            Ok(IconPosition::Left)
        } else {
            Ok(IconPosition::Right)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn glyph(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    /// Pick the reading that matches this unit.
    pub fn select(&self, observation: &WeatherObservation) -> f64 {
        match self {
            TemperatureUnit::Celsius => observation.temp_c,
            TemperatureUnit::Fahrenheit => observation.temp_f,
        }
    }
}

/// Tuning for the outbound request. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpSettings {
    /// Per-request timeout in seconds (default: 5)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries after the first attempt (default: 3)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before the first retry in milliseconds (default: 250)
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Upper bound on any single delay in milliseconds (default: 2000)
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Deadline for the whole fetch, retries and backoff included (default: 8)
    #[serde(default = "default_total_timeout_secs")]
    pub total_timeout_secs: u64,
}

const fn default_timeout_secs() -> u64 {
    5
}

const fn default_total_timeout_secs() -> u64 {
    8
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_initial_delay_ms() -> u64 {
    250
}

const fn default_max_delay_ms() -> u64 {
    2_000
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            total_timeout_secs: default_total_timeout_secs(),
        }
    }
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn total_timeout(&self) -> Duration {
        Duration::from_secs(self.total_timeout_secs)
    }
}

/// Contents of `weather-settings.json`.
///
/// Example:
/// ```json
/// {
///   "key": "...",
///   "url": "https://api.weatherapi.com/v1/current.json",
///   "parameters": "Berlin",
///   "icon_pos": "left",
///   "use_fahrenheit": false,
///   "only_icon": false
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// API key sent as the `key` query parameter.
    pub key: String,

    #[serde(default)]
    pub use_fahrenheit: bool,

    pub icon_pos: IconPosition,

    /// Location query sent as the `q` query parameter.
    pub parameters: String,

    #[serde(default)]
    pub only_icon: bool,

    pub url: String,

    #[serde(default)]
    pub http: HttpSettings,
}

impl Settings {
    /// Load settings from `path`.
    pub fn load(path: &Path) -> Result<Self, WeatherError> {
        read_json_file(path)
    }

    pub fn unit(&self) -> TemperatureUnit {
        if self.use_fahrenheit { TemperatureUnit::Fahrenheit } else { TemperatureUnit::Celsius }
    }
}

/// The icon table lives next to the settings file.
pub fn icon_table_path(settings_path: &Path) -> PathBuf {
    match settings_path.parent() {
        Some(dir) => dir.join(ICON_TABLE_FILE),
        None => PathBuf::from(ICON_TABLE_FILE),
    }
}

/// Read and decode a JSON file, logging the path on failure.
pub(crate) fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, WeatherError> {
    let contents = fs::read(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            debug!(file = %path.display(), "File doesn't exist");
            WeatherError::ConfigNotFound { path: path.to_path_buf() }
        } else {
            debug!(file = %path.display(), error = %source, "Couldn't read file");
            WeatherError::ConfigUnreadable { path: path.to_path_buf(), source }
        }
    })?;

    serde_json::from_slice(&contents).map_err(|source| {
        debug!(file = %path.display(), error = %source, "Couldn't parse file");
        WeatherError::ConfigMalformed { path: path.to_path_buf(), source }
    })
}
