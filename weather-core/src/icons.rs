use serde::Deserialize;
use std::path::Path;

use crate::{config::read_json_file, error::WeatherError};

/// One row of `weather-icons.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IconEntry {
    /// Lowercase condition text, e.g. "partly cloudy".
    pub day: String,
    pub icon: String,
    #[serde(default)]
    pub icon_night: String,
}

/// Ordered condition → glyph mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct IconTable {
    entries: Vec<IconEntry>,
}

impl IconTable {
    pub fn new(entries: Vec<IconEntry>) -> Self {
        Self { entries }
    }

    pub fn load(path: &Path) -> Result<Self, WeatherError> {
        read_json_file(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Icon for `condition`, or `""` when the table has no entry for it.
    ///
    /// The condition is lowercased and compared exactly against each key;
    /// the first matching entry wins.
    pub fn resolve(&self, condition: &str, is_day: bool) -> &str {
        let condition = condition.to_lowercase();

        match self.entries.iter().find(|e| e.day == condition) {
            Some(entry) if is_day => &entry.icon,
            Some(entry) => &entry.icon_night,
            None => "",
        }
    }
}
