use std::path::Path;

use tracing::debug;

use crate::{
    client::{WeatherApiClient, WeatherSource},
    config::{Settings, icon_table_path},
    error::WeatherError,
    format::render,
    icons::IconTable,
    model::RenderedOutput,
};

/// Settings and icon table, both read from disk up front.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub settings: Settings,
    pub icons: IconTable,
}

impl LoadedConfig {
    pub fn load(settings_path: &Path) -> Result<Self, WeatherError> {
        let settings = Settings::load(settings_path)?;

        let icons_path = icon_table_path(settings_path);
        let icons = IconTable::load(&icons_path)?;
        debug!(path = %icons_path.display(), entries = icons.len(), "Loaded icon table");

        Ok(Self { settings, icons })
    }
}

/// Fetch, resolve the icon and format, against an already loaded config.
pub async fn render_with(
    config: &LoadedConfig,
    source: &dyn WeatherSource,
) -> Result<RenderedOutput, WeatherError> {
    let observation = source.fetch(&config.settings.parameters).await?;

    let icon = config.icons.resolve(&observation.condition, observation.is_day);
    debug!(
        condition = %observation.condition,
        is_day = observation.is_day,
        icon,
        "Resolved icon"
    );

    Ok(render(&observation, &config.settings, icon))
}

/// The whole run for the settings file at `settings_path`.
pub async fn run(settings_path: &Path) -> Result<RenderedOutput, WeatherError> {
    let config = LoadedConfig::load(settings_path)?;
    let client = WeatherApiClient::from_settings(&config.settings)?;

    render_with(&config, &client).await
}
