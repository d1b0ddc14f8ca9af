use anyhow::Context;
use clap::Parser;
use std::{io, path::PathBuf};
use tracing::{Dispatch, debug, error};
use tracing_subscriber::{EnvFilter, fmt, fmt::MakeWriter};
use waybar_weather_core::{DEFAULT_SETTINGS_PATH, WeatherError, output, pipeline};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "waybar-weather",
    version,
    about = "Print the current weather as a waybar custom module JSON object"
)]
pub struct Cli {
    /// Path to weather-settings.json; weather-icons.json is read from the same directory.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_SETTINGS_PATH)]
    pub settings: PathBuf,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let rendered = pipeline::run(&self.settings).await.inspect_err(log_failure)?;

        let mut stdout = io::stdout().lock();
        output::emit(&mut stdout, &rendered)
            .inspect_err(log_failure)
            .context("Failed to print weather")?;

        debug!(text = %rendered.text, "Weather printed");
        Ok(())
    }
}

const LOG_FILTER: &str = "info";

/// JSON logger writing to `writer`; stdout must stay free for the bar payload.
pub fn logger<W>(writer: W) -> Dispatch
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let subscriber =
        fmt().json().with_env_filter(EnvFilter::new(LOG_FILTER)).with_writer(writer).finish();

    Dispatch::new(subscriber)
}

fn log_failure(err: &WeatherError) {
    let cause = std::error::Error::source(err).map(ToString::to_string).unwrap_or_default();
    error!(kind = %err.kind(), error = %err, cause = %cause, "Weather module failed");
}
