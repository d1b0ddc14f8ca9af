//! Core library for the `waybar-weather` status bar module.
//!
//! This crate defines:
//! - Settings and icon table loading
//! - The weather API client with bounded retry
//! - Icon resolution and text formatting
//! - JSON output for the status bar widget
//!
//! It is used by `waybar-weather`, but `pipeline::render_with` accepts any
//! [`WeatherSource`], so other front ends can reuse it.

pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod icons;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod retry;

pub use client::{WeatherApiClient, WeatherSource};
pub use config::{DEFAULT_SETTINGS_PATH, HttpSettings, IconPosition, Settings, TemperatureUnit};
pub use error::{ErrorKind, FetchError, WeatherError};
pub use icons::{IconEntry, IconTable};
pub use model::{RenderedOutput, WeatherObservation};
pub use pipeline::{LoadedConfig, render_with, run};
pub use retry::RetryPolicy;
