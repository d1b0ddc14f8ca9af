use async_trait::async_trait;
use reqwest::Client;
use std::{fmt::Debug, time::Duration};
use tracing::debug;

use crate::{
    config::{HttpSettings, Settings},
    error::{FetchError, WeatherError},
    model::{WaResponse, WeatherObservation},
    retry::RetryPolicy,
};

/// Anything that can report the current weather for a location query.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch(&self, query: &str) -> Result<WeatherObservation, WeatherError>;
}

/// Client for a WeatherAPI.com style `current.json` endpoint.
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    endpoint: String,
    api_key: String,
    retry: RetryPolicy,
    total_timeout: Duration,
    http: Client,
}

impl WeatherApiClient {
    pub fn new(endpoint: String, api_key: String, retry: RetryPolicy, http: Client) -> Self {
        let total_timeout = HttpSettings::default().total_timeout();
        Self { endpoint, api_key, retry, total_timeout, http }
    }

    /// Bound the whole fetch, retries and backoff included.
    pub fn with_total_timeout(mut self, total_timeout: Duration) -> Self {
        self.total_timeout = total_timeout;
        self
    }

    /// Build a client from settings, including timeout and retry tuning.
    pub fn from_settings(settings: &Settings) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(settings.http.timeout()).build().map_err(|e| {
            WeatherError::WeatherFetchFailed {
                endpoint: settings.url.clone(),
                query: settings.parameters.clone(),
                source: FetchError::Transport(e),
            }
        })?;

        Ok(Self::new(
            settings.url.clone(),
            settings.key.clone(),
            RetryPolicy::from(&settings.http),
            http,
        )
        .with_total_timeout(settings.http.total_timeout()))
    }

    async fn fetch_once(&self, query: &str) -> Result<WeatherObservation, FetchError> {
        let res = self
            .http
            .get(&self.endpoint)
            .query(&[("key", self.api_key.as_str()), ("q", query)])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::status(status, &body));
        }

        let parsed: WaResponse = serde_json::from_str(&body)?;

        Ok(parsed.into())
    }
}

#[async_trait]
impl WeatherSource for WeatherApiClient {
    async fn fetch(&self, query: &str) -> Result<WeatherObservation, WeatherError> {
        debug!(endpoint = %self.endpoint, query, "Fetching current weather");

        let attempts = self.retry.run(|| self.fetch_once(query));
        let result = match tokio::time::timeout(self.total_timeout, attempts).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.total_timeout)),
        };

        result.map_err(|source| {
            debug!(endpoint = %self.endpoint, query, error = %source, "WeatherAPI request failed");
            WeatherError::WeatherFetchFailed {
                endpoint: self.endpoint.clone(),
                query: query.to_string(),
                source,
            }
        })
    }
}
