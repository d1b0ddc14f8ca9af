use std::{fmt, io, path::PathBuf, time::Duration};

use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can stop a run. None of these are recovered locally.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Config file not found: {}", .path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to read config file: {}", .path.display())]
    ConfigUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file: {}", .path.display())]
    ConfigMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Weather request to {endpoint} (q={query}) failed")]
    WeatherFetchFailed {
        endpoint: String,
        query: String,
        #[source]
        source: FetchError,
    },

    #[error("Failed to encode output as JSON")]
    EncodingFailed(#[source] serde_json::Error),

    #[error("Failed to write output")]
    OutputFailed(#[source] io::Error),
}

/// Fieldless tag for a [`WeatherError`], handy for logs and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ConfigNotFound,
    ConfigUnreadable,
    ConfigMalformed,
    WeatherFetchFailed,
    EncodingFailed,
    OutputFailed,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ConfigNotFound => "config_not_found",
            ErrorKind::ConfigUnreadable => "config_unreadable",
            ErrorKind::ConfigMalformed => "config_malformed",
            ErrorKind::WeatherFetchFailed => "weather_fetch_failed",
            ErrorKind::EncodingFailed => "encoding_failed",
            ErrorKind::OutputFailed => "output_failed",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WeatherError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::ConfigNotFound { .. } => ErrorKind::ConfigNotFound,
            WeatherError::ConfigUnreadable { .. } => ErrorKind::ConfigUnreadable,
            WeatherError::ConfigMalformed { .. } => ErrorKind::ConfigMalformed,
            WeatherError::WeatherFetchFailed { .. } => ErrorKind::WeatherFetchFailed,
            WeatherError::EncodingFailed(_) => ErrorKind::EncodingFailed,
            WeatherError::OutputFailed(_) => ErrorKind::OutputFailed,
        }
    }
}

/// A single failed attempt against the weather API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to parse response JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no response within {}s", .0.as_secs_f64())]
    Timeout(Duration),
}

impl FetchError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Transport(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            FetchError::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            FetchError::Decode(_) | FetchError::Timeout(_) => false,
        }
    }

    pub(crate) fn status(status: StatusCode, body: &str) -> Self {
        FetchError::Status { status, body: truncate_body(body) }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_classify_transience() {
        assert!(FetchError::status(StatusCode::SERVICE_UNAVAILABLE, "").is_transient());
        assert!(FetchError::status(StatusCode::TOO_MANY_REQUESTS, "").is_transient());
        assert!(!FetchError::status(StatusCode::UNAUTHORIZED, "").is_transient());
        assert!(!FetchError::status(StatusCode::BAD_REQUEST, "").is_transient());
    }

    #[test]
    fn decode_errors_are_not_transient() {
        let err = serde_json::from_str::<u8>("nope").unwrap_err();
        assert!(!FetchError::from(err).is_transient());
    }

    #[test]
    fn overall_timeout_is_final() {
        let err = FetchError::Timeout(Duration::from_millis(1500));

        assert!(!err.is_transient());
        assert_eq!(err.to_string(), "no response within 1.5s");
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "é".repeat(500);
        let FetchError::Status { body, .. } = FetchError::status(StatusCode::BAD_GATEWAY, &body)
        else {
            panic!("expected status error");
        };

        assert_eq!(body.chars().count(), 203);
        assert!(body.ends_with("..."));
    }

    #[test]
    fn not_found_message_names_the_path() {
        let err = WeatherError::ConfigNotFound { path: PathBuf::from("/tmp/weather-settings.json") };

        assert_eq!(err.kind(), ErrorKind::ConfigNotFound);
        assert!(err.to_string().contains("/tmp/weather-settings.json"));
    }
}
