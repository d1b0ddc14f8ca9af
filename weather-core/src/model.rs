use serde::{Deserialize, Serialize};

/// Current conditions as reported by the weather API.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherObservation {
    pub is_day: bool,
    pub temp_c: f64,
    pub temp_f: f64,
    pub condition: String,
}

/// The object printed for the status bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedOutput {
    pub text: String,
    pub tooltip: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WaCondition {
    pub(crate) text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WaCurrent {
    pub(crate) is_day: i64,
    pub(crate) temp_c: f64,
    pub(crate) temp_f: f64,
    pub(crate) condition: WaCondition,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WaResponse {
    pub(crate) current: WaCurrent,
}

impl From<WaResponse> for WeatherObservation {
    fn from(res: WaResponse) -> Self {
        Self {
            is_day: res.current.is_day != 0,
            temp_c: res.current.temp_c,
            temp_f: res.current.temp_f,
            condition: res.current.condition.text,
        }
    }
}
