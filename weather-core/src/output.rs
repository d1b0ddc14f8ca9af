use std::io::Write;

use tracing::debug;

use crate::{error::WeatherError, model::RenderedOutput};

pub fn encode(output: &RenderedOutput) -> Result<String, WeatherError> {
    serde_json::to_string(output).map_err(|e| {
        debug!(text = %output.text, tooltip = %output.tooltip, "Couldn't marshal json");
        WeatherError::EncodingFailed(e)
    })
}

/// Encode `output` and write it to `writer` with no trailing newline.
pub fn emit<W: Write>(writer: &mut W, output: &RenderedOutput) -> Result<(), WeatherError> {
    let json = encode(output)?;

    writer
        .write_all(json.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(WeatherError::OutputFailed)
}
