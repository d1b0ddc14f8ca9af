use crate::{
    config::{IconPosition, Settings, TemperatureUnit},
    model::{RenderedOutput, WeatherObservation},
};

/// Round to the nearest integer (halves away from zero) and append the unit glyph.
pub fn format_temperature(value: f64, unit: TemperatureUnit) -> String {
    format!("{}{}", value.round() as i64, unit.glyph())
}

/// Combine temperature and icon the way the settings ask for.
///
/// An empty icon yields the temperature alone, without a dangling separator.
pub fn render(observation: &WeatherObservation, settings: &Settings, icon: &str) -> RenderedOutput {
    let unit = settings.unit();
    let temp = format_temperature(unit.select(observation), unit);

    let text = if icon.is_empty() {
        temp
    } else if settings.only_icon {
        icon.to_string()
    } else {
        match settings.icon_pos {
            IconPosition::Left => format!("{icon} {temp}"),
            IconPosition::Right => format!("{temp} {icon}"),
        }
    };

    RenderedOutput { tooltip: text.clone(), text }
}
