//! Turns raw current conditions into display-ready values.

use chrono::{Local, NaiveDate};

use crate::{
    condition::classify,
    model::{CurrentConditions, RenderedConditions},
};

/// Long en-US date, e.g. "Friday, October 16, 2026".
const DATE_FORMAT: &str = "%A, %B %-d, %Y";

/// Format `conditions` for today's local date.
pub fn format(conditions: &CurrentConditions) -> RenderedConditions {
    format_on(conditions, Local::now().date_naive())
}

pub fn format_on(conditions: &CurrentConditions, date: NaiveDate) -> RenderedConditions {
    RenderedConditions {
        location_label: conditions.location_label.clone(),
        date: date.format(DATE_FORMAT).to_string(),
        temperature_c: round_temperature(conditions.temperature_c),
        feels_like_c: round_temperature(conditions.apparent_temperature_c),
        relative_humidity_pct: conditions.relative_humidity_pct,
        wind_speed_kmh: conditions.wind_speed_kmh,
        visibility: visibility_km(conditions.visibility_m),
        is_day: conditions.is_day,
        condition: classify(conditions.code),
    }
}

/// Round half away from zero: 21.5 -> 22, -21.5 -> -22.
///
/// `as` saturates on overflow and maps NaN to 0; `-0.0` becomes plain `0`.
pub fn round_temperature(celsius: f64) -> i64 {
    celsius.round() as i64
}

/// Kilometres to one decimal, ties rounded away from zero like temperatures:
/// 250 m -> "0.3 km", 1250 m -> "1.3 km".
pub fn visibility_km(meters: f64) -> String {
    // `{:.1}` alone rounds ties to even on the binary value.
    format!("{:.1} km", (meters / 100.0).round() / 10.0)
}
