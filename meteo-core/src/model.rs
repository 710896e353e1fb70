use serde::{Deserialize, Serialize};

use crate::condition::ConditionInfo;

/// Label used when the position comes from geolocation instead of a search.
pub const YOUR_LOCATION: &str = "Your Location";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A resolved place: where to fetch, and what to call it on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub coordinates: Coordinates,
    pub label: String,
}

impl Location {
    pub fn here(coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            label: YOUR_LOCATION.to_string(),
        }
    }
}

/// Snapshot of the forecast service's "current" block for one location.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub apparent_temperature_c: f64,
    pub relative_humidity_pct: f64,
    pub wind_speed_kmh: f64,
    pub visibility_m: f64,
    pub code: i32,
    pub is_day: bool,
    pub location_label: String,
}

/// [`CurrentConditions`] with display fields derived, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedConditions {
    pub location_label: String,
    pub date: String,
    pub temperature_c: i64,
    pub feels_like_c: i64,
    pub relative_humidity_pct: f64,
    pub wind_speed_kmh: f64,
    pub visibility: String,
    pub is_day: bool,
    pub condition: ConditionInfo,
}

impl RenderedConditions {
    pub fn humidity_text(&self) -> String {
        format!("{}%", self.relative_humidity_pct)
    }

    pub fn wind_text(&self) -> String {
        format!("{} km/h", self.wind_speed_kmh)
    }

    pub fn feels_like_text(&self) -> String {
        format!("{}\u{b0}", self.feels_like_c)
    }
}
