//! WMO weather-code classification.
//!
//! Open-Meteo reports the current sky state as a WMO 4677 code. Only a subset
//! of the standard is ever returned; see
//! <https://open-meteo.com/en/docs#weathervariables>.

use serde::Serialize;

/// Every code the forecast service documents for `weather_code`.
pub const KNOWN_CODES: [i32; 22] = [
    0, 1, 2, 3, 45, 48, 51, 53, 55, 61, 63, 65, 71, 73, 75, 77, 80, 81, 82, 95, 96, 99,
];

/// Symbolic icon for a condition. Renderers decide how to draw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Sun,
    SunBehindCloud,
    Cloud,
    Fog,
    RainCloud,
    HeavyRainCloud,
    Snowflake,
    LightningBolt,
    GenericCloud,
}

impl Icon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::Sun => "sun",
            Icon::SunBehindCloud => "sun-behind-cloud",
            Icon::Cloud => "cloud",
            Icon::Fog => "fog",
            Icon::RainCloud => "rain-cloud",
            Icon::HeavyRainCloud => "heavy-rain-cloud",
            Icon::Snowflake => "snowflake",
            Icon::LightningBolt => "lightning-bolt",
            Icon::GenericCloud => "generic-cloud",
        }
    }

    /// Terminal glyph used by text renderers.
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Sun => "\u{2600}\u{fe0f}",
            Icon::SunBehindCloud => "\u{26c5}",
            Icon::Cloud | Icon::GenericCloud => "\u{2601}\u{fe0f}",
            Icon::Fog => "\u{1f32b}\u{fe0f}",
            Icon::RainCloud => "\u{1f326}\u{fe0f}",
            Icon::HeavyRainCloud => "\u{1f327}\u{fe0f}",
            Icon::Snowflake => "\u{2744}\u{fe0f}",
            Icon::LightningBolt => "\u{26a1}",
        }
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable label and icon for a weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConditionInfo {
    pub label: &'static str,
    pub icon: Icon,
}

impl ConditionInfo {
    /// Returned for any code outside [`KNOWN_CODES`].
    pub const UNKNOWN: ConditionInfo = ConditionInfo::new("Unknown", Icon::GenericCloud);

    const fn new(label: &'static str, icon: Icon) -> Self {
        Self { label, icon }
    }

    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }
}

/// Map a weather code to its condition. Never fails: undocumented codes
/// (including negatives) classify as [`ConditionInfo::UNKNOWN`].
pub fn classify(code: i32) -> ConditionInfo {
    let (label, icon) = match code {
        0 => ("Clear Sky", Icon::Sun),
        1 => ("Mainly Clear", Icon::SunBehindCloud),
        2 => ("Partly Cloudy", Icon::SunBehindCloud),
        3 => ("Overcast", Icon::Cloud),
        45 => ("Fog", Icon::Fog),
        48 => ("Rime Fog", Icon::Fog),
        51 => ("Light Drizzle", Icon::RainCloud),
        53 => ("Moderate Drizzle", Icon::RainCloud),
        55 => ("Dense Drizzle", Icon::RainCloud),
        61 => ("Slight Rain", Icon::HeavyRainCloud),
        63 => ("Moderate Rain", Icon::HeavyRainCloud),
        65 => ("Heavy Rain", Icon::HeavyRainCloud),
        71 => ("Slight Snow", Icon::Snowflake),
        73 => ("Moderate Snow", Icon::Snowflake),
        75 => ("Heavy Snow", Icon::Snowflake),
        77 => ("Snow Grains", Icon::Snowflake),
        80 => ("Slight Showers", Icon::RainCloud),
        81 => ("Moderate Showers", Icon::RainCloud),
        82 => ("Violent Showers", Icon::HeavyRainCloud),
        95 => ("Thunderstorm", Icon::LightningBolt),
        96 => ("Thunderstorm & Hail", Icon::LightningBolt),
        99 => ("Heavy Thunderstorm", Icon::LightningBolt),
        _ => return ConditionInfo::UNKNOWN,
    };

    ConditionInfo::new(label, icon)
}
