use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    config::Config,
    model::{Coordinates, CurrentConditions, Location},
};

use super::{ForecastProvider, Geocoder};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Fields requested in the forecast's `current` block.
const CURRENT_FIELDS: &str = concat!(
    "temperature_2m,relative_humidity_2m,apparent_temperature,",
    "is_day,weather_code,wind_speed_10m,visibility",
);

/// Client for the free Open-Meteo geocoding and forecast endpoints.
///
/// No timeout is set on the underlying client; requests rely on the
/// transport defaults.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    geocoding_url: String,
    forecast_url: String,
    language: String,
}

impl OpenMeteoClient {
    pub fn new(geocoding_url: impl Into<String>, forecast_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            geocoding_url: geocoding_url.into(),
            forecast_url: forecast_url.into(),
            language: "en".to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.geocoding_url, &config.forecast_url).with_language(&config.language)
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        what: &str,
    ) -> Result<T> {
        tracing::debug!(url, ?query, "requesting {what}");

        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to send {what} request to Open-Meteo"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read Open-Meteo {what} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "Open-Meteo {what} request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse Open-Meteo {what} JSON"))
    }
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new(DEFAULT_GEOCODING_URL, DEFAULT_FORECAST_URL)
    }
}

#[derive(Debug, Deserialize)]
struct OmGeocodingResponse {
    // Absent entirely when nothing matches.
    #[serde(default)]
    results: Option<Vec<OmPlace>>,
}

#[derive(Debug, Deserialize)]
struct OmPlace {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
}

impl OmPlace {
    fn into_location(self) -> Location {
        let label = match self.country {
            Some(country) if !country.is_empty() => format!("{}, {}", self.name, country),
            _ => self.name,
        };

        Location {
            coordinates: Coordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            },
            label,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current: OmCurrent,
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    apparent_temperature: f64,
    is_day: u8,
    weather_code: i32,
    wind_speed_10m: f64,
    visibility: f64,
}

#[async_trait]
impl Geocoder for OpenMeteoClient {
    async fn geocode(&self, name: &str) -> Result<Option<Location>> {
        let query = [
            ("name", name.to_string()),
            ("count", "1".to_string()),
            ("language", self.language.clone()),
            ("format", "json".to_string()),
        ];

        let parsed: OmGeocodingResponse =
            self.get_json(&self.geocoding_url, &query, "geocoding").await?;

        Ok(parsed
            .results
            .and_then(|results| results.into_iter().next())
            .map(OmPlace::into_location))
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoClient {
    async fn current(&self, location: &Location) -> Result<CurrentConditions> {
        let query = [
            ("latitude", location.coordinates.latitude.to_string()),
            ("longitude", location.coordinates.longitude.to_string()),
            ("current", CURRENT_FIELDS.to_string()),
            ("timezone", "auto".to_string()),
        ];

        let parsed: OmForecastResponse =
            self.get_json(&self.forecast_url, &query, "forecast").await?;
        let current = parsed.current;

        Ok(CurrentConditions {
            temperature_c: current.temperature_2m,
            apparent_temperature_c: current.apparent_temperature,
            relative_humidity_pct: current.relative_humidity_2m,
            wind_speed_kmh: current.wind_speed_10m,
            visibility_m: current.visibility,
            code: current.weather_code,
            is_day: current.is_day != 0,
            location_label: location.label.clone(),
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
