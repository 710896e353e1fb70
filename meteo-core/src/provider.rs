use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    config::LocationConfig,
    error::GeolocationError,
    model::{Coordinates, CurrentConditions, Location},
};

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

/// Resolves a free-text place name to its best match.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// `Ok(None)` means the service answered but found nothing.
    async fn geocode(&self, name: &str) -> anyhow::Result<Option<Location>>;
}

/// Fetches current conditions for a resolved location.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn current(&self, location: &Location) -> anyhow::Result<CurrentConditions>;
}

/// Source of the user's own position.
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    /// Whether a position source exists at all. Checked before a lookup
    /// starts, so an unsupported platform never shows as loading.
    fn is_available(&self) -> bool {
        true
    }

    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// Geolocation backed by the home position stored in the config file.
///
/// A terminal has no position API; the configured coordinates stand in for
/// one, and `allow = false` acts as a refused permission prompt.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredGeolocator {
    position: Option<Coordinates>,
    allowed: bool,
}

impl ConfiguredGeolocator {
    pub fn new(position: Option<Coordinates>, allowed: bool) -> Self {
        Self { position, allowed }
    }

    pub fn from_config(location: &LocationConfig) -> Self {
        Self::new(location.coordinates(), location.allow)
    }
}

#[async_trait]
impl Geolocator for ConfiguredGeolocator {
    fn is_available(&self) -> bool {
        self.position.is_some()
    }

    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        match (self.position, self.allowed) {
            (None, _) => Err(GeolocationError::Unsupported),
            (Some(_), false) => Err(GeolocationError::Denied),
            (Some(position), true) => Ok(position),
        }
    }
}
