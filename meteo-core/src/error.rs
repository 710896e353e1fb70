//! Failures a lookup can end in.
//!
//! Every variant maps to one fixed, user-facing message via
//! [`LookupError::user_message`]; the `Display` impl keeps the underlying
//! cause for logs.

use thiserror::Error;

pub const CITY_NOT_FOUND: &str = "City not found";
pub const FETCH_FAILED: &str = "Failed to fetch weather data.";
pub const GEOLOCATION_DENIED: &str = "Location access denied. Please search manually.";
pub const GEOLOCATION_UNSUPPORTED: &str = "Geolocation is not supported by your browser.";

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no geocoding match for '{0}'")]
    LocationNotFound(String),

    #[error("weather request failed: {0:#}")]
    NetworkFailure(#[source] anyhow::Error),

    #[error("location access denied")]
    GeolocationDenied,

    #[error("geolocation unavailable")]
    GeolocationUnsupported,
}

impl LookupError {
    pub fn user_message(&self) -> &'static str {
        match self {
            LookupError::LocationNotFound(_) => CITY_NOT_FOUND,
            LookupError::NetworkFailure(_) => FETCH_FAILED,
            LookupError::GeolocationDenied => GEOLOCATION_DENIED,
            LookupError::GeolocationUnsupported => GEOLOCATION_UNSUPPORTED,
        }
    }
}

/// Outcome of asking the platform for the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("permission denied")]
    Denied,
    #[error("not supported")]
    Unsupported,
}

impl From<GeolocationError> for LookupError {
    fn from(err: GeolocationError) -> Self {
        match err {
            GeolocationError::Denied => LookupError::GeolocationDenied,
            GeolocationError::Unsupported => LookupError::GeolocationUnsupported,
        }
    }
}
