//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Weather-code classification and display formatting
//! - The loading / error / result display state machine
//! - Open-Meteo geocoding and forecast clients behind small traits
//! - Configuration handling
//!
//! It is used by `meteo-cli`, but the display layer only needs a
//! [`Renderer`], so other front ends can reuse it.

pub mod condition;
pub mod config;
pub mod display;
pub mod error;
pub mod formatter;
pub mod model;
pub mod provider;
pub mod service;

pub use condition::{ConditionInfo, Icon, classify};
pub use config::{Config, LocationConfig};
pub use display::{DisplayState, Renderer, RequestToken, WeatherDisplay};
pub use error::{GeolocationError, LookupError};
pub use model::{Coordinates, CurrentConditions, Location, RenderedConditions};
pub use provider::{ConfiguredGeolocator, ForecastProvider, Geocoder, Geolocator, OpenMeteoClient};
pub use service::WeatherService;
