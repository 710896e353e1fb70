//! The lookup pipeline: resolve a location, fetch its current conditions,
//! format them, and hand the outcome to the display.

use crate::{
    config::Config,
    display::{Renderer, WeatherDisplay},
    error::LookupError,
    formatter,
    model::{Location, RenderedConditions},
    provider::{ConfiguredGeolocator, ForecastProvider, Geocoder, Geolocator, OpenMeteoClient},
};

#[derive(Debug)]
pub struct WeatherService {
    geocoder: Box<dyn Geocoder>,
    forecast: Box<dyn ForecastProvider>,
    geolocator: Box<dyn Geolocator>,
}

impl WeatherService {
    pub fn new(
        geocoder: Box<dyn Geocoder>,
        forecast: Box<dyn ForecastProvider>,
        geolocator: Box<dyn Geolocator>,
    ) -> Self {
        Self {
            geocoder,
            forecast,
            geolocator,
        }
    }

    /// Open-Meteo for both lookups, the configured home position for
    /// geolocation.
    pub fn from_config(config: &Config) -> Self {
        let client = OpenMeteoClient::from_config(config);
        Self::new(
            Box::new(client.clone()),
            Box::new(client),
            Box::new(ConfiguredGeolocator::from_config(&config.location)),
        )
    }

    /// Stage one: place name to coordinates and display label.
    pub async fn resolve_location(&self, city: &str) -> Result<Location, LookupError> {
        let location = self
            .geocoder
            .geocode(city)
            .await
            .map_err(LookupError::NetworkFailure)?
            .ok_or_else(|| LookupError::LocationNotFound(city.to_string()))?;

        tracing::debug!(
            city,
            label = %location.label,
            latitude = location.coordinates.latitude,
            longitude = location.coordinates.longitude,
            "resolved location"
        );
        Ok(location)
    }

    /// Stage two: current conditions for a resolved location, formatted.
    pub async fn fetch_conditions(
        &self,
        location: &Location,
    ) -> Result<RenderedConditions, LookupError> {
        let conditions =
            self.forecast.current(location).await.map_err(LookupError::NetworkFailure)?;

        Ok(formatter::format(&conditions))
    }

    pub async fn lookup_city(&self, city: &str) -> Result<RenderedConditions, LookupError> {
        let location = self.resolve_location(city).await?;
        self.fetch_conditions(&location).await
    }

    pub async fn lookup_here(&self) -> Result<RenderedConditions, LookupError> {
        let position = self.geolocator.current_position().await?;
        self.fetch_conditions(&Location::here(position)).await
    }

    /// Search for `input` and show the outcome.
    ///
    /// Blank input is ignored and leaves the display as it was; returns
    /// whether a lookup actually ran. The display stays borrowed until the
    /// lookup finishes; see [`crate::display`] for overlapping requests.
    pub async fn search<R: Renderer>(&self, display: &mut WeatherDisplay<R>, input: &str) -> bool {
        let city = input.trim();
        if city.is_empty() {
            return false;
        }

        let token = display.begin();
        let outcome = self.lookup_city(city).await;
        display.complete(token, outcome);
        true
    }

    /// Look up the user's own position and show the outcome.
    ///
    /// When no geolocation source exists the error is shown straight away,
    /// without passing through `Loading`.
    pub async fn use_my_location<R: Renderer>(&self, display: &mut WeatherDisplay<R>) {
        if !self.geolocator.is_available() {
            display.fail_immediately(LookupError::GeolocationUnsupported);
            return;
        }

        let token = display.begin();
        let outcome = self.lookup_here().await;
        display.complete(token, outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        display::DisplayState,
        model::{Coordinates, CurrentConditions},
    };
    use async_trait::async_trait;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    #[derive(Debug, Default)]
    struct NullRenderer;

    impl Renderer for NullRenderer {
        fn show_loading(&mut self) {}
        fn show_error(&mut self, _message: &str) {}
        fn show_result(&mut self, _rendering: &RenderedConditions) {}
    }

    #[derive(Debug, Clone, Default)]
    struct Calls(Arc<AtomicUsize>);

    impl Calls {
        fn hit(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }

        fn count(&self) -> usize {
            self.0.load(Ordering::SeqCst)
        }
    }

    #[derive(Debug)]
    struct FakeGeocoder {
        known: Option<Location>,
        fail: bool,
        calls: Calls,
    }

    #[async_trait]
    impl Geocoder for FakeGeocoder {
        async fn geocode(&self, _name: &str) -> anyhow::Result<Option<Location>> {
            self.calls.hit();
            if self.fail {
                anyhow::bail!("geocoder unreachable");
            }
            Ok(self.known.clone())
        }
    }

    #[derive(Debug)]
    struct FakeForecast {
        fail: bool,
        calls: Calls,
    }

    #[async_trait]
    impl ForecastProvider for FakeForecast {
        async fn current(&self, location: &Location) -> anyhow::Result<CurrentConditions> {
            self.calls.hit();
            if self.fail {
                anyhow::bail!("forecast unreachable");
            }
            Ok(CurrentConditions {
                temperature_c: 15.2,
                apparent_temperature_c: 14.0,
                relative_humidity_pct: 80.0,
                wind_speed_kmh: 12.0,
                visibility_m: 24_000.0,
                code: 3,
                is_day: true,
                location_label: location.label.clone(),
            })
        }
    }

    fn london() -> Location {
        Location {
            coordinates: Coordinates {
                latitude: 51.5,
                longitude: -0.12,
            },
            label: "London, United Kingdom".into(),
        }
    }

    struct Harness {
        service: WeatherService,
        geocode_calls: Calls,
        forecast_calls: Calls,
    }

    fn harness(
        known: Option<Location>,
        geocoder_fails: bool,
        forecast_fails: bool,
        geo: ConfiguredGeolocator,
    ) -> Harness {
        let geocode_calls = Calls::default();
        let forecast_calls = Calls::default();
        let service = WeatherService::new(
            Box::new(FakeGeocoder {
                known,
                fail: geocoder_fails,
                calls: geocode_calls.clone(),
            }),
            Box::new(FakeForecast {
                fail: forecast_fails,
                calls: forecast_calls.clone(),
            }),
            Box::new(geo),
        );
        Harness {
            service,
            geocode_calls,
            forecast_calls,
        }
    }

    #[tokio::test]
    async fn search_renders_result() {
        let h = harness(Some(london()), false, false, ConfiguredGeolocator::default());
        let mut display = WeatherDisplay::new(NullRenderer);

        assert!(h.service.search(&mut display, "  London ").await);

        let result = display.state().result().expect("result state");
        assert_eq!(result.location_label, "London, United Kingdom");
        assert_eq!(result.temperature_c, 15);
        assert_eq!(result.condition.label, "Overcast");
        assert_eq!(result.visibility, "24.0 km");
    }

    #[tokio::test]
    async fn blank_search_is_ignored() {
        let h = harness(Some(london()), false, false, ConfiguredGeolocator::default());
        let mut display = WeatherDisplay::new(NullRenderer);

        assert!(!h.service.search(&mut display, "   ").await);
        assert_eq!(display.state(), &DisplayState::Hidden);
        assert_eq!(h.geocode_calls.count(), 0);
    }

    #[tokio::test]
    async fn unknown_city_skips_forecast() {
        let h = harness(None, false, false, ConfiguredGeolocator::default());
        let mut display = WeatherDisplay::new(NullRenderer);

        h.service.search(&mut display, "Zzxqplonk").await;

        assert_eq!(display.state().error_message(), Some("City not found"));
        assert_eq!(h.geocode_calls.count(), 1);
        assert_eq!(h.forecast_calls.count(), 0);
    }

    #[tokio::test]
    async fn geocoder_failure_is_a_network_failure() {
        let h = harness(None, true, false, ConfiguredGeolocator::default());

        let err = h.service.resolve_location("London").await.unwrap_err();
        assert!(matches!(err, LookupError::NetworkFailure(_)));
        assert_eq!(err.user_message(), "Failed to fetch weather data.");
    }

    #[tokio::test]
    async fn forecast_failure_replaces_previous_result() {
        let h = harness(Some(london()), false, false, ConfiguredGeolocator::default());
        let mut display = WeatherDisplay::new(NullRenderer);
        h.service.search(&mut display, "London").await;
        assert!(display.state().result().is_some());

        let failing = harness(Some(london()), false, true, ConfiguredGeolocator::default());
        failing.service.search(&mut display, "London").await;

        assert_eq!(
            display.state(),
            &DisplayState::Error("Failed to fetch weather data.".into())
        );
    }

    #[tokio::test]
    async fn denied_location_makes_no_network_call() {
        let geo = ConfiguredGeolocator::new(Some(london().coordinates), false);
        let h = harness(Some(london()), false, false, geo);
        let mut display = WeatherDisplay::new(NullRenderer);

        h.service.use_my_location(&mut display).await;

        assert_eq!(
            display.state().error_message(),
            Some("Location access denied. Please search manually.")
        );
        assert_eq!(h.geocode_calls.count(), 0);
        assert_eq!(h.forecast_calls.count(), 0);
    }

    #[tokio::test]
    async fn unsupported_location_reports_without_lookup() {
        let h = harness(Some(london()), false, false, ConfiguredGeolocator::default());
        let mut display = WeatherDisplay::new(NullRenderer);

        h.service.use_my_location(&mut display).await;

        assert_eq!(
            display.state().error_message(),
            Some("Geolocation is not supported by your browser.")
        );
        assert_eq!(h.forecast_calls.count(), 0);
    }

    #[tokio::test]
    async fn allowed_location_uses_fixed_label() {
        let geo = ConfiguredGeolocator::new(Some(london().coordinates), true);
        let h = harness(None, false, false, geo);
        let mut display = WeatherDisplay::new(NullRenderer);

        h.service.use_my_location(&mut display).await;

        let result = display.state().result().expect("result state");
        assert_eq!(result.location_label, "Your Location");
        assert_eq!(h.geocode_calls.count(), 0);
        assert_eq!(h.forecast_calls.count(), 1);
    }

    #[tokio::test]
    async fn overlapping_lookups_keep_newest() {
        let slow = harness(Some(london()), false, true, ConfiguredGeolocator::default());
        let fast = harness(Some(london()), false, false, ConfiguredGeolocator::default());
        let mut display = WeatherDisplay::new(NullRenderer);

        let first = display.begin();
        let second = display.begin();
        let (stale, fresh) = tokio::join!(
            slow.service.lookup_city("London"),
            fast.service.lookup_city("London"),
        );

        assert!(display.complete(second, fresh));
        assert!(!display.complete(first, stale));

        let result = display.state().result().expect("result state");
        assert_eq!(result.location_label, "London, United Kingdom");
        assert_eq!(slow.forecast_calls.count(), 1);
        assert_eq!(fast.forecast_calls.count(), 1);
    }

    #[tokio::test]
    async fn stale_failure_arriving_first_is_dropped() {
        let slow = harness(None, false, false, ConfiguredGeolocator::default());
        let fast = harness(Some(london()), false, false, ConfiguredGeolocator::default());
        let mut display = WeatherDisplay::new(NullRenderer);

        let first = display.begin();
        let stale = slow.service.lookup_city("Zzxqplonk").await;
        let second = display.begin();

        assert!(!display.complete(first, stale));
        assert!(display.state().is_loading());

        let fresh = fast.service.lookup_city("London").await;
        assert!(display.complete(second, fresh));
        assert!(display.state().result().is_some());
    }

    #[tokio::test]
    async fn lookup_here_maps_geolocation_errors() {
        let geo = ConfiguredGeolocator::new(Some(london().coordinates), false);
        let h = harness(None, false, false, geo);

        let err = h.service.lookup_here().await.unwrap_err();
        assert!(matches!(err, LookupError::GeolocationDenied));
    }
}
