//! Prompt-driven flows: the lookup loop and `configure`.

use anyhow::{Context, Result, bail};
use inquire::{Confirm, CustomType, InquireError, Text};
use meteo_core::{Config, Coordinates, WeatherDisplay, WeatherService};
use std::path::Path;

use crate::render::TerminalRenderer;

/// Typed at the city prompt to look up the configured location.
const HERE_COMMAND: &str = ":here";

#[derive(Debug, PartialEq, Eq)]
enum Input {
    City(String),
    Here,
    Quit,
}

fn parse_input(line: Option<String>) -> Input {
    match line.as_deref().map(str::trim) {
        None | Some("") => Input::Quit,
        Some(HERE_COMMAND) => Input::Here,
        Some(city) => Input::City(city.to_string()),
    }
}

/// Keep prompting until the user submits nothing or presses Esc.
pub async fn run(service: &WeatherService, default_city: Option<&str>) -> Result<()> {
    let mut display = WeatherDisplay::new(TerminalRenderer);

    if let Some(city) = default_city {
        service.search(&mut display, city).await;
    }

    loop {
        let line = match Text::new("City:")
            .with_help_message("':here' uses your location, empty input or Esc quits")
            .prompt_skippable()
        {
            Ok(line) => line,
            Err(InquireError::OperationInterrupted) => None,
            Err(err) => return Err(err).context("Failed to read city"),
        };

        match parse_input(line) {
            Input::Quit => break,
            Input::Here => service.use_my_location(&mut display).await,
            Input::City(city) => {
                service.search(&mut display, &city).await;
            }
        }
    }

    Ok(())
}

/// Interactively update and save `config`.
pub fn configure(mut config: Config, path: Option<&Path>) -> Result<()> {
    let city = Text::new("Default city (looked up when the prompt starts):")
        .with_default(config.default_city.as_deref().unwrap_or(""))
        .prompt()
        .context("Failed to read default city")?;
    config.set_default_city(&city);

    let set_home = Confirm::new("Set a home location for `weather here`?")
        .with_default(config.location.coordinates().is_some())
        .prompt()
        .context("Failed to read answer")?;

    if set_home {
        let latitude = CustomType::<f64>::new("Latitude:")
            .with_error_message("Please type a number, e.g. 51.5")
            .prompt()
            .context("Failed to read latitude")?;
        let longitude = CustomType::<f64>::new("Longitude:")
            .with_error_message("Please type a number, e.g. -0.12")
            .prompt()
            .context("Failed to read longitude")?;
        let position = validate_coordinates(latitude, longitude)?;

        let allow = Confirm::new("Allow lookups to use this location?")
            .with_default(true)
            .prompt()
            .context("Failed to read answer")?;

        config.set_home(Some(position), allow);
    } else {
        config.set_home(None, false);
    }

    let saved_to = match path {
        Some(path) => {
            config.save_to(path)?;
            path.to_path_buf()
        }
        None => config.save()?,
    };

    println!("Configuration saved to {}", saved_to.display());
    Ok(())
}

fn validate_coordinates(latitude: f64, longitude: f64) -> Result<Coordinates> {
    if !(-90.0..=90.0).contains(&latitude) {
        bail!("Latitude must be between -90 and 90, got {latitude}");
    }
    if !(-180.0..=180.0).contains(&longitude) {
        bail!("Longitude must be between -180 and 180, got {longitude}");
    }
    Ok(Coordinates {
        latitude,
        longitude,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_or_escaped_input_quits() {
        assert_eq!(parse_input(None), Input::Quit);
        assert_eq!(parse_input(Some("   ".into())), Input::Quit);
    }

    #[test]
    fn here_command_is_recognized() {
        assert_eq!(parse_input(Some(" :here ".into())), Input::Here);
    }

    #[test]
    fn anything_else_is_a_city() {
        assert_eq!(parse_input(Some(" Paris ".into())), Input::City("Paris".into()));
    }

    #[test]
    fn coordinates_are_range_checked() {
        assert!(validate_coordinates(51.5, -0.12).is_ok());
        assert!(validate_coordinates(90.0, 180.0).is_ok());

        let err = validate_coordinates(91.0, 0.0).unwrap_err();
        assert!(err.to_string().contains("Latitude"));

        let err = validate_coordinates(0.0, -180.5).unwrap_err();
        assert!(err.to_string().contains("Longitude"));

        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
    }
}
