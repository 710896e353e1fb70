use anyhow::Result;
use clap::{Parser, Subcommand};
use meteo_core::{Config, Renderer, WeatherDisplay, WeatherService};
use std::{path::PathBuf, process::ExitCode};

use crate::{
    interactive,
    render::{JsonRenderer, TerminalRenderer},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather for a city or your location")]
pub struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // Without a subcommand, start the interactive prompt.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the default city and home location.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name; several words are joined, e.g. `show New York`.
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show current weather for your configured location.
    Here {
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Prompt for cities until you quit.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> Result<ExitCode> {
        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => {
                interactive::configure(config, self.config.as_deref())?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { city, json } => {
                let service = WeatherService::from_config(&config);
                let city = city.join(" ");
                if json {
                    show(&service, JsonRenderer, Lookup::City(&city)).await
                } else {
                    show(&service, TerminalRenderer, Lookup::City(&city)).await
                }
            }
            Command::Here { json } => {
                let service = WeatherService::from_config(&config);
                if json {
                    show(&service, JsonRenderer, Lookup::Here).await
                } else {
                    show(&service, TerminalRenderer, Lookup::Here).await
                }
            }
            Command::Interactive => {
                let service = WeatherService::from_config(&config);
                interactive::run(&service, config.default_city.as_deref()).await?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

enum Lookup<'a> {
    City(&'a str),
    Here,
}

/// Run one lookup; the exit code reflects whether it produced a result.
async fn show<R: Renderer>(
    service: &WeatherService,
    renderer: R,
    lookup: Lookup<'_>,
) -> Result<ExitCode> {
    let mut display = WeatherDisplay::new(renderer);

    match lookup {
        Lookup::City(city) => {
            if !service.search(&mut display, city).await {
                anyhow::bail!("City name must not be blank");
            }
        }
        Lookup::Here => service.use_my_location(&mut display).await,
    }

    Ok(match display.state().result() {
        Some(_) => ExitCode::SUCCESS,
        None => ExitCode::FAILURE,
    })
}
