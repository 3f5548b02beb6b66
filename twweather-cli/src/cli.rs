use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::{Select, Text};

use twweather_core::{
    Config, CwaProvider, WeatherFetcher, available_locations, find_location,
};

use crate::{app, render};

/// City shown when nothing has been persisted yet.
const DEFAULT_CITY: &str = "臺北市";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "twweather", version, about = "Taiwan weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the CWA open-data authorization key.
    Configure,

    /// Show the weather card for a city once and exit.
    Show {
        /// City name, e.g. "臺北市"; defaults to the saved city.
        city: Option<String>,
    },

    /// Interactive dashboard: card screen with refresh, settings screen to
    /// switch city.
    Dashboard,

    /// Save the selected city without opening the dashboard.
    SetCity {
        /// City name; prompts with a list when omitted.
        city: Option<String>,
    },

    /// List the selectable cities.
    Locations,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => show(city).await,
            Command::Dashboard => app::Dashboard::start().await,
            Command::SetCity { city } => set_city(city),
            Command::Locations => {
                for entry in available_locations() {
                    println!("{}（測站：{}）", entry.city_name, entry.station_name);
                }
                Ok(())
            }
        }
    }
}

fn configure() -> Result<()> {
    let mut cfg = Config::load()?;

    let key = Text::new("CWA authorization key:")
        .with_help_message("Issued at https://opendata.cwa.gov.tw after signing up")
        .prompt()?;

    cfg.set_authorization_key(key.trim().to_string());
    cfg.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Build a fetcher for the effective city: CLI argument, then the persisted
/// slot, then the default.
pub fn fetcher_for(city: Option<String>) -> Result<WeatherFetcher> {
    let cfg = Config::load()?;
    cfg.validate_city()?;

    let city_name = city
        .or_else(|| cfg.city_name.clone())
        .unwrap_or_else(|| DEFAULT_CITY.to_string());
    let location = find_location(&city_name)?;

    let provider = CwaProvider::new(cfg.authorization_key()?.to_string())?;
    Ok(WeatherFetcher::new(Box::new(provider), location))
}

async fn show(city: Option<String>) -> Result<()> {
    let fetcher = fetcher_for(city)?;
    let reading = fetcher.refresh().await?;
    render::print_card(fetcher.location(), &reading)?;
    Ok(())
}

fn set_city(city: Option<String>) -> Result<()> {
    use twweather_core::{CityStore, ConfigCityStore};

    let city_name = match city {
        Some(city) => city,
        None => {
            let options: Vec<&str> =
                available_locations().iter().map(|entry| entry.city_name).collect();
            Select::new("地區", options).prompt()?.to_string()
        }
    };

    let mut store = ConfigCityStore;
    store.set(&city_name)?;
    println!("Saved city: {city_name}");
    Ok(())
}
