//! The interactive dashboard: a two-screen loop between the weather card and
//! the city-selection settings screen.

use anyhow::Result;
use inquire::Select;

use twweather_core::{CityStore, ConfigCityStore, WeatherFetcher, available_locations};

use crate::{cli, render};

/// The screen currently shown. Two states only; every transition is a user
/// action on one of the screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Card,
    Settings,
}

const ACTION_REFRESH: &str = "重新整理";
const ACTION_SETTINGS: &str = "設定";
const ACTION_QUIT: &str = "離開";
const ACTION_BACK: &str = "返回";

pub struct Dashboard {
    fetcher: WeatherFetcher,
    store: ConfigCityStore,
    page: Page,
}

impl Dashboard {
    pub async fn start() -> Result<()> {
        let fetcher = cli::fetcher_for(None)?;
        let mut dashboard = Self { fetcher, store: ConfigCityStore, page: Page::Card };

        dashboard.refresh().await;
        dashboard.run().await
    }

    async fn run(&mut self) -> Result<()> {
        loop {
            match self.page {
                Page::Card => {
                    if !self.card_screen().await? {
                        return Ok(());
                    }
                }
                Page::Settings => self.settings_screen().await?,
            }
        }
    }

    /// Card screen; returns `false` when the user quits.
    async fn card_screen(&mut self) -> Result<bool> {
        render::print_card(self.fetcher.location(), &self.fetcher.current())?;

        let action = Select::new(
            "動作",
            vec![ACTION_REFRESH, ACTION_SETTINGS, ACTION_QUIT],
        )
        .prompt()?;

        match action {
            ACTION_REFRESH => self.refresh().await,
            ACTION_SETTINGS => self.page = Page::Settings,
            _ => return Ok(false),
        }

        Ok(true)
    }

    /// Settings screen: pick a city, persist it, and return to the card with
    /// a fresh fetch for the new location.
    async fn settings_screen(&mut self) -> Result<()> {
        let mut options = vec![ACTION_BACK];
        options.extend(available_locations().iter().map(|entry| entry.city_name));

        let choice = Select::new("地區", options).prompt()?;
        self.page = Page::Card;

        if choice == ACTION_BACK {
            return Ok(());
        }

        self.store.set(choice)?;
        // The location triple changed, so the fetcher is rebuilt and a new
        // cycle starts right away.
        self.fetcher = cli::fetcher_for(Some(choice.to_string()))?;
        self.refresh().await;

        Ok(())
    }

    /// One fetch cycle; failures keep the last good reading and are shown
    /// instead of aborting the dashboard.
    async fn refresh(&mut self) {
        if let Err(err) = self.fetcher.refresh().await {
            eprintln!("Fetch failed: {err:#}");
        }
    }
}
