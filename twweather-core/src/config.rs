use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::location::find_location;

/// Top-level configuration stored on disk.
///
/// `city_name` is the single persisted slot of the dashboard: the last city
/// the user saved on the settings screen.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// CWA open-data authorization key.
    pub api_key: Option<String>,

    /// Last-selected city, e.g. "臺北市".
    pub city_name: Option<String>,
}

impl Config {
    /// Return the authorization key, or a hint on how to set one.
    pub fn authorization_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No CWA authorization key configured.\n\
                 Hint: run `twweather configure` and paste the key from opendata.cwa.gov.tw."
            )
        })
    }

    pub fn set_authorization_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Validate the persisted city against the location table.
    ///
    /// A slot that no longer resolves is a startup-time config error, not an
    /// undefined lookup later on.
    pub fn validate_city(&self) -> Result<()> {
        if let Some(city) = self.city_name.as_deref() {
            find_location(city).with_context(|| {
                format!("Persisted city '{city}' is not in the location table")
            })?;
        }
        Ok(())
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("tw", "twweather", "twweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// The persisted selected-city slot, injected so core logic (and tests) never
/// touch a real backing store directly.
pub trait CityStore {
    fn get(&self) -> Option<String>;
    fn set(&mut self, city_name: &str) -> Result<()>;
}

/// [`CityStore`] backed by the on-disk [`Config`].
#[derive(Debug, Default)]
pub struct ConfigCityStore;

impl CityStore for ConfigCityStore {
    fn get(&self) -> Option<String> {
        Config::load().ok().and_then(|cfg| cfg.city_name)
    }

    fn set(&mut self, city_name: &str) -> Result<()> {
        // Reject unknown cities at the boundary instead of persisting them.
        find_location(city_name)?;

        let mut cfg = Config::load()?;
        cfg.city_name = Some(city_name.to_string());
        cfg.save()
    }
}
