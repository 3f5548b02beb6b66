//! Core library for the `twweather` CLI.
//!
//! This crate defines:
//! - Configuration & the persisted city slot
//! - The static location table for Taiwan counties/cities
//! - Day/night classification against computed sunrise/sunset
//! - The CWA open-data provider and the dual-fetch coordinator
//! - Weather-code to icon-kind classification
//!
//! It is used by `twweather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod fetcher;
pub mod icon;
pub mod location;
pub mod model;
pub mod moment;
pub mod provider;

pub use config::{CityStore, Config, ConfigCityStore};
pub use fetcher::WeatherFetcher;
pub use icon::WeatherKind;
pub use location::{LocationEntry, available_locations, find_location};
pub use model::WeatherReading;
pub use moment::Moment;
pub use provider::{Forecast, Observation, WeatherProvider, cwa::CwaProvider};
