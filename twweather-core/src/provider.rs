use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub mod cwa;

/// The current-observation half of a reading, extracted from the
/// `O-A0003-001` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub station_name: String,
    pub observation_time: DateTime<Utc>,
    pub temperature: f64,
    pub wind_speed: f64,
}

/// The short-term-forecast half of a reading, extracted from the
/// `F-C0032-001` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub description: String,
    pub weather_code: u16,
    pub rain_possibility: f64,
    pub comfortability: String,
}

/// Upstream weather data source.
///
/// The two methods correspond to the two endpoints one fetch cycle hits in
/// parallel; the seam exists so the fetch coordinator can be tested against a
/// stub instead of the network.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions at a manned station (`StationName` keyed).
    async fn current(&self, station_name: &str) -> anyhow::Result<Observation>;

    /// 36-hour forecast for a county/city (`locationName` keyed).
    async fn forecast(&self, location_name: &str) -> anyhow::Result<Forecast>;
}
