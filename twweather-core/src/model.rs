use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::provider::{Forecast, Observation};

/// The merged record of current observation + short-term forecast for one city.
///
/// Replaced wholesale after each successful dual fetch; `is_loading` is the
/// only field that changes in place, flipped on while a fetch cycle is in
/// flight. During that window the remaining fields still show the previous
/// (or placeholder) reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReading {
    pub observation_time: DateTime<Utc>,
    pub location_name: String,
    pub temperature: f64,
    pub wind_speed: f64,
    pub description: String,
    pub weather_code: u16,
    pub rain_possibility: f64,
    pub comfortability: String,
    pub is_loading: bool,
}

impl WeatherReading {
    /// Zero/empty reading shown until the first fetch lands.
    pub fn placeholder() -> Self {
        Self {
            observation_time: Utc::now(),
            location_name: String::new(),
            temperature: 0.0,
            wind_speed: 0.0,
            description: String::new(),
            weather_code: 0,
            rain_possibility: 0.0,
            comfortability: String::new(),
            is_loading: true,
        }
    }

    /// Merge the two partial records of one fetch cycle into a full reading.
    pub fn merge(observation: Observation, forecast: Forecast) -> Self {
        Self {
            observation_time: observation.observation_time,
            location_name: observation.station_name,
            temperature: observation.temperature,
            wind_speed: observation.wind_speed,
            description: forecast.description,
            weather_code: forecast.weather_code,
            rain_possibility: forecast.rain_possibility,
            comfortability: forecast.comfortability,
            is_loading: false,
        }
    }
}
