//! Weather-code to icon-kind classification.
//!
//! The CWA `Wx` element carries a numeric code (1..=42). Each code belongs to
//! exactly one of seven icon kinds; the kind plus the day/night moment picks
//! one of fourteen icon assets.

use thiserror::Error;

use crate::moment::Moment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherKind {
    Clear,
    Cloudy,
    CloudyFog,
    Fog,
    PartiallyClearWithRain,
    Snowing,
    Thunderstorm,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Weather code {0} is outside the documented CWA range (1..=42)")]
pub struct UnknownWeatherCode(pub u16);

impl WeatherKind {
    /// The seven kinds in a stable order.
    pub const fn all() -> &'static [WeatherKind] {
        &[
            WeatherKind::Clear,
            WeatherKind::Cloudy,
            WeatherKind::CloudyFog,
            WeatherKind::Fog,
            WeatherKind::PartiallyClearWithRain,
            WeatherKind::Snowing,
            WeatherKind::Thunderstorm,
        ]
    }

    /// The CWA `Wx` codes belonging to this kind. The seven sets are pairwise
    /// disjoint and jointly cover 1..=42.
    pub const fn codes(self) -> &'static [u16] {
        match self {
            WeatherKind::Clear => &[1],
            WeatherKind::Cloudy => &[2, 3, 4, 5, 6, 7],
            WeatherKind::CloudyFog => &[25, 26, 27, 28],
            WeatherKind::Fog => &[24],
            WeatherKind::PartiallyClearWithRain => {
                &[8, 9, 10, 11, 12, 13, 14, 19, 20, 29, 30, 31, 32, 38, 39, 40]
            }
            WeatherKind::Snowing => &[23, 37, 42],
            WeatherKind::Thunderstorm => &[15, 16, 17, 18, 21, 22, 33, 34, 35, 36, 41],
        }
    }

    /// Classify a numeric weather code into its icon kind.
    pub fn classify(weather_code: u16) -> Result<Self, UnknownWeatherCode> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.codes().contains(&weather_code))
            .ok_or(UnknownWeatherCode(weather_code))
    }

    /// Name of the icon asset for this kind at the given moment, one of the
    /// fourteen `day-*`/`night-*` assets of the original icon set.
    pub fn asset_name(self, moment: Moment) -> &'static str {
        match (moment, self) {
            (Moment::Day, WeatherKind::Clear) => "day-clear",
            (Moment::Day, WeatherKind::Cloudy) => "day-cloudy",
            (Moment::Day, WeatherKind::CloudyFog) => "day-cloudy-fog",
            (Moment::Day, WeatherKind::Fog) => "day-fog",
            (Moment::Day, WeatherKind::PartiallyClearWithRain) => {
                "day-partially-clear-with-rain"
            }
            (Moment::Day, WeatherKind::Snowing) => "day-snowing",
            (Moment::Day, WeatherKind::Thunderstorm) => "day-thunderstorm",
            (Moment::Night, WeatherKind::Clear) => "night-clear",
            (Moment::Night, WeatherKind::Cloudy) => "night-cloudy",
            (Moment::Night, WeatherKind::CloudyFog) => "night-cloudy-fog",
            (Moment::Night, WeatherKind::Fog) => "night-fog",
            (Moment::Night, WeatherKind::PartiallyClearWithRain) => {
                "night-partially-clear-with-rain"
            }
            (Moment::Night, WeatherKind::Snowing) => "night-snowing",
            (Moment::Night, WeatherKind::Thunderstorm) => "night-thunderstorm",
        }
    }

    /// Terminal glyph standing in for the SVG asset.
    pub fn glyph(self, moment: Moment) -> &'static str {
        match (moment, self) {
            (Moment::Day, WeatherKind::Clear) => "☀️",
            (Moment::Night, WeatherKind::Clear) => "🌙",
            (Moment::Day, WeatherKind::Cloudy) => "⛅",
            (Moment::Night, WeatherKind::Cloudy) => "☁️",
            (_, WeatherKind::CloudyFog) => "🌥️",
            (_, WeatherKind::Fog) => "🌫️",
            (_, WeatherKind::PartiallyClearWithRain) => "🌦️",
            (_, WeatherKind::Snowing) => "🌨️",
            (_, WeatherKind::Thunderstorm) => "⛈️",
        }
    }
}
