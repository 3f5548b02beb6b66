//! Day/night classification for a reference city.
//!
//! The original dashboard shipped a bundled sunrise/sunset table from the CWA
//! `A-B0062-001` dataset. Here the same contract is kept but the times are
//! computed from the reference city's coordinates for the current Asia/Taipei
//! date, so no dataset has to be refreshed yearly.

use chrono::{DateTime, Utc};
use chrono_tz::Asia::Taipei;
use sunrise::{Coordinates, SolarDay, SolarEvent};

use crate::location::UnknownCity;

/// Whether it is currently day or night at the reference city.
///
/// Drives both the icon set (day vs. night assets) and the UI theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Moment {
    Day,
    Night,
}

impl Moment {
    pub fn as_str(self) -> &'static str {
        match self {
            Moment::Day => "day",
            Moment::Night => "night",
        }
    }
}

/// Reference-city coordinates for sunrise/sunset computation.
///
/// Keys are the `sunrise_city_name` values of the location table.
const SUNRISE_CITIES: &[(&str, f64, f64)] = &[
    ("宜蘭", 24.75, 121.75),
    ("花蓮", 23.98, 121.60),
    ("臺東", 22.75, 121.15),
    ("澎湖", 23.57, 119.58),
    ("金門", 24.43, 118.32),
    ("馬祖", 26.16, 119.95),
    ("臺北", 25.04, 121.51),
    ("板橋", 25.01, 121.46),
    ("桃園", 24.99, 121.30),
    ("新竹", 24.80, 120.97),
    ("苗栗", 24.56, 120.82),
    ("臺中", 24.14, 120.68),
    ("彰化", 24.08, 120.54),
    ("南投", 23.91, 120.68),
    ("雲林", 23.71, 120.54),
    ("嘉義", 23.48, 120.44),
    ("臺南", 22.99, 120.21),
    ("高雄", 22.63, 120.30),
    ("屏東", 22.67, 120.49),
    ("基隆", 25.13, 121.74),
];

/// Classify `now` as day or night at the given reference city.
///
/// Day is the half-open interval `[sunrise, sunset)` of the Asia/Taipei
/// calendar date that `now` falls on.
pub fn classify(sunrise_city_name: &str, now: DateTime<Utc>) -> Result<Moment, UnknownCity> {
    let (_, latitude, longitude) = SUNRISE_CITIES
        .iter()
        .find(|(name, _, _)| *name == sunrise_city_name)
        .ok_or_else(|| UnknownCity(sunrise_city_name.to_string()))?;

    // All table coordinates are valid, so this cannot miss in practice.
    let coordinates = Coordinates::new(*latitude, *longitude)
        .ok_or_else(|| UnknownCity(sunrise_city_name.to_string()))?;

    let local_date = now.with_timezone(&Taipei).date_naive();
    let solar_day = SolarDay::new(coordinates, local_date);

    // `event_time` yields `None` only for polar days/nights; Taiwan latitudes
    // always have both events, so a missing one falls back to night.
    if let (Some(sunrise), Some(sunset)) = (
        solar_day.event_time(SolarEvent::Sunrise),
        solar_day.event_time(SolarEvent::Sunset),
    ) && sunrise <= now
        && now < sunset
    {
        Ok(Moment::Day)
    } else {
        Ok(Moment::Night)
    }
}
