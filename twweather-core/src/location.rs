//! Static lookup table mapping a user-facing city name to the identifiers the
//! two CWA endpoints expect, plus the reference city used for sunrise/sunset.
//!
//! The table is fixed data shipped with the binary; it is never mutated at
//! runtime. A miss is a typed error, not an undefined lookup.

use thiserror::Error;

/// One row of the location table.
///
/// - `city_name`: the name shown to the user and used as the lookup key.
/// - `location_name`: the `locationName` the forecast endpoint (F-C0032-001)
///   expects; for the county-level forecast this is the city name itself.
/// - `station_name`: the `StationName` the observation endpoint (O-A0003-001)
///   expects, a manned weather station inside that county/city.
/// - `sunrise_city_name`: the reference city for day/night classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationEntry {
    pub city_name: &'static str,
    pub location_name: &'static str,
    pub station_name: &'static str,
    pub sunrise_city_name: &'static str,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown city '{0}'. Run `twweather locations` to list the selectable cities.")]
pub struct UnknownCity(pub String);

const AVAILABLE_LOCATIONS: &[LocationEntry] = &[
    entry("宜蘭縣", "宜蘭縣", "宜蘭", "宜蘭"),
    entry("花蓮縣", "花蓮縣", "花蓮", "花蓮"),
    entry("臺東縣", "臺東縣", "臺東", "臺東"),
    entry("澎湖縣", "澎湖縣", "澎湖", "澎湖"),
    entry("金門縣", "金門縣", "金門", "金門"),
    entry("連江縣", "連江縣", "馬祖", "馬祖"),
    entry("臺北市", "臺北市", "臺北", "臺北"),
    entry("新北市", "新北市", "板橋", "板橋"),
    entry("桃園市", "桃園市", "新屋", "桃園"),
    entry("新竹市", "新竹市", "新竹", "新竹"),
    entry("新竹縣", "新竹縣", "新竹", "新竹"),
    entry("苗栗縣", "苗栗縣", "後龍", "苗栗"),
    entry("臺中市", "臺中市", "臺中", "臺中"),
    entry("彰化縣", "彰化縣", "員林", "彰化"),
    entry("南投縣", "南投縣", "日月潭", "南投"),
    entry("雲林縣", "雲林縣", "斗六", "雲林"),
    entry("嘉義市", "嘉義市", "嘉義", "嘉義"),
    entry("嘉義縣", "嘉義縣", "嘉義", "嘉義"),
    entry("臺南市", "臺南市", "臺南", "臺南"),
    entry("高雄市", "高雄市", "高雄", "高雄"),
    entry("屏東縣", "屏東縣", "恆春", "屏東"),
    entry("基隆市", "基隆市", "基隆", "基隆"),
];

const fn entry(
    city_name: &'static str,
    location_name: &'static str,
    station_name: &'static str,
    sunrise_city_name: &'static str,
) -> LocationEntry {
    LocationEntry { city_name, location_name, station_name, sunrise_city_name }
}

/// All selectable locations, in display order.
pub fn available_locations() -> &'static [LocationEntry] {
    AVAILABLE_LOCATIONS
}

/// Resolve a user-facing city name to its location entry.
pub fn find_location(city_name: &str) -> Result<&'static LocationEntry, UnknownCity> {
    AVAILABLE_LOCATIONS
        .iter()
        .find(|entry| entry.city_name == city_name)
        .ok_or_else(|| UnknownCity(city_name.to_string()))
}
