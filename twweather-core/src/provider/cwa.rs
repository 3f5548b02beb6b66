use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::{Forecast, Observation, WeatherProvider};

const OBSERVATION_URL: &str =
    "https://opendata.cwa.gov.tw/api/v1/rest/datastore/O-A0003-001";
const FORECAST_URL: &str = "https://opendata.cwa.gov.tw/api/v1/rest/datastore/F-C0032-001";

/// A stalled upstream call fails the cycle instead of hanging it forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the CWA open-data platform.
#[derive(Debug, Clone)]
pub struct CwaProvider {
    authorization_key: String,
    http: Client,
}

impl CwaProvider {
    pub fn new(authorization_key: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client for CWA")?;

        Ok(Self { authorization_key, http })
    }

    async fn get_body(&self, url: &str, key: &str, value: &str, what: &str) -> Result<String> {
        let res = self
            .http
            .get(url)
            .query(&[("Authorization", self.authorization_key.as_str()), (key, value)])
            .send()
            .await
            .with_context(|| format!("Failed to send request to CWA ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read CWA {what} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "CWA {} request failed with status {}: {}",
                what,
                status,
                truncate_body(&body),
            ));
        }

        Ok(body)
    }
}

#[async_trait]
impl WeatherProvider for CwaProvider {
    async fn current(&self, station_name: &str) -> Result<Observation> {
        let body = self
            .get_body(OBSERVATION_URL, "StationName", station_name, "observation")
            .await?;
        parse_observation(&body)
    }

    async fn forecast(&self, location_name: &str) -> Result<Forecast> {
        let body = self
            .get_body(FORECAST_URL, "locationName", location_name, "forecast")
            .await?;
        parse_forecast(&body)
    }
}

// O-A0003-001: records.Station[0] carries ObsTime.DateTime plus the
// AirTemperature/WindSpeed weather elements.

#[derive(Debug, Deserialize)]
struct ObsResponse {
    records: ObsRecords,
}

#[derive(Debug, Deserialize)]
struct ObsRecords {
    #[serde(rename = "Station")]
    station: Vec<ObsStation>,
}

#[derive(Debug, Deserialize)]
struct ObsStation {
    #[serde(rename = "StationName")]
    station_name: String,
    #[serde(rename = "ObsTime")]
    obs_time: ObsTime,
    #[serde(rename = "WeatherElement")]
    weather_element: ObsWeatherElement,
}

#[derive(Debug, Deserialize)]
struct ObsTime {
    #[serde(rename = "DateTime")]
    date_time: String,
}

#[derive(Debug, Deserialize)]
struct ObsWeatherElement {
    #[serde(rename = "AirTemperature")]
    air_temperature: f64,
    #[serde(rename = "WindSpeed")]
    wind_speed: f64,
}

fn parse_observation(body: &str) -> Result<Observation> {
    let parsed: ObsResponse =
        serde_json::from_str(body).context("Failed to parse CWA observation JSON")?;

    let station = parsed
        .records
        .station
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("CWA observation response contained no station"))?;

    let observation_time = DateTime::parse_from_rfc3339(&station.obs_time.date_time)
        .with_context(|| {
            format!("Unparseable observation time '{}'", station.obs_time.date_time)
        })?
        .with_timezone(&Utc);

    Ok(Observation {
        station_name: station.station_name,
        observation_time,
        temperature: station.weather_element.air_temperature,
        wind_speed: station.weather_element.wind_speed,
    })
}

// F-C0032-001: records.location[0].weatherElement is a heterogeneous list of
// named elements; the three of interest are Wx (description + code), PoP
// (rain probability) and CI (comfort), each read from its first time bucket.

#[derive(Debug, Deserialize)]
struct FcResponse {
    records: FcRecords,
}

#[derive(Debug, Deserialize)]
struct FcRecords {
    location: Vec<FcLocation>,
}

#[derive(Debug, Deserialize)]
struct FcLocation {
    #[serde(rename = "weatherElement")]
    weather_element: Vec<FcElement>,
}

#[derive(Debug, Deserialize)]
struct FcElement {
    #[serde(rename = "elementName")]
    element_name: String,
    time: Vec<FcTime>,
}

#[derive(Debug, Deserialize)]
struct FcTime {
    parameter: FcParameter,
}

#[derive(Debug, Clone, Deserialize)]
struct FcParameter {
    #[serde(rename = "parameterName")]
    parameter_name: String,
    #[serde(rename = "parameterValue")]
    parameter_value: Option<String>,
}

fn parse_forecast(body: &str) -> Result<Forecast> {
    let parsed: FcResponse =
        serde_json::from_str(body).context("Failed to parse CWA forecast JSON")?;

    let location = parsed
        .records
        .location
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("CWA forecast response contained no location"))?;

    let first_parameter = |name: &str| -> Result<FcParameter> {
        location
            .weather_element
            .iter()
            .find(|element| element.element_name == name)
            .and_then(|element| element.time.first())
            .map(|bucket| bucket.parameter.clone())
            .ok_or_else(|| anyhow!("CWA forecast response missing element '{name}'"))
    };

    let wx = first_parameter("Wx")?;
    let pop = first_parameter("PoP")?;
    let ci = first_parameter("CI")?;

    let weather_code = wx
        .parameter_value
        .as_deref()
        .ok_or_else(|| anyhow!("CWA forecast Wx element has no parameterValue"))?
        .parse::<u16>()
        .context("CWA forecast Wx parameterValue is not a number")?;

    let rain_possibility = pop
        .parameter_name
        .parse::<f64>()
        .context("CWA forecast PoP parameterName is not a number")?;

    Ok(Forecast {
        description: wx.parameter_name,
        weather_code,
        rain_possibility,
        comfortability: ci.parameter_name,
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OBSERVATION_BODY: &str = r#"{
        "success": "true",
        "records": {
            "Station": [
                {
                    "StationName": "臺北",
                    "ObsTime": { "DateTime": "2024-06-15T14:10:00+08:00" },
                    "WeatherElement": {
                        "AirTemperature": 23.5,
                        "WindSpeed": 1.7
                    }
                }
            ]
        }
    }"#;

    const FORECAST_BODY: &str = r#"{
        "success": "true",
        "records": {
            "location": [
                {
                    "locationName": "臺北市",
                    "weatherElement": [
                        {
                            "elementName": "Wx",
                            "time": [
                                { "parameter": { "parameterName": "晴時多雲", "parameterValue": "2" } },
                                { "parameter": { "parameterName": "多雲", "parameterValue": "4" } }
                            ]
                        },
                        {
                            "elementName": "PoP",
                            "time": [
                                { "parameter": { "parameterName": "30", "parameterUnit": "百分比" } }
                            ]
                        },
                        {
                            "elementName": "MinT",
                            "time": [
                                { "parameter": { "parameterName": "22", "parameterUnit": "C" } }
                            ]
                        },
                        {
                            "elementName": "CI",
                            "time": [
                                { "parameter": { "parameterName": "舒適" } }
                            ]
                        }
                    ]
                }
            ]
        }
    }"#;

    #[test]
    fn observation_fields_are_extracted() {
        let observation = parse_observation(OBSERVATION_BODY).unwrap();
        assert_eq!(observation.station_name, "臺北");
        assert_eq!(observation.temperature, 23.5);
        assert_eq!(observation.wind_speed, 1.7);
        assert_eq!(
            observation.observation_time.to_rfc3339(),
            "2024-06-15T06:10:00+00:00"
        );
    }

    #[test]
    fn observation_without_stations_is_an_error() {
        let err = parse_observation(r#"{"records": {"Station": []}}"#).unwrap_err();
        assert!(err.to_string().contains("no station"));
    }

    #[test]
    fn forecast_filters_the_three_needed_elements() {
        let forecast = parse_forecast(FORECAST_BODY).unwrap();
        assert_eq!(forecast.description, "晴時多雲");
        assert_eq!(forecast.weather_code, 2);
        assert_eq!(forecast.rain_possibility, 30.0);
        assert_eq!(forecast.comfortability, "舒適");
    }

    #[test]
    fn forecast_missing_an_element_is_an_error() {
        let body = r#"{
            "records": {
                "location": [
                    {
                        "weatherElement": [
                            {
                                "elementName": "Wx",
                                "time": [
                                    { "parameter": { "parameterName": "晴", "parameterValue": "1" } }
                                ]
                            }
                        ]
                    }
                ]
            }
        }"#;
        let err = parse_forecast(body).unwrap_err();
        assert!(err.to_string().contains("missing element 'PoP'"));
    }

    #[test]
    fn malformed_json_is_reported_with_context() {
        let err = parse_observation("not json").unwrap_err();
        assert!(err.to_string().contains("Failed to parse CWA observation JSON"));
    }

    #[test]
    fn truncate_body_respects_utf8_boundaries() {
        let long = "臺".repeat(200);
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= 203);
    }
}
