//! The dual-fetch coordinator: one reading per city, refreshed by joining the
//! observation and forecast calls and publishing the merged result atomically.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

use crate::location::LocationEntry;
use crate::model::WeatherReading;
use crate::provider::WeatherProvider;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("A refresh is already in flight; wait for it to finish")]
pub struct RefreshInFlight;

/// Holds the cached current reading for one resolved location and refreshes
/// it against a [`WeatherProvider`].
///
/// Only one refresh may be in flight at a time; a second call fails with
/// [`RefreshInFlight`] instead of silently racing the first.
#[derive(Debug)]
pub struct WeatherFetcher {
    provider: Box<dyn WeatherProvider>,
    location: &'static LocationEntry,
    reading: Mutex<WeatherReading>,
    in_flight: AtomicBool,
}

impl WeatherFetcher {
    pub fn new(provider: Box<dyn WeatherProvider>, location: &'static LocationEntry) -> Self {
        Self {
            provider,
            location,
            reading: Mutex::new(WeatherReading::placeholder()),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn location(&self) -> &'static LocationEntry {
        self.location
    }

    /// Snapshot of the cached reading, readable at any time.
    pub fn current(&self) -> WeatherReading {
        self.reading.lock().clone()
    }

    /// Run one fetch cycle: flip `is_loading` on, hit both endpoints in
    /// parallel, and publish the merged reading.
    ///
    /// On failure the previous reading is kept and `is_loading` is restored
    /// to `false`, so a failed cycle is recoverable rather than leaving the
    /// UI spinning forever.
    pub async fn refresh(&self) -> anyhow::Result<WeatherReading> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(RefreshInFlight.into());
        }

        // Loading is visible synchronously, before either call resolves.
        self.reading.lock().is_loading = true;

        let outcome = tokio::try_join!(
            self.provider.current(self.location.station_name),
            self.provider.forecast(self.location.location_name),
        );

        // The guard is released only after the reading has settled, so an
        // accepted refresh never observes the previous cycle half-published.
        match outcome {
            Ok((observation, forecast)) => {
                let merged = WeatherReading::merge(observation, forecast);
                *self.reading.lock() = merged.clone();
                self.in_flight.store(false, Ordering::SeqCst);
                Ok(merged)
            }
            Err(err) => {
                self.reading.lock().is_loading = false;
                self.in_flight.store(false, Ordering::SeqCst);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::find_location;
    use crate::provider::{Forecast, Observation};
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Arc;
    use tokio::sync::Semaphore;

    #[derive(Debug)]
    struct StubProvider {
        fail_forecast: bool,
        // Both calls wait for a permit, so tests can hold a cycle open.
        gate: Arc<Semaphore>,
    }

    impl StubProvider {
        fn open() -> Self {
            Self { fail_forecast: false, gate: Arc::new(Semaphore::new(2)) }
        }

        fn gated() -> (Self, Arc<Semaphore>) {
            let gate = Arc::new(Semaphore::new(0));
            (Self { fail_forecast: false, gate: gate.clone() }, gate)
        }
    }

    #[async_trait]
    impl crate::provider::WeatherProvider for StubProvider {
        async fn current(&self, station_name: &str) -> Result<Observation> {
            let _permit = self.gate.acquire().await?;
            Ok(Observation {
                station_name: station_name.to_string(),
                observation_time: Utc::now(),
                temperature: 23.5,
                wind_speed: 1.7,
            })
        }

        async fn forecast(&self, _location_name: &str) -> Result<Forecast> {
            let _permit = self.gate.acquire().await?;
            if self.fail_forecast {
                return Err(anyhow!("forecast endpoint unavailable"));
            }
            Ok(Forecast {
                description: "多雲".to_string(),
                weather_code: 2,
                rain_possibility: 30.0,
                comfortability: "舒適".to_string(),
            })
        }
    }

    fn taipei_fetcher(provider: StubProvider) -> WeatherFetcher {
        let location = find_location("臺北市").expect("臺北市 is in the table");
        WeatherFetcher::new(Box::new(provider), location)
    }

    #[tokio::test]
    async fn refresh_merges_both_halves_into_one_reading() {
        let fetcher = taipei_fetcher(StubProvider::open());

        let reading = fetcher.refresh().await.expect("refresh must succeed");

        assert!(!reading.is_loading);
        assert_eq!(reading.location_name, "臺北");
        assert_eq!(reading.temperature, 23.5);
        assert_eq!(reading.weather_code, 2);
        assert_eq!(
            crate::icon::WeatherKind::classify(reading.weather_code).unwrap(),
            crate::icon::WeatherKind::Cloudy
        );

        // The merged reading is also the new cached one.
        assert_eq!(fetcher.current().temperature, 23.5);
        assert!(!fetcher.current().is_loading);
    }

    #[tokio::test]
    async fn loading_flag_is_set_before_either_call_resolves() {
        let (provider, gate) = StubProvider::gated();
        let fetcher = Arc::new(taipei_fetcher(provider));

        let task = tokio::spawn({
            let fetcher = fetcher.clone();
            async move { fetcher.refresh().await }
        });

        // Both upstream calls are parked on the gate.
        tokio::task::yield_now().await;
        assert!(fetcher.current().is_loading);

        gate.add_permits(2);
        let reading = task.await.expect("task must not panic").expect("refresh");
        assert!(!reading.is_loading);
    }

    #[tokio::test]
    async fn concurrent_refresh_is_rejected() {
        let (provider, gate) = StubProvider::gated();
        let fetcher = Arc::new(taipei_fetcher(provider));

        let task = tokio::spawn({
            let fetcher = fetcher.clone();
            async move { fetcher.refresh().await }
        });
        tokio::task::yield_now().await;

        let err = fetcher.refresh().await.unwrap_err();
        assert!(err.downcast_ref::<RefreshInFlight>().is_some());

        gate.add_permits(2);
        task.await.expect("task must not panic").expect("first refresh still succeeds");

        // Once the first cycle lands, refreshing is allowed again.
        gate.add_permits(2);
        fetcher.refresh().await.expect("second refresh");
    }

    #[tokio::test]
    async fn guard_release_happens_after_the_reading_settles() {
        // Success path: once a new refresh is accepted, the previous cycle's
        // merged reading is already published.
        let fetcher = taipei_fetcher(StubProvider::open());
        fetcher.refresh().await.expect("first refresh");
        assert!(!fetcher.current().is_loading);
        assert_eq!(fetcher.current().temperature, 23.5);

        // Failure path: a fast-failing cycle restores `is_loading` before the
        // guard opens, so the follow-up refresh is accepted, not rejected.
        let failing = StubProvider {
            fail_forecast: true,
            gate: Arc::new(Semaphore::new(4)),
        };
        let fetcher = taipei_fetcher(failing);
        fetcher.refresh().await.unwrap_err();
        assert!(!fetcher.current().is_loading);

        let err = fetcher.refresh().await.unwrap_err();
        assert!(
            err.downcast_ref::<RefreshInFlight>().is_none(),
            "guard must be open again after a settled cycle"
        );
    }

    #[tokio::test]
    async fn failed_refresh_keeps_the_previous_reading_and_stops_loading() {
        let fetcher = taipei_fetcher(StubProvider::open());
        let good = fetcher.refresh().await.expect("first refresh");

        let failing = StubProvider {
            fail_forecast: true,
            gate: Arc::new(Semaphore::new(2)),
        };
        let fetcher = WeatherFetcher {
            provider: Box::new(failing),
            location: fetcher.location,
            reading: Mutex::new(good.clone()),
            in_flight: AtomicBool::new(false),
        };

        let err = fetcher.refresh().await.unwrap_err();
        assert!(err.to_string().contains("forecast endpoint unavailable"));

        let after = fetcher.current();
        assert!(!after.is_loading);
        assert_eq!(after.temperature, good.temperature);
        assert_eq!(after.description, good.description);
    }
}
