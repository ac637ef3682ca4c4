//! Weather task
//!
//! Requests a fetch every weather interval while the link is up and folds
//! the result into the shared [`WeatherCache`].

use defmt::*;
use embassy_time::{with_timeout, Duration, Ticker};
use skyclock_core::config::ClockConfig;
use skyclock_core::weather::{WeatherCache, WeatherError, WeatherUpdate};

use crate::channels::{link_state, WEATHER, WEATHER_REPORT, WEATHER_REQUEST};

/// How long the weather client gets to answer a request
const REPORT_TIMEOUT: Duration = Duration::from_secs(10);

#[embassy_executor::task]
pub async fn weather_task(config: &'static ClockConfig) {
    info!(
        "Weather task started, interval {}s, failure limit {}",
        config.weather_interval_s, config.weather_failure_limit
    );

    WEATHER.lock(|cache| {
        *cache.borrow_mut() = Some(WeatherCache::new(config.weather_failure_limit));
    });

    let mut ticker = Ticker::every(Duration::from_secs(config.weather_interval_s as u64));

    loop {
        if link_state().is_online() {
            fetch().await;
        } else {
            debug!("Weather: link down, skipping fetch");
        }
        ticker.next().await;
    }
}

async fn fetch() {
    WEATHER_REPORT.reset();
    WEATHER_REQUEST.signal(());

    let outcome = match with_timeout(REPORT_TIMEOUT, WEATHER_REPORT.wait()).await {
        Ok(outcome) => outcome,
        Err(_) => Err(WeatherError::Timeout),
    };
    if let Err(e) = outcome {
        warn!("Weather fetch failed: {:?}", e);
    }

    let update = WEATHER.lock(|cache| cache.borrow_mut().as_mut().map(|c| c.record(outcome)));
    match update {
        Some(WeatherUpdate::Updated) => info!("Weather updated"),
        Some(WeatherUpdate::Retained { failures }) => {
            warn!("Keeping last weather after {} failures", failures)
        }
        Some(WeatherUpdate::PlaceholderApplied) => warn!("Weather unavailable, showing placeholder"),
        None => error!("Weather cache not initialized"),
    }
}
