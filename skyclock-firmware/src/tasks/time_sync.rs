//! Time-sync task
//!
//! Waits for the first epoch from the time service. An epoch below the
//! plausibility threshold is ignored; if nothing usable arrives before the
//! timeout the fallback epoch is applied instead. Either way the clock is
//! usable afterwards and the task exits.

use defmt::*;
use embassy_time::{with_deadline, Duration, Instant};
use skyclock_core::config::ClockConfig;
use skyclock_core::state::LinkEvent;

use crate::channels::{LINK_EVENTS, TIME_SYNC, WALL_CLOCK};

#[embassy_executor::task]
pub async fn time_sync_task(config: &'static ClockConfig) {
    info!("Time sync task started, timeout {}s", config.sync_timeout_s);

    let deadline = Instant::now() + Duration::from_secs(config.sync_timeout_s as u64);

    loop {
        let Ok(epoch) = with_deadline(deadline, TIME_SYNC.wait()).await else {
            warn!(
                "Time sync timed out, using fallback epoch {}",
                config.fallback_epoch
            );
            let uptime_ms = Instant::now().as_millis();
            WALL_CLOCK.lock(|cell| {
                let mut clock = cell.get();
                clock.apply_fallback(config.fallback_epoch, uptime_ms);
                cell.set(clock);
            });
            LINK_EVENTS.send(LinkEvent::SyncTimedOut).await;
            return;
        };

        if epoch < config.min_valid_epoch {
            warn!("Ignoring implausible epoch {}", epoch);
            continue;
        }

        let uptime_ms = Instant::now().as_millis();
        let result = WALL_CLOCK.lock(|cell| {
            let mut clock = cell.get();
            let result = clock.sync(epoch, uptime_ms);
            cell.set(clock);
            result
        });

        match result {
            Ok(()) => {
                info!("Time synced, epoch {}", epoch);
                LINK_EVENTS.send(LinkEvent::TimeSynced).await;
                return;
            }
            Err(e) => warn!("Clock rejected epoch {}: {:?}", epoch, e),
        }
    }
}
