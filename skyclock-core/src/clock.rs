//! Wall clock
//!
//! The MCU has no battery-backed RTC. The wall clock is an epoch captured
//! at a known uptime; the current time is that epoch plus elapsed uptime,
//! shifted into the local timezone.

use chrono::{DateTime, Datelike, Timelike};

/// Fallback epoch used when time sync times out (2024-01-01 00:00:00 UTC)
pub const DEFAULT_EPOCH: i64 = 1_704_067_200;

/// Epochs before this (2021-01-01 00:00:00 UTC) are treated as unset
pub const MIN_VALID_EPOCH: i64 = 1_609_459_200;

/// China Standard Time, UTC+8
pub const DEFAULT_UTC_OFFSET_S: i32 = 8 * 3600;

/// Local calendar time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CivilTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Day of week, 0 = Sunday
    pub weekday: u8,
}

impl CivilTime {
    /// Midnight, 2024-01-01, a Monday
    pub const FALLBACK: Self = Self {
        year: 2024,
        month: 1,
        day: 1,
        hour: 0,
        minute: 0,
        second: 0,
        weekday: 1,
    };

    /// Convert a Unix epoch to local time
    pub fn from_epoch(epoch: i64, utc_offset_s: i32) -> Self {
        let local = epoch.saturating_add(utc_offset_s as i64);
        match DateTime::from_timestamp(local, 0) {
            Some(dt) => Self {
                year: dt.year().clamp(0, u16::MAX as i32) as u16,
                month: dt.month() as u8,
                day: dt.day() as u8,
                hour: dt.hour() as u8,
                minute: dt.minute() as u8,
                second: dt.second() as u8,
                weekday: dt.weekday().num_days_from_sunday() as u8,
            },
            None => Self::FALLBACK,
        }
    }
}

/// Where the current epoch came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeSource {
    /// Never set; reads fall back to the default epoch
    Unset,
    /// Sync timed out, default epoch applied
    Fallback,
    /// Set from the network time service
    Synced,
}

/// Clock errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// Epoch predates the plausibility threshold
    Implausible,
}

/// Epoch anchored to an uptime reading
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallClock {
    anchor_epoch: i64,
    anchor_uptime_ms: u64,
    utc_offset_s: i32,
    source: TimeSource,
}

impl WallClock {
    pub const fn new(utc_offset_s: i32) -> Self {
        Self {
            anchor_epoch: 0,
            anchor_uptime_ms: 0,
            utc_offset_s,
            source: TimeSource::Unset,
        }
    }

    /// Set the clock from the network
    ///
    /// Rejects epochs below [`MIN_VALID_EPOCH`] so a zeroed SNTP reply cannot
    /// wind the clock back to 1970.
    pub fn sync(&mut self, epoch: i64, uptime_ms: u64) -> Result<(), ClockError> {
        if epoch < MIN_VALID_EPOCH {
            return Err(ClockError::Implausible);
        }
        self.anchor(epoch, uptime_ms, TimeSource::Synced);
        Ok(())
    }

    /// Apply the fallback epoch after a sync timeout
    pub fn apply_fallback(&mut self, epoch: i64, uptime_ms: u64) {
        self.anchor(epoch, uptime_ms, TimeSource::Fallback);
    }

    fn anchor(&mut self, epoch: i64, uptime_ms: u64, source: TimeSource) {
        self.anchor_epoch = epoch;
        self.anchor_uptime_ms = uptime_ms;
        self.source = source;
    }

    pub fn source(&self) -> TimeSource {
        self.source
    }

    pub fn is_synced(&self) -> bool {
        self.source == TimeSource::Synced
    }

    /// Unix epoch at the given uptime
    ///
    /// An unset or implausible clock reads as [`DEFAULT_EPOCH`] plus uptime,
    /// so the display still ticks before the first sync.
    pub fn epoch_at(&self, uptime_ms: u64) -> i64 {
        let base = if self.anchor_epoch < MIN_VALID_EPOCH {
            DEFAULT_EPOCH
        } else {
            self.anchor_epoch
        };
        let elapsed_s = uptime_ms.saturating_sub(self.anchor_uptime_ms) / 1000;
        base.saturating_add(elapsed_s as i64)
    }

    /// Local time at the given uptime
    pub fn now(&self, uptime_ms: u64) -> CivilTime {
        CivilTime::from_epoch(self.epoch_at(uptime_ms), self.utc_offset_s)
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new(DEFAULT_UTC_OFFSET_S)
    }
}
