//! Display state
//!
//! One `DisplayState` is produced per render tick from the wall clock, the
//! weather cache and the configured location. The composer compares it
//! field by field against the previously rendered state.

use heapless::String;

use crate::clock::CivilTime;
use crate::text::copy_truncated;
use crate::weather::WeatherReport;

/// Maximum location text length in bytes
pub const MAX_LOCATION_LEN: usize = 32;

/// Maximum weather text length in bytes
pub const MAX_WEATHER_LEN: usize = 32;

/// Maximum temperature text length in bytes
pub const MAX_TEMPERATURE_LEN: usize = 8;

/// Weekday labels, indexed from Sunday
pub const WEEKDAY_LABELS: [&str; 7] = ["周日", "周一", "周二", "周三", "周四", "周五", "周六"];

/// Label for a weekday index (0 = Sunday)
///
/// Indices wrap modulo 7, so every value resolves to a label.
pub fn weekday_label(index: u8) -> &'static str {
    WEEKDAY_LABELS[(index % 7) as usize]
}

/// Everything the screen shows for one tick
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayState {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub year: u16,
    pub month: u8,
    pub day: u8,
    /// Day of week, 0 = Sunday
    pub weekday: u8,
    pub location: String<MAX_LOCATION_LEN>,
    pub weather: String<MAX_WEATHER_LEN>,
    pub temperature: String<MAX_TEMPERATURE_LEN>,
}

impl DisplayState {
    /// Assemble a state from its sources
    pub fn from_parts(time: &CivilTime, weather: &WeatherReport, location: &str) -> Self {
        let mut state = Self::default();
        state.set_time(time);
        state.set_weather(weather.text.as_str(), weather.temperature.as_str());
        state.set_location(location);
        state
    }

    /// Replace the time and date fields
    pub fn set_time(&mut self, time: &CivilTime) {
        self.hour = time.hour;
        self.minute = time.minute;
        self.second = time.second;
        self.year = time.year;
        self.month = time.month;
        self.day = time.day;
        self.weekday = time.weekday;
    }

    /// Replace the location text, truncating on a character boundary
    pub fn set_location(&mut self, location: &str) {
        self.location = copy_truncated(location);
    }

    /// Replace the weather and temperature text
    pub fn set_weather(&mut self, weather: &str, temperature: &str) {
        self.weather = copy_truncated(weather);
        self.temperature = copy_truncated(temperature);
    }

    /// Calendar date as a comparable tuple
    pub fn date(&self) -> (u16, u8, u8) {
        (self.year, self.month, self.day)
    }

    /// Human-readable weekday label
    pub fn weekday_label(&self) -> &'static str {
        weekday_label(self.weekday)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_labels() {
        assert_eq!(weekday_label(0), "周日");
        assert_eq!(weekday_label(1), "周一");
        assert_eq!(weekday_label(6), "周六");
    }

    #[test]
    fn test_weekday_always_resolvable() {
        for index in 0..=u8::MAX {
            assert!(WEEKDAY_LABELS.contains(&weekday_label(index)));
        }
    }

    #[test]
    fn test_from_parts() {
        let time = CivilTime {
            year: 2024,
            month: 1,
            day: 1,
            hour: 9,
            minute: 5,
            second: 0,
            weekday: 1,
        };
        let weather = WeatherReport::new("晴", "5");
        let state = DisplayState::from_parts(&time, &weather, "杭州");

        assert_eq!(state.hour, 9);
        assert_eq!(state.date(), (2024, 1, 1));
        assert_eq!(state.weekday_label(), "周一");
        assert_eq!(state.location.as_str(), "杭州");
        assert_eq!(state.weather.as_str(), "晴");
        assert_eq!(state.temperature.as_str(), "5");
    }
}
