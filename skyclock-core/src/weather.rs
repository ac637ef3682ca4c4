//! Weather cache
//!
//! Holds the last successful weather report. Failed fetches keep the old
//! values on screen; only a run of consecutive failures replaces them with
//! the "unknown" placeholder.

use heapless::String;

use crate::state::display::{MAX_TEMPERATURE_LEN, MAX_WEATHER_LEN};
use crate::text::copy_truncated;

/// Label shown when the weather is unknown
pub const UNKNOWN_WEATHER: &str = "未知";

/// Temperature shown when the weather is unknown
pub const UNKNOWN_TEMPERATURE: &str = "N/A";

/// Consecutive failures tolerated before the placeholder is applied
pub const DEFAULT_FAILURE_LIMIT: u8 = 3;

/// Current conditions as delivered by the weather collaborator
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WeatherReport {
    /// Short description, e.g. "晴"
    pub text: String<MAX_WEATHER_LEN>,
    /// Temperature, e.g. "5"
    pub temperature: String<MAX_TEMPERATURE_LEN>,
}

impl WeatherReport {
    pub fn new(text: &str, temperature: &str) -> Self {
        Self {
            text: copy_truncated(text),
            temperature: copy_truncated(temperature),
        }
    }

    /// The "unknown" placeholder report
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_WEATHER, UNKNOWN_TEMPERATURE)
    }

    /// Check if the text is empty or a lone separator
    pub fn is_placeholder(&self) -> bool {
        is_placeholder_text(self.text.as_str())
    }
}

/// Empty text or a lone `,` means the source had nothing to report
pub fn is_placeholder_text(text: &str) -> bool {
    text.is_empty() || text == ","
}

/// Reasons a weather fetch can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WeatherError {
    /// Request could not be sent or timed out at the transport level
    Network,
    /// Response arrived but could not be parsed
    Parse,
    /// No response within the request window
    Timeout,
}

/// Outcome of folding a fetch result into the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WeatherUpdate {
    /// New values stored
    Updated,
    /// Fetch failed, previous values kept
    Retained {
        /// Failures in a row so far
        failures: u8,
    },
    /// Too many failures in a row, placeholder stored
    PlaceholderApplied,
}

/// Last known weather with a consecutive-failure counter
#[derive(Debug, Clone)]
pub struct WeatherCache {
    current: WeatherReport,
    consecutive_failures: u8,
    failure_limit: u8,
}

impl WeatherCache {
    /// Create an empty cache
    ///
    /// The initial report is empty, which the layout renders as the
    /// placeholder until the first fetch completes.
    pub fn new(failure_limit: u8) -> Self {
        Self {
            current: WeatherReport::default(),
            consecutive_failures: 0,
            failure_limit,
        }
    }

    /// Fold a fetch result into the cache
    pub fn record(&mut self, outcome: Result<WeatherReport, WeatherError>) -> WeatherUpdate {
        match outcome {
            Ok(report) => {
                self.current = report;
                self.consecutive_failures = 0;
                WeatherUpdate::Updated
            }
            Err(_) => {
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                if self.consecutive_failures > self.failure_limit {
                    self.current = WeatherReport::unknown();
                    self.consecutive_failures = 0;
                    WeatherUpdate::PlaceholderApplied
                } else {
                    WeatherUpdate::Retained {
                        failures: self.consecutive_failures,
                    }
                }
            }
        }
    }

    pub fn current(&self) -> &WeatherReport {
        &self.current
    }

    pub fn consecutive_failures(&self) -> u8 {
        self.consecutive_failures
    }
}

impl Default for WeatherCache {
    fn default() -> Self {
        Self::new(DEFAULT_FAILURE_LIMIT)
    }
}
