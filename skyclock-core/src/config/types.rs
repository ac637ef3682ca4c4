//! Configuration type definitions
//!
//! These types represent the device configuration. The firmware embeds a
//! TOML file and parses it at boot; any missing key keeps its default.

use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use heapless::String;
use skyclock_protocol::command::madctl;
use skyclock_protocol::{InitOptions, PanelGeometry, PanelVariant, DEFAULT_SPI_FREQUENCY_HZ};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::clock::{DEFAULT_EPOCH, DEFAULT_UTC_OFFSET_S, MIN_VALID_EPOCH};
use crate::state::display::MAX_LOCATION_LEN;
use crate::weather::DEFAULT_FAILURE_LIMIT;

/// Default location label
pub const DEFAULT_LOCATION: &str = "杭州";

/// Panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    /// Manufacturing variant (address offset)
    pub variant: PanelVariant,
    /// SPI clock in Hz
    pub spi_frequency_hz: u32,
    /// MADCTL orientation byte
    pub madctl: u8,
    /// Invert colours
    pub invert_colors: bool,
}

impl PanelConfig {
    pub fn geometry(&self) -> PanelGeometry {
        PanelGeometry::new(self.variant)
    }

    pub fn init_options(&self) -> InitOptions {
        InitOptions {
            madctl: self.madctl,
            inverted: self.invert_colors,
        }
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            variant: PanelVariant::Green144,
            spi_frequency_hz: DEFAULT_SPI_FREQUENCY_HZ,
            madctl: madctl::DEFAULT,
            invert_colors: false,
        }
    }
}

/// Clock, time-sync and weather timing configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockConfig {
    /// Offset from UTC in seconds
    pub utc_offset_s: i32,
    /// How long to wait for the first time sync
    pub sync_timeout_s: u32,
    /// Epoch applied when sync times out
    pub fallback_epoch: i64,
    /// Epochs below this are treated as unset
    pub min_valid_epoch: i64,
    /// Weather refresh interval
    pub weather_interval_s: u32,
    /// Consecutive weather failures tolerated before the placeholder
    pub weather_failure_limit: u8,
    /// Render tick period
    pub render_interval_ms: u32,
    /// Location label shown top-left
    pub location: String<MAX_LOCATION_LEN>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        let mut location = String::new();
        let _ = location.push_str(DEFAULT_LOCATION);
        Self {
            utc_offset_s: DEFAULT_UTC_OFFSET_S,
            sync_timeout_s: 60,
            fallback_epoch: DEFAULT_EPOCH,
            min_valid_epoch: MIN_VALID_EPOCH,
            weather_interval_s: 300,
            weather_failure_limit: DEFAULT_FAILURE_LIMIT,
            render_interval_ms: 100,
            location,
        }
    }
}

/// Colours as raw RGB565 values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Palette {
    /// Clock, date, location and weather text
    pub text: u16,
    /// Temperature text
    pub temperature: u16,
    /// Solid background fill, also the reference for capture checks
    pub background: u16,
}

impl Palette {
    pub fn text_color(&self) -> Rgb565 {
        rgb565(self.text)
    }

    pub fn temperature_color(&self) -> Rgb565 {
        rgb565(self.temperature)
    }

    pub fn background_color(&self) -> Rgb565 {
        rgb565(self.background)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            text: 0xFFFF,        // white
            temperature: 0x07FF, // cyan
            background: 0x0000,  // black
        }
    }
}

/// Convert a raw RGB565 value
pub fn rgb565(raw: u16) -> Rgb565 {
    Rgb565::from(RawU16::new(raw))
}

/// Complete device configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceConfig {
    pub panel: PanelConfig,
    pub clock: ClockConfig,
    pub palette: Palette,
}
