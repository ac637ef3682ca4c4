//! Simple TOML parser for device configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the device configuration. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer, `0x` hex integer, boolean)
//! - [section] headers: `panel`, `clock`, `palette`
//! - Comments (# ...)
//!
//! Unknown keys inside a known section are ignored.

use skyclock_protocol::PanelVariant;

use super::types::DeviceConfig;
use crate::text::copy_truncated;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Panel variant name not recognised
    UnknownVariant,
    /// Line is neither a header nor `key = value`
    Syntax,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Panel,
    Clock,
    Palette,
}

/// Parse TOML configuration into DeviceConfig
///
/// Keys that are absent keep their [`Default`] values.
pub fn parse_config(input: &str) -> Result<DeviceConfig, ConfigError> {
    let mut config = DeviceConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(line[1..line.len() - 1].trim())?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ConfigError::Syntax)?;
        apply(&mut config, section, key, value)?;
    }

    Ok(config)
}

fn parse_section_header(name: &str) -> Result<Section, ConfigError> {
    match name {
        "panel" => Ok(Section::Panel),
        "clock" => Ok(Section::Clock),
        "palette" => Ok(Section::Palette),
        _ => Err(ConfigError::InvalidSection),
    }
}

fn apply(
    config: &mut DeviceConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    match section {
        Section::Root => {}
        Section::Panel => {
            let panel = &mut config.panel;
            match key {
                "variant" => {
                    panel.variant = PanelVariant::from_name(parse_string(value)?)
                        .ok_or(ConfigError::UnknownVariant)?
                }
                "spi_frequency_hz" => panel.spi_frequency_hz = parse_int(value)?,
                "madctl" => panel.madctl = parse_int(value)?,
                "invert_colors" => panel.invert_colors = parse_bool(value)?,
                _ => {}
            }
        }
        Section::Clock => {
            let clock = &mut config.clock;
            match key {
                "utc_offset_s" => clock.utc_offset_s = parse_int(value)?,
                "sync_timeout_s" => clock.sync_timeout_s = parse_int(value)?,
                "fallback_epoch" => clock.fallback_epoch = parse_int(value)?,
                "min_valid_epoch" => clock.min_valid_epoch = parse_int(value)?,
                "weather_interval_s" => clock.weather_interval_s = parse_int(value)?,
                "weather_failure_limit" => clock.weather_failure_limit = parse_int(value)?,
                "render_interval_ms" => clock.render_interval_ms = parse_int(value)?,
                "location" => clock.location = copy_truncated(parse_string(value)?),
                _ => {}
            }
        }
        Section::Palette => {
            let palette = &mut config.palette;
            match key {
                "text" => palette.text = parse_int(value)?,
                "temperature" => palette.temperature = parse_int(value)?,
                "background" => palette.background = parse_int(value)?,
                _ => {}
            }
        }
    }
    Ok(())
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = if let Some(hash_pos) = value.find('#') {
        // Make sure # is not inside a string
        let quote_count = value[..hash_pos].matches('"').count();
        if quote_count % 2 == 0 {
            value[..hash_pos].trim()
        } else {
            value
        }
    } else {
        value
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_string(value: &str) -> Result<&str, ConfigError> {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        Ok(&value[1..value.len() - 1])
    } else {
        Err(ConfigError::InvalidValue)
    }
}

/// Integer in decimal or `0x` hex, underscores allowed
fn parse_int<T: TryFrom<i64>>(value: &str) -> Result<T, ConfigError> {
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };

    let mut parsed: i64 = 0;
    let (radix, digits) = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        Some(hex) => (16, hex),
        None => (10, digits),
    };
    if digits.is_empty() {
        return Err(ConfigError::InvalidValue);
    }
    for ch in digits.chars().filter(|c| *c != '_') {
        let digit = ch.to_digit(radix).ok_or(ConfigError::InvalidValue)?;
        parsed = parsed
            .checked_mul(radix as i64)
            .and_then(|v| v.checked_add(digit as i64))
            .ok_or(ConfigError::InvalidValue)?;
    }
    if negative {
        parsed = -parsed;
    }

    T::try_from(parsed).map_err(|_| ConfigError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidValue),
    }
}
