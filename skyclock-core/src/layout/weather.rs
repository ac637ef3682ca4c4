//! Weather region layout
//!
//! The weather label is drawn in 16px script glyphs and the temperature in
//! the large mono font. Which arrangement is used depends on how many
//! glyphs the label has.

use heapless::String;

use super::geometry::Origin;
use super::regions::WEATHER;
use crate::state::display::{MAX_TEMPERATURE_LEN, MAX_WEATHER_LEN};
use crate::text::{copy_truncated, glyph_count, take_glyphs};
use crate::weather::{is_placeholder_text, UNKNOWN_TEMPERATURE, UNKNOWN_WEATHER};

/// Script glyph advance in pixels
pub const SCRIPT_ADVANCE: u16 = 16;

/// Labels up to this many glyphs keep the temperature on the same line
pub const INLINE_MAX_GLYPHS: usize = 2;

/// Labels up to this many glyphs are shown whole, temperature below
pub const STACKED_MAX_GLYPHS: usize = 4;

/// Glyphs kept when a label is truncated
///
/// Three 16 px glyphs plus the 18 px ellipsis fit the 68 px weather
/// region; a fourth glyph would push the ellipsis past its right edge.
pub const TRUNCATED_GLYPHS: usize = 3;

/// Marker appended to a truncated label
pub const ELLIPSIS: &str = "...";

/// Gap between an inline label and its temperature
const INLINE_GAP: u16 = 4;

/// Arrangement chosen for the weather region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WeatherStyle {
    /// Temperature to the right of the label
    Inline,
    /// Temperature below the label
    Stacked,
    /// Label cut short with an ellipsis, temperature below
    Truncated,
}

/// Resolved weather layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherPlan {
    pub style: WeatherStyle,
    pub label: String<MAX_WEATHER_LEN>,
    pub label_at: Origin,
    /// Set when the label was truncated
    pub ellipsis_at: Option<Origin>,
    pub temperature: String<MAX_TEMPERATURE_LEN>,
    pub temperature_at: Origin,
}

/// Plan the weather region for the given texts
///
/// Empty or lone-separator weather text is replaced by the "unknown"
/// label and "N/A" before the arrangement is chosen.
pub fn plan_weather(weather: &str, temperature: &str) -> WeatherPlan {
    let (weather, temperature) = if is_placeholder_text(weather) {
        (UNKNOWN_WEATHER, UNKNOWN_TEMPERATURE)
    } else {
        (weather, temperature)
    };

    let origin = WEATHER.origin();
    let below = Origin::new(origin.x + SCRIPT_ADVANCE, origin.y + SCRIPT_ADVANCE + 4);
    let glyphs = glyph_count(weather);

    if glyphs <= INLINE_MAX_GLYPHS {
        let label_width = glyphs as u16 * SCRIPT_ADVANCE;
        WeatherPlan {
            style: WeatherStyle::Inline,
            label: copy_truncated(weather),
            label_at: origin,
            ellipsis_at: None,
            temperature: copy_truncated(temperature),
            temperature_at: Origin::new(origin.x + label_width + INLINE_GAP, origin.y + 1),
        }
    } else if glyphs <= STACKED_MAX_GLYPHS {
        WeatherPlan {
            style: WeatherStyle::Stacked,
            label: copy_truncated(weather),
            label_at: origin,
            ellipsis_at: None,
            temperature: copy_truncated(temperature),
            temperature_at: below,
        }
    } else {
        let kept = TRUNCATED_GLYPHS as u16 * SCRIPT_ADVANCE;
        WeatherPlan {
            style: WeatherStyle::Truncated,
            label: take_glyphs(weather, TRUNCATED_GLYPHS),
            label_at: origin,
            ellipsis_at: Some(Origin::new(origin.x + kept, origin.y + 3)),
            temperature: copy_truncated(temperature),
            temperature_at: below,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_label_inline() {
        let plan = plan_weather("晴", "5");
        assert_eq!(plan.style, WeatherStyle::Inline);
        assert_eq!(plan.label.as_str(), "晴");
        assert_eq!(plan.temperature_at, Origin::new(60 + 16 + 4, 5));
        assert!(plan.temperature_at.x > plan.label_at.x);
        assert_eq!(plan.temperature_at.y, plan.label_at.y + 1);
    }

    #[test]
    fn test_two_glyphs_inline() {
        let plan = plan_weather("多云", "12");
        assert_eq!(plan.style, WeatherStyle::Inline);
        assert_eq!(plan.temperature_at.x, 60 + 32 + 4);
    }

    #[test]
    fn test_medium_label_stacked() {
        for text in ["小雨夹", "多云转晴"] {
            let plan = plan_weather(text, "8");
            assert_eq!(plan.style, WeatherStyle::Stacked);
            assert_eq!(plan.label.as_str(), text);
            assert!(plan.temperature_at.y > plan.label_at.y + 15);
            assert_eq!(plan.ellipsis_at, None);
        }
    }

    #[test]
    fn test_long_label_truncated() {
        let plan = plan_weather("雷阵雨伴有冰雹", "-3");
        assert_eq!(plan.style, WeatherStyle::Truncated);
        assert_eq!(plan.label.as_str(), "雷阵雨");
        assert_eq!(plan.ellipsis_at, Some(Origin::new(60 + 48, 7)));
        // 6 px per ellipsis dot in the Standard font
        let ellipsis_end = 60 + 48 + 6 * ELLIPSIS.len() as u16;
        assert!(ellipsis_end <= WEATHER.right());
        assert!(plan.temperature_at.y > plan.label_at.y + 15);
        assert_eq!(plan.temperature.as_str(), "-3");
    }

    #[test]
    fn test_placeholder_substitution() {
        for text in ["", ","] {
            let plan = plan_weather(text, "17");
            assert_eq!(plan.label.as_str(), "未知");
            assert_eq!(plan.temperature.as_str(), "N/A");
            assert_eq!(plan.style, WeatherStyle::Inline);
        }
    }
}
