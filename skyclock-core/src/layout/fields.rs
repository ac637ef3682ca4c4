//! Clock and date field formatting

use heapless::String;

use super::geometry::Origin;
use super::regions::{DATE_TEXT, SECOND, WEEKDAY_GAP};
use crate::text::format_bounded;

/// Width reserved for a colon-prefixed seconds field
pub const SECONDS_FIELD_WIDTH: u16 = 20;

/// Zero-padded two-digit field ("09")
pub fn two_digits(value: u8) -> String<2> {
    format_bounded(format_args!("{:02}", value % 100))
}

/// Seconds text and where it goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondsField {
    pub origin: Origin,
    pub text: String<3>,
}

/// Lay out the seconds field at column `x`
///
/// Drawn as `:SS` when it fits; if `x + 20` would reach the right edge,
/// the colon is dropped and only the digits are drawn.
pub fn seconds_field(x: u16, y: u16, second: u8, panel_width: u16) -> SecondsField {
    let digits = two_digits(second);
    let text = if x.saturating_add(SECONDS_FIELD_WIDTH) < panel_width {
        format_bounded(format_args!(":{}", digits))
    } else {
        format_bounded(format_args!("{}", digits))
    };
    SecondsField {
        origin: Origin::new(x, y),
        text,
    }
}

/// Seconds field at its fixed region
pub fn seconds_at_region(second: u8, panel_width: u16) -> SecondsField {
    seconds_field(SECOND.x, SECOND.y, second, panel_width)
}

/// Date text and the weekday anchor to its right
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateField {
    pub origin: Origin,
    pub text: String<5>,
    pub weekday_at: Origin,
}

/// Lay out the `MM/DD` date, given the pixel width of one date character
pub fn date_field(month: u8, day: u8, char_width: u16) -> DateField {
    let text: String<5> = format_bounded(format_args!("{:02}/{:02}", month % 100, day % 100));
    let text_width = text.len() as u16 * char_width;
    DateField {
        origin: DATE_TEXT,
        weekday_at: Origin::new(DATE_TEXT.x + text_width + WEEKDAY_GAP, DATE_TEXT.y - 2),
        text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_digits() {
        assert_eq!(two_digits(0).as_str(), "00");
        assert_eq!(two_digits(9).as_str(), "09");
        assert_eq!(two_digits(59).as_str(), "59");
    }

    #[test]
    fn test_seconds_with_colon() {
        let f = seconds_field(104, 83, 7, 128);
        assert_eq!(f.text.as_str(), ":07");
        assert_eq!(f.origin, Origin::new(104, 83));
    }

    #[test]
    fn test_seconds_drop_colon_at_edge() {
        // 108 + 20 == 128 is not strictly inside
        assert_eq!(seconds_field(108, 0, 42, 128).text.as_str(), "42");
        assert_eq!(seconds_field(120, 0, 5, 128).text.as_str(), "05");
        assert_eq!(seconds_field(107, 0, 5, 128).text.as_str(), ":05");
    }

    #[test]
    fn test_fixed_seconds_region_uses_colon() {
        assert_eq!(seconds_at_region(1, 128).text.as_str(), ":01");
    }

    #[test]
    fn test_date_field() {
        let f = date_field(1, 1, 6);
        assert_eq!(f.text.as_str(), "01/01");
        assert_eq!(f.origin, DATE_TEXT);
        assert_eq!(f.weekday_at.x, DATE_TEXT.x + 30 + WEEKDAY_GAP);
        assert_eq!(f.weekday_at.y, DATE_TEXT.y - 2);
    }
}
