//! Bounded text helpers
//!
//! Display strings live in fixed-capacity `heapless::String`s. Copies
//! truncate on a character boundary instead of failing, so a long
//! weather description from the network never splits a glyph.

use heapless::String;

/// Number of glyphs (characters) in a string
///
/// Script glyphs are fixed-width, so layout decisions are made on this
/// count rather than on byte length.
pub fn glyph_count(text: &str) -> usize {
    text.chars().count()
}

/// Copy as many whole characters of `text` as fit into `N` bytes
pub fn copy_truncated<const N: usize>(text: &str) -> String<N> {
    let mut out = String::new();
    for ch in text.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

/// Copy at most `glyphs` characters of `text`
pub fn take_glyphs<const N: usize>(text: &str, glyphs: usize) -> String<N> {
    let mut out = String::new();
    for ch in text.chars().take(glyphs) {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

/// Write formatted output into a bounded string
///
/// Returns an empty string if the formatted output does not fit.
pub fn format_bounded<const N: usize>(args: core::fmt::Arguments<'_>) -> String<N> {
    use core::fmt::Write;

    let mut out = String::new();
    if out.write_fmt(args).is_err() {
        out.clear();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_count_counts_chars() {
        assert_eq!(glyph_count(""), 0);
        assert_eq!(glyph_count("晴"), 1);
        assert_eq!(glyph_count("多云转晴"), 4);
        assert_eq!(glyph_count("N/A"), 3);
    }

    #[test]
    fn test_copy_truncated_keeps_whole_chars() {
        // Each CJK char is three bytes; only two fit in 7 bytes
        let s: String<7> = copy_truncated("杭州市");
        assert_eq!(s.as_str(), "杭州");
    }

    #[test]
    fn test_take_glyphs() {
        let s: String<32> = take_glyphs("雷阵雨伴有冰雹", 3);
        assert_eq!(s.as_str(), "雷阵雨");
    }

    #[test]
    fn test_format_bounded() {
        let s: String<5> = format_bounded(format_args!("{:02}/{:02}", 1, 9));
        assert_eq!(s.as_str(), "01/09");

        let s: String<2> = format_bounded(format_args!("{}", 12345));
        assert!(s.is_empty());
    }
}
