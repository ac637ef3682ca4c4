//! Text rendering
//!
//! Every draw call names its font and colour; there is no "current font"
//! state shared between calls.

use embedded_graphics::pixelcolor::Rgb565;

use super::canvas::{Canvas, CanvasError};
use crate::layout::{Origin, Rect};

/// Font roles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    /// Small ASCII (seconds, date, ellipsis)
    Standard,
    /// Medium ASCII (temperature)
    Large,
    /// Clock digits
    XLarge,
    /// 16x16 lookup-table glyphs (location, weather, weekday)
    Script,
}

impl Font {
    /// Character cell size in pixels (width, height)
    pub const fn cell_size(self) -> (u16, u16) {
        match self {
            Font::Standard => (6, 13),
            Font::Large => (9, 15),
            Font::XLarge => (20, 40),
            Font::Script => (16, 16),
        }
    }
}

/// Font and colour for one draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub font: Font,
    pub color: Rgb565,
}

impl TextStyle {
    pub const fn new(font: Font, color: Rgb565) -> Self {
        Self { font, color }
    }
}

/// Glyph rasterizer
///
/// Only foreground pixels are drawn; whatever is under the text shows
/// through.
pub trait TextRenderer {
    /// Draw `text` with its top-left corner at `origin`, clipped to `clip`
    ///
    /// Returns the horizontal advance in pixels.
    fn draw_text<C: Canvas + ?Sized>(
        &self,
        canvas: &C,
        origin: Origin,
        text: &str,
        style: TextStyle,
        clip: Rect,
    ) -> Result<u16, CanvasError>;

    /// Advance width of `text` in `font`
    fn text_width(&self, text: &str, font: Font) -> u16 {
        let (w, _) = font.cell_size();
        text.chars().count() as u16 * w
    }
}
