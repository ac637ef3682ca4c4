//! 16x16 script glyphs
//!
//! Glyphs are 1bpp, row-major, most significant bit first: two bytes per
//! row, 32 bytes per glyph. Characters missing from the table are drawn
//! as a hollow box so a gap in the table is visible on screen.

use embedded_graphics::pixelcolor::Rgb565;
use skyclock_core::layout::{Origin, Rect};
use skyclock_core::traits::{Canvas, CanvasError};

/// Glyph cell edge in pixels
pub const GLYPH_SIZE: u16 = 16;

/// Bitmap bytes per glyph
pub const GLYPH_BYTES: usize = 32;

/// One script character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptGlyph {
    pub ch: char,
    pub bitmap: [u8; GLYPH_BYTES],
}

impl ScriptGlyph {
    pub const fn new(ch: char, bitmap: [u8; GLYPH_BYTES]) -> Self {
        Self { ch, bitmap }
    }

    /// Build a glyph from 16 text rows, `#` marking a lit pixel
    ///
    /// Rows shorter than 16 characters are padded with unlit pixels.
    pub const fn from_rows(ch: char, rows: [&str; 16]) -> Self {
        let mut bitmap = [0u8; GLYPH_BYTES];
        let mut y = 0;
        while y < rows.len() {
            let row = rows[y].as_bytes();
            let mut x = 0;
            while x < 16 && x < row.len() {
                if row[x] == b'#' {
                    bitmap[y * 2 + x / 8] |= 0x80u8 >> (x % 8);
                }
                x += 1;
            }
            y += 1;
        }
        Self { ch, bitmap }
    }

    /// Row `y` as a 16-bit mask, leftmost pixel in bit 15
    pub fn row_bits(&self, y: u16) -> u16 {
        let i = y as usize * 2;
        u16::from_be_bytes([self.bitmap[i], self.bitmap[i + 1]])
    }

    pub fn is_set(&self, x: u16, y: u16) -> bool {
        x < GLYPH_SIZE && y < GLYPH_SIZE && self.row_bits(y) & (0x8000u16 >> x) != 0
    }
}

/// Lookup table of script glyphs
#[derive(Debug, Clone, Copy)]
pub struct GlyphTable {
    glyphs: &'static [ScriptGlyph],
}

impl GlyphTable {
    pub const fn new(glyphs: &'static [ScriptGlyph]) -> Self {
        Self { glyphs }
    }

    pub const fn empty() -> Self {
        Self { glyphs: &[] }
    }

    pub fn lookup(&self, ch: char) -> Option<&'static ScriptGlyph> {
        self.glyphs.iter().find(|g| g.ch == ch)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// Fill the part of `rect` inside `clip`
pub(crate) fn fill_clipped<C: Canvas + ?Sized>(
    canvas: &C,
    rect: Rect,
    clip: Rect,
    color: Rgb565,
) -> Result<(), CanvasError> {
    match rect.intersection(&clip) {
        Some(visible) => canvas.fill_rect(visible, color),
        None => Ok(()),
    }
}

/// Draw a glyph's lit pixels, one `fill_rect` per horizontal run
pub fn draw_glyph<C: Canvas + ?Sized>(
    canvas: &C,
    origin: Origin,
    glyph: &ScriptGlyph,
    color: Rgb565,
    clip: Rect,
) -> Result<(), CanvasError> {
    for row in 0..GLYPH_SIZE {
        let bits = glyph.row_bits(row);
        let mut col = 0;
        while col < GLYPH_SIZE {
            if bits & (0x8000u16 >> col) == 0 {
                col += 1;
                continue;
            }
            let start = col;
            while col < GLYPH_SIZE && bits & (0x8000u16 >> col) != 0 {
                col += 1;
            }
            let run = Rect::new(origin.x + start, origin.y + row, col - start, 1);
            fill_clipped(canvas, run, clip, color)?;
        }
    }
    Ok(())
}

/// Hollow box standing in for a missing glyph
pub fn draw_missing<C: Canvas + ?Sized>(
    canvas: &C,
    origin: Origin,
    color: Rgb565,
    clip: Rect,
) -> Result<(), CanvasError> {
    let (x, y) = (origin.x + 1, origin.y + 1);
    let edge = GLYPH_SIZE - 2;
    let sides = [
        Rect::new(x, y, edge, 1),
        Rect::new(x, y + edge - 1, edge, 1),
        Rect::new(x, y + 1, 1, edge - 2),
        Rect::new(x + edge - 1, y + 1, 1, edge - 2),
    ];
    for side in sides {
        fill_clipped(canvas, side, clip, color)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORNER: ScriptGlyph = ScriptGlyph::from_rows(
        '角',
        [
            "################",
            "#",
            "#",
            "#",
            "#",
            "#",
            "#",
            "#",
            "#",
            "#",
            "#",
            "#",
            "#",
            "#",
            "#",
            "#......#.......#",
        ],
    );

    #[test]
    fn test_from_rows_msb_first() {
        assert_eq!(CORNER.bitmap[0], 0xFF);
        assert_eq!(CORNER.bitmap[1], 0xFF);
        assert_eq!(CORNER.bitmap[2], 0x80);
        assert_eq!(CORNER.bitmap[3], 0x00);
        assert_eq!(CORNER.row_bits(15), 0b1000_0001_0000_0001);
        assert!(CORNER.is_set(0, 5));
        assert!(CORNER.is_set(7, 15));
        assert!(!CORNER.is_set(1, 5));
        assert!(!CORNER.is_set(16, 0));
    }

    #[test]
    fn test_table_lookup() {
        static GLYPHS: [ScriptGlyph; 1] = [CORNER];
        let table = GlyphTable::new(&GLYPHS);
        assert_eq!(table.lookup('角').map(|g| g.ch), Some('角'));
        assert!(table.lookup('晴').is_none());
        assert!(GlyphTable::empty().is_empty());
    }
}
