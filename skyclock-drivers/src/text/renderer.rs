//! Font set used by the composer
//!
//! | Font       | Source                | Cell   |
//! |------------|-----------------------|--------|
//! | `Standard` | `FONT_6X13`           | 6x13   |
//! | `Large`    | `FONT_9X15`           | 9x15   |
//! | `XLarge`   | `FONT_10X20` at 2x    | 20x40  |
//! | `Script`   | [`GlyphTable`]        | 16x16  |

use embedded_graphics::geometry::Point;
use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X13, FONT_8X13, FONT_9X15};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::Drawable;
use skyclock_core::layout::{Origin, Rect};
use skyclock_core::traits::{Canvas, CanvasError, Font, TextRenderer, TextStyle};

use super::script::{draw_glyph, draw_missing, GlyphTable, GLYPH_SIZE};
use super::target::CanvasTarget;
use crate::fmt::debug;

/// Scale applied to `FONT_10X20` for clock digits
const XLARGE_SCALE: u16 = 2;

/// Offset of an ASCII character inside a 16x16 script cell
const ASCII_INSET: (u16, u16) = (4, 2);

/// Mono fonts plus the script glyph table
#[derive(Debug, Clone, Copy)]
pub struct FontSet {
    script: GlyphTable,
}

impl FontSet {
    pub const fn new(script: GlyphTable) -> Self {
        Self { script }
    }

    fn draw_script<C: Canvas + ?Sized>(
        &self,
        canvas: &C,
        origin: Origin,
        text: &str,
        color: Rgb565,
        clip: Rect,
    ) -> Result<u16, CanvasError> {
        let mut x = origin.x;
        for ch in text.chars() {
            let cell = Origin::new(x, origin.y);
            if ch.is_ascii() {
                let mut buf = [0u8; 4];
                let inset = Origin::new(cell.x + ASCII_INSET.0, cell.y + ASCII_INSET.1);
                draw_mono(canvas, inset, ch.encode_utf8(&mut buf), &FONT_8X13, 1, color, clip)?;
            } else if let Some(glyph) = self.script.lookup(ch) {
                draw_glyph(canvas, cell, glyph, color, clip)?;
            } else {
                debug!("text: no script glyph for {}", ch as u32);
                draw_missing(canvas, cell, color, clip)?;
            }
            x = x.saturating_add(GLYPH_SIZE);
        }
        Ok(x - origin.x)
    }
}

fn draw_mono<C: Canvas + ?Sized>(
    canvas: &C,
    origin: Origin,
    text: &str,
    font: &MonoFont<'_>,
    scale: u16,
    color: Rgb565,
    clip: Rect,
) -> Result<u16, CanvasError> {
    let mut target = CanvasTarget::scaled(canvas, origin, clip, scale);
    let style = MonoTextStyle::new(font, color);
    let next = Text::with_baseline(text, Point::zero(), style, Baseline::Top).draw(&mut target)?;
    let advance = u16::try_from(next.x.max(0)).unwrap_or(u16::MAX);
    Ok(advance.saturating_mul(scale))
}

impl TextRenderer for FontSet {
    fn draw_text<C: Canvas + ?Sized>(
        &self,
        canvas: &C,
        origin: Origin,
        text: &str,
        style: TextStyle,
        clip: Rect,
    ) -> Result<u16, CanvasError> {
        if text.is_empty() {
            debug!("text: empty string, nothing drawn");
            return Ok(0);
        }
        let Some(clip) = clip.intersection(&canvas.bounds()) else {
            return Ok(self.text_width(text, style.font));
        };

        match style.font {
            Font::Standard => draw_mono(canvas, origin, text, &FONT_6X13, 1, style.color, clip),
            Font::Large => draw_mono(canvas, origin, text, &FONT_9X15, 1, style.color, clip),
            Font::XLarge => draw_mono(
                canvas,
                origin,
                text,
                &FONT_10X20,
                XLARGE_SCALE,
                style.color,
                clip,
            ),
            Font::Script => self.draw_script(canvas, origin, text, style.color, clip),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::ScriptGlyph;
    use core::cell::RefCell;
    use embedded_graphics::pixelcolor::RgbColor;
    use embedded_graphics::prelude::Primitive;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
    use embedded_graphics::geometry::Size;
    use proptest::prelude::*;
    use std::vec::Vec;

    /// 128x128 framebuffer that records every fill
    struct MemCanvas {
        pixels: RefCell<Vec<Rgb565>>,
        fills: RefCell<Vec<Rect>>,
    }

    impl MemCanvas {
        fn new(background: Rgb565) -> Self {
            Self {
                pixels: RefCell::new(std::vec![background; 128 * 128]),
                fills: RefCell::new(Vec::new()),
            }
        }

        fn at(&self, x: u16, y: u16) -> Rgb565 {
            self.pixels.borrow()[y as usize * 128 + x as usize]
        }

        fn count(&self, color: Rgb565) -> usize {
            self.pixels.borrow().iter().filter(|p| **p == color).count()
        }

        fn fills(&self) -> Vec<Rect> {
            self.fills.borrow().clone()
        }
    }

    impl Canvas for MemCanvas {
        fn bounds(&self) -> Rect {
            Rect::new(0, 0, 128, 128)
        }

        fn draw_pixel(&self, x: u16, y: u16, color: Rgb565) -> Result<(), CanvasError> {
            self.fill_rect(Rect::new(x, y, 1, 1), color)
        }

        fn fill_rect(&self, rect: Rect, color: Rgb565) -> Result<(), CanvasError> {
            if !self.bounds().contains_rect(&rect) {
                return Err(CanvasError::OutOfBounds);
            }
            self.fills.borrow_mut().push(rect);
            let mut pixels = self.pixels.borrow_mut();
            for y in rect.y..rect.bottom() {
                for x in rect.x..rect.right() {
                    pixels[y as usize * 128 + x as usize] = color;
                }
            }
            Ok(())
        }

        fn draw_image(&self, _rect: Rect, _pixels: &[Rgb565]) -> Result<(), CanvasError> {
            Ok(())
        }

        fn read_region(&self, _rect: Rect, _out: &mut [Rgb565]) -> Result<(), CanvasError> {
            Ok(())
        }
    }

    static GLYPHS: [ScriptGlyph; 1] = [ScriptGlyph::from_rows(
        '晴',
        [
            "################",
            "#", "#", "#", "#", "#", "#", "#", "#", "#", "#", "#", "#", "#", "#", "#",
        ],
    )];

    fn fonts() -> FontSet {
        FontSet::new(GlyphTable::new(&GLYPHS))
    }

    fn style(font: Font) -> TextStyle {
        TextStyle::new(font, Rgb565::WHITE)
    }

    #[test]
    fn test_empty_text_draws_nothing() {
        let canvas = MemCanvas::new(Rgb565::BLACK);
        let advance = fonts()
            .draw_text(&canvas, Origin::new(0, 0), "", style(Font::Standard), canvas.bounds())
            .unwrap();
        assert_eq!(advance, 0);
        assert!(canvas.fills().is_empty());
    }

    #[test]
    fn test_standard_advance_and_clip() {
        let canvas = MemCanvas::new(Rgb565::BLACK);
        let clip = Rect::new(104, 83, 24, 13);
        let advance = fonts()
            .draw_text(&canvas, Origin::new(104, 83), ":07", style(Font::Standard), clip)
            .unwrap();

        assert_eq!(advance, 18);
        assert!(!canvas.fills().is_empty());
        assert!(canvas.fills().iter().all(|r| clip.contains_rect(r)));
    }

    #[test]
    fn test_xlarge_is_double_scaled() {
        let canvas = MemCanvas::new(Rgb565::BLACK);
        let advance = fonts()
            .draw_text(&canvas, Origin::new(4, 56), "8", style(Font::XLarge), canvas.bounds())
            .unwrap();

        assert_eq!(advance, 20);
        let fills = canvas.fills();
        assert!(!fills.is_empty());
        assert!(fills.iter().all(|r| r.height == 2 && r.width % 2 == 0));
        assert!(fills.iter().all(|r| Rect::new(4, 56, 20, 40).contains_rect(r)));
    }

    #[test]
    fn test_xlarge_clipped_to_region() {
        let canvas = MemCanvas::new(Rgb565::BLACK);
        let region = Rect::new(4, 56, 20, 40);
        fonts()
            .draw_text(&canvas, Origin::new(4, 56), "88", style(Font::XLarge), region)
            .unwrap();

        assert!(canvas.fills().iter().all(|r| r.right() <= 24));
    }

    #[test]
    fn test_transparent_background() {
        let blue = Rgb565::BLUE;
        let canvas = MemCanvas::new(blue);
        fonts()
            .draw_text(&canvas, Origin::new(0, 0), "1", style(Font::Large), canvas.bounds())
            .unwrap();

        let white = canvas.count(Rgb565::WHITE);
        assert!(white > 0);
        assert_eq!(white + canvas.count(blue), 128 * 128);
    }

    #[test]
    fn test_script_glyph_runs() {
        let canvas = MemCanvas::new(Rgb565::BLACK);
        let advance = fonts()
            .draw_text(&canvas, Origin::new(60, 4), "晴", style(Font::Script), canvas.bounds())
            .unwrap();

        assert_eq!(advance, 16);
        // Top row is one run, the fifteen rows below one pixel each
        assert_eq!(canvas.fills().len(), 16);
        assert_eq!(canvas.fills()[0], Rect::new(60, 4, 16, 1));
        assert_eq!(canvas.count(Rgb565::WHITE), 16 + 15);
    }

    #[test]
    fn test_missing_glyph_is_hollow_box() {
        let canvas = MemCanvas::new(Rgb565::BLACK);
        fonts()
            .draw_text(&canvas, Origin::new(0, 0), "雪", style(Font::Script), canvas.bounds())
            .unwrap();

        assert_eq!(canvas.fills().len(), 4);
        assert_eq!(canvas.at(1, 1), Rgb565::WHITE);
        assert_eq!(canvas.at(14, 14), Rgb565::WHITE);
        assert_eq!(canvas.at(8, 8), Rgb565::BLACK);
        assert_eq!(canvas.at(0, 0), Rgb565::BLACK);
    }

    #[test]
    fn test_ascii_inside_script_text() {
        let canvas = MemCanvas::new(Rgb565::BLACK);
        let advance = fonts()
            .draw_text(&canvas, Origin::new(0, 0), "5晴", style(Font::Script), canvas.bounds())
            .unwrap();

        assert_eq!(advance, 32);
        // The digit sits inside its 16px cell, clear of the glyph cell edge
        let digit: Vec<Rect> = canvas.fills().into_iter().filter(|r| r.x < 16).collect();
        assert!(!digit.is_empty());
        assert!(digit.iter().all(|r| r.x >= 4 && r.right() <= 12 && r.y >= 2));
    }

    #[test]
    fn test_target_coalesces_rows() {
        let canvas = MemCanvas::new(Rgb565::BLACK);
        let mut target = CanvasTarget::new(&canvas, Origin::new(10, 10), canvas.bounds());
        Rectangle::new(Point::new(0, 0), Size::new(3, 2))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::RED))
            .draw(&mut target)
            .unwrap();

        assert_eq!(
            canvas.fills(),
            std::vec![Rect::new(10, 10, 3, 1), Rect::new(10, 11, 3, 1)]
        );
    }

    proptest! {
        #[test]
        fn prop_fills_stay_inside_clip(
            ox in 0u16..112,
            oy in 0u16..112,
            cx in 0u16..120,
            cy in 0u16..120,
            cw in 1u16..=8,
            ch in 1u16..=8,
            font in prop::sample::select(std::vec![Font::Standard, Font::Large, Font::XLarge, Font::Script]),
        ) {
            let canvas = MemCanvas::new(Rgb565::BLACK);
            let clip = Rect::new(cx, cy, cw, ch);
            let drawn = fonts().draw_text(&canvas, Origin::new(ox, oy), "12:59晴", style(font), clip);

            prop_assert!(drawn.is_ok());
            prop_assert!(canvas.fills().iter().all(|r| clip.contains_rect(r)));
        }
    }
}
