//! `embedded-graphics` draw target over a [`Canvas`]
//!
//! Fonts are rendered at the target's own origin and mapped onto the
//! canvas with an anchor and an integer scale. Consecutive same-colour
//! pixels on a row are merged into one `fill_rect`, and everything is
//! clipped to a rectangle.

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Point, Size};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::Pixel;
use skyclock_core::layout::{Origin, Rect};
use skyclock_core::traits::{Canvas, CanvasError};

/// Horizontal run of identical pixels, in canvas space
#[derive(Debug, Clone, Copy)]
struct Run {
    x: u16,
    y: u16,
    len: u16,
    color: Rgb565,
}

/// Draw target that forwards to a canvas
pub struct CanvasTarget<'a, C: Canvas + ?Sized> {
    canvas: &'a C,
    anchor: Origin,
    clip: Rect,
    scale: u16,
}

impl<'a, C: Canvas + ?Sized> CanvasTarget<'a, C> {
    /// Target whose (0, 0) lands on `anchor`, one canvas pixel per point
    pub fn new(canvas: &'a C, anchor: Origin, clip: Rect) -> Self {
        Self::scaled(canvas, anchor, clip, 1)
    }

    /// Target that draws every point as a `scale` x `scale` block
    pub fn scaled(canvas: &'a C, anchor: Origin, clip: Rect, scale: u16) -> Self {
        Self {
            canvas,
            anchor,
            clip,
            scale: scale.max(1),
        }
    }

    /// Canvas position of a target point, `None` if it falls off the left/top
    fn map(&self, point: Point) -> Option<(u16, u16)> {
        let x = i32::from(self.anchor.x) + point.x * i32::from(self.scale);
        let y = i32::from(self.anchor.y) + point.y * i32::from(self.scale);
        Some((u16::try_from(x).ok()?, u16::try_from(y).ok()?))
    }

    fn flush(&self, run: Run) -> Result<(), CanvasError> {
        let rect = Rect::new(run.x, run.y, run.len, self.scale);
        match rect.intersection(&self.clip) {
            Some(visible) => self.canvas.fill_rect(visible, run.color),
            None => Ok(()),
        }
    }
}

impl<C: Canvas + ?Sized> DrawTarget for CanvasTarget<'_, C> {
    type Color = Rgb565;
    type Error = CanvasError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let mut run: Option<Run> = None;

        for Pixel(point, color) in pixels {
            let Some((x, y)) = self.map(point) else {
                continue;
            };
            match run.as_mut() {
                Some(r) if r.y == y && r.color == color && r.x + r.len == x => {
                    r.len += self.scale;
                }
                _ => {
                    if let Some(done) = run.take() {
                        self.flush(done)?;
                    }
                    run = Some(Run {
                        x,
                        y,
                        len: self.scale,
                        color,
                    });
                }
            }
        }

        if let Some(done) = run {
            self.flush(done)?;
        }
        Ok(())
    }
}

impl<C: Canvas + ?Sized> OriginDimensions for CanvasTarget<'_, C> {
    fn size(&self) -> Size {
        let bounds = self.canvas.bounds();
        Size::new(u32::from(bounds.width), u32::from(bounds.height))
    }
}
