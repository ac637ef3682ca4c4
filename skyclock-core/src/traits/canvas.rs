//! Framebuffer-less drawing surface
//!
//! A `Canvas` draws straight to the panel; nothing is kept in RAM. Methods
//! take `&self` because the surface is shared between the render task and
//! the boot splash, with the implementation serializing bus access.

use embedded_graphics::pixelcolor::Rgb565;

use crate::layout::Rect;

/// Canvas errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CanvasError {
    /// Panel not initialized
    NotReady,
    /// Bus transfer failed
    Transport,
    /// Coordinates outside the panel
    OutOfBounds,
    /// Pixel buffer shorter than the rectangle
    BufferSize,
}

/// Immediate-mode drawing surface
pub trait Canvas {
    /// Visible area
    fn bounds(&self) -> Rect;

    /// Set a single pixel; off-panel coordinates are rejected
    fn draw_pixel(&self, x: u16, y: u16, color: Rgb565) -> Result<(), CanvasError>;

    /// Fill a rectangle, clamped to the panel
    fn fill_rect(&self, rect: Rect, color: Rgb565) -> Result<(), CanvasError>;

    /// Blit `rect.width * rect.height` row-major pixels, clipped to the panel
    fn draw_image(&self, rect: Rect, pixels: &[Rgb565]) -> Result<(), CanvasError>;

    /// Read back pixels already on the panel
    ///
    /// `rect` must lie fully on the panel.
    fn read_region(&self, rect: Rect, out: &mut [Rgb565]) -> Result<(), CanvasError>;
}

impl<T: Canvas + ?Sized> Canvas for &T {
    fn bounds(&self) -> Rect {
        (**self).bounds()
    }

    fn draw_pixel(&self, x: u16, y: u16, color: Rgb565) -> Result<(), CanvasError> {
        (**self).draw_pixel(x, y, color)
    }

    fn fill_rect(&self, rect: Rect, color: Rgb565) -> Result<(), CanvasError> {
        (**self).fill_rect(rect, color)
    }

    fn draw_image(&self, rect: Rect, pixels: &[Rgb565]) -> Result<(), CanvasError> {
        (**self).draw_image(rect, pixels)
    }

    fn read_region(&self, rect: Rect, out: &mut [Rgb565]) -> Result<(), CanvasError> {
        (**self).read_region(rect, out)
    }
}
