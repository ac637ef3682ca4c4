//! Static background painted on full refresh

use embedded_graphics::pixelcolor::Rgb565;
use skyclock_core::layout::SCREEN;
use skyclock_core::traits::{Canvas, CanvasError};

/// Full-screen background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background<'a> {
    /// Row-major 128x128 image
    Image(&'a [Rgb565]),
    /// Uniform fill
    Solid(Rgb565),
}

impl Background<'_> {
    /// Paint the whole screen
    pub fn paint<C: Canvas + ?Sized>(&self, canvas: &C) -> Result<(), CanvasError> {
        match self {
            Background::Image(pixels) => canvas.draw_image(SCREEN, pixels),
            Background::Solid(color) => canvas.fill_rect(SCREEN, *color),
        }
    }
}
