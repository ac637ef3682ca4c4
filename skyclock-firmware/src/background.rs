//! Full-screen background image
//!
//! A vertical dusk gradient, computed at compile time so it lives in
//! flash rather than RAM.

use embedded_graphics::pixelcolor::Rgb565;
use skyclock_protocol::{PANEL_HEIGHT, PANEL_WIDTH};

const WIDTH: usize = PANEL_WIDTH as usize;
const HEIGHT: usize = PANEL_HEIGHT as usize;

/// Background pixels, row-major
pub static SKY: [Rgb565; WIDTH * HEIGHT] = sky_gradient();

/// Deep blue at the top fading to near black at the bottom
const fn sky_gradient() -> [Rgb565; WIDTH * HEIGHT] {
    let mut pixels = [Rgb565::new(0, 0, 0); WIDTH * HEIGHT];
    let mut y = 0;
    while y < HEIGHT {
        let fade = (y * 16 / HEIGHT) as u8;
        let color = Rgb565::new(2, 18 - fade, 20 - fade);
        let mut x = 0;
        while x < WIDTH {
            pixels[y * WIDTH + x] = color;
            x += 1;
        }
        y += 1;
    }
    pixels
}
