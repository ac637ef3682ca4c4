//! In-memory canvas for unit tests

use core::cell::{Cell, RefCell};
use std::vec::Vec;

use embedded_graphics::pixelcolor::Rgb565;
use skyclock_core::layout::{Rect, SCREEN};
use skyclock_core::traits::{Canvas, CanvasError};

/// One canvas call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Call {
    Pixel(u16, u16),
    Fill(Rect),
    Image(Rect),
    Read(Rect),
}

/// 128x128 framebuffer that records every call
pub(crate) struct MemCanvas {
    pixels: RefCell<Vec<Rgb565>>,
    log: RefCell<Vec<Call>>,
    failure: Cell<Option<CanvasError>>,
}

impl MemCanvas {
    pub(crate) fn with_pattern(pattern: impl Fn(u16, u16) -> Rgb565) -> Self {
        let mut pixels = Vec::with_capacity(SCREEN.area());
        for y in 0..SCREEN.height {
            for x in 0..SCREEN.width {
                pixels.push(pattern(x, y));
            }
        }
        Self {
            pixels: RefCell::new(pixels),
            log: RefCell::new(Vec::new()),
            failure: Cell::new(None),
        }
    }

    /// Make every call fail with `err` (or succeed again with `None`)
    pub(crate) fn fail_with(&self, err: Option<CanvasError>) {
        self.failure.set(err);
    }

    pub(crate) fn calls(&self) -> usize {
        self.log.borrow().len()
    }

    pub(crate) fn log(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }

    pub(crate) fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }

    pub(crate) fn snapshot(&self, rect: Rect) -> Vec<Rgb565> {
        let pixels = self.pixels.borrow();
        let mut out = Vec::with_capacity(rect.area());
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                out.push(pixels[Self::index(x, y)]);
            }
        }
        out
    }

    fn index(x: u16, y: u16) -> usize {
        y as usize * SCREEN.width as usize + x as usize
    }

    fn record(&self, call: Call) -> Result<(), CanvasError> {
        self.log.borrow_mut().push(call);
        match self.failure.get() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Canvas for MemCanvas {
    fn bounds(&self) -> Rect {
        SCREEN
    }

    fn draw_pixel(&self, x: u16, y: u16, color: Rgb565) -> Result<(), CanvasError> {
        self.record(Call::Pixel(x, y))?;
        if !SCREEN.contains(x, y) {
            return Err(CanvasError::OutOfBounds);
        }
        self.pixels.borrow_mut()[Self::index(x, y)] = color;
        Ok(())
    }

    fn fill_rect(&self, rect: Rect, color: Rgb565) -> Result<(), CanvasError> {
        self.record(Call::Fill(rect))?;
        let visible = rect.intersection(&SCREEN).ok_or(CanvasError::OutOfBounds)?;
        let mut pixels = self.pixels.borrow_mut();
        for y in visible.y..visible.bottom() {
            for x in visible.x..visible.right() {
                pixels[Self::index(x, y)] = color;
            }
        }
        Ok(())
    }

    fn draw_image(&self, rect: Rect, image: &[Rgb565]) -> Result<(), CanvasError> {
        self.record(Call::Image(rect))?;
        if image.len() < rect.area() {
            return Err(CanvasError::BufferSize);
        }
        let visible = rect.intersection(&SCREEN).ok_or(CanvasError::OutOfBounds)?;
        let mut pixels = self.pixels.borrow_mut();
        for y in visible.y..visible.bottom() {
            for x in visible.x..visible.right() {
                let src = (y - rect.y) as usize * rect.width as usize + (x - rect.x) as usize;
                pixels[Self::index(x, y)] = image[src];
            }
        }
        Ok(())
    }

    fn read_region(&self, rect: Rect, out: &mut [Rgb565]) -> Result<(), CanvasError> {
        self.record(Call::Read(rect))?;
        if rect.is_empty() || !SCREEN.contains_rect(&rect) {
            return Err(CanvasError::OutOfBounds);
        }
        if out.len() < rect.area() {
            return Err(CanvasError::BufferSize);
        }
        for (dst, src) in out.iter_mut().zip(self.snapshot(rect)) {
            *dst = src;
        }
        Ok(())
    }
}
