//! Text-area background cache
//!
//! One [`TextRegion`] per fixed UI slot, all backed by a single pixel
//! arena sized at compile time. A region is captured from the panel once,
//! right after the background is painted, and blitted back whenever its
//! slot is about to be redrawn.

use embedded_graphics::pixelcolor::Rgb565;
use skyclock_core::layout::{region, Rect, CACHE_PIXELS};
use skyclock_core::state::Slot;
use skyclock_core::traits::{Canvas, CanvasError};

use crate::fmt::{debug, warn};

/// Captures with more than this share of background-colour pixels are suspect
pub const SUSPECT_PERCENT: usize = 80;

/// Cache errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CacheError {
    /// Region already holds a capture; recapturing could grab drawn text
    AlreadyCaptured,
    /// Region was never captured
    NotCaptured,
    /// Readback or blit failed
    Canvas(CanvasError),
}

impl From<CanvasError> for CacheError {
    fn from(err: CanvasError) -> Self {
        CacheError::Canvas(err)
    }
}

/// Fixed region and where its pixels live in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextRegion {
    pub slot: Slot,
    pub rect: Rect,
    offset: usize,
    captured: bool,
}

impl TextRegion {
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    fn range(&self) -> core::ops::Range<usize> {
        self.offset..self.offset + self.rect.area()
    }
}

/// Result of [`BackgroundCache::verify`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Verification {
    /// Pixels equal to the background fill colour
    pub matching: usize,
    /// Pixels in the region
    pub total: usize,
}

impl Verification {
    /// Mostly background fill: the capture probably ran before the image
    pub fn is_suspect(&self) -> bool {
        self.matching * 100 > self.total * SUSPECT_PERCENT
    }
}

/// Background pixels under every region
pub struct BackgroundCache {
    regions: [TextRegion; Slot::ALL.len()],
    pixels: [Rgb565; CACHE_PIXELS],
}

impl Default for BackgroundCache {
    fn default() -> Self {
        Self::new()
    }
}

impl BackgroundCache {
    pub const fn new() -> Self {
        let mut regions = [TextRegion {
            slot: Slot::Location,
            rect: Rect::new(0, 0, 0, 0),
            offset: 0,
            captured: false,
        }; Slot::ALL.len()];

        let mut offset = 0;
        let mut i = 0;
        while i < Slot::ALL.len() {
            let slot = Slot::ALL[i];
            let rect = region(slot);
            regions[i] = TextRegion {
                slot,
                rect,
                offset,
                captured: false,
            };
            offset += rect.area();
            i += 1;
        }

        Self {
            regions,
            pixels: [Rgb565::new(0, 0, 0); CACHE_PIXELS],
        }
    }

    pub fn region(&self, slot: Slot) -> &TextRegion {
        &self.regions[slot.index()]
    }

    pub fn is_captured(&self, slot: Slot) -> bool {
        self.region(slot).captured
    }

    /// Number of regions holding a capture
    pub fn captured_count(&self) -> usize {
        self.regions.iter().filter(|r| r.captured).count()
    }

    /// Captured pixels of a region, row-major
    pub fn pixels(&self, slot: Slot) -> &[Rgb565] {
        &self.pixels[self.region(slot).range()]
    }

    /// Snapshot the pixels currently on the panel under `slot`
    ///
    /// Only the first capture of a region is accepted.
    pub fn capture<C: Canvas + ?Sized>(&mut self, canvas: &C, slot: Slot) -> Result<(), CacheError> {
        let region = self.regions[slot.index()];
        if region.captured {
            warn!("cache: {:?} already captured", slot);
            return Err(CacheError::AlreadyCaptured);
        }

        canvas.read_region(region.rect, &mut self.pixels[region.range()])?;
        self.regions[slot.index()].captured = true;
        debug!("cache: captured {:?} ({} px)", slot, region.rect.area());
        Ok(())
    }

    /// Blit the captured background back over `slot`
    pub fn restore<C: Canvas + ?Sized>(&self, canvas: &C, slot: Slot) -> Result<(), CacheError> {
        let region = self.region(slot);
        if !region.captured {
            warn!("cache: restore of uncaptured {:?} skipped", slot);
            return Err(CacheError::NotCaptured);
        }
        canvas.draw_image(region.rect, &self.pixels[region.range()])?;
        Ok(())
    }

    /// Count how much of a capture equals the plain background colour
    pub fn verify(&self, slot: Slot, background: Rgb565) -> Result<Verification, CacheError> {
        let region = self.region(slot);
        if !region.captured {
            return Err(CacheError::NotCaptured);
        }
        let pixels = &self.pixels[region.range()];
        Ok(Verification {
            matching: pixels.iter().filter(|p| **p == background).count(),
            total: pixels.len(),
        })
    }

    /// Forget every capture
    pub fn clear(&mut self) {
        for region in self.regions.iter_mut() {
            region.captured = false;
        }
    }
}
