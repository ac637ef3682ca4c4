//! Address windows and panel-variant offsets
//!
//! The ST7735 GRAM is 132x162 but the 128x128 glass is mounted at an
//! offset that differs between manufacturing batches (the "tab colour"
//! printed on the protective film). Every window sent to the controller
//! is shifted by that offset and clamped to the visible area.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Visible panel width in pixels
pub const PANEL_WIDTH: u16 = 128;

/// Visible panel height in pixels
pub const PANEL_HEIGHT: u16 = 128;

/// Manufacturing variant of the panel module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PanelVariant {
    /// 1.44" 128x128 green tab
    #[default]
    Green144,
    /// 1.8" green tab
    Green,
    /// Red tab
    Red,
    /// Black tab
    Black,
}

impl PanelVariant {
    /// Column and row offset added to every address window
    pub const fn offset(self) -> (u16, u16) {
        match self {
            PanelVariant::Green144 => (2, 3),
            PanelVariant::Green => (2, 1),
            PanelVariant::Red | PanelVariant::Black => (0, 0),
        }
    }

    /// Parse a variant name as used in configuration files
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "green144" => Some(PanelVariant::Green144),
            "green" => Some(PanelVariant::Green),
            "red" => Some(PanelVariant::Red),
            "black" => Some(PanelVariant::Black),
            _ => None,
        }
    }
}

/// Inclusive controller-space window, offset already applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Window {
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
}

impl Window {
    /// CASET parameters
    pub fn caset(&self) -> [u8; 4] {
        let [a, b] = self.x0.to_be_bytes();
        let [c, d] = self.x1.to_be_bytes();
        [a, b, c, d]
    }

    /// RASET parameters
    pub fn raset(&self) -> [u8; 4] {
        let [a, b] = self.y0.to_be_bytes();
        let [c, d] = self.y1.to_be_bytes();
        [a, b, c, d]
    }

    pub fn width(&self) -> u16 {
        self.x1 - self.x0 + 1
    }

    pub fn height(&self) -> u16 {
        self.y1 - self.y0 + 1
    }

    /// Number of pixels covered by the window
    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }
}

/// Visible geometry of one physical panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelGeometry {
    pub width: u16,
    pub height: u16,
    pub variant: PanelVariant,
}

impl PanelGeometry {
    /// 128x128 panel of the given variant
    pub const fn new(variant: PanelVariant) -> Self {
        Self {
            width: PANEL_WIDTH,
            height: PANEL_HEIGHT,
            variant,
        }
    }

    /// Resolve an inclusive panel-space window to controller space
    ///
    /// `x1`/`y1` are clamped to the last visible column/row. Returns `None`
    /// when the window starts off-panel or is inverted.
    pub fn window(&self, x0: u16, y0: u16, x1: u16, y1: u16) -> Option<Window> {
        if x0 >= self.width || y0 >= self.height {
            return None;
        }
        let x1 = x1.min(self.width - 1);
        let y1 = y1.min(self.height - 1);
        if x1 < x0 || y1 < y0 {
            return None;
        }

        let (dx, dy) = self.variant.offset();
        Some(Window {
            x0: x0 + dx,
            y0: y0 + dy,
            x1: x1 + dx,
            y1: y1 + dy,
        })
    }

    /// Resolve an origin-and-size rectangle, clamping its size to the panel
    pub fn window_for_rect(&self, x: u16, y: u16, w: u16, h: u16) -> Option<Window> {
        if w == 0 || h == 0 {
            return None;
        }
        self.window(x, y, x.saturating_add(w - 1), y.saturating_add(h - 1))
    }

    /// Whether a single pixel is on the visible area
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }
}

impl Default for PanelGeometry {
    fn default() -> Self {
        Self::new(PanelVariant::default())
    }
}
