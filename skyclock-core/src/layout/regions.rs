//! Fixed region rectangles on the 128x128 panel
//!
//! ```text
//!   0        60                 127
//!   ┌────────┬───────────────────┐ 4
//!   │LOCATION│ WEATHER + TEMP    │
//!   └────────┤                   │ 44
//!            └───────────────────┘
//!   ┌──────┬────┬──────┐           56
//!   │ HOUR │ :  │MINUTE│ ┌──────┐  83
//!   │      │    │      │ │:SS   │
//!   └──────┴────┴──────┘ └──────┘  96
//!   ┌──────────────────┐           104
//!   │ MM/DD  WEEKDAY   │
//!   └──────────────────┘           122
//! ```

use skyclock_protocol::{PANEL_HEIGHT, PANEL_WIDTH};

use super::geometry::{Origin, Rect};
use crate::state::Slot;

/// Whole panel
pub const SCREEN: Rect = Rect::new(0, 0, PANEL_WIDTH, PANEL_HEIGHT);

pub const LOCATION: Rect = Rect::new(2, 4, 56, 16);
pub const WEATHER: Rect = Rect::new(60, 4, 68, 40);
pub const HOUR: Rect = Rect::new(4, 56, 40, 40);
pub const MINUTE: Rect = Rect::new(64, 56, 40, 40);
pub const SECOND: Rect = Rect::new(104, 83, 24, 13);
pub const DATE: Rect = Rect::new(4, 104, 76, 18);

/// Static colon between hour and minute, outside every region
pub const COLON: Origin = Origin::new(44, 56);

/// Where the date digits start inside [`DATE`]
pub const DATE_TEXT: Origin = Origin::new(DATE.x, DATE.y + 2);

/// Gap between the date digits and the weekday label
pub const WEEKDAY_GAP: u16 = 4;

/// Boot splash message position
pub const SPLASH_TEXT: Origin = Origin::new(10, 40);

/// Rectangle for a slot
pub const fn region(slot: Slot) -> Rect {
    match slot {
        Slot::Location => LOCATION,
        Slot::Weather => WEATHER,
        Slot::Hour => HOUR,
        Slot::Minute => MINUTE,
        Slot::Second => SECOND,
        Slot::Date => DATE,
    }
}

/// Total pixels needed to cache the background under every region
pub const CACHE_PIXELS: usize = {
    let mut total = 0;
    let mut i = 0;
    while i < Slot::ALL.len() {
        total += region(Slot::ALL[i]).area();
        i += 1;
    }
    total
};
