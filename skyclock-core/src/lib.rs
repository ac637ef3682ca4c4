//! Board-agnostic core logic for the clock display
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Display state and dirty-region computation
//! - Fixed screen layout (region rectangles, weather/seconds/date fields)
//! - Network link state machine
//! - Weather cache with failure fallback
//! - Wall clock (epoch to civil time)
//! - Configuration types and parser
//! - Canvas and text rendering traits

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod config;
pub mod layout;
pub mod state;
pub mod text;
pub mod traits;
pub mod weather;
