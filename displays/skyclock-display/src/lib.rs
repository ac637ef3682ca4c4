//! Partial-refresh display composition for Skyclock
//!
//! This crate provides:
//! - [`BackgroundCache`]: captured background pixels per fixed UI region
//! - [`Background`]: the static full-screen image or fill
//! - [`Composer`]: the dirty-region engine that turns a stream of
//!   [`DisplayState`](skyclock_core::state::DisplayState) values into
//!   the minimum set of restores and redraws
//!
//! # Refresh Cycle
//!
//! ```text
//!  FullRefresh ──paint, capture, draw all──▶ PartialRefresh
//!       ▲                                         │
//!       └────────────── reset() ◀─────────────────┤
//!                                                 ▼
//!                               diff ─▶ restore ─▶ redraw (dirty only)
//! ```
//!
//! A full frame that hit any canvas error is painted again on the next
//! tick, so a panel that comes up late still gets clean captures.
//!
//! The composer only talks to a [`Canvas`](skyclock_core::traits::Canvas),
//! so the same code runs against the ST7735 transport and against
//! in-memory surfaces in tests.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

mod fmt;

pub mod background;
pub mod cache;
pub mod composer;
#[cfg(test)]
mod testing;

pub use background::Background;
pub use cache::{BackgroundCache, CacheError, TextRegion, Verification};
pub use composer::{Composer, Phase, TickReport};
