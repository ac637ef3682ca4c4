//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in skyclock-core for the clock's display hardware:
//!
//! - ST7735 panel transport over a chip-select/DC-gated SPI bus
//! - Bus-mutex wrapper implementing [`Canvas`](skyclock_core::traits::Canvas)
//! - Glyph renderers (mono ASCII fonts and 16x16 script glyphs)
//! - An in-memory ST7735 simulator for host tests (feature `sim`)

#![no_std]
#![deny(unsafe_code)]

#[cfg(any(test, feature = "sim"))]
extern crate std;

mod fmt;

pub mod panel;
#[cfg(any(test, feature = "sim"))]
pub mod sim;
pub mod text;

pub use panel::{PanelError, SharedPanel, St7735};
pub use text::{FontSet, GlyphTable, ScriptGlyph};
