//! ST7735 Panel Wire Protocol
//!
//! This crate describes what goes over the wire to the ST7735 controller
//! on the 128x128 RGB565 module: command codes, the power-on init
//! sequence, address-window encoding and pixel byte order. It performs no
//! I/O; the transport in `skyclock-drivers` does the bus work.
//!
//! # Write Sequence
//!
//! Every pixel write is framed the same way, with the DC line low for the
//! command byte and high for its parameters:
//! ```text
//! ┌───────┬───────────────┬───────┬───────────────┬───────┬──────────────┐
//! │ CASET │ XS  XS  XE XE │ RASET │ YS  YS  YE YE │ RAMWR │ PIXELS (BE)  │
//! │ 0x2A  │ 4B big-endian │ 0x2B  │ 4B big-endian │ 0x2C  │ 2B per pixel │
//! └───────┴───────────────┴───────┴───────────────┴───────┴──────────────┘
//! ```
//!
//! Column and row addresses include the panel-variant offset, since the
//! glass is smaller than the controller's 132x162 GRAM.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod init;
pub mod pixel;
pub mod window;

/// Panel SPI clock (27 MHz, the fastest the ST7735 write cycle allows)
pub const DEFAULT_SPI_FREQUENCY_HZ: u32 = 27_000_000;

pub use command::Command;
pub use init::{init_sequence, InitOptions, InitStep, MAX_INIT_PARAMS, MAX_INIT_STEPS};
pub use window::{PanelGeometry, PanelVariant, Window, PANEL_HEIGHT, PANEL_WIDTH};
