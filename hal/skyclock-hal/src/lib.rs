//! Skyclock Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits the display stack
//! is written against. Chip HALs plug in either by implementing the traits
//! directly or through the [`adapter`] wrappers for `embedded-hal` 1.0.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  skyclock-drivers (ST7735 transport)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  skyclock-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  embedded-hal 1.0 (embassy-rp, ...)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output (chip select, data/command, reset)
//! - [`spi::SpiBus`] - SPI bus operations

#![no_std]
#![deny(unsafe_code)]

pub mod adapter;
pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use adapter::{HalPin, HalSpi};
pub use gpio::{NoPin, OutputPin};
pub use spi::{SpiBus, SpiConfig};
