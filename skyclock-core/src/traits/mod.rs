//! Hardware abstraction traits
//!
//! These traits define the interface between the composer and the
//! panel driver, allowing the composer to be tested against an in-memory
//! surface.

pub mod canvas;
pub mod text;

pub use canvas::{Canvas, CanvasError};
pub use text::{Font, TextRenderer, TextStyle};
