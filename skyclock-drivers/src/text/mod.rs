//! Glyph rendering
//!
//! ASCII goes through `embedded-graphics` mono fonts drawn into a
//! [`CanvasTarget`]; script text uses a 16x16 lookup table.

pub mod renderer;
pub mod script;
pub mod target;

pub use renderer::FontSet;
pub use script::{GlyphTable, ScriptGlyph, GLYPH_BYTES, GLYPH_SIZE};
pub use target::CanvasTarget;
