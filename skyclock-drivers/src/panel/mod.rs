//! Panel transport
//!
//! [`St7735`] owns the bus and pins and speaks the controller protocol.
//! [`SharedPanel`] puts it behind a blocking mutex so the render task and
//! the boot splash can both draw through `&self`.

pub mod shared;
pub mod st7735;

pub use shared::SharedPanel;
pub use st7735::{PanelError, St7735, CHUNK_PIXELS};
