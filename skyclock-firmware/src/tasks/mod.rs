//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod link;
pub mod render;
pub mod time_sync;
pub mod weather;

pub use link::link_task;
pub use render::render_task;
pub use time_sync::time_sync_task;
pub use weather::weather_task;
