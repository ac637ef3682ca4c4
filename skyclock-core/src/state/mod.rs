//! Display state, dirty tracking and the link state machine

pub mod dirty;
pub mod display;
pub mod events;
pub mod machine;

pub use dirty::{DirtySet, Slot};
pub use display::{weekday_label, DisplayState, WEEKDAY_LABELS};
pub use events::LinkEvent;
pub use machine::{LinkState, MAX_CONNECT_ATTEMPTS};
