//! Fixed screen layout
//!
//! All positions are constants for the single 128x128 panel this firmware
//! targets. Each dynamic field lives inside exactly one region, so a
//! region can be erased and redrawn without disturbing its neighbours.

pub mod fields;
pub mod geometry;
pub mod regions;
pub mod weather;

pub use fields::{date_field, seconds_at_region, seconds_field, two_digits, DateField, SecondsField};
pub use geometry::{Origin, Rect};
pub use regions::{region, CACHE_PIXELS, SCREEN};
pub use weather::{plan_weather, WeatherPlan, WeatherStyle};
