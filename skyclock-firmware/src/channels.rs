//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! The WiFi, SNTP and weather-HTTP clients live outside this firmware; they
//! publish into `LINK_EVENTS`, `TIME_SYNC` and `WEATHER_REPORT` and answer
//! `WEATHER_REQUEST`.

use core::cell::{Cell, RefCell};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use skyclock_core::clock::{WallClock, DEFAULT_UTC_OFFSET_S};
use skyclock_core::state::{LinkEvent, LinkState};
use skyclock_core::weather::{WeatherCache, WeatherError, WeatherReport};

/// Channel capacity for link events
const LINK_EVENT_CHANNEL_SIZE: usize = 8;

/// Association and time-sync events
pub static LINK_EVENTS: Channel<CriticalSectionRawMutex, LinkEvent, LINK_EVENT_CHANNEL_SIZE> =
    Channel::new();

/// Signal raised once, on the first entry into `LinkState::Ready`
pub static LINK_READY: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Unix epoch delivered by the time service
pub static TIME_SYNC: Signal<CriticalSectionRawMutex, i64> = Signal::new();

/// Weather fetch request (raised by the weather task)
pub static WEATHER_REQUEST: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Weather fetch result
pub static WEATHER_REPORT: Signal<CriticalSectionRawMutex, Result<WeatherReport, WeatherError>> =
    Signal::new();

/// Current link state (written by the link task)
pub static LINK_STATE: Mutex<CriticalSectionRawMutex, Cell<LinkState>> =
    Mutex::new(Cell::new(LinkState::Disconnected));

/// Wall clock (written by the time-sync task, read by the render task)
pub static WALL_CLOCK: Mutex<CriticalSectionRawMutex, Cell<WallClock>> =
    Mutex::new(Cell::new(WallClock::new(DEFAULT_UTC_OFFSET_S)));

/// Weather cache, created by the weather task with the configured limit
pub static WEATHER: Mutex<CriticalSectionRawMutex, RefCell<Option<WeatherCache>>> =
    Mutex::new(RefCell::new(None));

/// Snapshot of the current link state
pub fn link_state() -> LinkState {
    LINK_STATE.lock(|state| state.get())
}

/// Snapshot of the wall clock
pub fn wall_clock() -> WallClock {
    WALL_CLOCK.lock(|clock| clock.get())
}

/// Last known weather, empty until the first fetch completes
pub fn current_weather() -> WeatherReport {
    WEATHER
        .lock(|cache| cache.borrow().as_ref().map(|c| c.current().clone()))
        .unwrap_or_default()
}
