//! Skyclock - Clock and Weather Display Firmware
//!
//! Main firmware binary for an RP2040 driving a 1.44" ST7735 128x128 TFT.
//! Only the screen regions whose contents changed are redrawn each tick,
//! restored from a captured copy of the background underneath them.
//!
//! Wiring (SPI0):
//!
//! | Signal | GPIO |
//! |--------|------|
//! | SCK    | 18   |
//! | MOSI   | 19   |
//! | MISO   | 16   |
//! | CS     | 17   |
//! | DC     | 20   |
//! | RESET  | 21   |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{self, Blocking, Spi};
use embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use skyclock_core::clock::WallClock;
use skyclock_core::config::{parse_config, DeviceConfig};
use skyclock_core::state::LinkEvent;
use skyclock_display::{Background, Composer};
use skyclock_drivers::{FontSet, SharedPanel, St7735};
use skyclock_hal::spi::{Phase, Polarity};
use skyclock_hal::{HalPin, HalSpi, SpiConfig};

mod background;
mod channels;
mod glyphs;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit skyclock.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../skyclock.toml");

type PanelBus = HalSpi<Spi<'static, SPI0, Blocking>>;
type PanelPin = HalPin<Output<'static>>;

/// The panel as shared between the splash and the composer
pub type Panel = SharedPanel<ThreadModeRawMutex, PanelBus, PanelPin, PanelPin, PanelPin>;

// Static cells for state that tasks borrow for the program lifetime
static CONFIG: StaticCell<DeviceConfig> = StaticCell::new();
static PANEL: StaticCell<Panel> = StaticCell::new();
static COMPOSER: StaticCell<Composer<'static, FontSet>> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Skyclock firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config: &'static DeviceConfig = CONFIG.init(load_config());
    channels::WALL_CLOCK.lock(|clock| clock.set(WallClock::new(config.clock.utc_offset_s)));

    let spi_config = rp_spi_config(&SpiConfig::new(config.panel.spi_frequency_hz));
    let spi = Spi::new_blocking(p.SPI0, p.PIN_18, p.PIN_19, p.PIN_16, spi_config);

    let dc = HalPin::new(Output::new(p.PIN_20, Level::Low), false);
    let cs = HalPin::new(Output::new(p.PIN_17, Level::High), true);
    let rst = HalPin::new(Output::new(p.PIN_21, Level::High), true);

    let mut st7735 = St7735::new(HalSpi::new(spi), dc, cs, rst, &config.panel);
    match st7735.init(&mut Delay) {
        Ok(()) => info!(
            "Panel initialized: {:?} at {} Hz",
            config.panel.variant, config.panel.spi_frequency_hz
        ),
        // Draw calls report NotInitialized from here on; the clock keeps running
        Err(e) => error!("Panel init failed: {:?}", e),
    }
    let panel: &'static Panel = PANEL.init(SharedPanel::new(st7735));

    let fonts = FontSet::new(glyphs::script_table());
    let composer = COMPOSER.init_with(|| {
        Composer::new(Background::Image(&background::SKY), fonts, config.palette)
    });

    spawner.spawn(tasks::link_task()).unwrap();
    spawner.spawn(tasks::time_sync_task(&config.clock)).unwrap();
    spawner.spawn(tasks::weather_task(&config.clock)).unwrap();
    spawner
        .spawn(tasks::render_task(panel, composer, fonts, config))
        .unwrap();

    channels::LINK_EVENTS.send(LinkEvent::Start).await;

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Parse the embedded configuration
///
/// Falls back to the built-in defaults if skyclock.toml has errors the
/// build-time check did not catch.
fn load_config() -> DeviceConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using default configuration");
            DeviceConfig::default()
        }
    }
}

/// Translate the bus configuration into embassy-rp's
///
/// `SpiConfig::new` is mode 0, which is what the ST7735 expects.
fn rp_spi_config(config: &SpiConfig) -> spi::Config {
    let mut rp = spi::Config::default();
    rp.frequency = config.frequency;
    rp.polarity = match config.polarity {
        Polarity::IdleLow => spi::Polarity::IdleLow,
        Polarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    rp.phase = match config.phase {
        Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };
    rp
}
