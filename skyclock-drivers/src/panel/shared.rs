//! Bus-mutex wrapper
//!
//! Every primitive holds the lock for its whole window-plus-stream
//! sequence, so two callers can never interleave half-sent commands.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_graphics::pixelcolor::Rgb565;
use skyclock_core::layout::Rect;
use skyclock_core::traits::{Canvas, CanvasError};
use skyclock_hal::{OutputPin, SpiBus};
use skyclock_protocol::{PanelGeometry, Window};

use super::st7735::{PanelError, St7735};
use crate::fmt::warn;

impl From<PanelError> for CanvasError {
    fn from(err: PanelError) -> Self {
        match err {
            PanelError::NotInitialized => CanvasError::NotReady,
            PanelError::Bus => CanvasError::Transport,
            PanelError::OutOfBounds => CanvasError::OutOfBounds,
            PanelError::BufferSize => CanvasError::BufferSize,
        }
    }
}

/// ST7735 panel shared behind a blocking mutex
pub struct SharedPanel<M: RawMutex, SPI, DC, CS, RST> {
    inner: Mutex<M, RefCell<St7735<SPI, DC, CS, RST>>>,
    geometry: PanelGeometry,
}

impl<M, SPI, DC, CS, RST> SharedPanel<M, SPI, DC, CS, RST>
where
    M: RawMutex,
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    pub fn new(panel: St7735<SPI, DC, CS, RST>) -> Self {
        let geometry = panel.geometry();
        Self {
            inner: Mutex::new(RefCell::new(panel)),
            geometry,
        }
    }

    /// Run `f` with exclusive access to the panel
    ///
    /// Re-entrant use from inside `f` is reported as [`PanelError::Bus`]
    /// rather than panicking.
    pub fn lock<R>(
        &self,
        f: impl FnOnce(&mut St7735<SPI, DC, CS, RST>) -> Result<R, PanelError>,
    ) -> Result<R, PanelError> {
        self.inner.lock(|cell| match cell.try_borrow_mut() {
            Ok(mut panel) => f(&mut panel),
            Err(_) => {
                warn!("panel: bus already held");
                Err(PanelError::Bus)
            }
        })
    }

    pub fn send_command(&self, command: u8) -> Result<(), PanelError> {
        self.lock(|panel| panel.send_command(command))
    }

    pub fn send_data(&self, data: &[u8]) -> Result<(), PanelError> {
        self.lock(|panel| panel.send_data(data))
    }

    pub fn set_address_window(&self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<Window, PanelError> {
        self.lock(|panel| panel.set_address_window(x0, y0, x1, y1))
    }

    pub fn geometry(&self) -> PanelGeometry {
        self.geometry
    }

    /// Recover the driver
    pub fn into_inner(self) -> St7735<SPI, DC, CS, RST> {
        self.inner.into_inner().into_inner()
    }

    fn draw(
        &self,
        f: impl FnOnce(&mut St7735<SPI, DC, CS, RST>) -> Result<(), PanelError>,
    ) -> Result<(), CanvasError> {
        self.lock(f).map_err(|err| {
            warn!("panel: draw failed: {:?}", err);
            CanvasError::from(err)
        })
    }
}

impl<M, SPI, DC, CS, RST> Canvas for SharedPanel<M, SPI, DC, CS, RST>
where
    M: RawMutex,
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.geometry.width, self.geometry.height)
    }

    fn draw_pixel(&self, x: u16, y: u16, color: Rgb565) -> Result<(), CanvasError> {
        if !self.geometry.contains(x, y) {
            warn!("panel: pixel ({}, {}) off panel", x, y);
            return Err(CanvasError::OutOfBounds);
        }
        self.draw(|panel| panel.fill(Rect::new(x, y, 1, 1), color))
    }

    fn fill_rect(&self, rect: Rect, color: Rgb565) -> Result<(), CanvasError> {
        self.draw(|panel| panel.fill(rect, color))
    }

    fn draw_image(&self, rect: Rect, pixels: &[Rgb565]) -> Result<(), CanvasError> {
        self.draw(|panel| panel.blit(rect, pixels))
    }

    fn read_region(&self, rect: Rect, out: &mut [Rgb565]) -> Result<(), CanvasError> {
        self.draw(|panel| panel.read(rect, out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{SimBus, SimDelay, SimPanel, SimPin};
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embedded_graphics::pixelcolor::IntoStorage;
    use skyclock_core::config::PanelConfig;
    use skyclock_protocol::PanelVariant;

    type TestPanel = SharedPanel<NoopRawMutex, SimBus, SimPin, SimPin, SimPin>;

    fn shared(sim: &SimPanel, init: bool) -> TestPanel {
        let config = PanelConfig {
            variant: sim.variant(),
            ..PanelConfig::default()
        };
        let mut panel = sim.driver(&config);
        if init {
            panel.init(&mut SimDelay::default()).unwrap();
        }
        SharedPanel::new(panel)
    }

    #[test]
    fn test_canvas_bounds() {
        let sim = SimPanel::new(PanelVariant::Green144);
        let panel = shared(&sim, true);
        assert_eq!(panel.bounds(), Rect::new(0, 0, 128, 128));
    }

    #[test]
    fn test_draw_pixel_writes_two_bytes() {
        let sim = SimPanel::new(PanelVariant::Green144);
        let panel = shared(&sim, true);
        sim.reset_counters();

        panel.draw_pixel(5, 6, Rgb565::new(0, 0, 31)).unwrap();

        assert_eq!(sim.pixel(5, 6), 0x001F);
        assert_eq!(sim.pixel_bytes_written(), 2);
    }

    #[test]
    fn test_draw_pixel_off_panel() {
        let sim = SimPanel::new(PanelVariant::Green144);
        let panel = shared(&sim, true);
        sim.reset_counters();

        assert_eq!(
            panel.draw_pixel(128, 0, Rgb565::new(0, 0, 31)),
            Err(CanvasError::OutOfBounds)
        );
        assert_eq!(sim.bytes_written(), 0);
    }

    #[test]
    fn test_uninitialized_panel_is_not_ready() {
        let sim = SimPanel::new(PanelVariant::Green144);
        let panel = shared(&sim, false);

        assert_eq!(
            panel.fill_rect(Rect::new(0, 0, 8, 8), Rgb565::new(31, 0, 0)),
            Err(CanvasError::NotReady)
        );
        assert_eq!(sim.bytes_written(), 0);
    }

    #[test]
    fn test_image_round_trip_through_canvas() {
        let sim = SimPanel::new(PanelVariant::Green);
        let panel = shared(&sim, true);
        let rect = Rect::new(100, 100, 8, 4);
        let image: std::vec::Vec<Rgb565> = (0..32u16)
            .map(|i| Rgb565::new((i % 32) as u8, (i * 2 % 64) as u8, 31 - (i % 32) as u8))
            .collect();

        panel.draw_image(rect, &image).unwrap();
        let mut back = [Rgb565::new(0, 0, 0); 32];
        panel.read_region(rect, &mut back).unwrap();

        assert_eq!(&back[..], &image[..]);
        assert_eq!(sim.pixel(107, 103), image[31].into_storage());
    }

    #[test]
    fn test_transport_fault_maps_to_canvas_error() {
        let sim = SimPanel::new(PanelVariant::Green144);
        let panel = shared(&sim, true);
        sim.set_faulty(true);

        assert_eq!(
            panel.fill_rect(Rect::new(0, 0, 1, 1), Rgb565::new(0, 0, 0)),
            Err(CanvasError::Transport)
        );
    }

    #[test]
    fn test_raw_transport_calls() {
        let sim = SimPanel::new(PanelVariant::Green144);
        let panel = shared(&sim, true);
        sim.reset_counters();

        let window = panel.set_address_window(0, 0, 0, 0).unwrap();
        panel.send_command(0x2C).unwrap();
        panel.send_data(&[0xF8, 0x00]).unwrap();

        assert_eq!((window.x0, window.y0), (2, 3));
        assert_eq!(sim.pixel(0, 0), 0xF800);
    }

    #[test]
    fn test_reentrant_lock_is_an_error() {
        let sim = SimPanel::new(PanelVariant::Green144);
        let panel = shared(&sim, true);

        let nested = panel.lock(|_| panel.send_command(0x00));
        assert_eq!(nested, Err(PanelError::Bus));
    }
}
