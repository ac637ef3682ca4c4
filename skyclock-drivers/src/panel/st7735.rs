//! ST7735 TFT Panel Driver
//!
//! Driver for the 128x128 ST7735 RGB565 module over a write-mostly SPI bus.
//! Nothing is buffered in RAM: every primitive sets an address window and
//! streams pixels straight to the controller.
//!
//! Each transaction drives DC first (low for a command byte, high for
//! parameters and pixel data), then selects the chip for the transfer.

use embedded_graphics::pixelcolor::{IntoStorage, Rgb565};
use embedded_hal::delay::DelayNs;
use skyclock_core::config::{rgb565, PanelConfig};
use skyclock_core::layout::Rect;
use skyclock_hal::{OutputPin, SpiBus};
use skyclock_protocol::init::RESET_PULSE_MS;
use skyclock_protocol::pixel::{self, READ_BYTES_PER_PIXEL, WRITE_BYTES_PER_PIXEL};
use skyclock_protocol::{init_sequence, Command, InitOptions, PanelGeometry, Window};

use crate::fmt::{debug, info, warn};

/// Pixels per bus write on the streaming paths
pub const CHUNK_PIXELS: usize = 64;

/// Settle time after SLPIN/SLPOUT
const SLEEP_SETTLE_MS: u32 = 120;

/// Panel transport errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// `init` has not completed
    NotInitialized,
    /// SPI transfer failed
    Bus,
    /// Window lies outside the visible panel
    OutOfBounds,
    /// Pixel buffer shorter than the rectangle
    BufferSize,
}

/// ST7735 panel driver
pub struct St7735<SPI, DC, CS, RST> {
    spi: SPI,
    dc: DC,
    cs: CS,
    rst: RST,
    geometry: PanelGeometry,
    options: InitOptions,
    initialized: bool,
}

impl<SPI, DC, CS, RST> St7735<SPI, DC, CS, RST>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    /// Create a new driver
    ///
    /// The panel is deselected but not touched otherwise; call
    /// [`init`](Self::init) before drawing.
    pub fn new(spi: SPI, dc: DC, mut cs: CS, rst: RST, config: &PanelConfig) -> Self {
        cs.set_high();
        Self {
            spi,
            dc,
            cs,
            rst,
            geometry: config.geometry(),
            options: config.init_options(),
            initialized: false,
        }
    }

    /// Reset the panel and run the power-on sequence
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), PanelError> {
        self.initialized = false;
        self.cs.set_high();

        self.rst.set_low();
        delay.delay_ms(RESET_PULSE_MS);
        self.rst.set_high();
        delay.delay_ms(RESET_PULSE_MS);

        for step in init_sequence(self.options) {
            self.write_command(step.command.code())?;
            if !step.params.is_empty() {
                self.write_data(&step.params)?;
            }
            if step.delay_ms > 0 {
                delay.delay_ms(step.delay_ms);
            }
        }

        self.initialized = true;
        info!(
            "st7735: initialized, madctl={:#x} inverted={}",
            self.options.madctl,
            self.options.inverted
        );
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn geometry(&self) -> PanelGeometry {
        self.geometry
    }

    /// Send a single command byte (DC low)
    pub fn send_command(&mut self, command: u8) -> Result<(), PanelError> {
        self.ensure_ready()?;
        self.write_command(command)
    }

    /// Send parameter or pixel bytes (DC high)
    pub fn send_data(&mut self, data: &[u8]) -> Result<(), PanelError> {
        self.ensure_ready()?;
        self.write_data(data)
    }

    /// Set the controller address window (CASET/RASET)
    ///
    /// Coordinates are inclusive panel-space; the variant offset is applied
    /// and `x1`/`y1` are clamped to the visible area. RAMWR/RAMRD is left
    /// to the caller.
    pub fn set_address_window(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> Result<Window, PanelError> {
        self.ensure_ready()?;
        let window = self
            .geometry
            .window(x0, y0, x1, y1)
            .ok_or(PanelError::OutOfBounds)?;
        self.select_window(&window)?;
        Ok(window)
    }

    /// Fill a rectangle with one colour, clamped to the panel
    pub fn fill(&mut self, rect: Rect, color: Rgb565) -> Result<(), PanelError> {
        self.ensure_ready()?;
        let window = self.window_for(rect)?;
        let raw = color.into_storage();
        self.stream_pixels(&window, core::iter::repeat(raw).take(window.pixel_count()))
    }

    /// Blit row-major pixels into a rectangle, clipped to the panel
    ///
    /// `pixels` must hold at least `rect.width * rect.height` entries; rows
    /// and columns that fall off the panel are skipped.
    pub fn blit(&mut self, rect: Rect, pixels: &[Rgb565]) -> Result<(), PanelError> {
        self.ensure_ready()?;
        if pixels.len() < rect.area() {
            return Err(PanelError::BufferSize);
        }
        let window = self.window_for(rect)?;

        let stride = rect.width as usize;
        let visible = window.width() as usize;
        let rows = window.height() as usize;
        let source = (0..rows).flat_map(move |row| {
            let start = row * stride;
            pixels[start..start + visible].iter().map(|p| p.into_storage())
        });
        self.stream_pixels(&window, source)
    }

    /// Read back pixels through RAMRD
    ///
    /// `rect` must lie fully on the panel. The controller returns 18-bit
    /// colour; the low bits are dropped on the way back to RGB565.
    pub fn read(&mut self, rect: Rect, out: &mut [Rgb565]) -> Result<(), PanelError> {
        self.ensure_ready()?;
        if rect.is_empty()
            || rect.right() > self.geometry.width
            || rect.bottom() > self.geometry.height
        {
            return Err(PanelError::OutOfBounds);
        }
        if out.len() < rect.area() {
            return Err(PanelError::BufferSize);
        }
        let window = self.window_for(rect)?;
        self.select_window(&window)?;

        // RAMRD and the read-out form one selected transaction
        self.dc.set_low();
        self.cs.set_low();
        let result = self.read_stream(&mut out[..rect.area()]);
        self.cs.set_high();
        result
    }

    /// Turn the display output on or off (GRAM is retained)
    pub fn set_display_on(&mut self, on: bool) -> Result<(), PanelError> {
        let command = if on { Command::DispOn } else { Command::DispOff };
        self.send_command(command.code())
    }

    /// Switch colour inversion
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), PanelError> {
        let command = if inverted {
            Command::InvOn
        } else {
            Command::InvOff
        };
        self.send_command(command.code())?;
        self.options.inverted = inverted;
        Ok(())
    }

    /// Enter or leave sleep mode
    pub fn sleep<D: DelayNs>(&mut self, asleep: bool, delay: &mut D) -> Result<(), PanelError> {
        let command = if asleep {
            Command::SlpIn
        } else {
            Command::SlpOut
        };
        self.send_command(command.code())?;
        delay.delay_ms(SLEEP_SETTLE_MS);
        Ok(())
    }

    /// Release the bus and pins
    pub fn release(self) -> (SPI, DC, CS, RST) {
        (self.spi, self.dc, self.cs, self.rst)
    }

    fn ensure_ready(&self) -> Result<(), PanelError> {
        if self.initialized {
            Ok(())
        } else {
            warn!("st7735: draw before init, skipped");
            Err(PanelError::NotInitialized)
        }
    }

    fn window_for(&self, rect: Rect) -> Result<Window, PanelError> {
        self.geometry
            .window_for_rect(rect.x, rect.y, rect.width, rect.height)
            .ok_or(PanelError::OutOfBounds)
    }

    fn select_window(&mut self, window: &Window) -> Result<(), PanelError> {
        self.write_command(Command::Caset.code())?;
        self.write_data(&window.caset())?;
        self.write_command(Command::Raset.code())?;
        self.write_data(&window.raset())
    }

    fn write_command(&mut self, command: u8) -> Result<(), PanelError> {
        self.transaction(false, &[command])
    }

    fn write_data(&mut self, data: &[u8]) -> Result<(), PanelError> {
        self.transaction(true, data)
    }

    fn transaction(&mut self, data: bool, bytes: &[u8]) -> Result<(), PanelError> {
        self.dc.set_state(data);
        self.cs.set_low();
        let result = self.spi.write(bytes).and_then(|_| self.spi.flush());
        self.cs.set_high();
        result.map_err(|_| PanelError::Bus)
    }

    /// RAMWR followed by the pixel stream, chunked through a stack buffer
    fn stream_pixels(
        &mut self,
        window: &Window,
        pixels: impl Iterator<Item = u16>,
    ) -> Result<(), PanelError> {
        self.select_window(window)?;
        self.write_command(Command::Ramwr.code())?;

        self.dc.set_high();
        self.cs.set_low();
        let result = self.write_chunks(pixels);
        self.cs.set_high();
        result
    }

    fn write_chunks(&mut self, mut pixels: impl Iterator<Item = u16>) -> Result<(), PanelError> {
        let mut buf = [0u8; CHUNK_PIXELS * WRITE_BYTES_PER_PIXEL];
        loop {
            let len = pixel::encode_run(pixels.by_ref().take(CHUNK_PIXELS), &mut buf);
            if len == 0 {
                break;
            }
            self.spi.write(&buf[..len]).map_err(|_| PanelError::Bus)?;
        }
        self.spi.flush().map_err(|_| PanelError::Bus)
    }

    fn read_stream(&mut self, out: &mut [Rgb565]) -> Result<(), PanelError> {
        self.spi
            .write(&[Command::Ramrd.code()])
            .and_then(|_| self.spi.flush())
            .map_err(|_| PanelError::Bus)?;
        self.dc.set_high();

        let mut dummy = [0u8; pixel::READ_DUMMY_BYTES];
        self.spi.read(&mut dummy).map_err(|_| PanelError::Bus)?;

        let mut buf = [0u8; CHUNK_PIXELS * READ_BYTES_PER_PIXEL];
        for chunk in out.chunks_mut(CHUNK_PIXELS) {
            let bytes = &mut buf[..chunk.len() * READ_BYTES_PER_PIXEL];
            self.spi.read(bytes).map_err(|_| PanelError::Bus)?;
            for (px, rgb) in chunk.iter_mut().zip(bytes.chunks_exact(READ_BYTES_PER_PIXEL)) {
                *px = rgb565(pixel::from_rgb666([rgb[0], rgb[1], rgb[2]]));
            }
        }
        debug!("st7735: read {} pixels", out.len());
        Ok(())
    }
}
