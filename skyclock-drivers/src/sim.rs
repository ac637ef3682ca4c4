//! In-memory ST7735 bus simulator
//!
//! Decodes the byte stream the transport sends, using the DC line to tell
//! commands from data, and keeps a 132x162 GRAM. CASET, RASET, RAMWR and
//! RAMRD are implemented; every other command is only recorded.
//!
//! All handles share one state, so a test keeps the [`SimPanel`] to
//! inspect pixels while the driver owns the bus and pins.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use skyclock_core::config::PanelConfig;
use skyclock_core::layout::Rect;
use skyclock_hal::{OutputPin, SpiBus};
use skyclock_protocol::pixel::{from_wire, to_rgb666};
use skyclock_protocol::{Command, PanelVariant};

use crate::panel::St7735;

/// Controller GRAM width
pub const GRAM_WIDTH: u16 = 132;

/// Controller GRAM height
pub const GRAM_HEIGHT: u16 = 162;

/// Injected bus failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimFault;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Idle,
    Caset,
    Raset,
    Write,
    Read,
}

struct SimState {
    variant: PanelVariant,
    gram: Vec<u16>,
    mode: Mode,
    params: Vec<u8>,
    columns: (u16, u16),
    rows: (u16, u16),
    cursor: (u16, u16),
    pending: Option<u8>,
    read_queue: VecDeque<u8>,
    dc_high: bool,
    cs_low: bool,
    faulty: bool,
    reset_pulses: usize,
    bytes_written: usize,
    pixel_bytes: usize,
    commands: Vec<u8>,
}

impl SimState {
    fn new(variant: PanelVariant) -> Self {
        Self {
            variant,
            gram: std::vec![0; GRAM_WIDTH as usize * GRAM_HEIGHT as usize],
            mode: Mode::Idle,
            params: Vec::new(),
            columns: (0, GRAM_WIDTH - 1),
            rows: (0, GRAM_HEIGHT - 1),
            cursor: (0, 0),
            pending: None,
            read_queue: VecDeque::new(),
            dc_high: false,
            cs_low: false,
            faulty: false,
            reset_pulses: 0,
            bytes_written: 0,
            pixel_bytes: 0,
            commands: Vec::new(),
        }
    }

    fn index(x: u16, y: u16) -> Option<usize> {
        if x < GRAM_WIDTH && y < GRAM_HEIGHT {
            Some(y as usize * GRAM_WIDTH as usize + x as usize)
        } else {
            None
        }
    }

    fn byte(&mut self, byte: u8) {
        self.bytes_written += 1;
        if self.dc_high {
            self.data(byte);
        } else {
            self.command(byte);
        }
    }

    fn command(&mut self, code: u8) {
        self.commands.push(code);
        self.params.clear();
        self.pending = None;
        self.read_queue.clear();
        self.mode = if code == Command::Caset.code() {
            Mode::Caset
        } else if code == Command::Raset.code() {
            Mode::Raset
        } else if code == Command::Ramwr.code() {
            self.cursor = (self.columns.0, self.rows.0);
            Mode::Write
        } else if code == Command::Ramrd.code() {
            self.queue_readback();
            Mode::Read
        } else {
            Mode::Idle
        };
    }

    fn data(&mut self, byte: u8) {
        match self.mode {
            Mode::Caset | Mode::Raset => {
                self.params.push(byte);
                if self.params.len() == 4 {
                    let start = u16::from_be_bytes([self.params[0], self.params[1]]);
                    let end = u16::from_be_bytes([self.params[2], self.params[3]]);
                    if self.mode == Mode::Caset {
                        self.columns = (start, end);
                    } else {
                        self.rows = (start, end);
                    }
                    self.mode = Mode::Idle;
                }
            }
            Mode::Write => {
                self.pixel_bytes += 1;
                match self.pending.take() {
                    None => self.pending = Some(byte),
                    Some(high) => self.write_pixel(from_wire([high, byte])),
                }
            }
            Mode::Idle | Mode::Read => {}
        }
    }

    fn write_pixel(&mut self, raw: u16) {
        let (x, y) = self.cursor;
        if let Some(i) = Self::index(x, y) {
            self.gram[i] = raw;
        }
        self.cursor = self.advance(x, y);
    }

    fn advance(&self, x: u16, y: u16) -> (u16, u16) {
        if x >= self.columns.1 {
            let y = if y >= self.rows.1 { self.rows.0 } else { y + 1 };
            (self.columns.0, y)
        } else {
            (x + 1, y)
        }
    }

    fn queue_readback(&mut self) {
        self.read_queue.clear();
        // Dummy byte first
        self.read_queue.push_back(0xFF);
        for y in self.rows.0..=self.rows.1 {
            for x in self.columns.0..=self.columns.1 {
                let raw = Self::index(x, y).map(|i| self.gram[i]).unwrap_or(0);
                self.read_queue.extend(to_rgb666(raw));
            }
        }
    }
}

/// Simulated panel
#[derive(Clone)]
pub struct SimPanel {
    state: Rc<RefCell<SimState>>,
}

impl SimPanel {
    pub fn new(variant: PanelVariant) -> Self {
        Self {
            state: Rc::new(RefCell::new(SimState::new(variant))),
        }
    }

    pub fn variant(&self) -> PanelVariant {
        self.state.borrow().variant
    }

    pub fn bus(&self) -> SimBus {
        SimBus {
            state: self.state.clone(),
        }
    }

    pub fn pin(&self, role: PinRole) -> SimPin {
        SimPin {
            role,
            high: false,
            state: self.state.clone(),
        }
    }

    /// Driver wired to this simulator
    pub fn driver(&self, config: &PanelConfig) -> St7735<SimBus, SimPin, SimPin, SimPin> {
        St7735::new(
            self.bus(),
            self.pin(PinRole::Dc),
            self.pin(PinRole::Cs),
            self.pin(PinRole::Reset),
            config,
        )
    }

    /// Pixel at visible panel coordinates
    pub fn pixel(&self, x: u16, y: u16) -> u16 {
        let (dx, dy) = self.variant().offset();
        self.gram_pixel(x + dx, y + dy)
    }

    /// Pixel at raw GRAM coordinates
    pub fn gram_pixel(&self, x: u16, y: u16) -> u16 {
        let state = self.state.borrow();
        SimState::index(x, y).map(|i| state.gram[i]).unwrap_or(0)
    }

    /// Poke a pixel at visible coordinates without bus traffic
    pub fn set_pixel(&self, x: u16, y: u16, raw: u16) {
        let (dx, dy) = self.variant().offset();
        let mut state = self.state.borrow_mut();
        if let Some(i) = SimState::index(x + dx, y + dy) {
            state.gram[i] = raw;
        }
    }

    /// Order-sensitive hash of the visible pixels in `rect`
    pub fn checksum(&self, rect: Rect) -> u32 {
        let mut hash: u32 = 0x811C_9DC5;
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                let raw = self.pixel(x, y);
                for byte in raw.to_be_bytes() {
                    hash = (hash ^ byte as u32).wrapping_mul(0x0100_0193);
                }
            }
        }
        hash
    }

    /// Every byte clocked out while selected, commands included
    pub fn bytes_written(&self) -> usize {
        self.state.borrow().bytes_written
    }

    /// Bytes that landed in a RAMWR stream
    pub fn pixel_bytes_written(&self) -> usize {
        self.state.borrow().pixel_bytes
    }

    /// Command bytes received since the last counter reset
    pub fn commands(&self) -> Vec<u8> {
        self.state.borrow().commands.clone()
    }

    pub fn reset_counters(&self) {
        let mut state = self.state.borrow_mut();
        state.bytes_written = 0;
        state.pixel_bytes = 0;
        state.commands.clear();
    }

    pub fn reset_pulses(&self) -> usize {
        self.state.borrow().reset_pulses
    }

    pub fn column_window(&self) -> (u16, u16) {
        self.state.borrow().columns
    }

    pub fn row_window(&self) -> (u16, u16) {
        self.state.borrow().rows
    }

    pub fn cs_released(&self) -> bool {
        !self.state.borrow().cs_low
    }

    /// Make every subsequent bus transfer fail
    pub fn set_faulty(&self, faulty: bool) {
        self.state.borrow_mut().faulty = faulty;
    }
}

/// SPI side of the simulator
pub struct SimBus {
    state: Rc<RefCell<SimState>>,
}

impl SpiBus for SimBus {
    type Error = SimFault;

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        self.write(write)?;
        self.read(read)
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if state.faulty {
            return Err(SimFault);
        }
        if state.cs_low {
            for &byte in data {
                state.byte(byte);
            }
        }
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if state.faulty {
            return Err(SimFault);
        }
        let active = state.cs_low && state.mode == Mode::Read;
        for slot in buf.iter_mut() {
            *slot = if active {
                state.read_queue.pop_front().unwrap_or(0)
            } else {
                0
            };
        }
        Ok(())
    }

    fn transfer_in_place(&mut self, data: &mut [u8]) -> Result<(), Self::Error> {
        self.read(data)
    }
}

/// Which control line a [`SimPin`] drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinRole {
    Dc,
    Cs,
    Reset,
}

/// Control line of the simulator
pub struct SimPin {
    role: PinRole,
    high: bool,
    state: Rc<RefCell<SimState>>,
}

impl OutputPin for SimPin {
    fn set_high(&mut self) {
        let mut state = self.state.borrow_mut();
        match self.role {
            PinRole::Dc => state.dc_high = true,
            PinRole::Cs => {
                state.cs_low = false;
                state.pending = None;
            }
            PinRole::Reset => {
                if !self.high {
                    state.reset_pulses += 1;
                    state.mode = Mode::Idle;
                }
            }
        }
        self.high = true;
    }

    fn set_low(&mut self) {
        let mut state = self.state.borrow_mut();
        match self.role {
            PinRole::Dc => state.dc_high = false,
            PinRole::Cs => state.cs_low = true,
            PinRole::Reset => {}
        }
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Delay that only adds up the requested time
#[derive(Debug, Default)]
pub struct SimDelay {
    elapsed_ns: u64,
}

impl SimDelay {
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += ns as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(panel: &SimPanel) -> (SimBus, SimPin, SimPin) {
        let mut cs = panel.pin(PinRole::Cs);
        cs.set_low();
        (panel.bus(), panel.pin(PinRole::Dc), cs)
    }

    #[test]
    fn test_write_stream_wraps_inside_window() {
        let panel = SimPanel::new(PanelVariant::Black);
        let (mut bus, mut dc, _cs) = select(&panel);

        dc.set_low();
        bus.write(&[0x2A]).unwrap();
        dc.set_high();
        bus.write(&[0, 10, 0, 11]).unwrap();
        dc.set_low();
        bus.write(&[0x2B]).unwrap();
        dc.set_high();
        bus.write(&[0, 20, 0, 21]).unwrap();
        dc.set_low();
        bus.write(&[0x2C]).unwrap();
        dc.set_high();
        bus.write(&[0x00, 0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x04]).unwrap();

        assert_eq!(panel.pixel(10, 20), 1);
        assert_eq!(panel.pixel(11, 20), 2);
        assert_eq!(panel.pixel(10, 21), 3);
        assert_eq!(panel.pixel(11, 21), 4);
        assert_eq!(panel.commands(), std::vec![0x2A, 0x2B, 0x2C]);
    }

    #[test]
    fn test_deselected_bytes_ignored() {
        let panel = SimPanel::new(PanelVariant::Black);
        let mut bus = panel.bus();

        bus.write(&[0x01, 0x02]).unwrap();

        assert_eq!(panel.bytes_written(), 0);
        assert!(panel.commands().is_empty());
    }

    #[test]
    fn test_readback_starts_with_dummy() {
        let panel = SimPanel::new(PanelVariant::Black);
        panel.set_pixel(0, 0, 0xF800);
        let (mut bus, mut dc, _cs) = select(&panel);

        dc.set_low();
        bus.write(&[0x2A]).unwrap();
        dc.set_high();
        bus.write(&[0, 0, 0, 0]).unwrap();
        dc.set_low();
        bus.write(&[0x2B]).unwrap();
        dc.set_high();
        bus.write(&[0, 0, 0, 0]).unwrap();
        dc.set_low();
        bus.write(&[0x2E]).unwrap();
        dc.set_high();

        let mut buf = [0u8; 4];
        bus.read(&mut buf).unwrap();
        assert_eq!(buf, [0xFF, 0xF8, 0x00, 0x00]);
    }

    #[test]
    fn test_checksum_tracks_pixels() {
        let panel = SimPanel::new(PanelVariant::Green144);
        let rect = Rect::new(0, 0, 4, 4);
        let before = panel.checksum(rect);

        panel.set_pixel(3, 3, 0x1234);

        assert_ne!(panel.checksum(rect), before);
        let fresh = SimPanel::new(PanelVariant::Green144);
        assert_eq!(
            panel.checksum(Rect::new(8, 8, 4, 4)),
            fresh.checksum(Rect::new(8, 8, 4, 4))
        );
    }
}
