//! ST7735 command set
//!
//! Only the commands the display stack issues are listed.

/// ST7735 command byte (sent with DC low)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Command {
    /// Software reset
    SwReset = 0x01,
    /// Enter sleep mode
    SlpIn = 0x10,
    /// Exit sleep mode
    SlpOut = 0x11,
    /// Normal display mode on
    NorOn = 0x13,
    /// Display inversion off
    InvOff = 0x20,
    /// Display inversion on
    InvOn = 0x21,
    /// Display off
    DispOff = 0x28,
    /// Display on
    DispOn = 0x29,
    /// Column address set
    Caset = 0x2A,
    /// Row address set
    Raset = 0x2B,
    /// Memory write
    Ramwr = 0x2C,
    /// Memory read
    Ramrd = 0x2E,
    /// Memory data access control (orientation)
    Madctl = 0x36,
    /// Interface pixel format
    Colmod = 0x3A,
    /// Frame rate control, normal mode
    Frmctr1 = 0xB1,
    /// Frame rate control, idle mode
    Frmctr2 = 0xB2,
    /// Frame rate control, partial mode
    Frmctr3 = 0xB3,
    /// Display inversion control
    Invctr = 0xB4,
    /// Power control 1
    Pwctr1 = 0xC0,
    /// Power control 2
    Pwctr2 = 0xC1,
    /// Power control 3
    Pwctr3 = 0xC2,
    /// Power control 4
    Pwctr4 = 0xC3,
    /// Power control 5
    Pwctr5 = 0xC4,
    /// VCOM control 1
    Vmctr1 = 0xC5,
    /// Positive gamma correction
    Gmctrp1 = 0xE0,
    /// Negative gamma correction
    Gmctrn1 = 0xE1,
}

impl Command {
    /// Raw command byte
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Whether the command opens a pixel data stream
    pub const fn is_memory_access(self) -> bool {
        matches!(self, Command::Ramwr | Command::Ramrd)
    }
}

impl From<Command> for u8 {
    fn from(cmd: Command) -> Self {
        cmd.code()
    }
}

/// Interface pixel format parameter for 16 bits per pixel (RGB565)
pub const COLMOD_16BPP: u8 = 0x05;

/// MADCTL bits
pub mod madctl {
    /// Row address order (mirror Y)
    pub const MY: u8 = 0x80;
    /// Column address order (mirror X)
    pub const MX: u8 = 0x40;
    /// Row/column exchange
    pub const MV: u8 = 0x20;
    /// BGR colour filter order
    pub const BGR: u8 = 0x08;
    /// Orientation used by the clock: mirrored both ways, RGB order
    pub const DEFAULT: u8 = MY | MX;
}
