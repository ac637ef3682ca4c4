//! Power-on initialization sequence
//!
//! Register values follow the reference init for the 1.44" green-tab
//! module. Orientation and inversion come from configuration, so the
//! sequence is built at runtime rather than stored as one flat table.

use heapless::Vec;

use crate::command::{Command, COLMOD_16BPP};

/// Maximum parameter bytes for a single init command (gamma tables)
pub const MAX_INIT_PARAMS: usize = 16;

/// Maximum number of steps in the init sequence
pub const MAX_INIT_STEPS: usize = 24;

/// Hardware reset pulse width, held low and then high
pub const RESET_PULSE_MS: u32 = 100;

/// One command with its parameters and the settle time after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitStep {
    /// Command byte
    pub command: Command,
    /// Parameter bytes sent with DC high
    pub params: Vec<u8, MAX_INIT_PARAMS>,
    /// Delay after the step completes, in milliseconds
    pub delay_ms: u32,
}

impl InitStep {
    fn new(command: Command, params: &[u8], delay_ms: u32) -> Self {
        let mut buf = Vec::new();
        // Every table below fits MAX_INIT_PARAMS
        let _ = buf.extend_from_slice(params);
        Self {
            command,
            params: buf,
            delay_ms,
        }
    }
}

/// Runtime options folded into the sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InitOptions {
    /// MADCTL orientation byte
    pub madctl: u8,
    /// Invert colours (some modules ship with inverted glass)
    pub inverted: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            madctl: crate::command::madctl::DEFAULT,
            inverted: false,
        }
    }
}

const FRAME_RATE: [u8; 3] = [0x01, 0x2C, 0x2D];
const FRAME_RATE_PARTIAL: [u8; 6] = [0x01, 0x2C, 0x2D, 0x01, 0x2C, 0x2D];
const GAMMA_POSITIVE: [u8; 16] = [
    0x02, 0x1C, 0x07, 0x12, 0x37, 0x32, 0x29, 0x2D, 0x29, 0x25, 0x2B, 0x39, 0x00, 0x01, 0x03, 0x10,
];
const GAMMA_NEGATIVE: [u8; 16] = [
    0x03, 0x1D, 0x07, 0x06, 0x2E, 0x2C, 0x29, 0x2D, 0x2E, 0x2E, 0x37, 0x3F, 0x00, 0x00, 0x02, 0x10,
];

/// Build the init sequence for the given options
///
/// The sequence runs after the hardware reset pulse and leaves the panel
/// awake, in 16bpp mode, with the display on.
pub fn init_sequence(options: InitOptions) -> Vec<InitStep, MAX_INIT_STEPS> {
    let inversion = if options.inverted {
        Command::InvOn
    } else {
        Command::InvOff
    };

    let steps = [
        InitStep::new(Command::SwReset, &[], 150),
        InitStep::new(Command::SlpOut, &[], 150),
        InitStep::new(Command::Frmctr1, &FRAME_RATE, 0),
        InitStep::new(Command::Frmctr2, &FRAME_RATE, 0),
        InitStep::new(Command::Frmctr3, &FRAME_RATE_PARTIAL, 0),
        InitStep::new(Command::Invctr, &[0x07], 0),
        InitStep::new(Command::Pwctr1, &[0xA2, 0x02, 0x84], 0),
        InitStep::new(Command::Pwctr2, &[0xC5], 0),
        InitStep::new(Command::Pwctr3, &[0x0A, 0x00], 0),
        InitStep::new(Command::Pwctr4, &[0x8A, 0x2A], 0),
        InitStep::new(Command::Pwctr5, &[0x8A, 0xEE], 0),
        InitStep::new(Command::Vmctr1, &[0x0E], 0),
        InitStep::new(inversion, &[], 10),
        InitStep::new(Command::Madctl, &[options.madctl], 0),
        InitStep::new(Command::Colmod, &[COLMOD_16BPP], 10),
        InitStep::new(Command::Gmctrp1, &GAMMA_POSITIVE, 0),
        InitStep::new(Command::Gmctrn1, &GAMMA_NEGATIVE, 0),
        InitStep::new(Command::NorOn, &[], 10),
        InitStep::new(Command::DispOn, &[], 150),
    ];

    let mut seq = Vec::new();
    for step in steps {
        let _ = seq.push(step);
    }
    seq
}
