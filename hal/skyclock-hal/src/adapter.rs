//! Adapters from `embedded-hal` 1.0 to the Skyclock traits
//!
//! Chip HALs such as embassy-rp implement the `embedded-hal` blocking
//! traits. Wrapping them here lets the drivers stay generic over the
//! local traits while the firmware passes real peripherals.

use embedded_hal::digital::OutputPin as EhOutputPin;
use embedded_hal::spi::SpiBus as EhSpiBus;

use crate::gpio::OutputPin;
use crate::spi::SpiBus;

/// Output pin backed by an `embedded-hal` output
///
/// Tracks the last written level so `is_set_high` works without
/// requiring `StatefulOutputPin`.
pub struct HalPin<P> {
    pin: P,
    high: bool,
}

impl<P: EhOutputPin> HalPin<P> {
    /// Wrap a pin, forcing it to a known level
    pub fn new(mut pin: P, initial_high: bool) -> Self {
        // Pin errors are infallible on supported chips
        let _ = if initial_high {
            pin.set_high()
        } else {
            pin.set_low()
        };
        Self {
            pin,
            high: initial_high,
        }
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: EhOutputPin> OutputPin for HalPin<P> {
    fn set_high(&mut self) {
        let _ = self.pin.set_high();
        self.high = true;
    }

    fn set_low(&mut self) {
        let _ = self.pin.set_low();
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// SPI bus backed by an `embedded-hal` blocking bus
pub struct HalSpi<S> {
    bus: S,
}

impl<S: EhSpiBus> HalSpi<S> {
    /// Wrap a bus
    pub fn new(bus: S) -> Self {
        Self { bus }
    }

    /// Release the wrapped bus
    pub fn into_inner(self) -> S {
        self.bus
    }
}

impl<S: EhSpiBus> SpiBus for HalSpi<S> {
    type Error = S::Error;

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        self.bus.transfer(read, write)
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(data)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.read(buf)
    }

    fn transfer_in_place(&mut self, data: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.transfer_in_place(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.bus.flush()
    }
}
