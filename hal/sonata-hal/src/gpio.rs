//! GPIO abstractions
//!
//! Sonata exposes four 32-bit GPIO instances (general purpose, Raspberry Pi
//! HAT header, Arduino shield header, Pmod headers). A single line is named
//! by its instance and bit.

/// Number of bits in one GPIO instance
pub const GPIO_BITS: u8 = 32;

/// One of the four GPIO instances, in register order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum GpioInstance {
    General = 0,
    RaspberryPiHat = 1,
    ArduinoShield = 2,
    Pmod = 3,
}

impl GpioInstance {
    /// Get the instance as an index into the GPIO register array
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Create an instance from its index
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(GpioInstance::General),
            1 => Some(GpioInstance::RaspberryPiHat),
            2 => Some(GpioInstance::ArduinoShield),
            3 => Some(GpioInstance::Pmod),
            _ => None,
        }
    }
}

/// A single GPIO line, identified by its instance and bit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GpioPin {
    /// Which GPIO instance the line belongs to
    pub instance: GpioInstance,
    /// Bit within the instance (0-31)
    pub bit: u8,
}

impl GpioPin {
    /// Create a pin reference
    pub const fn new(instance: GpioInstance, bit: u8) -> Self {
        Self { instance, bit }
    }

    /// Check the bit lies within a 32-bit instance
    pub const fn is_valid(&self) -> bool {
        self.bit < GPIO_BITS
    }

    /// Bit mask of this line within its instance register
    ///
    /// Out of range bits produce an empty mask rather than overflowing.
    pub const fn mask(&self) -> u32 {
        if self.is_valid() {
            1 << self.bit
        } else {
            0
        }
    }
}

/// The full GPIO block
///
/// Implementations map each call onto the output, output-enable and
/// debounced-input registers of the addressed instance. Calls only touch
/// the bit named by the pin.
pub trait GpioBank {
    /// Drive the output register bit for `pin`
    fn set_output(&mut self, pin: GpioPin, high: bool);

    /// Enable or disable the output driver for `pin`
    fn set_output_enable(&mut self, pin: GpioPin, enable: bool);

    /// Read the debounced input register bit for `pin`
    fn debounced_input(&mut self, pin: GpioPin) -> bool;

    /// Read the raw (undebounced) input register bit for `pin`
    fn input(&mut self, pin: GpioPin) -> bool {
        self.debounced_input(pin)
    }
}
