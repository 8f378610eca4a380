//! SPI bus abstractions
//!
//! Provides traits for SPI host operations that can be implemented
//! by chip-specific HALs. Chip select is not part of the bus; the harness
//! drives it through a GPIO line so it can be muxed like any other pin.

/// SPI host controllers that may be placed under test
///
/// SPI0-2 drive the on-board flash, LCD and Ethernet controller and are
/// deliberately not representable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SpiId {
    Spi3 = 3,
    Spi4 = 4,
}

impl SpiId {
    /// Number of testable SPI controllers
    pub const COUNT: usize = 2;

    /// Hardware instance number
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Index into an array of the testable controllers (0-1)
    pub const fn index(self) -> usize {
        self as usize - 3
    }
}

/// SPI bus master
///
/// Provides basic SPI transfer operations for communicating with
/// peripheral devices.
pub trait SpiBus {
    /// Error type for SPI operations
    type Error;

    /// Write data without reading
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data (writes zeros)
    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Block until the controller has finished every queued transfer
    fn wait_idle(&mut self) -> Result<(), Self::Error>;
}

/// SPI configuration
#[derive(Debug, Clone, Copy)]
pub struct SpiConfig {
    /// Clock polarity
    pub polarity: Polarity,
    /// Clock phase
    pub phase: Phase,
    /// Send the most significant bit first
    pub msb_first: bool,
    /// Half-period of SCK in system clock cycles, minus one
    pub half_clock_period: u16,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            polarity: Polarity::IdleLow,
            phase: Phase::CaptureOnFirstTransition,
            msb_first: true,
            half_clock_period: 0,
        }
    }
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}
