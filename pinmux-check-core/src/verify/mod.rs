//! Peripheral round-trip verifiers
//!
//! One routine per test type. Each performs its round trip over the
//! crossbar as currently configured and reports the observation as
//! `Ok(())` (round trip succeeded) or the reason it did not.
//!
//! A failed round trip is an observation, not an error: bus NACKs,
//! timeouts and wrong data are exactly what an unmuxed path is expected
//! to produce. The runner compares the observation against the test's
//! expected result.

pub mod gpio;
pub mod i2c;
pub mod spi;
pub mod uart;

use core::fmt;

pub use gpio::gpio_write_read;
pub use i2c::bh1745_read_id;
pub use spi::sf3_read_jedec_id;
pub use uart::uart_send_receive;

/// Why a round trip did not succeed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CheckFailure {
    /// GPIO samples disagreed with the driven level
    GpioMismatch { mismatches: u32, samples: u32 },
    /// UART deadline passed before every byte came back
    Timeout { received: u32, expected: u32 },
    /// UART byte came back different from what was sent
    DataMismatch { index: u32, sent: u8, received: u8 },
    /// Driver reported an error (NACK, bus error, FIFO overrun)
    Bus,
    /// BH1745 answered with the wrong manufacturer ID
    I2cIdMismatch { read: u8 },
    /// Flash answered with the wrong JEDEC ID
    JedecIdMismatch { read: [u8; 3] },
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckFailure::GpioMismatch {
                mismatches,
                samples,
            } => write!(f, "{}/{} samples mismatched", mismatches, samples),
            CheckFailure::Timeout { received, expected } => {
                write!(f, "timed out after {}/{} bytes", received, expected)
            }
            CheckFailure::DataMismatch {
                index,
                sent,
                received,
            } => write!(
                f,
                "byte {} sent {:#04x} received {:#04x}",
                index, sent, received
            ),
            CheckFailure::Bus => f.write_str("bus error"),
            CheckFailure::I2cIdMismatch { read } => write!(f, "read ID {:#04x}", read),
            CheckFailure::JedecIdMismatch { read } => write!(
                f,
                "read JEDEC ID {:02x} {:02x} {:02x}",
                read[0], read[1], read[2]
            ),
        }
    }
}

/// Outcome of one verifier run
pub type Observation = Result<(), CheckFailure>;
