//! Register-level Sonata drivers for the pinmux check harness
//!
//! Implements the `sonata-hal` traits directly on the Sonata memory map:
//!
//! - GPIO (all four instances in one block)
//! - OpenTitan UART
//! - OpenTitan I2C host
//! - Sonata SPI host
//! - Pin multiplexer
//!
//! Every driver is constructed from a base address with an `unsafe`
//! constructor; the firmware's board module owns the addresses. Polling
//! loops on the bus drivers are bounded and report a timeout rather than
//! hang.

#![no_std]

pub mod gpio;
pub mod i2c;
pub mod pinmux;
pub mod reg;
pub mod spi;
pub mod uart;

pub use gpio::SonataGpio;
pub use i2c::{I2cError, SonataI2c};
pub use pinmux::SonataPinmux;
pub use spi::{SonataSpi, SpiError};
pub use uart::{SonataUart, SonataUartRx, SonataUartTx, UartError};
