//! Sonata Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the pinmux check
//! harness drives. The check engine only ever sees these traits; the
//! register-level implementations live in `sonata-hal-mmio`, and the host
//! tests provide their own simulated boards.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  pinmux-check-firmware (entry point)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pinmux-check-core (runner, verifiers)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sonata-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sonata-hal-mmio (register access)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::GpioBank`] - The four 32-bit GPIO instances
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication
//! - [`i2c::I2cBus`] - I2C bus operations
//! - [`spi::SpiBus`] - SPI bus operations
//! - [`pinmux::Crossbar`] - Pin multiplexer select registers
//! - [`clock::Clock`] - Monotonic elapsed time

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;
pub mod i2c;
pub mod pinmux;
pub mod spi;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use clock::Clock;
pub use gpio::{GpioBank, GpioInstance, GpioPin};
pub use i2c::{I2cBus, I2cId};
pub use pinmux::{BlockInput, Crossbar, OutputPin, SELECT_LIMIT, SELECT_OFF};
pub use spi::{SpiBus, SpiId};
pub use uart::{Uart, UartId, UartRx, UartTx};
