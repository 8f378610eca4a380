//! Sonata memory map and clocking
//!
//! Base addresses of every block the harness drives. The UART, I2C and
//! SPI instances sit at a fixed stride from their block base.

use sonata_hal::{I2cId, SpiId, UartId};

/// System clock feeding the CPU and every peripheral
pub const SYSCLK_HZ: u32 = 40_000_000;

/// All four GPIO instances
pub const GPIO_BASE: usize = 0x8000_0000;

/// Pin multiplexer select registers
pub const PINMUX_BASE: usize = 0x8000_5000;

const UART_BASE: usize = 0x8010_0000;
const I2C_BASE: usize = 0x8020_0000;
const SPI_BASE: usize = 0x8030_0000;
const INSTANCE_STRIDE: usize = 0x1000;

/// UART0, reserved for the console
pub const CONSOLE_UART_BASE: usize = UART_BASE;

/// Register block of a UART under test
pub const fn uart_base(id: UartId) -> usize {
    UART_BASE + id.number() as usize * INSTANCE_STRIDE
}

pub const fn i2c_base(id: I2cId) -> usize {
    I2C_BASE + id.index() * INSTANCE_STRIDE
}

/// Register block of a Pmod SPI controller
pub const fn spi_base(id: SpiId) -> usize {
    SPI_BASE + id.number() as usize * INSTANCE_STRIDE
}
