//! UART serial communication abstractions
//!
//! Byte-level, non-interrupt serial traits. The harness polls receive
//! FIFOs against its own deadline, so receiving never blocks.

/// UART instances that may be placed under test
///
/// UART0 carries the console and is deliberately not representable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum UartId {
    Uart1 = 1,
    Uart2 = 2,
    Uart3 = 3,
    Uart4 = 4,
}

impl UartId {
    /// Number of testable UARTs
    pub const COUNT: usize = 4;

    /// Hardware instance number (1-4)
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Index into an array of the testable UARTs (0-3)
    pub const fn index(self) -> usize {
        self as usize - 1
    }
}

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write a single byte, waiting for space in the transmit FIFO
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Write data to the UART
    ///
    /// Blocks until all data has been queued or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        for &byte in data {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    /// Wait until everything queued has left the transmitter
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Take one byte from the receive FIFO if one is waiting
    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error>;

    /// Discard everything currently in the receive FIFO
    ///
    /// Returns the number of bytes dropped.
    fn drain(&mut self) -> Result<usize, Self::Error> {
        let mut dropped = 0;
        while self.try_read_byte()?.is_some() {
            dropped += 1;
        }
        Ok(dropped)
    }
}

/// Combined UART interface
///
/// For UARTs that provide both TX and RX on a single peripheral.
pub trait Uart: UartTx + UartRx {}

// Blanket implementation
impl<T: UartTx + UartRx> Uart for T {}

/// UART configuration
#[derive(Debug, Clone, Copy)]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self { baudrate: 921_600 }
    }
}
