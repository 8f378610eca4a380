//! OpenTitan UART as integrated on Sonata
//!
//! Baud rate is set through a 16-bit NCO: `nco = baud * 2^20 / f_clk`.

use core::fmt;

use sonata_hal::uart::UartConfig;
use sonata_hal::{UartRx, UartTx};

use crate::reg::Registers;

const INTR_STATE: usize = 0x00;
const CTRL: usize = 0x10;
const STATUS: usize = 0x14;
const RDATA: usize = 0x18;
const WDATA: usize = 0x1C;
const FIFO_CTRL: usize = 0x20;

const INTR_RX_OVERFLOW: u32 = 1 << 3;
const INTR_RX_FRAME_ERR: u32 = 1 << 4;
const INTR_RX_PARITY_ERR: u32 = 1 << 7;

const CTRL_TX: u32 = 1 << 0;
const CTRL_RX: u32 = 1 << 1;
const CTRL_NCO_SHIFT: u32 = 16;

const STATUS_TXFULL: u32 = 1 << 0;
const STATUS_TXIDLE: u32 = 1 << 3;
const STATUS_RXEMPTY: u32 = 1 << 5;

const FIFO_CTRL_RXRST: u32 = 1 << 0;
const FIFO_CTRL_TXRST: u32 = 1 << 1;

/// Error from UART operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartError {
    /// Receive FIFO overflowed and bytes were lost
    Overrun,
    /// Framing error
    Framing,
    /// Parity error
    Parity,
}

impl fmt::Display for UartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UartError::Overrun => f.write_str("receive overrun"),
            UartError::Framing => f.write_str("framing error"),
            UartError::Parity => f.write_str("parity error"),
        }
    }
}

/// NCO value for `baudrate` at `clock_hz`
///
/// Saturates at the 16-bit field width.
pub fn nco_for(baudrate: u32, clock_hz: u32) -> u16 {
    if clock_hz == 0 {
        return 0;
    }
    let nco = (u64::from(baudrate) << 20) / u64::from(clock_hz);
    u16::try_from(nco).unwrap_or(u16::MAX)
}

pub struct SonataUart {
    regs: Registers,
}

impl SonataUart {
    /// # Safety
    ///
    /// `base` must be one UART's register block, owned exclusively by the
    /// returned value.
    pub unsafe fn new(base: usize) -> Self {
        Self {
            regs: Registers::new(base),
        }
    }

    /// Set the baud rate, clear both FIFOs and enable TX and RX
    pub fn init(&mut self, config: &UartConfig, clock_hz: u32) {
        let nco = u32::from(nco_for(config.baudrate, clock_hz));
        self.regs.write(FIFO_CTRL, FIFO_CTRL_RXRST | FIFO_CTRL_TXRST);
        self.regs.write(INTR_STATE, u32::MAX);
        self.regs
            .write(CTRL, (nco << CTRL_NCO_SHIFT) | CTRL_TX | CTRL_RX);
    }

    /// Check if a received byte is waiting
    pub fn has_data(&self) -> bool {
        self.regs.read(STATUS) & STATUS_RXEMPTY == 0
    }

    /// Split into transmit and receive halves
    ///
    /// The halves touch disjoint data registers, so the console can be
    /// written by the reporter while the operator prompt reads it.
    pub fn split(self) -> (SonataUartTx, SonataUartRx) {
        let base = self.regs.base();
        // SAFETY: TX only writes WDATA and reads STATUS; RX only reads
        // RDATA and STATUS and clears receive error bits
        unsafe {
            (
                SonataUartTx {
                    regs: Registers::new(base),
                },
                SonataUartRx {
                    regs: Registers::new(base),
                },
            )
        }
    }
}

/// Transmit half of a split UART
pub struct SonataUartTx {
    regs: Registers,
}

/// Receive half of a split UART
pub struct SonataUartRx {
    regs: Registers,
}

fn write_byte(regs: &mut Registers, byte: u8) {
    while regs.read(STATUS) & STATUS_TXFULL != 0 {}
    regs.write(WDATA, u32::from(byte));
}

fn flush(regs: &Registers) {
    while regs.read(STATUS) & STATUS_TXIDLE == 0 {}
}

fn take_error(regs: &mut Registers) -> Option<UartError> {
    let state = regs.read(INTR_STATE);
    let error = if state & INTR_RX_OVERFLOW != 0 {
        UartError::Overrun
    } else if state & INTR_RX_FRAME_ERR != 0 {
        UartError::Framing
    } else if state & INTR_RX_PARITY_ERR != 0 {
        UartError::Parity
    } else {
        return None;
    };
    // Write-one-to-clear
    regs.write(
        INTR_STATE,
        INTR_RX_OVERFLOW | INTR_RX_FRAME_ERR | INTR_RX_PARITY_ERR,
    );
    Some(error)
}

fn try_read(regs: &mut Registers) -> Result<Option<u8>, UartError> {
    if let Some(error) = take_error(regs) {
        return Err(error);
    }
    if regs.read(STATUS) & STATUS_RXEMPTY != 0 {
        return Ok(None);
    }
    Ok(Some(regs.read(RDATA) as u8))
}

impl UartTx for SonataUart {
    type Error = UartError;

    fn write_byte(&mut self, byte: u8) -> Result<(), UartError> {
        write_byte(&mut self.regs, byte);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), UartError> {
        flush(&self.regs);
        Ok(())
    }
}

impl UartRx for SonataUart {
    type Error = UartError;

    fn try_read_byte(&mut self) -> Result<Option<u8>, UartError> {
        try_read(&mut self.regs)
    }
}

impl UartTx for SonataUartTx {
    type Error = UartError;

    fn write_byte(&mut self, byte: u8) -> Result<(), UartError> {
        write_byte(&mut self.regs, byte);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), UartError> {
        flush(&self.regs);
        Ok(())
    }
}

impl UartRx for SonataUartRx {
    type Error = UartError;

    fn try_read_byte(&mut self) -> Result<Option<u8>, UartError> {
        try_read(&mut self.regs)
    }
}

/// Console output; bytes are written blocking
impl fmt::Write for SonataUartTx {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_blocking(s.as_bytes()).map_err(|_| fmt::Error)
    }
}
