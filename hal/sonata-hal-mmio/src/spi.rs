//! Sonata SPI host
//!
//! A transfer is started by writing the byte count to START with the
//! transmit and/or receive side enabled in CONTROL. There is no hardware
//! chip select on the Pmod controllers; callers drive CS as GPIO.

use core::fmt;

use embedded_hal::spi::ErrorKind;
use sonata_hal::spi::{Phase, Polarity, SpiConfig};
use sonata_hal::SpiBus;

use crate::reg::Registers;

const CFG: usize = 0x0C;
const CONTROL: usize = 0x10;
const STATUS: usize = 0x14;
const START: usize = 0x18;
const RX_FIFO: usize = 0x1C;
const TX_FIFO: usize = 0x20;

const CFG_CPOL: u32 = 1 << 31;
const CFG_CPHA: u32 = 1 << 30;
const CFG_MSB_FIRST: u32 = 1 << 29;

const CONTROL_TX_CLEAR: u32 = 1 << 0;
const CONTROL_RX_CLEAR: u32 = 1 << 1;
const CONTROL_TX_ENABLE: u32 = 1 << 2;
const CONTROL_RX_ENABLE: u32 = 1 << 3;

const STATUS_TX_FULL: u32 = 1 << 16;
const STATUS_RX_EMPTY: u32 = 1 << 17;
const STATUS_IDLE: u32 = 1 << 18;

/// Largest byte count one START write can request
const MAX_TRANSFER: usize = 0x7FF;

/// Status reads before a transfer is abandoned
pub const POLL_LIMIT: u32 = 100_000;

/// Error from SPI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiError {
    /// Controller never went idle or never produced data
    Timeout,
}

impl fmt::Display for SpiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpiError::Timeout => f.write_str("transfer timed out"),
        }
    }
}

impl embedded_hal::spi::Error for SpiError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// CFG register value for `config`
pub fn cfg_word(config: &SpiConfig) -> u32 {
    let mut cfg = u32::from(config.half_clock_period);
    if config.polarity == Polarity::IdleHigh {
        cfg |= CFG_CPOL;
    }
    if config.phase == Phase::CaptureOnSecondTransition {
        cfg |= CFG_CPHA;
    }
    if config.msb_first {
        cfg |= CFG_MSB_FIRST;
    }
    cfg
}

pub struct SonataSpi {
    regs: Registers,
}

impl SonataSpi {
    /// # Safety
    ///
    /// `base` must be one SPI host's register block, owned exclusively by
    /// the returned value.
    pub unsafe fn new(base: usize) -> Self {
        Self {
            regs: Registers::new(base),
        }
    }

    /// Set clock mode and speed, clear both FIFOs
    pub fn init(&mut self, config: &SpiConfig) {
        self.regs.write(CONTROL, CONTROL_TX_CLEAR | CONTROL_RX_CLEAR);
        self.regs.write(CFG, cfg_word(config));
    }

    fn start(&mut self, control: u32, len: usize) {
        self.regs.write(CONTROL, control);
        self.regs.write(START, len as u32);
    }
}

impl SpiBus for SonataSpi {
    type Error = SpiError;

    fn write(&mut self, data: &[u8]) -> Result<(), SpiError> {
        for chunk in data.chunks(MAX_TRANSFER) {
            self.wait_idle()?;
            self.start(CONTROL_TX_ENABLE, chunk.len());
            for &byte in chunk {
                if !self
                    .regs
                    .poll(STATUS, POLL_LIMIT, |status| status & STATUS_TX_FULL == 0)
                {
                    return Err(SpiError::Timeout);
                }
                self.regs.write(TX_FIFO, u32::from(byte));
            }
        }
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), SpiError> {
        for chunk in buf.chunks_mut(MAX_TRANSFER) {
            self.wait_idle()?;
            self.start(CONTROL_RX_ENABLE, chunk.len());
            for byte in chunk.iter_mut() {
                if !self
                    .regs
                    .poll(STATUS, POLL_LIMIT, |status| status & STATUS_RX_EMPTY == 0)
                {
                    return Err(SpiError::Timeout);
                }
                *byte = self.regs.read(RX_FIFO) as u8;
            }
        }
        Ok(())
    }

    fn wait_idle(&mut self) -> Result<(), SpiError> {
        if self
            .regs
            .poll(STATUS, POLL_LIMIT, |status| status & STATUS_IDLE != 0)
        {
            Ok(())
        } else {
            Err(SpiError::Timeout)
        }
    }
}
