//! OpenTitan I2C host as integrated on Sonata
//!
//! Transactions are queued as format words on the FMT FIFO. Each word is
//! one byte with flags for START, STOP and read requests. The driver
//! waits for the host to go idle, then checks the NAK interrupt.

use core::fmt;

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
use sonata_hal::i2c::I2cConfig;
use sonata_hal::I2cBus;

use crate::reg::Registers;

const INTR_STATE: usize = 0x00;
const CTRL: usize = 0x10;
const STATUS: usize = 0x14;
const RDATA: usize = 0x18;
const FDATA: usize = 0x1C;
const FIFO_CTRL: usize = 0x20;
const TIMING0: usize = 0x3C;
const TIMING1: usize = 0x40;
const TIMING2: usize = 0x44;
const TIMING3: usize = 0x48;
const TIMING4: usize = 0x4C;

const INTR_NAK: u32 = 1 << 4;

const CTRL_ENABLE_HOST: u32 = 1 << 0;

const STATUS_FMTFULL: u32 = 1 << 0;
const STATUS_FMTEMPTY: u32 = 1 << 2;
const STATUS_HOSTIDLE: u32 = 1 << 3;
const STATUS_RXEMPTY: u32 = 1 << 5;

const FDATA_START: u32 = 1 << 8;
const FDATA_STOP: u32 = 1 << 9;
const FDATA_READ: u32 = 1 << 10;
const FDATA_READ_CONT: u32 = 1 << 11;

const FIFO_CTRL_RXRST: u32 = 1 << 0;
const FIFO_CTRL_FMTRST: u32 = 1 << 1;

/// Largest read one format word can request (a count of 0 means 256)
const MAX_READ_CHUNK: usize = 256;

/// Status reads before a transaction is abandoned
pub const POLL_LIMIT: u32 = 100_000;

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cError {
    /// Target did not acknowledge
    Nack,
    /// Host never went idle
    Timeout,
}

impl fmt::Display for I2cError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            I2cError::Nack => f.write_str("no acknowledge"),
            I2cError::Timeout => f.write_str("transaction timed out"),
        }
    }
}

impl embedded_hal::i2c::Error for I2cError {
    fn kind(&self) -> ErrorKind {
        match self {
            I2cError::Nack => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown),
            I2cError::Timeout => ErrorKind::Other,
        }
    }
}

/// Timing register values, in system clock cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I2cTiming {
    pub t_high: u16,
    pub t_low: u16,
    pub t_rise: u16,
    pub t_fall: u16,
    pub t_setup_start: u16,
    pub t_hold_start: u16,
    pub t_setup_data: u16,
    pub t_hold_data: u16,
    pub t_setup_stop: u16,
    pub t_buf: u16,
}

impl I2cTiming {
    /// Minimum I2C bus timings for the configured speed mode
    pub fn for_config(config: &I2cConfig, clock_hz: u32) -> Self {
        // Nanosecond minimums from the I2C specification
        let ns: [u32; 10] = if config.frequency > I2cConfig::STANDARD.frequency {
            [600, 1300, 300, 300, 600, 600, 100, 0, 600, 1300]
        } else {
            [4000, 4700, 1000, 300, 4700, 4000, 250, 0, 4000, 4700]
        };
        let cycles = ns.map(|t| cycles_for(t, clock_hz));
        Self {
            t_high: cycles[0],
            t_low: cycles[1],
            t_rise: cycles[2],
            t_fall: cycles[3],
            t_setup_start: cycles[4],
            t_hold_start: cycles[5],
            t_setup_data: cycles[6],
            // At least one cycle of data hold
            t_hold_data: cycles[7].max(1),
            t_setup_stop: cycles[8],
            t_buf: cycles[9],
        }
    }
}

/// Round `ns` up to whole cycles of `clock_hz`
fn cycles_for(ns: u32, clock_hz: u32) -> u16 {
    let cycles = (u64::from(ns) * u64::from(clock_hz)).div_ceil(1_000_000_000);
    u16::try_from(cycles).unwrap_or(u16::MAX)
}

fn pair(high: u16, low: u16) -> u32 {
    (u32::from(low) << 16) | u32::from(high)
}

pub struct SonataI2c {
    regs: Registers,
}

impl SonataI2c {
    /// # Safety
    ///
    /// `base` must be one I2C host's register block, owned exclusively by
    /// the returned value.
    pub unsafe fn new(base: usize) -> Self {
        Self {
            regs: Registers::new(base),
        }
    }

    /// Program bus timing, clear the FIFOs and enable host mode
    pub fn init(&mut self, config: &I2cConfig, clock_hz: u32) {
        let timing = I2cTiming::for_config(config, clock_hz);
        self.regs.write(CTRL, 0);
        self.regs.write(FIFO_CTRL, FIFO_CTRL_RXRST | FIFO_CTRL_FMTRST);
        self.regs.write(TIMING0, pair(timing.t_high, timing.t_low));
        self.regs.write(TIMING1, pair(timing.t_rise, timing.t_fall));
        self.regs
            .write(TIMING2, pair(timing.t_setup_start, timing.t_hold_start));
        self.regs
            .write(TIMING3, pair(timing.t_setup_data, timing.t_hold_data));
        self.regs.write(TIMING4, pair(timing.t_setup_stop, timing.t_buf));
        self.regs.write(INTR_STATE, u32::MAX);
        self.regs.write(CTRL, CTRL_ENABLE_HOST);
    }

    fn push_format(&mut self, word: u32) -> Result<(), I2cError> {
        if !self
            .regs
            .poll(STATUS, POLL_LIMIT, |status| status & STATUS_FMTFULL == 0)
        {
            return Err(I2cError::Timeout);
        }
        self.regs.write(FDATA, word);
        Ok(())
    }

    fn nak_pending(&self) -> bool {
        self.regs.read(INTR_STATE) & INTR_NAK != 0
    }

    /// Acknowledge a NAK and flush whatever was queued behind it
    fn clear_nak(&mut self) -> I2cError {
        self.regs.write(INTR_STATE, INTR_NAK);
        self.regs.write(FIFO_CTRL, FIFO_CTRL_RXRST | FIFO_CTRL_FMTRST);
        I2cError::Nack
    }

    fn wait_done(&mut self) -> Result<(), I2cError> {
        let idle = STATUS_FMTEMPTY | STATUS_HOSTIDLE;
        let finished = self
            .regs
            .poll(STATUS, POLL_LIMIT, |status| status & idle == idle);

        // A NAK halts the host, so check it before the timeout
        if self.nak_pending() {
            return Err(self.clear_nak());
        }
        if finished {
            Ok(())
        } else {
            Err(I2cError::Timeout)
        }
    }

    fn pop_read(&mut self) -> Result<u8, I2cError> {
        for _ in 0..POLL_LIMIT {
            if self.nak_pending() {
                return Err(self.clear_nak());
            }
            if self.regs.read(STATUS) & STATUS_RXEMPTY == 0 {
                return Ok(self.regs.read(RDATA) as u8);
            }
        }
        Err(I2cError::Timeout)
    }

    fn queue_write(&mut self, address: u8, data: &[u8], stop: bool) -> Result<(), I2cError> {
        let start = FDATA_START | (u32::from(address) << 1);
        if data.is_empty() {
            // Address-only probe
            return self.push_format(if stop { start | FDATA_STOP } else { start });
        }
        self.push_format(start)?;
        for (i, &byte) in data.iter().enumerate() {
            let last = i + 1 == data.len();
            let flags = if last && stop { FDATA_STOP } else { 0 };
            self.push_format(flags | u32::from(byte))?;
        }
        Ok(())
    }

    fn queue_read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), I2cError> {
        self.push_format(FDATA_START | (u32::from(address) << 1) | 1)?;
        let chunks = buf.len().div_ceil(MAX_READ_CHUNK);
        for (i, chunk) in buf.chunks_mut(MAX_READ_CHUNK).enumerate() {
            let last = i + 1 == chunks;
            let flags = if last { FDATA_STOP } else { FDATA_READ_CONT };
            // Count field is 8 bits; 256 encodes as 0
            let count = (chunk.len() % MAX_READ_CHUNK) as u32;
            self.push_format(FDATA_READ | flags | count)?;
            for byte in chunk.iter_mut() {
                *byte = self.pop_read()?;
            }
        }
        self.wait_done()
    }
}

impl I2cBus for SonataI2c {
    type Error = I2cError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), I2cError> {
        self.queue_write(address, data, true)?;
        self.wait_done()
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), I2cError> {
        if buf.is_empty() {
            return Ok(());
        }
        self.queue_read(address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), I2cError> {
        if read_buf.is_empty() {
            return self.write(address, write_data);
        }
        self.queue_write(address, write_data, false)?;
        self.queue_read(address, read_buf)
    }
}
