//! Sonata pin multiplexer
//!
//! Byte-wide, one-hot select registers: output pins from offset `0x000`,
//! block inputs from `0x800`.

use sonata_hal::{BlockInput, Crossbar, OutputPin, SELECT_LIMIT};

use crate::reg::Registers;

const OUTPUT_BANK: usize = 0x000;
const BLOCK_INPUT_BANK: usize = 0x800;

/// One-hot register encoding of `select`, or `None` if it cannot be encoded
pub fn one_hot(select: u8) -> Option<u8> {
    (select < SELECT_LIMIT).then(|| 1 << select)
}

pub struct SonataPinmux {
    regs: Registers,
}

impl SonataPinmux {
    /// # Safety
    ///
    /// `base` must be the Sonata pinmux block, owned exclusively by the
    /// returned value.
    pub unsafe fn new(base: usize) -> Self {
        Self {
            regs: Registers::new(base),
        }
    }

    /// Read back the raw select register of an output pin
    pub fn output_register(&self, pin: OutputPin) -> u8 {
        self.regs.read_u8(OUTPUT_BANK + pin.index())
    }
}

impl Crossbar for SonataPinmux {
    /// Selects outside the register's range are dropped
    fn select_output(&mut self, pin: OutputPin, select: u8) {
        if let Some(value) = one_hot(select) {
            self.regs.write_u8(OUTPUT_BANK + pin.index(), value);
        }
    }

    fn select_block_input(&mut self, input: BlockInput, select: u8) {
        if let Some(value) = one_hot(select) {
            self.regs.write_u8(BLOCK_INPUT_BANK + input.index(), value);
        }
    }
}
