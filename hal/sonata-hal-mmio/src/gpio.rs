//! Sonata GPIO block
//!
//! The four GPIO instances sit back to back in one 0x40 byte register
//! block. Each instance has an output, input, debounced input and output
//! enable register.

use sonata_hal::{GpioBank, GpioInstance, GpioPin};

use crate::reg::Registers;

/// Byte distance between GPIO instances
pub const INSTANCE_STRIDE: usize = 0x10;

const OUTPUT: usize = 0x00;
const INPUT: usize = 0x04;
const DEBOUNCED_INPUT: usize = 0x08;
const OUTPUT_ENABLE: usize = 0x0C;

/// All four GPIO instances
pub struct SonataGpio {
    regs: Registers,
}

impl SonataGpio {
    /// # Safety
    ///
    /// `base` must be the Sonata GPIO block, owned exclusively by the
    /// returned value.
    pub unsafe fn new(base: usize) -> Self {
        Self {
            regs: Registers::new(base),
        }
    }

    fn offset(instance: GpioInstance, register: usize) -> usize {
        instance.index() * INSTANCE_STRIDE + register
    }

    fn set_bit(&mut self, pin: GpioPin, register: usize, value: bool) {
        let mask = pin.mask();
        self.regs
            .modify(Self::offset(pin.instance, register), |bits| {
                if value {
                    bits | mask
                } else {
                    bits & !mask
                }
            });
    }
}

impl GpioBank for SonataGpio {
    fn set_output(&mut self, pin: GpioPin, high: bool) {
        self.set_bit(pin, OUTPUT, high);
    }

    fn set_output_enable(&mut self, pin: GpioPin, enable: bool) {
        self.set_bit(pin, OUTPUT_ENABLE, enable);
    }

    fn debounced_input(&mut self, pin: GpioPin) -> bool {
        self.regs.read(Self::offset(pin.instance, DEBOUNCED_INPUT)) & pin.mask() != 0
    }

    fn input(&mut self, pin: GpioPin) -> bool {
        self.regs.read(Self::offset(pin.instance, INPUT)) & pin.mask() != 0
    }
}
