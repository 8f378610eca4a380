//! Volatile register block access

use core::ptr::{read_volatile, write_volatile};

/// A block of memory-mapped registers at a fixed base address
#[derive(Debug)]
pub struct Registers {
    base: usize,
}

impl Registers {
    /// Wrap the register block at `base`
    ///
    /// # Safety
    ///
    /// `base` must be the address of a device register block that is valid
    /// for volatile access at every offset the driver uses, and no other
    /// owner may access it while this value exists.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    pub fn base(&self) -> usize {
        self.base
    }

    /// Read the 32-bit register at byte `offset`
    #[inline]
    pub fn read(&self, offset: usize) -> u32 {
        // SAFETY: validity of base + offset is the constructor's contract
        unsafe { read_volatile((self.base + offset) as *const u32) }
    }

    /// Write the 32-bit register at byte `offset`
    #[inline]
    pub fn write(&mut self, offset: usize, value: u32) {
        // SAFETY: validity of base + offset is the constructor's contract
        unsafe { write_volatile((self.base + offset) as *mut u32, value) }
    }

    /// Read, transform and write back the register at byte `offset`
    #[inline]
    pub fn modify(&mut self, offset: usize, f: impl FnOnce(u32) -> u32) {
        let value = self.read(offset);
        self.write(offset, f(value));
    }

    /// Write the byte-wide register at byte `offset`
    #[inline]
    pub fn write_u8(&mut self, offset: usize, value: u8) {
        // SAFETY: validity of base + offset is the constructor's contract
        unsafe { write_volatile((self.base + offset) as *mut u8, value) }
    }

    /// Read the byte-wide register at byte `offset`
    #[inline]
    pub fn read_u8(&self, offset: usize) -> u8 {
        // SAFETY: validity of base + offset is the constructor's contract
        unsafe { read_volatile((self.base + offset) as *const u8) }
    }

    /// Spin until `done` holds for the register at `offset`
    ///
    /// Gives up after `limit` reads and returns `false`.
    pub fn poll(&self, offset: usize, limit: u32, done: impl Fn(u32) -> bool) -> bool {
        (0..limit).any(|_| done(self.read(offset)))
    }
}

/// Host-side register file for driver tests
#[cfg(test)]
pub(crate) mod fake {
    use super::Registers;

    /// Backing memory standing in for a device's register block
    pub struct FakeRegs<const N: usize> {
        words: [u32; N],
    }

    impl<const N: usize> FakeRegs<N> {
        pub fn new() -> Self {
            Self { words: [0; N] }
        }

        /// A register block view onto the backing memory
        pub fn registers(&mut self) -> Registers {
            // SAFETY: the array outlives every driver built in a test
            unsafe { Registers::new(self.words.as_mut_ptr() as usize) }
        }

        pub fn base(&mut self) -> usize {
            self.words.as_mut_ptr() as usize
        }

        pub fn get(&self, offset: usize) -> u32 {
            // SAFETY: in bounds of the backing array
            unsafe { core::ptr::read_volatile(self.words.as_ptr().add(offset / 4)) }
        }

        pub fn set(&mut self, offset: usize, value: u32) {
            // SAFETY: in bounds of the backing array
            unsafe { core::ptr::write_volatile(self.words.as_mut_ptr().add(offset / 4), value) }
        }
    }
}
