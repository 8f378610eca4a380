//! Pin multiplexer (crossbar) abstractions
//!
//! The crossbar has two banks of byte-wide select registers:
//!
//! - One per physical output pin, choosing which block output drives it.
//! - One per block input, choosing which physical pin feeds it.
//!
//! A select value of `0` always disconnects the pin or input. Other values
//! index a per-register list of sources fixed by the hardware.

/// Select value that disconnects a pin or block input
pub const SELECT_OFF: u8 = 0;

/// Number of sources one select register can choose between
///
/// Select registers are one-hot bytes, so valid selects are `0..8`.
pub const SELECT_LIMIT: u8 = 8;

/// Physical output pins with a select register
///
/// Discriminants are the register index within the output bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OutputPin {
    Ser0Tx = 0,
    Ser1Tx = 1,
    Rs232Tx = 2,
    Rs485Tx = 3,
    Scl0 = 4,
    Sda0 = 5,
    Scl1 = 6,
    Sda1 = 7,
    MikrobusTx = 8,
    MikrobusSck = 9,
    MikrobusCopi = 10,
    MikrobusCs = 11,
    Pmod0Io1 = 12,
    Pmod0Io2 = 13,
    Pmod0Io3 = 14,
    Pmod0Io4 = 15,
    Pmod0Io5 = 16,
    Pmod0Io6 = 17,
    Pmod0Io7 = 18,
    Pmod0Io8 = 19,
    Pmod1Io1 = 20,
    Pmod1Io2 = 21,
    Pmod1Io3 = 22,
    Pmod1Io4 = 23,
    Pmod1Io5 = 24,
    Pmod1Io6 = 25,
    Pmod1Io7 = 26,
    Pmod1Io8 = 27,
}

impl OutputPin {
    /// Number of output pin select registers
    pub const COUNT: usize = 28;

    /// Register index within the output bank
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Block inputs with a select register
///
/// Discriminants are the register index within the block input bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BlockInput {
    UartReceive0 = 0,
    UartReceive1 = 1,
    UartReceive2 = 2,
    UartReceive3 = 3,
    UartReceive4 = 4,
    SpiReceive3 = 5,
    SpiReceive4 = 6,
    PmodGpio0 = 7,
    PmodGpio1 = 8,
    PmodGpio2 = 9,
    PmodGpio3 = 10,
    PmodGpio4 = 11,
    PmodGpio5 = 12,
    PmodGpio6 = 13,
    PmodGpio7 = 14,
}

impl BlockInput {
    /// Number of block input select registers
    pub const COUNT: usize = 15;

    /// Register index within the block input bank
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Crossbar select register access
///
/// Writes are unconditional; implementations do not read back or validate
/// the select value against the hardware's source list.
pub trait Crossbar {
    /// Route source `select` onto output `pin`
    fn select_output(&mut self, pin: OutputPin, select: u8);

    /// Feed block `input` from pin source `select`
    fn select_block_input(&mut self, input: BlockInput, select: u8);
}

impl<T: Crossbar + ?Sized> Crossbar for &mut T {
    fn select_output(&mut self, pin: OutputPin, select: u8) {
        (**self).select_output(pin, select);
    }

    fn select_block_input(&mut self, input: BlockInput, select: u8) {
        (**self).select_block_input(input, select);
    }
}
