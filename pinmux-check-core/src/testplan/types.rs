//! Test plan type definitions
//!
//! A test plan is an ordered, immutable slice of [`Test`] records. Plans
//! are written as literal `static` data in the firmware, so every
//! constructor here is a `const fn`.

use sonata_hal::{BlockInput, GpioPin, I2cId, OutputPin, SpiId, UartId};

/// Maximum number of tests in a single plan
pub const MAX_TESTS: usize = 32;

/// Kind of round trip a test performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TestType {
    /// Drive a GPIO line and read it back on another
    GpioWriteRead,
    /// Send bytes on a UART and receive them back
    UartSendReceive,
    /// Read the BH1745 colour sensor's manufacturer ID over I2C
    I2cBH1745ReadId,
    /// Read the Pmod SF3 flash's JEDEC ID over SPI
    SpiPmodSF3ReadId,
}

impl TestType {
    /// Short label used in reports
    pub const fn label(self) -> &'static str {
        match self {
            TestType::GpioWriteRead => "GPIO",
            TestType::UartSendReceive => "UART",
            TestType::I2cBH1745ReadId => "I2C",
            TestType::SpiPmodSF3ReadId => "SPI",
        }
    }
}

/// Crossbar setting routing a block output onto a physical pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputPinAssignment {
    /// Physical pin whose select register is written
    pub pin: OutputPin,
    /// Source index; `0` disconnects the pin
    pub select: u8,
}

impl OutputPinAssignment {
    pub const fn new(pin: OutputPin, select: u8) -> Self {
        Self { pin, select }
    }
}

/// Crossbar setting feeding a block input from a physical pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlockInputAssignment {
    /// Block input whose select register is written
    pub input: BlockInput,
    /// Pin index; `0` disconnects the input
    pub select: u8,
}

impl BlockInputAssignment {
    pub const fn new(input: BlockInput, select: u8) -> Self {
        Self { input, select }
    }
}

/// UART send/receive parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartTest {
    /// UART under test (transmits and receives)
    pub uart: UartId,
    /// Deadline for the whole exchange in milliseconds
    pub timeout_ms: u32,
    /// Number of bytes to send
    pub test_length: u32,
}

/// GPIO write/read parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GpioTest {
    /// Line that is driven
    pub output_pin: GpioPin,
    /// Line that is sampled
    pub input_pin: GpioPin,
    /// Settling time between write and read in milliseconds
    pub wait_ms: u32,
    /// Number of write/read iterations
    pub test_length: u32,
}

/// BH1745 ID read parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cTest {
    /// I2C controller the sensor hangs off
    pub i2c: I2cId,
}

/// Pmod SF3 JEDEC ID read parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiTest {
    /// SPI controller the flash hangs off
    pub spi: SpiId,
    /// GPIO line used as the active-low chip select
    pub cs_pin: GpioPin,
}

/// Per-type test payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TestData {
    Gpio(GpioTest),
    Uart(UartTest),
    I2c(I2cTest),
    Spi(SpiTest),
}

impl TestData {
    /// The kind of test this payload drives
    pub const fn test_type(&self) -> TestType {
        match self {
            TestData::Gpio(_) => TestType::GpioWriteRead,
            TestData::Uart(_) => TestType::UartSendReceive,
            TestData::I2c(_) => TestType::I2cBH1745ReadId,
            TestData::Spi(_) => TestType::SpiPmodSF3ReadId,
        }
    }

    /// Number of payload units (bits or bytes) for GPIO and UART tests
    ///
    /// ID reads have a fixed payload and return `None`.
    pub const fn payload_length(&self) -> Option<u32> {
        match self {
            TestData::Gpio(gpio) => Some(gpio.test_length),
            TestData::Uart(uart) => Some(uart.test_length),
            TestData::I2c(_) | TestData::Spi(_) => None,
        }
    }
}

/// A single pinmux test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Test<'a> {
    /// Name printed to the console
    pub name: &'a str,
    /// Operator instruction; `Some` pauses the run before verifying
    pub instruction: Option<&'a str>,
    /// Output pin selects applied before verifying
    pub output_pins: &'a [OutputPinAssignment],
    /// Block input selects applied before verifying
    pub block_inputs: &'a [BlockInputAssignment],
    /// Round trip to perform
    pub data: TestData,
    /// Whether the round trip should succeed with these selects
    pub expected_result: bool,
}

impl<'a> Test<'a> {
    /// Create an unattended test with no crossbar assignments
    pub const fn new(name: &'a str, data: TestData, expected_result: bool) -> Self {
        Self {
            name,
            instruction: None,
            output_pins: &[],
            block_inputs: &[],
            data,
            expected_result,
        }
    }

    /// Require the operator to follow `instruction` before verifying
    pub const fn manual(mut self, instruction: &'a str) -> Self {
        self.instruction = Some(instruction);
        self
    }

    /// Set the output pin selects
    pub const fn output_pins(mut self, output_pins: &'a [OutputPinAssignment]) -> Self {
        self.output_pins = output_pins;
        self
    }

    /// Set the block input selects
    pub const fn block_inputs(mut self, block_inputs: &'a [BlockInputAssignment]) -> Self {
        self.block_inputs = block_inputs;
        self
    }

    /// Check if the test pauses for the operator
    pub const fn manual_required(&self) -> bool {
        self.instruction.is_some()
    }

    /// The kind of test
    pub const fn test_type(&self) -> TestType {
        self.data.test_type()
    }
}
