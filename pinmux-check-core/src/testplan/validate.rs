//! Construction-time test plan checks
//!
//! Plans are literal data, so a malformed plan is an authoring defect. The
//! firmware validates every plan once before running it and refuses to run
//! plans with errors. Warnings flag plans that are legal but suspicious.

use core::fmt;

use heapless::Vec;
use sonata_hal::SELECT_LIMIT;

use super::types::{Test, TestData, MAX_TESTS};

/// Maximum warnings collected for one plan
pub const MAX_WARNINGS: usize = MAX_TESTS * 2;

/// Defects that make a plan unusable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlanError {
    /// Plan holds more tests than a report can record
    TooManyTests { count: usize },
    /// Test has no name to report under
    EmptyName { index: usize },
    /// Manual test with nothing to tell the operator
    EmptyInstruction { index: usize },
    /// GPIO bit outside the 32-bit instance
    InvalidGpioBit { index: usize, bit: u8 },
    /// GPIO loopback drives and samples the same line
    LoopbackOnSamePin { index: usize },
    /// Crossbar select beyond what a select register can encode
    SelectOutOfRange { index: usize, select: u8 },
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::TooManyTests { count } => {
                write!(f, "plan has {} tests, limit is {}", count, MAX_TESTS)
            }
            PlanError::EmptyName { index } => write!(f, "test {} has an empty name", index),
            PlanError::EmptyInstruction { index } => {
                write!(f, "test {} is manual but has an empty instruction", index)
            }
            PlanError::InvalidGpioBit { index, bit } => {
                write!(f, "test {} uses GPIO bit {} (must be 0-31)", index, bit)
            }
            PlanError::LoopbackOnSamePin { index } => {
                write!(f, "test {} drives and samples the same GPIO line", index)
            }
            PlanError::SelectOutOfRange { index, select } => write!(
                f,
                "test {} uses crossbar select {} (must be below {})",
                index, select, SELECT_LIMIT
            ),
        }
    }
}

/// Legal but suspicious plan contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlanWarning {
    /// GPIO/UART test with `test_length == 0`; it always passes
    ZeroLengthPayload { index: usize },
    /// UART test with a zero timeout; only an already-waiting byte can pass
    ZeroTimeout { index: usize },
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanWarning::ZeroLengthPayload { index } => {
                write!(f, "test {} has a zero-length payload and passes vacuously", index)
            }
            PlanWarning::ZeroTimeout { index } => {
                write!(f, "test {} has a zero UART timeout", index)
            }
        }
    }
}

/// Validate a single test, appending any warnings
///
/// `warnings` holds two per test, so it cannot fill before `MAX_TESTS`
/// tests have been checked.
pub(crate) fn validate_test(
    index: usize,
    test: &Test<'_>,
    warnings: &mut Vec<PlanWarning, MAX_WARNINGS>,
) -> Result<(), PlanError> {
    if test.name.trim().is_empty() {
        return Err(PlanError::EmptyName { index });
    }

    if let Some(instruction) = test.instruction {
        if instruction.trim().is_empty() {
            return Err(PlanError::EmptyInstruction { index });
        }
    }

    let selects = test
        .output_pins
        .iter()
        .map(|assignment| assignment.select)
        .chain(test.block_inputs.iter().map(|assignment| assignment.select));
    for select in selects {
        if select >= SELECT_LIMIT {
            return Err(PlanError::SelectOutOfRange { index, select });
        }
    }

    match &test.data {
        TestData::Gpio(gpio) => {
            for pin in [gpio.output_pin, gpio.input_pin] {
                if !pin.is_valid() {
                    return Err(PlanError::InvalidGpioBit {
                        index,
                        bit: pin.bit,
                    });
                }
            }
            if gpio.output_pin == gpio.input_pin {
                return Err(PlanError::LoopbackOnSamePin { index });
            }
        }
        TestData::Uart(uart) => {
            if uart.timeout_ms == 0 {
                warnings.push(PlanWarning::ZeroTimeout { index }).ok();
            }
        }
        TestData::Spi(spi) => {
            if !spi.cs_pin.is_valid() {
                return Err(PlanError::InvalidGpioBit {
                    index,
                    bit: spi.cs_pin.bit,
                });
            }
        }
        TestData::I2c(_) => {}
    }

    if test.data.payload_length() == Some(0) {
        warnings.push(PlanWarning::ZeroLengthPayload { index }).ok();
    }

    Ok(())
}

/// Validate a whole plan
///
/// Returns the collected warnings, or the first error found.
pub fn validate_testplan(plan: &[Test<'_>]) -> Result<Vec<PlanWarning, MAX_WARNINGS>, PlanError> {
    if plan.len() > MAX_TESTS {
        return Err(PlanError::TooManyTests { count: plan.len() });
    }

    let mut warnings = Vec::new();
    for (index, test) in plan.iter().enumerate() {
        validate_test(index, test, &mut warnings)?;
    }
    Ok(warnings)
}
