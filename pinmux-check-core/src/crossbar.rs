//! Crossbar configuration
//!
//! Applies a test's output pin and block input selects to the pinmux
//! before its round trip runs.

use sonata_hal::Crossbar;

use crate::testplan::{BlockInputAssignment, OutputPinAssignment};

/// Bulk application of crossbar assignments
///
/// Implemented for every [`Crossbar`]. Every assignment is written, in
/// order, with no read-back, so applying the same lists twice leaves the
/// device exactly as applying them once.
pub trait CrossbarConfigurator {
    /// Write every output pin and block input select
    fn apply(
        &mut self,
        output_pins: &[OutputPinAssignment],
        block_inputs: &[BlockInputAssignment],
    );
}

impl<X: Crossbar + ?Sized> CrossbarConfigurator for X {
    fn apply(
        &mut self,
        output_pins: &[OutputPinAssignment],
        block_inputs: &[BlockInputAssignment],
    ) {
        for assignment in output_pins {
            self.select_output(assignment.pin, assignment.select);
        }
        for assignment in block_inputs {
            self.select_block_input(assignment.input, assignment.select);
        }
    }
}
