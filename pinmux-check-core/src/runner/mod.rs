//! Test plan runner
//!
//! Walks a plan one test at a time through an explicit phase machine:
//!
//! ```text
//! Configure ─▶ ManualGate ─▶ Verify ─▶ Evaluate ─▶ Advance
//!     │                        ▲          │
//!     └────────────────────────┤          ▼
//!                              └─── RetryOrRecord ─▶ Aborted
//! ```
//!
//! Hardware access goes through [`TestBench`] and operator interaction
//! through [`OperatorPrompt`], so the runner is host-testable with
//! simulated boards.

pub mod events;
pub mod executor;
pub mod phase;
pub mod report;

pub use events::Event;
pub use executor::TestPlanRunner;
pub use phase::Phase;
pub use report::{RunReport, TestRecord};

use crate::testplan::{BlockInputAssignment, OutputPinAssignment, TestData};
use crate::verify::Observation;

/// The board under test as seen by the runner
pub trait TestBench {
    /// Write a test's crossbar selects
    fn configure(
        &mut self,
        output_pins: &[OutputPinAssignment],
        block_inputs: &[BlockInputAssignment],
    );

    /// Run the round trip described by `data`
    fn verify(&mut self, data: &TestData) -> Observation;
}

/// Blocking acknowledgement from the operator
pub trait OperatorPrompt {
    /// Block until the operator confirms the instruction was followed
    fn await_confirmation(&mut self);

    /// Line printed after the instruction
    fn hint(&self) -> &'static str {
        "Press any key to continue"
    }
}

/// Prompt that confirms immediately, for unattended runs
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoConfirm;

impl OperatorPrompt for AutoConfirm {
    fn await_confirmation(&mut self) {}

    fn hint(&self) -> &'static str {
        "Continuing without confirmation"
    }
}
