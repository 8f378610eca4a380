//! Per-test phase machine
//!
//! Every test walks the same explicit, finite sequence of phases. The
//! executor performs the side effects of a phase and feeds back the event
//! that results.

use super::events::Event;

/// Phases of a single test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Writing the test's crossbar selects
    Configure,
    /// Waiting for the operator to rewire or confirm
    ManualGate,
    /// Running the peripheral round trip
    Verify,
    /// Comparing the observation with the expected result
    Evaluate,
    /// Applying the failure policy
    RetryOrRecord,
    /// Test finished, move to the next one
    Advance,
    /// Run stopped on a failure
    Aborted,
}

impl Phase {
    /// Check if the test has finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Advance | Phase::Aborted)
    }

    /// Process an event and return the next phase
    ///
    /// Events that do not apply to the current phase leave it unchanged.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use Phase::*;

        match (self, event) {
            (Configure, Configured { manual: true }) => ManualGate,
            (Configure, Configured { manual: false }) => Verify,

            (ManualGate, OperatorConfirmed) => Verify,

            (Verify, Observed) => Evaluate,

            (Evaluate, Passed) => Advance,
            (Evaluate, Failed) => RetryOrRecord,

            (RetryOrRecord, RetryGranted) => Verify,
            (RetryOrRecord, Recorded) => Advance,
            (RetryOrRecord, AbortRun) => Aborted,

            _ => self,
        }
    }
}
