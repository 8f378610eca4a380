//! Events that move a test through its phases

/// Events that can trigger phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Crossbar selects written; `manual` if the test needs the operator
    Configured { manual: bool },
    /// Operator acknowledged the instruction
    OperatorConfirmed,
    /// Verifier returned an observation
    Observed,

    // Evaluation
    /// Observation matched the expected result
    Passed,
    /// Observation disagreed with the expected result
    Failed,

    // Failure policy
    /// Retry budget allows another attempt
    RetryGranted,
    /// Failure recorded, run continues
    Recorded,
    /// Failure recorded, run stops
    AbortRun,
}
