//! Runner configuration
//!
//! Fixed for a run and passed to the runner at construction. The firmware
//! builds it from `harness.toml` at compile time.

/// Extra attempts granted to a failing test by default
pub const DEFAULT_RETRY_BUDGET: u8 = 1;

/// What the runner does when a test's observation disagrees with its
/// expected result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FailurePolicy {
    /// Record the failure and move on
    Continue,
    /// Re-verify up to the retry budget, then record and move on
    Retry,
    /// Record the failure and abort the run
    FailImmediately,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RunnerConfig {
    pub policy: FailurePolicy,
    /// Extra attempts under [`FailurePolicy::Retry`]
    pub retry_budget: u8,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::new(FailurePolicy::Retry, DEFAULT_RETRY_BUDGET)
    }
}

impl RunnerConfig {
    pub const fn new(policy: FailurePolicy, retry_budget: u8) -> Self {
        Self {
            policy,
            retry_budget,
        }
    }

    /// Build from the two harness switches
    ///
    /// Failing immediately wins over retrying when both are set.
    pub const fn from_flags(fail_immediately: bool, enable_retry: bool, retry_budget: u8) -> Self {
        let policy = if fail_immediately {
            FailurePolicy::FailImmediately
        } else if enable_retry {
            FailurePolicy::Retry
        } else {
            FailurePolicy::Continue
        };
        Self::new(policy, retry_budget)
    }

    /// Upper bound on verify attempts for a single test
    pub const fn max_attempts(&self) -> u32 {
        match self.policy {
            FailurePolicy::Retry => self.retry_budget as u32 + 1,
            FailurePolicy::Continue | FailurePolicy::FailImmediately => 1,
        }
    }
}
