//! Harness settings compiled in from harness.toml

use pinmux_check_core::RunnerConfig;

include!(concat!(env!("OUT_DIR"), "/harness_settings.rs"));

/// Failure policy for the run
pub const RUNNER: RunnerConfig =
    RunnerConfig::from_flags(FAIL_IMMEDIATELY, ENABLE_RETRY, RETRY_BUDGET);
