//! Board-agnostic core logic for the pinmux check harness
//!
//! This crate contains everything that does not depend on a specific
//! board's registers:
//!
//! - Test plan data model and construction-time validation
//! - The all-blocks test plan
//! - Pseudo-random pattern source for test payloads
//! - Crossbar configuration
//! - Peripheral round-trip verifiers (GPIO, UART, I2C, SPI)
//! - Test plan runner with manual gating and retry policy
//! - Console reporting

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod crossbar;
pub mod harness;
pub mod pattern;
pub mod plans;
pub mod reporter;
pub mod runner;
pub mod testplan;
pub mod verify;

pub use config::{FailurePolicy, RunnerConfig};
pub use crossbar::CrossbarConfigurator;
pub use harness::Harness;
pub use pattern::PatternSource;
pub use reporter::Reporter;
pub use runner::{OperatorPrompt, RunReport, TestBench, TestPlanRunner};
pub use testplan::{Test, TestData, TestType};
pub use verify::CheckFailure;
