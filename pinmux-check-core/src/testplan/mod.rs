//! Test plan data model
//!
//! Tests are described as literal data and never mutated during a run.

pub mod types;
pub mod validate;

pub use types::*;
pub use validate::{validate_testplan, PlanError, PlanWarning, MAX_WARNINGS};
