//! Run results

use heapless::Vec;

use crate::testplan::{TestType, MAX_TESTS};
use crate::verify::CheckFailure;

/// Result of one test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TestRecord<'a> {
    /// Position in the plan
    pub index: usize,
    pub name: &'a str,
    pub test_type: TestType,
    pub expected: bool,
    /// Outcome of the last attempt
    pub observed: bool,
    pub passed: bool,
    /// Verify attempts made, including retries
    pub attempts: u32,
    /// Why the last round trip failed, if it did
    pub failure: Option<CheckFailure>,
}

/// Aggregate result of a test plan run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport<'a> {
    /// Per-test results in plan order
    pub records: Vec<TestRecord<'a>, MAX_TESTS>,
    pub passed: u32,
    pub failed: u32,
    /// Number of tests in the plan
    pub planned: u32,
    /// Run stopped early under [`FailurePolicy::FailImmediately`]
    ///
    /// [`FailurePolicy::FailImmediately`]: crate::config::FailurePolicy::FailImmediately
    pub aborted: bool,
}

impl<'a> RunReport<'a> {
    pub(crate) fn new(planned: usize) -> Self {
        Self {
            records: Vec::new(),
            passed: 0,
            failed: 0,
            planned: planned as u32,
            aborted: false,
        }
    }

    pub(crate) fn record(&mut self, record: TestRecord<'a>) {
        if record.passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        // Counters stay exact for plans longer than the record buffer
        self.records.push(record).ok();
    }

    /// Tests that ran to completion
    pub fn total(&self) -> u32 {
        self.passed + self.failed
    }

    /// Check if every test passed and the run was not aborted
    pub fn success(&self) -> bool {
        self.failed == 0 && !self.aborted
    }
}
