//! Console reporting
//!
//! Formats progress, instructions and results onto any
//! [`core::fmt::Write`] sink, normally the console UART. The console is
//! best effort: write errors are dropped so a wedged console never stops
//! a run.

use core::fmt::{self, Write};

use crate::runner::{RunReport, TestRecord};
use crate::testplan::{PlanError, PlanWarning};

const PREFIX_COLOR: &str = "[\x1b[35mPinmux Check\x1b[0m] ";
const PREFIX_PLAIN: &str = "[Pinmux Check] ";

/// Width the test name is padded to in result lines
pub const NAME_WIDTH: usize = 34;

const NEWLINE: &str = "\r\n";

/// Console reporter
pub struct Reporter<W: Write> {
    out: W,
    prefix: &'static str,
}

impl<W: Write> Reporter<W> {
    /// Reporter with an ANSI coloured label
    pub fn new(out: W) -> Self {
        Self {
            out,
            prefix: PREFIX_COLOR,
        }
    }

    /// Reporter for sinks that do not understand ANSI escapes
    pub fn without_color(out: W) -> Self {
        Self {
            out,
            prefix: PREFIX_PLAIN,
        }
    }

    /// Give back the underlying sink
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Announce a plan
    pub fn plan_started(&mut self, name: &str, tests: usize) {
        self.line(format_args!("Running {} ({} tests)", name, tests));
    }

    /// Print a manual test's instruction and how to continue
    pub fn instruction(&mut self, instruction: &str, hint: &str) {
        self.line(format_args!("{}", instruction));
        self.line(format_args!("{}", hint));
    }

    /// Warn about a test that will pass without exercising anything
    pub fn zero_length(&mut self, name: &str) {
        self.line(format_args!(
            "{:<width$} ... WARNING zero-length payload, passes vacuously",
            name,
            width = NAME_WIDTH
        ));
    }

    /// Report a validation warning
    pub fn plan_warning(&mut self, warning: &PlanWarning) {
        self.line(format_args!("Warning: {}", warning));
    }

    /// Report a validation error
    pub fn plan_error(&mut self, error: &PlanError) {
        self.line(format_args!("Invalid test plan: {}", error));
    }

    /// Announce another attempt at a failing test
    pub fn retrying(&mut self, name: &str, retry: u32, budget: u8) {
        self.line(format_args!(
            "{:<width$} ... retrying ({}/{})",
            name,
            retry,
            budget,
            width = NAME_WIDTH
        ));
    }

    /// Report a finished test
    pub fn result(&mut self, record: &TestRecord<'_>) {
        if record.passed {
            self.line(format_args!(
                "{:<width$} ... PASS",
                record.name,
                width = NAME_WIDTH
            ));
            return;
        }

        match record.failure {
            Some(failure) => self.line(format_args!(
                "{:<width$} ... FAIL (observed {}, expected {}: {})",
                record.name,
                record.observed,
                record.expected,
                failure,
                width = NAME_WIDTH
            )),
            None => self.line(format_args!(
                "{:<width$} ... FAIL (observed {}, expected {})",
                record.name,
                record.observed,
                record.expected,
                width = NAME_WIDTH
            )),
        }
    }

    /// Print the run summary and verdict
    pub fn summary(&mut self, report: &RunReport<'_>) {
        self.line(format_args!(
            "Summary: {}/{} passed, {} failed",
            report.passed,
            report.total(),
            report.failed
        ));

        let verdict = if report.aborted {
            "RUN ABORTED"
        } else if report.success() {
            "ALL TESTS PASSED"
        } else {
            "TESTS FAILED"
        };
        self.line(format_args!("{}", verdict));
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        let _ = self.out.write_str(self.prefix);
        let _ = self.out.write_fmt(args);
        let _ = self.out.write_str(NEWLINE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testplan::TestType;
    use crate::verify::CheckFailure;
    use heapless::String;

    fn record(passed: bool, failure: Option<CheckFailure>) -> TestRecord<'static> {
        TestRecord {
            index: 0,
            name: "PMOD1_2 -> PMOD1_3 UART Muxed",
            test_type: TestType::UartSendReceive,
            expected: true,
            observed: passed,
            passed,
            attempts: 1,
            failure,
        }
    }

    #[test]
    fn test_pass_line() {
        let mut reporter = Reporter::without_color(String::<128>::new());
        reporter.result(&record(true, None));

        assert_eq!(
            reporter.into_inner().as_str(),
            "[Pinmux Check] PMOD1_2 -> PMOD1_3 UART Muxed      ... PASS\r\n"
        );
    }

    #[test]
    fn test_fail_line_has_reason() {
        let mut reporter = Reporter::without_color(String::<160>::new());
        reporter.result(&record(
            false,
            Some(CheckFailure::Timeout {
                received: 0,
                expected: 100,
            }),
        ));

        let out = reporter.into_inner();
        assert!(out.ends_with("... FAIL (observed false, expected true: timed out after 0/100 bytes)\r\n"));
    }

    #[test]
    fn test_colored_prefix() {
        let mut reporter = Reporter::new(String::<64>::new());
        reporter.plan_started("all blocks", 8);

        assert_eq!(
            reporter.into_inner().as_str(),
            "[\x1b[35mPinmux Check\x1b[0m] Running all blocks (8 tests)\r\n"
        );
    }

    #[test]
    fn test_summary_verdicts() {
        let mut report = RunReport::new(2);
        report.record(record(true, None));
        report.record(record(true, None));

        let mut reporter = Reporter::without_color(String::<128>::new());
        reporter.summary(&report);
        assert_eq!(
            reporter.into_inner().as_str(),
            "[Pinmux Check] Summary: 2/2 passed, 0 failed\r\n[Pinmux Check] ALL TESTS PASSED\r\n"
        );

        report.aborted = true;
        let mut reporter = Reporter::without_color(String::<128>::new());
        reporter.summary(&report);
        assert!(reporter.into_inner().ends_with("RUN ABORTED\r\n"));
    }

    #[test]
    fn test_full_sink_is_ignored() {
        let mut reporter = Reporter::without_color(String::<8>::new());
        reporter.result(&record(true, None));
        reporter.summary(&RunReport::new(0));
    }
}
