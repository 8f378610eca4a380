//! Test plan executor

use core::fmt::Write;

use super::events::Event;
use super::phase::Phase;
use super::report::{RunReport, TestRecord};
use super::{OperatorPrompt, TestBench};
use crate::config::{FailurePolicy, RunnerConfig};
use crate::reporter::Reporter;
use crate::testplan::Test;
use crate::verify::Observation;

/// Runs test plans under a fixed failure policy
#[derive(Debug, Clone, Copy, Default)]
pub struct TestPlanRunner {
    config: RunnerConfig,
}

impl TestPlanRunner {
    pub const fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run every test in `plan` in order
    ///
    /// The plan is never modified. Under [`FailurePolicy::FailImmediately`]
    /// the first failing test is recorded and reported, then the run stops
    /// with `aborted` set.
    pub fn run<'a, B, P, W>(
        &self,
        plan: &'a [Test<'a>],
        bench: &mut B,
        prompt: &mut P,
        reporter: &mut Reporter<W>,
    ) -> RunReport<'a>
    where
        B: TestBench,
        P: OperatorPrompt,
        W: Write,
    {
        let mut report = RunReport::new(plan.len());

        for (index, test) in plan.iter().enumerate() {
            let (record, aborted) = self.run_test(index, test, bench, prompt, reporter);
            reporter.result(&record);
            report.record(record);

            if aborted {
                #[cfg(feature = "defmt")]
                defmt::warn!("run aborted at test {}", index);
                report.aborted = true;
                break;
            }
        }

        #[cfg(feature = "defmt")]
        defmt::info!(
            "run finished: {} passed, {} failed, {} planned",
            report.passed,
            report.failed,
            report.planned
        );

        report
    }

    /// Drive one test through its phases
    ///
    /// Returns the record and whether the run must stop.
    fn run_test<'a, B, P, W>(
        &self,
        index: usize,
        test: &'a Test<'a>,
        bench: &mut B,
        prompt: &mut P,
        reporter: &mut Reporter<W>,
    ) -> (TestRecord<'a>, bool)
    where
        B: TestBench,
        P: OperatorPrompt,
        W: Write,
    {
        let mut phase = Phase::Configure;
        let mut observation: Observation = Ok(());
        let mut attempts = 0u32;

        while !phase.is_terminal() {
            let event = match phase {
                Phase::Configure => {
                    bench.configure(test.output_pins, test.block_inputs);
                    Event::Configured {
                        manual: test.manual_required(),
                    }
                }
                Phase::ManualGate => {
                    if let Some(instruction) = test.instruction {
                        reporter.instruction(instruction, prompt.hint());
                    }
                    prompt.await_confirmation();
                    Event::OperatorConfirmed
                }
                Phase::Verify => {
                    if attempts == 0 && test.data.payload_length() == Some(0) {
                        #[cfg(feature = "defmt")]
                        defmt::warn!("test {} has a zero-length payload", index);
                        reporter.zero_length(test.name);
                    }
                    attempts += 1;
                    observation = bench.verify(&test.data);
                    Event::Observed
                }
                Phase::Evaluate => {
                    if observation.is_ok() == test.expected_result {
                        Event::Passed
                    } else {
                        Event::Failed
                    }
                }
                Phase::RetryOrRecord => match self.config.policy {
                    FailurePolicy::FailImmediately => Event::AbortRun,
                    FailurePolicy::Retry if attempts < self.config.max_attempts() => {
                        #[cfg(feature = "defmt")]
                        defmt::info!("retrying test {} (attempt {})", index, attempts + 1);
                        reporter.retrying(test.name, attempts, self.config.retry_budget);
                        Event::RetryGranted
                    }
                    FailurePolicy::Retry | FailurePolicy::Continue => Event::Recorded,
                },
                Phase::Advance | Phase::Aborted => break,
            };
            phase = phase.transition(event);
        }

        let observed = observation.is_ok();
        let record = TestRecord {
            index,
            name: test.name,
            test_type: test.test_type(),
            expected: test.expected_result,
            observed,
            passed: observed == test.expected_result,
            attempts,
            failure: observation.err(),
        };

        (record, phase == Phase::Aborted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testplan::{
        BlockInputAssignment, GpioTest, I2cTest, OutputPinAssignment, TestData, UartTest,
    };
    use crate::verify::CheckFailure;
    use heapless::String;
    use sonata_hal::{GpioInstance, GpioPin, I2cId, UartId};

    /// Bench that replays a fixed sequence of observations
    struct ScriptedBench {
        script: &'static [bool],
        next: usize,
        configured: u32,
        verified: u32,
    }

    impl ScriptedBench {
        fn new(script: &'static [bool]) -> Self {
            Self {
                script,
                next: 0,
                configured: 0,
                verified: 0,
            }
        }
    }

    impl TestBench for ScriptedBench {
        fn configure(&mut self, _: &[OutputPinAssignment], _: &[BlockInputAssignment]) {
            self.configured += 1;
        }

        fn verify(&mut self, _data: &TestData) -> Observation {
            self.verified += 1;
            let ok = self.script.get(self.next).copied().unwrap_or(false);
            self.next += 1;
            if ok {
                Ok(())
            } else {
                Err(CheckFailure::Bus)
            }
        }
    }

    struct CountingPrompt(u32);

    impl OperatorPrompt for CountingPrompt {
        fn await_confirmation(&mut self) {
            self.0 += 1;
        }
    }

    const GPIO: TestData = TestData::Gpio(GpioTest {
        output_pin: GpioPin::new(GpioInstance::Pmod, 1),
        input_pin: GpioPin::new(GpioInstance::Pmod, 2),
        wait_ms: 1,
        test_length: 10,
    });

    const I2C: TestData = TestData::I2c(I2cTest { i2c: I2cId::I2c1 });

    fn reporter() -> Reporter<String<1024>> {
        Reporter::without_color(String::new())
    }

    #[test]
    fn test_empty_plan_succeeds() {
        let runner = TestPlanRunner::default();
        let mut bench = ScriptedBench::new(&[]);

        let report = runner.run(&[], &mut bench, &mut CountingPrompt(0), &mut reporter());

        assert_eq!(report.total(), 0);
        assert!(report.success());
        assert_eq!(bench.configured, 0);
    }

    #[test]
    fn test_expected_failure_passes() {
        let plan = [Test::new("unmuxed", GPIO, false)];
        let runner = TestPlanRunner::new(RunnerConfig::new(FailurePolicy::Retry, 3));
        let mut bench = ScriptedBench::new(&[false]);

        let report = runner.run(&plan, &mut bench, &mut CountingPrompt(0), &mut reporter());

        assert_eq!(report.passed, 1);
        // A matching failure is never retried
        assert_eq!(bench.verified, 1);
        assert_eq!(report.records[0].failure, Some(CheckFailure::Bus));
    }

    #[test]
    fn test_retry_recovers_flaky_test() {
        let plan = [Test::new("flaky", GPIO, true)];
        let runner = TestPlanRunner::new(RunnerConfig::new(FailurePolicy::Retry, 2));
        let mut bench = ScriptedBench::new(&[false, true]);
        let mut reporter = reporter();

        let report = runner.run(&plan, &mut bench, &mut CountingPrompt(0), &mut reporter);

        assert_eq!(report.passed, 1);
        assert_eq!(report.records[0].attempts, 2);
        // Configure runs once, only verify repeats
        assert_eq!(bench.configured, 1);
        assert!(reporter.into_inner().contains("retrying (1/2)"));
    }

    #[test]
    fn test_retry_budget_is_bounded() {
        let plan = [Test::new("dead", GPIO, true)];
        let runner = TestPlanRunner::new(RunnerConfig::new(FailurePolicy::Retry, 3));
        let mut bench = ScriptedBench::new(&[]);

        let report = runner.run(&plan, &mut bench, &mut CountingPrompt(0), &mut reporter());

        assert_eq!(report.failed, 1);
        assert_eq!(bench.verified, 4);
        assert!(!report.aborted);
    }

    #[test]
    fn test_continue_does_not_retry() {
        let plan = [Test::new("a", GPIO, true), Test::new("b", I2C, false)];
        let runner = TestPlanRunner::new(RunnerConfig::new(FailurePolicy::Continue, 5));
        let mut bench = ScriptedBench::new(&[false, false]);

        let report = runner.run(&plan, &mut bench, &mut CountingPrompt(0), &mut reporter());

        assert_eq!(bench.verified, 2);
        assert_eq!((report.passed, report.failed), (1, 1));
    }

    #[test]
    fn test_fail_immediately_aborts() {
        let plan = [
            Test::new("a", GPIO, true),
            Test::new("b", GPIO, true),
            Test::new("c", GPIO, true),
        ];
        let runner = TestPlanRunner::new(RunnerConfig::from_flags(true, true, 3));
        let mut bench = ScriptedBench::new(&[true, false, true]);
        let mut reporter = reporter();

        let report = runner.run(&plan, &mut bench, &mut CountingPrompt(0), &mut reporter);

        assert!(report.aborted);
        assert_eq!((report.passed, report.failed), (1, 1));
        assert_eq!(report.planned, 3);
        assert_eq!(bench.verified, 2);
        // The failing test is still reported
        assert!(reporter.into_inner().contains("... FAIL"));
    }

    #[test]
    fn test_manual_gate_prompts_once() {
        let plan = [Test::new("manual", GPIO, true).manual("Connect PMOD0 pins 2 and 3")];
        let runner = TestPlanRunner::new(RunnerConfig::new(FailurePolicy::Retry, 2));
        let mut bench = ScriptedBench::new(&[false, true]);
        let mut prompt = CountingPrompt(0);
        let mut reporter = reporter();

        runner.run(&plan, &mut bench, &mut prompt, &mut reporter);

        // Retries re-verify without asking the operator again
        assert_eq!(prompt.0, 1);
        let out = reporter.into_inner();
        assert!(out.contains("Connect PMOD0 pins 2 and 3"));
        assert!(out.contains("Press any key to continue"));
    }

    #[test]
    fn test_zero_length_warns_and_passes() {
        let plan = [Test::new(
            "empty uart",
            TestData::Uart(UartTest {
                uart: UartId::Uart2,
                timeout_ms: 10,
                test_length: 0,
            }),
            true,
        )];
        let runner = TestPlanRunner::default();
        let mut bench = ScriptedBench::new(&[true]);
        let mut reporter = reporter();

        let report = runner.run(&plan, &mut bench, &mut AutoConfirmCheck, &mut reporter);

        assert!(report.success());
        assert!(reporter.into_inner().contains("zero-length payload"));
    }

    struct AutoConfirmCheck;

    impl OperatorPrompt for AutoConfirmCheck {
        fn await_confirmation(&mut self) {
            panic!("unattended test must not prompt");
        }
    }
}
