//! GPIO loopback verifier
//!
//! Drives pseudo-random levels on one line and samples another. With the
//! two lines wired together and the output muxed, every sample matches;
//! with the output unmuxed the samples follow whatever the floating line
//! does, and a run of random levels catches that.

use embedded_hal::delay::DelayNs;
use sonata_hal::GpioBank;

use super::{CheckFailure, Observation};
use crate::pattern::PatternSource;
use crate::testplan::GpioTest;

/// Run a GPIO write/read loopback
///
/// Performs exactly `test.test_length` write/wait/sample iterations and
/// never stops early. The output driver is enabled for the duration of the
/// check and released afterwards.
pub fn gpio_write_read<G, D>(
    gpio: &mut G,
    delay: &mut D,
    pattern: &mut PatternSource,
    test: &GpioTest,
) -> Observation
where
    G: GpioBank,
    D: DelayNs,
{
    gpio.set_output_enable(test.output_pin, true);

    let mut mismatches = 0u32;
    for _ in 0..test.test_length {
        let level = pattern.next_bit();
        gpio.set_output(test.output_pin, level);
        delay.delay_ms(test.wait_ms);
        if gpio.debounced_input(test.input_pin) != level {
            mismatches += 1;
        }
    }

    gpio.set_output_enable(test.output_pin, false);

    if mismatches == 0 {
        Ok(())
    } else {
        Err(CheckFailure::GpioMismatch {
            mismatches,
            samples: test.test_length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonata_hal::{GpioInstance, GpioPin};

    /// Mock GPIO bank for one instance with an optional wire between lines
    struct MockGpio {
        output: u32,
        output_enable: u32,
        /// Lines wired together (driven bit, sampled bit)
        wire: Option<(u8, u8)>,
        /// Level seen by unconnected inputs
        floating: bool,
        reads: u32,
    }

    impl MockGpio {
        fn new(wire: Option<(u8, u8)>) -> Self {
            Self {
                output: 0,
                output_enable: 0,
                wire,
                floating: false,
                reads: 0,
            }
        }
    }

    impl GpioBank for MockGpio {
        fn set_output(&mut self, pin: GpioPin, high: bool) {
            if high {
                self.output |= pin.mask();
            } else {
                self.output &= !pin.mask();
            }
        }

        fn set_output_enable(&mut self, pin: GpioPin, enable: bool) {
            if enable {
                self.output_enable |= pin.mask();
            } else {
                self.output_enable &= !pin.mask();
            }
        }

        fn debounced_input(&mut self, pin: GpioPin) -> bool {
            self.reads += 1;
            match self.wire {
                Some((from, to)) if to == pin.bit && self.output_enable & (1 << from) != 0 => {
                    self.output & (1 << from) != 0
                }
                _ => self.floating,
            }
        }
    }

    /// Mock delay that accumulates requested time
    struct MockDelay {
        total_ns: u64,
        calls: u32,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
            self.calls += 1;
        }
    }

    fn loopback(length: u32) -> GpioTest {
        GpioTest {
            output_pin: GpioPin::new(GpioInstance::Pmod, 1),
            input_pin: GpioPin::new(GpioInstance::Pmod, 2),
            wait_ms: 1,
            test_length: length,
        }
    }

    #[test]
    fn test_wired_loopback_passes() {
        let mut gpio = MockGpio::new(Some((1, 2)));
        let mut delay = MockDelay {
            total_ns: 0,
            calls: 0,
        };
        let mut pattern = PatternSource::default();

        let result = gpio_write_read(&mut gpio, &mut delay, &mut pattern, &loopback(10));

        assert_eq!(result, Ok(()));
        assert_eq!(gpio.reads, 10);
        assert_eq!(delay.total_ns, 10 * 1_000_000);
        // Output driver released afterwards
        assert_eq!(gpio.output_enable, 0);
    }

    #[test]
    fn test_unwired_loopback_fails() {
        let mut gpio = MockGpio::new(None);
        let mut delay = MockDelay {
            total_ns: 0,
            calls: 0,
        };
        let mut pattern = PatternSource::default();

        let result = gpio_write_read(&mut gpio, &mut delay, &mut pattern, &loopback(10));

        assert!(matches!(
            result,
            Err(CheckFailure::GpioMismatch { samples: 10, .. })
        ));
        // Every sample is taken even after the first mismatch
        assert_eq!(gpio.reads, 10);
    }

    #[test]
    fn test_stuck_line_is_caught() {
        // A line stuck high would pass a fixed all-ones pattern
        let mut gpio = MockGpio::new(None);
        gpio.floating = true;
        let mut delay = MockDelay {
            total_ns: 0,
            calls: 0,
        };
        let mut pattern = PatternSource::default();

        let result = gpio_write_read(&mut gpio, &mut delay, &mut pattern, &loopback(32));
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_length_passes_vacuously() {
        let mut gpio = MockGpio::new(None);
        let mut delay = MockDelay {
            total_ns: 0,
            calls: 0,
        };
        let mut pattern = PatternSource::default();

        let result = gpio_write_read(&mut gpio, &mut delay, &mut pattern, &loopback(0));

        assert_eq!(result, Ok(()));
        assert_eq!(gpio.reads, 0);
        assert_eq!(delay.calls, 0);
    }
}
