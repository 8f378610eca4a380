//! Monotonic time source
//!
//! Timeouts in the harness are busy-waits against elapsed time, so all it
//! needs is a free-running counter that never goes backwards.

/// Monotonic microsecond clock
pub trait Clock {
    /// Microseconds since an arbitrary fixed epoch
    fn now_us(&self) -> u64;

    /// Microseconds elapsed since `start`
    fn elapsed_us(&self, start: u64) -> u64 {
        self.now_us().saturating_sub(start)
    }

    /// Check whether `timeout_ms` has passed since `start`
    fn has_expired(&self, start: u64, timeout_ms: u32) -> bool {
        self.elapsed_us(start) >= u64::from(timeout_ms) * 1000
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct FakeClock(Cell<u64>);

    impl Clock for FakeClock {
        fn now_us(&self) -> u64 {
            self.0.get()
        }
    }

    #[test]
    fn test_expiry() {
        let clock = FakeClock(Cell::new(5_000));
        let start = clock.now_us();
        assert!(!clock.has_expired(start, 10));

        clock.0.set(14_999);
        assert!(!clock.has_expired(start, 10));

        clock.0.set(15_000);
        assert!(clock.has_expired(start, 10));
    }

    #[test]
    fn test_zero_timeout_expires_immediately() {
        let clock = FakeClock(Cell::new(0));
        assert!(clock.has_expired(0, 0));
    }
}
