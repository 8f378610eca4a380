//! Cycle-counter time source
//!
//! Ibex counts core clock cycles in `mcycle`, which is 64 bits wide and
//! never wraps in practice.

use embedded_hal::delay::DelayNs;
use riscv::register::mcycle;
use sonata_hal::Clock;

/// Microsecond clock and busy-wait delay derived from `mcycle`
pub struct CycleTimer {
    cycles_per_us: u64,
}

impl CycleTimer {
    pub fn new(clock_hz: u32) -> Self {
        Self {
            cycles_per_us: u64::from(clock_hz / 1_000_000).max(1),
        }
    }
}

impl Clock for CycleTimer {
    fn now_us(&self) -> u64 {
        mcycle::read64() / self.cycles_per_us
    }
}

impl DelayNs for CycleTimer {
    fn delay_ns(&mut self, ns: u32) {
        let cycles = (u64::from(ns) * self.cycles_per_us).div_ceil(1000);
        let start = mcycle::read64();
        while mcycle::read64().wrapping_sub(start) < cycles {}
    }
}
