//! Harness context
//!
//! Owns every peripheral handle a plan can touch plus the pattern
//! source. Each verifier borrows only the handles its test names, and the
//! pattern source is the only state carried from one test to the next.

use embedded_hal::delay::DelayNs;
use sonata_hal::{Clock, Crossbar, GpioBank, I2cBus, I2cId, SpiBus, SpiId, Uart, UartId};

use crate::crossbar::CrossbarConfigurator;
use crate::pattern::PatternSource;
use crate::runner::TestBench;
use crate::testplan::{BlockInputAssignment, OutputPinAssignment, TestData};
use crate::verify::{
    bh1745_read_id, gpio_write_read, sf3_read_jedec_id, uart_send_receive, Observation,
};

/// Peripheral handles for one board
pub struct Harness<G, U, I, S, X, T> {
    /// All GPIO instances
    pub gpio: G,
    /// UARTs 1 to 4, indexed by [`UartId::index`]
    pub uarts: [U; UartId::COUNT],
    /// I2C controllers, indexed by [`I2cId::index`]
    pub i2cs: [I; I2cId::COUNT],
    /// Pmod SPI controllers, indexed by [`SpiId::index`]
    pub spis: [S; SpiId::COUNT],
    pub crossbar: X,
    /// Monotonic time and busy-wait delays
    pub timer: T,
    pub pattern: PatternSource,
}

impl<G, U, I, S, X, T> Harness<G, U, I, S, X, T> {
    pub fn new(
        gpio: G,
        uarts: [U; UartId::COUNT],
        i2cs: [I; I2cId::COUNT],
        spis: [S; SpiId::COUNT],
        crossbar: X,
        timer: T,
        pattern: PatternSource,
    ) -> Self {
        Self {
            gpio,
            uarts,
            i2cs,
            spis,
            crossbar,
            timer,
            pattern,
        }
    }
}

impl<G, U, I, S, X, T> TestBench for Harness<G, U, I, S, X, T>
where
    G: GpioBank,
    U: Uart,
    I: I2cBus,
    S: SpiBus,
    X: Crossbar,
    T: Clock + DelayNs,
{
    fn configure(
        &mut self,
        output_pins: &[OutputPinAssignment],
        block_inputs: &[BlockInputAssignment],
    ) {
        self.crossbar.apply(output_pins, block_inputs);
    }

    fn verify(&mut self, data: &TestData) -> Observation {
        match data {
            TestData::Gpio(test) => {
                gpio_write_read(&mut self.gpio, &mut self.timer, &mut self.pattern, test)
            }
            TestData::Uart(test) => uart_send_receive(
                &mut self.uarts[test.uart.index()],
                &self.timer,
                &mut self.pattern,
                test,
            ),
            TestData::I2c(test) => bh1745_read_id(&mut self.i2cs[test.i2c.index()]),
            TestData::Spi(test) => {
                sf3_read_jedec_id(&mut self.spis[test.spi.index()], &mut self.gpio, test.cs_pin)
            }
        }
    }
}
