//! Test plans shipped with the harness
//!
//! The all-blocks plan routes GPIO, UART, I2C and SPI over the same PMOD0
//! pins in turn, each muxed test followed by its unmuxed counterpart, so
//! the operator swaps accessories twice during a run. Payload sizes and
//! timings come from the firmware's settings.

use sonata_hal::{BlockInput, GpioInstance, GpioPin, I2cId, OutputPin, SpiId, UartId};

use crate::testplan::{
    BlockInputAssignment, GpioTest, I2cTest, OutputPinAssignment, SpiTest, Test, TestData,
    UartTest,
};

/// Crossbar select values on the PMOD0 pins
pub mod select {
    pub const PIN1_I2C0_SDA: u8 = 1;
    pub const PIN1_GPIO: u8 = 2;
    pub const PIN2_UART2_TX: u8 = 1;
    pub const PIN2_I2C0_SCL: u8 = 2;
    pub const PIN2_SPI3_COPI: u8 = 3;
    pub const PIN2_GPIO: u8 = 4;
    pub const PIN4_SPI3_SCK: u8 = 1;

    pub const GPIO_FROM_PIN3: u8 = 1;
    pub const UART2_FROM_PIN3: u8 = 2;
    pub const SPI3_FROM_PIN3: u8 = 3;

    pub const OFF: u8 = sonata_hal::SELECT_OFF;
}

/// Payload sizes and timings for the GPIO and UART round trips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadSettings {
    pub gpio_wait_ms: u32,
    pub gpio_test_length: u32,
    pub uart_timeout_ms: u32,
    pub uart_test_bytes: u32,
}

impl PayloadSettings {
    /// 1 ms settling over 10 GPIO bits, 100 UART bytes within 10 ms
    pub const DEFAULT: Self = Self {
        gpio_wait_ms: 1,
        gpio_test_length: 10,
        uart_timeout_ms: 10,
        uart_test_bytes: 100,
    };
}

impl Default for PayloadSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

pub const ALL_BLOCKS_NAME: &str = "all blocks over PMOD0";
pub const ALL_BLOCKS_LEN: usize = 8;

/// PMOD0_2 drives, PMOD0_3 samples
pub const fn gpio_loopback(settings: PayloadSettings) -> TestData {
    TestData::Gpio(GpioTest {
        output_pin: GpioPin::new(GpioInstance::Pmod, 1),
        input_pin: GpioPin::new(GpioInstance::Pmod, 2),
        wait_ms: settings.gpio_wait_ms,
        test_length: settings.gpio_test_length,
    })
}

pub const fn uart2_loopback(settings: PayloadSettings) -> TestData {
    TestData::Uart(UartTest {
        uart: UartId::Uart2,
        timeout_ms: settings.uart_timeout_ms,
        test_length: settings.uart_test_bytes,
    })
}

pub const BH1745_ID: TestData = TestData::I2c(I2cTest { i2c: I2cId::I2c0 });

/// PMOD0_1 is the chip select
pub const SF3_ID: TestData = TestData::Spi(SpiTest {
    spi: SpiId::Spi3,
    cs_pin: GpioPin::new(GpioInstance::Pmod, 0),
});

pub const GPIO_ON_PINS: [OutputPinAssignment; 1] =
    [OutputPinAssignment::new(OutputPin::Pmod0Io2, select::PIN2_GPIO)];
pub const GPIO_ON_INPUTS: [BlockInputAssignment; 1] = [BlockInputAssignment::new(
    BlockInput::PmodGpio2,
    select::GPIO_FROM_PIN3,
)];
pub const PIN2_OFF: [OutputPinAssignment; 1] =
    [OutputPinAssignment::new(OutputPin::Pmod0Io2, select::OFF)];
pub const GPIO_OFF_INPUTS: [BlockInputAssignment; 1] =
    [BlockInputAssignment::new(BlockInput::PmodGpio2, select::OFF)];

pub const UART_ON_PINS: [OutputPinAssignment; 1] =
    [OutputPinAssignment::new(OutputPin::Pmod0Io2, select::PIN2_UART2_TX)];
pub const UART_ON_INPUTS: [BlockInputAssignment; 1] = [BlockInputAssignment::new(
    BlockInput::UartReceive2,
    select::UART2_FROM_PIN3,
)];
pub const UART_OFF_INPUTS: [BlockInputAssignment; 1] =
    [BlockInputAssignment::new(BlockInput::UartReceive2, select::OFF)];

pub const I2C_ON_PINS: [OutputPinAssignment; 2] = [
    OutputPinAssignment::new(OutputPin::Pmod0Io1, select::PIN1_I2C0_SDA),
    OutputPinAssignment::new(OutputPin::Pmod0Io2, select::PIN2_I2C0_SCL),
];
pub const I2C_OFF_PINS: [OutputPinAssignment; 2] = [
    OutputPinAssignment::new(OutputPin::Pmod0Io1, select::OFF),
    OutputPinAssignment::new(OutputPin::Pmod0Io2, select::OFF),
];

pub const SPI_ON_PINS: [OutputPinAssignment; 3] = [
    OutputPinAssignment::new(OutputPin::Pmod0Io1, select::PIN1_GPIO),
    OutputPinAssignment::new(OutputPin::Pmod0Io2, select::PIN2_SPI3_COPI),
    OutputPinAssignment::new(OutputPin::Pmod0Io4, select::PIN4_SPI3_SCK),
];
pub const SPI_ON_INPUTS: [BlockInputAssignment; 1] = [BlockInputAssignment::new(
    BlockInput::SpiReceive3,
    select::SPI3_FROM_PIN3,
)];
pub const SPI_OFF_PINS: [OutputPinAssignment; 3] = [
    OutputPinAssignment::new(OutputPin::Pmod0Io1, select::OFF),
    OutputPinAssignment::new(OutputPin::Pmod0Io2, select::OFF),
    OutputPinAssignment::new(OutputPin::Pmod0Io4, select::OFF),
];
pub const SPI_OFF_INPUTS: [BlockInputAssignment; 1] =
    [BlockInputAssignment::new(BlockInput::SpiReceive3, select::OFF)];

/// Every block muxed, then unmuxed, over the same PMOD0 pins
///
/// `const` so the firmware can place the plan in a `static`.
pub const fn all_blocks(settings: PayloadSettings) -> [Test<'static>; ALL_BLOCKS_LEN] {
    let gpio = gpio_loopback(settings);
    let uart = uart2_loopback(settings);
    [
        Test::new("PMOD0_2 -> PMOD0_3 GPIO Muxed", gpio, true)
            .manual("Manually connect PMOD0 pins 2 and 3 with a wire in a loop.")
            .output_pins(&GPIO_ON_PINS)
            .block_inputs(&GPIO_ON_INPUTS),
        Test::new("PMOD0_2 -> PMOD0_3 GPIO Not Muxed", gpio, false)
            .output_pins(&PIN2_OFF)
            .block_inputs(&GPIO_OFF_INPUTS),
        Test::new("PMOD0_2 -> PMOD0_3 UART Muxed", uart, true)
            .output_pins(&UART_ON_PINS)
            .block_inputs(&UART_ON_INPUTS),
        Test::new("PMOD0_2 -> PMOD0_3 UART Not Muxed", uart, false)
            .output_pins(&PIN2_OFF)
            .block_inputs(&UART_OFF_INPUTS),
        Test::new("PMOD0_1 & PMOD0_2 I2C Muxed", BH1745_ID, true)
            .manual("Remove the wire connecting PMOD0 pins 2 and 3. Connect the BH1745 to PMOD0.")
            .output_pins(&I2C_ON_PINS),
        Test::new("PMOD0_1 & PMOD0_2 I2C Not Muxed", BH1745_ID, false)
            .output_pins(&I2C_OFF_PINS),
        Test::new("PMOD0_{1,2,3,4} SPI Muxed", SF3_ID, true)
            .manual("Remove the BH1745 from PMOD0. Connect the Pmod SF3 flash to PMOD0.")
            .output_pins(&SPI_ON_PINS)
            .block_inputs(&SPI_ON_INPUTS),
        Test::new("PMOD0_{1,2,3,4} SPI Not Muxed", SF3_ID, false)
            .output_pins(&SPI_OFF_PINS)
            .block_inputs(&SPI_OFF_INPUTS),
    ]
}
