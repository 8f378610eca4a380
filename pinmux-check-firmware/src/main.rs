//! Pinmux Check - Sonata crossbar acceptance firmware
//!
//! Brings up every peripheral the all-blocks plan can route, validates
//! the plan, runs it against the real pin multiplexer and prints a
//! summary on the console UART. The operator confirms accessory changes
//! by pressing a key on the console.

#![no_std]
#![no_main]

#[cfg(feature = "defmt")]
use defmt::{error, info};
#[cfg(feature = "defmt")]
use defmt_rtt as _;
use panic_halt as _;

use pinmux_check_core::testplan::validate_testplan;
use pinmux_check_core::{Harness, PatternSource, Reporter, TestPlanRunner};
use sonata_hal::i2c::I2cConfig;
use sonata_hal::spi::SpiConfig;
use sonata_hal::uart::UartConfig;
use sonata_hal::{I2cId, SpiId, UartId};
use sonata_hal_mmio::{SonataGpio, SonataI2c, SonataPinmux, SonataSpi, SonataUart};

mod board;
mod prompt;
mod settings;
mod testplans;
mod timer;

use crate::prompt::ConsolePrompt;
use crate::testplans::{ALL_BLOCKS, ALL_BLOCKS_NAME};
use crate::timer::CycleTimer;

#[riscv_rt::entry]
fn main() -> ! {
    let uart_config = UartConfig {
        baudrate: settings::BAUD_RATE,
    };

    // SAFETY: every block below is wrapped exactly once, here
    let mut console = unsafe { SonataUart::new(board::CONSOLE_UART_BASE) };
    console.init(&uart_config, board::SYSCLK_HZ);
    let (console_tx, console_rx) = console.split();

    let uarts = [UartId::Uart1, UartId::Uart2, UartId::Uart3, UartId::Uart4].map(|id| {
        // SAFETY: see above
        let mut uart = unsafe { SonataUart::new(board::uart_base(id)) };
        uart.init(&uart_config, board::SYSCLK_HZ);
        uart
    });

    let i2cs = [I2cId::I2c0, I2cId::I2c1].map(|id| {
        // SAFETY: see above
        let mut i2c = unsafe { SonataI2c::new(board::i2c_base(id)) };
        i2c.init(&I2cConfig::STANDARD, board::SYSCLK_HZ);
        i2c
    });

    let spis = [SpiId::Spi3, SpiId::Spi4].map(|id| {
        // SAFETY: see above
        let mut spi = unsafe { SonataSpi::new(board::spi_base(id)) };
        spi.init(&SpiConfig::default());
        spi
    });

    // SAFETY: see above
    let gpio = unsafe { SonataGpio::new(board::GPIO_BASE) };
    // SAFETY: see above
    let pinmux = unsafe { SonataPinmux::new(board::PINMUX_BASE) };

    let mut harness = Harness::new(
        gpio,
        uarts,
        i2cs,
        spis,
        pinmux,
        CycleTimer::new(board::SYSCLK_HZ),
        PatternSource::new(settings::SEED_HI, settings::SEED_LO),
    );
    let mut prompt = ConsolePrompt::new(console_rx);
    let mut reporter = Reporter::new(console_tx);

    #[cfg(feature = "defmt")]
    info!("Pinmux check firmware starting, {} tests", ALL_BLOCKS.len());

    match validate_testplan(&ALL_BLOCKS) {
        Ok(warnings) => {
            for warning in &warnings {
                reporter.plan_warning(warning);
            }
        }
        Err(e) => {
            #[cfg(feature = "defmt")]
            error!("test plan rejected: {}", e);
            reporter.plan_error(&e);
            halt();
        }
    }

    reporter.plan_started(ALL_BLOCKS_NAME, ALL_BLOCKS.len());
    let runner = TestPlanRunner::new(settings::RUNNER);
    let report = runner.run(&ALL_BLOCKS, &mut harness, &mut prompt, &mut reporter);
    reporter.summary(&report);

    #[cfg(feature = "defmt")]
    info!(
        "Pinmux check finished: {}/{} passed",
        report.passed,
        report.total()
    );

    halt()
}

fn halt() -> ! {
    loop {
        core::hint::spin_loop();
    }
}
