//! Test plans shipped with the firmware
//!
//! Built from the core's plan definitions with payload settings from
//! harness.toml.

use pinmux_check_core::plans::{self, PayloadSettings, ALL_BLOCKS_LEN};
use pinmux_check_core::Test;

use crate::settings;

pub use pinmux_check_core::plans::ALL_BLOCKS_NAME;

const PAYLOADS: PayloadSettings = PayloadSettings {
    gpio_wait_ms: settings::GPIO_WAIT_MS,
    gpio_test_length: settings::GPIO_TEST_LENGTH,
    uart_timeout_ms: settings::UART_TIMEOUT_MS,
    uart_test_bytes: settings::UART_TEST_BYTES,
};

/// Every block muxed, then unmuxed, over the same PMOD0 pins
pub static ALL_BLOCKS: [Test<'static>; ALL_BLOCKS_LEN] = plans::all_blocks(PAYLOADS);
