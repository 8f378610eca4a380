//! Pmod SF3 flash JEDEC ID check
//!
//! The SPI controllers on the Pmod headers have no hardware chip select,
//! so CS is driven as a plain GPIO line for the duration of the
//! transaction.

use sonata_hal::{GpioBank, GpioPin, SpiBus};

use super::{CheckFailure, Observation};

/// JEDEC READ ID command
pub const JEDEC_READ_ID: u8 = 0x9F;
/// Micron N25Q256A manufacturer, memory type and capacity
pub const SF3_JEDEC_ID: [u8; 3] = [0x20, 0xBA, 0x19];

/// Read the flash's JEDEC ID with `cs_pin` as chip select
///
/// Chip select is deasserted and released again even when the transfer
/// fails.
pub fn sf3_read_jedec_id<S, G>(spi: &mut S, gpio: &mut G, cs_pin: GpioPin) -> Observation
where
    S: SpiBus,
    G: GpioBank,
{
    // Park CS high before enabling the driver so the flash never sees a
    // spurious select
    gpio.set_output(cs_pin, true);
    gpio.set_output_enable(cs_pin, true);
    gpio.set_output(cs_pin, false);

    let mut id = [0u8; 3];
    let transfer = spi
        .write(&[JEDEC_READ_ID])
        .and_then(|()| spi.read(&mut id))
        .and_then(|()| spi.wait_idle());

    gpio.set_output(cs_pin, true);
    gpio.set_output_enable(cs_pin, false);

    transfer.map_err(|_| CheckFailure::Bus)?;

    if id == SF3_JEDEC_ID {
        Ok(())
    } else {
        Err(CheckFailure::JedecIdMismatch { read: id })
    }
}
