//! BH1745 colour sensor ID check

use sonata_hal::I2cBus;

use super::{CheckFailure, Observation};

/// BH1745 7-bit bus address
pub const BH1745_ADDRESS: u8 = 0x38;
/// Manufacturer ID register
pub const BH1745_MANUFACTURER_ID_REG: u8 = 0x92;
/// Value the manufacturer ID register reads back
pub const BH1745_MANUFACTURER_ID: u8 = 0xE0;

/// Read the BH1745 manufacturer ID
///
/// A NACK or any other bus error is a failed round trip, which is what an
/// unmuxed bus produces.
pub fn bh1745_read_id<I: I2cBus>(i2c: &mut I) -> Observation {
    let mut id = [0u8; 1];
    i2c.write_read(BH1745_ADDRESS, &[BH1745_MANUFACTURER_ID_REG], &mut id)
        .map_err(|_| CheckFailure::Bus)?;

    if id[0] == BH1745_MANUFACTURER_ID {
        Ok(())
    } else {
        Err(CheckFailure::I2cIdMismatch { read: id[0] })
    }
}
