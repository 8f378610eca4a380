//! UART echo verifier
//!
//! With TX looped back to RX through the crossbar, every byte written to
//! the UART under test comes straight back on its own receive FIFO.

use sonata_hal::{Clock, Uart};

use super::{CheckFailure, Observation};
use crate::pattern::PatternSource;
use crate::testplan::UartTest;

/// Run a UART send/receive loopback
///
/// Stale bytes are drained first. Each pseudo-random byte is sent and
/// then polled for until it comes back; a single `timeout_ms` deadline
/// measured from the start bounds the whole exchange.
pub fn uart_send_receive<U, C>(
    uart: &mut U,
    clock: &C,
    pattern: &mut PatternSource,
    test: &UartTest,
) -> Observation
where
    U: Uart,
    C: Clock,
{
    uart.drain().map_err(|_| CheckFailure::Bus)?;

    let start = clock.now_us();
    for index in 0..test.test_length {
        let sent = pattern.next_byte();
        uart.write_byte(sent).map_err(|_| CheckFailure::Bus)?;

        let received = loop {
            // Poll before checking the deadline so a byte that is already
            // waiting is never reported as a timeout
            if let Some(byte) = uart.try_read_byte().map_err(|_| CheckFailure::Bus)? {
                break byte;
            }
            if clock.has_expired(start, test.timeout_ms) {
                return Err(CheckFailure::Timeout {
                    received: index,
                    expected: test.test_length,
                });
            }
        };

        if received != sent {
            return Err(CheckFailure::DataMismatch {
                index,
                sent,
                received,
            });
        }
    }

    Ok(())
}
