//! Console keypress confirmation

use pinmux_check_core::OperatorPrompt;
use sonata_hal::UartRx;

/// Waits for the operator to press a key on the console
pub struct ConsolePrompt<R> {
    rx: R,
}

impl<R: UartRx> ConsolePrompt<R> {
    pub fn new(rx: R) -> Self {
        Self { rx }
    }
}

impl<R: UartRx> OperatorPrompt for ConsolePrompt<R> {
    fn await_confirmation(&mut self) {
        // Keys pressed before the instruction was printed do not count
        let _ = self.rx.drain();

        loop {
            match self.rx.try_read_byte() {
                Ok(Some(_)) => return,
                // Line errors are noise on an idle console
                Ok(None) | Err(_) => {}
            }
        }
    }
}
