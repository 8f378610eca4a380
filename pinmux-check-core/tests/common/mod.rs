//! Simulated Sonata board for runner tests
//!
//! Models the PMOD0 header with the same crossbar selects the all-blocks
//! plan uses. A round trip only completes when the crossbar routes the
//! block onto the header and the right accessory is plugged in.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use pinmux_check_core::pattern::PatternSource;
use pinmux_check_core::plans::select::*;
use pinmux_check_core::plans::{self, all_blocks, PayloadSettings, ALL_BLOCKS_LEN};
pub use pinmux_check_core::plans::I2C_ON_PINS;
use pinmux_check_core::runner::OperatorPrompt;
use pinmux_check_core::testplan::{Test, TestData};
use pinmux_check_core::Harness;
use sonata_hal::{
    BlockInput, Clock, Crossbar, GpioBank, GpioInstance, GpioPin, I2cBus, I2cId, OutputPin,
    SpiBus, SpiId, UartId, UartRx, UartTx,
};

/// What is plugged into PMOD0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessory {
    Nothing,
    /// Wire looping pins 2 and 3
    LoopWire,
    /// BH1745 colour sensor
    ColourSensor,
    /// Pmod SF3 flash
    Flash,
}

#[derive(Debug)]
pub struct BoardState {
    pub outputs: [u8; OutputPin::COUNT],
    pub inputs: [u8; BlockInput::COUNT],
    pub gpio_out: [u32; 4],
    pub gpio_oe: [u32; 4],
    pub accessory: Accessory,
    pub uart_rx: [VecDeque<u8>; UartId::COUNT],
    pub crossbar_writes: usize,
}

pub type Board = Rc<RefCell<BoardState>>;

pub fn board(accessory: Accessory) -> Board {
    Rc::new(RefCell::new(BoardState {
        outputs: [0; OutputPin::COUNT],
        inputs: [0; BlockInput::COUNT],
        gpio_out: [0; 4],
        gpio_oe: [0; 4],
        accessory,
        uart_rx: Default::default(),
        crossbar_writes: 0,
    }))
}

impl BoardState {
    fn out(&self, pin: OutputPin) -> u8 {
        self.outputs[pin.index()]
    }

    fn input(&self, input: BlockInput) -> u8 {
        self.inputs[input.index()]
    }

    fn pmod_bit(&self, register: &[u32; 4], bit: u8) -> bool {
        register[GpioInstance::Pmod.index()] & (1 << bit) != 0
    }

    /// Level on PMOD0 pin 2 if something drives it
    fn pin2_gpio_level(&self) -> Option<bool> {
        (self.out(OutputPin::Pmod0Io2) == PIN2_GPIO && self.pmod_bit(&self.gpio_oe, 1))
            .then(|| self.pmod_bit(&self.gpio_out, 1))
    }

    fn looped(&self) -> bool {
        self.accessory == Accessory::LoopWire
    }

    fn uart2_looped(&self) -> bool {
        self.looped()
            && self.out(OutputPin::Pmod0Io2) == PIN2_UART2_TX
            && self.input(BlockInput::UartReceive2) == UART2_FROM_PIN3
    }

    fn sensor_reachable(&self) -> bool {
        self.accessory == Accessory::ColourSensor
            && self.out(OutputPin::Pmod0Io1) == PIN1_I2C0_SDA
            && self.out(OutputPin::Pmod0Io2) == PIN2_I2C0_SCL
    }

    fn flash_selected(&self) -> bool {
        self.accessory == Accessory::Flash
            && self.out(OutputPin::Pmod0Io1) == PIN1_GPIO
            && self.out(OutputPin::Pmod0Io2) == PIN2_SPI3_COPI
            && self.out(OutputPin::Pmod0Io4) == PIN4_SPI3_SCK
            && self.input(BlockInput::SpiReceive3) == SPI3_FROM_PIN3
            && self.pmod_bit(&self.gpio_oe, 0)
            && !self.pmod_bit(&self.gpio_out, 0)
    }
}

pub struct SimCrossbar(pub Board);

impl Crossbar for SimCrossbar {
    fn select_output(&mut self, pin: OutputPin, select: u8) {
        let mut board = self.0.borrow_mut();
        board.outputs[pin.index()] = select;
        board.crossbar_writes += 1;
    }

    fn select_block_input(&mut self, input: BlockInput, select: u8) {
        let mut board = self.0.borrow_mut();
        board.inputs[input.index()] = select;
        board.crossbar_writes += 1;
    }
}

pub struct SimGpio(pub Board);

impl GpioBank for SimGpio {
    fn set_output(&mut self, pin: GpioPin, high: bool) {
        let mut board = self.0.borrow_mut();
        let register = &mut board.gpio_out[pin.instance.index()];
        if high {
            *register |= pin.mask();
        } else {
            *register &= !pin.mask();
        }
    }

    fn set_output_enable(&mut self, pin: GpioPin, enable: bool) {
        let mut board = self.0.borrow_mut();
        let register = &mut board.gpio_oe[pin.instance.index()];
        if enable {
            *register |= pin.mask();
        } else {
            *register &= !pin.mask();
        }
    }

    fn debounced_input(&mut self, pin: GpioPin) -> bool {
        let board = self.0.borrow();
        let is_pmod_bit2 = pin.instance == GpioInstance::Pmod && pin.bit == 2;
        let routed = board.input(BlockInput::PmodGpio2) == GPIO_FROM_PIN3;
        if is_pmod_bit2 && board.looped() && routed {
            // Unconnected lines read low
            board.pin2_gpio_level().unwrap_or(false)
        } else {
            false
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct SimError;

pub struct SimUart {
    pub board: Board,
    pub id: UartId,
}

impl UartTx for SimUart {
    type Error = SimError;

    fn write_byte(&mut self, byte: u8) -> Result<(), SimError> {
        let mut board = self.board.borrow_mut();
        if self.id == UartId::Uart2 && board.uart2_looped() {
            board.uart_rx[self.id.index()].push_back(byte);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SimError> {
        Ok(())
    }
}

impl UartRx for SimUart {
    type Error = SimError;

    fn try_read_byte(&mut self) -> Result<Option<u8>, SimError> {
        Ok(self.board.borrow_mut().uart_rx[self.id.index()].pop_front())
    }
}

pub struct SimI2c {
    pub board: Board,
    pub id: I2cId,
}

impl I2cBus for SimI2c {
    type Error = SimError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), SimError> {
        self.write_read(address, data, &mut [])
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), SimError> {
        self.write_read(address, &[], buf)
    }

    fn write_read(&mut self, address: u8, write: &[u8], read: &mut [u8]) -> Result<(), SimError> {
        let board = self.board.borrow();
        if self.id != I2cId::I2c0 || address != 0x38 || !board.sensor_reachable() {
            return Err(SimError);
        }
        let value = if write == [0x92u8] { 0xE0 } else { 0x00 };
        read.fill(value);
        Ok(())
    }
}

pub struct SimSpi {
    pub board: Board,
    pub id: SpiId,
    command: Option<u8>,
}

impl SimSpi {
    pub fn new(board: Board, id: SpiId) -> Self {
        Self {
            board,
            id,
            command: None,
        }
    }
}

impl SpiBus for SimSpi {
    type Error = SimError;

    fn write(&mut self, data: &[u8]) -> Result<(), SimError> {
        self.command = data.first().copied();
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), SimError> {
        let board = self.board.borrow();
        if self.id == SpiId::Spi3 && board.flash_selected() && self.command == Some(0x9F) {
            let id = [0x20, 0xBA, 0x19];
            for (byte, value) in buf.iter_mut().zip(id) {
                *byte = value;
            }
        } else {
            buf.fill(0xFF);
        }
        Ok(())
    }

    fn wait_idle(&mut self) -> Result<(), SimError> {
        Ok(())
    }
}

/// Time that only moves when it is read or waited on
#[derive(Clone)]
pub struct SimTimer {
    now: Rc<Cell<u64>>,
}

impl SimTimer {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(0)),
        }
    }
}

impl Clock for SimTimer {
    fn now_us(&self) -> u64 {
        let now = self.now.get();
        self.now.set(now + 10);
        now
    }
}

impl DelayNs for SimTimer {
    fn delay_ns(&mut self, ns: u32) {
        self.now.set(self.now.get() + u64::from(ns).div_ceil(1000));
    }
}

pub type SimHarness = Harness<SimGpio, SimUart, SimI2c, SimSpi, SimCrossbar, SimTimer>;

pub fn harness(board: &Board) -> SimHarness {
    Harness::new(
        SimGpio(board.clone()),
        [UartId::Uart1, UartId::Uart2, UartId::Uart3, UartId::Uart4].map(|id| SimUart {
            board: board.clone(),
            id,
        }),
        [I2cId::I2c0, I2cId::I2c1].map(|id| SimI2c {
            board: board.clone(),
            id,
        }),
        [SpiId::Spi3, SpiId::Spi4].map(|id| SimSpi::new(board.clone(), id)),
        SimCrossbar(board.clone()),
        SimTimer::new(),
        PatternSource::default(),
    )
}

/// Operator who plugs in the next accessory on every prompt
pub struct SimOperator {
    pub board: Board,
    pub sequence: Vec<Accessory>,
    pub confirmations: usize,
}

impl SimOperator {
    pub fn new(board: &Board, sequence: &[Accessory]) -> Self {
        Self {
            board: board.clone(),
            sequence: sequence.to_vec(),
            confirmations: 0,
        }
    }
}

impl OperatorPrompt for SimOperator {
    fn await_confirmation(&mut self) {
        if let Some(&accessory) = self.sequence.get(self.confirmations) {
            self.board.borrow_mut().accessory = accessory;
        }
        self.confirmations += 1;
    }
}

pub const GPIO_LOOP: TestData = plans::gpio_loopback(PayloadSettings::DEFAULT);
pub const UART2_LOOP: TestData = plans::uart2_loopback(PayloadSettings::DEFAULT);
pub const BH1745: TestData = plans::BH1745_ID;
pub const SF3: TestData = plans::SF3_ID;

/// The plan the firmware ships, at its default payload settings
pub static ALL_BLOCKS: [Test<'static>; ALL_BLOCKS_LEN] = all_blocks(PayloadSettings::DEFAULT);

/// Accessories in the order the all-blocks plan asks for them
pub const ALL_BLOCKS_ACCESSORIES: [Accessory; 3] =
    [Accessory::LoopWire, Accessory::ColourSensor, Accessory::Flash];
