//! Test support utilities - only compiled in test builds.

use embedded_hal::digital::PinState;

use crate::sipo::{
    ShiftError,
    board::Board,
    builder::ControllerBuilder,
    controller::ShiftRegisterController,
    native::NativeIo,
    sim::{SimBoard, SimError},
    types::ControlLines,
};

/// Standard test board: default wiring, room for a few dozen transmissions.
pub type TestBoard = SimBoard<1024>;
pub type TestController = ShiftRegisterController<TestBoard>;

pub fn test_board() -> TestBoard {
    SimBoard::new(ControlLines::default())
}

/// Uno-sized controller on the default lines, already initialized, with the
/// event log cleared.
pub fn test_controller() -> TestController {
    let mut sr = ControllerBuilder::new()
        .board(Board::Uno)
        .build(test_board())
        .unwrap();
    sr.init().unwrap();
    sr.io_mut().clear_events();
    sr
}

/// Number of latches the simulated register has seen.
pub fn latches(sr: &TestController) -> usize {
    sr.io().chip().latch_count()
}

/// Asserts the physical register outputs match the committed state.
pub fn assert_in_sync(sr: &TestController) {
    assert_eq!(sr.io().chip().outputs(), sr.read_all_pins());
}

pub fn assert_out_of_range<T: core::fmt::Debug>(result: Result<T, ShiftError<SimError>>, pin: u8) {
    assert_eq!(result.unwrap_err(), ShiftError::PinOutOfRange(pin));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boom;

/// Native I/O that accepts `budget` pin writes and fails every one after.
#[derive(Debug, Default)]
pub struct FailingIo {
    budget: usize,
    writes: usize,
}

impl FailingIo {
    pub fn after(budget: usize) -> Self {
        Self { budget, writes: 0 }
    }

    /// Number of writes that succeeded.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl NativeIo for FailingIo {
    type Error = Boom;

    fn set_output(&mut self, _pin: u8) -> Result<(), Boom> {
        Ok(())
    }

    fn write_pin(&mut self, _pin: u8, _level: PinState) -> Result<(), Boom> {
        if self.writes >= self.budget {
            return Err(Boom);
        }
        self.writes += 1;
        Ok(())
    }

    fn read_pin(&mut self, _pin: u8) -> Result<PinState, Boom> {
        Err(Boom)
    }
}
