use crate::sipo::{
    ShiftError,
    board::{self, Board},
    controller::ShiftRegisterController,
    native::NativeIo,
    types::ControlLines,
};

/// Builds a [`ShiftRegisterController`] from construction-time settings.
///
/// Every setting has a default: clock on pin 2, latch on pin 3, data on pin 4 and
/// the native pin count of an Uno.
///
/// ```rust
/// use embedded_sipo::prelude::*;
/// use embedded_sipo::sipo::sim::SimBoard;
///
/// let lines = ControlLines::new(11, 12, 13);
/// let sr = ControllerBuilder::new()
///     .lines(lines)
///     .board(Board::Leonardo)
///     .build(SimBoard::<64>::new(lines))
///     .unwrap();
///
/// assert_eq!(sr.native_pins(), 20);
/// assert!(sr.io().is_output(12));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerBuilder {
    lines: ControlLines,
    native_pins: u8,
}

impl Default for ControllerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ControllerBuilder {
    pub fn new() -> Self {
        ControllerBuilder {
            lines: ControlLines::default(),
            native_pins: board::DEFAULT_NATIVE_PINS,
        }
    }

    pub fn clock_pin(mut self, pin: u8) -> Self {
        self.lines.clock = pin;
        self
    }

    pub fn latch_pin(mut self, pin: u8) -> Self {
        self.lines.latch = pin;
        self
    }

    pub fn data_pin(mut self, pin: u8) -> Self {
        self.lines.data = pin;
        self
    }

    /// Sets all three control lines at once.
    pub fn lines(mut self, lines: ControlLines) -> Self {
        self.lines = lines;
        self
    }

    /// Uses the native pin count of `board`.
    pub fn board(mut self, board: Board) -> Self {
        self.native_pins = board.native_pins();
        self
    }

    /// Sets the native pin count directly, for boards not in [`Board`].
    pub fn native_pins(mut self, count: u8) -> Self {
        self.native_pins = count;
        self
    }

    /// Configures the control lines on `io` and returns the controller.
    ///
    /// The register is not touched; call
    /// [`init`](ShiftRegisterController::init) before use.
    pub fn build<IO: NativeIo>(
        self,
        io: IO,
    ) -> Result<ShiftRegisterController<IO>, ShiftError<IO::Error>> {
        debug!(
            "sipo: clock {} latch {} data {}, {} native pins",
            self.lines.clock,
            self.lines.latch,
            self.lines.data,
            self.native_pins
        );
        ShiftRegisterController::new(io, self.lines, self.native_pins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sipo::sim::SimError;
    use crate::sipo::test_support::{TestBoard, test_board};

    #[test]
    fn defaults_match_uno_wiring() {
        let sr = ControllerBuilder::new().build(test_board()).unwrap();
        assert_eq!(sr.lines(), ControlLines::new(2, 3, 4));
        assert_eq!(sr.native_pins(), 14);
        assert!(!sr.is_batching());
        assert_eq!(sr.read_all_pins(), 0);
    }

    #[test]
    fn individual_pins_override_defaults() {
        let lines = ControlLines::new(11, 12, 14);
        let board: TestBoard = crate::sipo::sim::SimBoard::new(lines);
        let sr = ControllerBuilder::default()
            .clock_pin(11)
            .latch_pin(12)
            .data_pin(14)
            .board(Board::Mega)
            .build(board)
            .unwrap();

        assert_eq!(sr.lines(), lines);
        assert_eq!(sr.native_pins(), 54);
        for pin in [11, 12, 14] {
            assert!(sr.io().is_output(pin));
        }
    }

    #[test]
    fn explicit_native_pin_count_wins_over_board() {
        let sr = ControllerBuilder::new()
            .board(Board::Due)
            .native_pins(30)
            .build(test_board())
            .unwrap();
        assert_eq!(sr.native_pins(), 30);
    }

    #[test]
    fn build_reports_native_errors() {
        let result = ControllerBuilder::new().clock_pin(99).build(test_board());
        assert_eq!(
            result.unwrap_err(),
            ShiftError::Native(SimError::NoSuchPin(99))
        );
    }
}
