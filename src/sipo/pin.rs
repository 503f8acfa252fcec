use embedded_hal::digital::{ErrorType, OutputPin, PinState, StatefulOutputPin};

use crate::sipo::{ShiftError, controller::ShiftRegisterController, native::NativeIo};

/// One register output, usable wherever an embedded-hal [`OutputPin`] is expected.
///
/// Obtained from [`ShiftRegisterController::pin`]. Writes follow the controller's
/// write mode, so a pin driven inside a batch changes only when the batch is applied.
/// [`is_set_high`](StatefulOutputPin::is_set_high) reports the committed level.
pub struct ShiftPin<'a, IO: NativeIo> {
    sr: &'a mut ShiftRegisterController<IO>,
    bit: u8,
}

impl<'a, IO: NativeIo> core::fmt::Debug for ShiftPin<'a, IO> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ShiftPin").field("bit", &self.bit).finish_non_exhaustive()
    }
}

impl<'a, IO: NativeIo> ShiftPin<'a, IO> {
    pub(crate) fn new(sr: &'a mut ShiftRegisterController<IO>, bit: u8) -> Self {
        Self { sr, bit }
    }

    /// Register output index of this pin.
    #[inline]
    pub fn index(&self) -> u8 {
        self.bit
    }
}

impl<'a, IO: NativeIo> ErrorType for ShiftPin<'a, IO> {
    type Error = ShiftError<IO::Error>;
}

impl<'a, IO: NativeIo> OutputPin for ShiftPin<'a, IO> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.sr.write(self.bit, PinState::Low)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.sr.write(self.bit, PinState::High)
    }
}

impl<'a, IO: NativeIo> StatefulOutputPin for ShiftPin<'a, IO> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.sr.read(self.bit)? == PinState::High)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.is_set_high()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sipo::test_support::{assert_out_of_range, latches, test_controller};

    fn blink(led: &mut impl StatefulOutputPin) {
        led.set_high().unwrap();
        led.toggle().unwrap();
        led.toggle().unwrap();
    }

    #[test]
    fn drives_register_output() {
        let mut sr = test_controller();

        {
            let mut pin = sr.pin(4).unwrap();
            assert_eq!(pin.index(), 4);
            pin.set_high().unwrap();
            assert!(pin.is_set_high().unwrap());
            pin.set_state(PinState::Low).unwrap();
            assert!(pin.is_set_low().unwrap());
        }

        assert_eq!(sr.read_all_pins(), 0);
        assert_eq!(sr.io().chip().output(4), PinState::Low);
    }

    #[test]
    fn works_with_generic_drivers() {
        let mut sr = test_controller();
        blink(&mut sr.pin(7).unwrap());
        assert_eq!(sr.read_all_pins(), 0b1000_0000);
        assert_eq!(sr.io().chip().outputs(), 0b1000_0000);
    }

    #[test]
    fn follows_batch_mode() {
        let mut sr = test_controller();
        let before = latches(&sr);

        sr.batch_write_start();
        {
            let mut pin = sr.pin(1).unwrap();
            pin.set_high().unwrap();
            // Committed level is still low until the batch is applied
            assert!(pin.is_set_low().unwrap());
        }
        sr.batch_write_apply().unwrap();

        assert_eq!(sr.read_all_pins(), 0b10);
        assert_eq!(latches(&sr), before + 1);
    }

    #[test]
    fn rejects_pins_past_register() {
        let mut sr = test_controller();
        assert_out_of_range(sr.pin(8), 8);
    }
}
