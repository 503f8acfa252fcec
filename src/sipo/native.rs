use embedded_hal::digital::PinState;

/// The host's own digital pin primitives, addressed by pin number.
///
/// The controller drives its three control lines through this trait and forwards
/// extended-pin accesses below the native pin count to it unchanged.
pub trait NativeIo {
    /// Error raised by the underlying hardware layer.
    type Error: core::fmt::Debug;

    /// Configures `pin` as a push-pull output.
    fn set_output(&mut self, pin: u8) -> Result<(), Self::Error>;

    /// Drives `pin` to `level`.
    fn write_pin(&mut self, pin: u8, level: PinState) -> Result<(), Self::Error>;

    /// Reads the current level of `pin`.
    fn read_pin(&mut self, pin: u8) -> Result<PinState, Self::Error>;
}

impl<T: NativeIo + ?Sized> NativeIo for &mut T {
    type Error = T::Error;

    #[inline]
    fn set_output(&mut self, pin: u8) -> Result<(), Self::Error> {
        T::set_output(self, pin)
    }

    #[inline]
    fn write_pin(&mut self, pin: u8, level: PinState) -> Result<(), Self::Error> {
        T::write_pin(self, pin, level)
    }

    #[inline]
    fn read_pin(&mut self, pin: u8) -> Result<PinState, Self::Error> {
        T::read_pin(self, pin)
    }
}
