/// Errors that can occur while driving the shift register.
///
/// `E` is the error type of the underlying [`NativeIo`](crate::sipo::NativeIo).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShiftError<E> {
    /// The native pin primitive failed.
    Native(E),
    /// The pin does not map to one of the register's 8 outputs.
    ///
    /// Carries the pin number as passed by the caller. Nothing was written and
    /// nothing was transmitted.
    PinOutOfRange(u8),
    /// A batch was applied or cancelled while no batch was active.
    NotBatching,
}

impl<E> ShiftError<E> {
    /// Returns true if this error was raised by the native pin primitive.
    #[inline]
    pub fn is_native(&self) -> bool {
        matches!(self, ShiftError::Native(_))
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for ShiftError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ShiftError::Native(e) => write!(f, "native pin error: {e:?}"),
            ShiftError::PinOutOfRange(pin) => {
                write!(f, "pin {pin} is outside the shift register range")
            }
            ShiftError::NotBatching => write!(f, "no batch write in progress"),
        }
    }
}

impl<E: core::fmt::Debug> embedded_hal::digital::Error for ShiftError<E> {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}
