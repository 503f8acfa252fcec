use embedded_hal::digital::PinState;

use crate::sipo::{
    native::NativeIo,
    types::{ControlLines, PinBits},
};

/// Serializes `pins` to the register.
///
/// Latch low, then bit 7 down to bit 0 each clocked in on a rising clock edge,
/// then latch high so all outputs change together. The data line is left low.
/// The first native error aborts the transfer.
pub(crate) fn send<IO: NativeIo>(
    io: &mut IO,
    lines: &ControlLines,
    pins: PinBits,
) -> Result<(), IO::Error> {
    trace!("sipo: send {}", pins);

    io.write_pin(lines.latch, PinState::Low)?;
    for level in pins.msb_first() {
        io.write_pin(lines.data, level)?;
        io.write_pin(lines.clock, PinState::High)?;
        io.write_pin(lines.clock, PinState::Low)?;
    }
    io.write_pin(lines.latch, PinState::High)?;
    io.write_pin(lines.data, PinState::Low)
}
