//! Pin address translation.
//!
//! The extended pin space puts the board's native pins first and the register's
//! outputs directly after them. These helpers are handy when building pin maps or
//! driver glue that needs to know where a pin number lands.

use crate::sipo::types::REGISTER_WIDTH;

/// Where a pin of the extended address space is physically located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinTarget {
    /// A pin driven by the host's own I/O hardware.
    Native(u8),
    /// An output of the shift register.
    Register(u8),
}

/// Resolves an extended pin number.
///
/// Pins below `native_pins` are native; the rest map onto register outputs starting
/// at 0. Returns `None` if the pin lies beyond the register's last output.
///
/// # Example
/// ```
/// use embedded_sipo::sipo::helpers::resolve_pin;
/// use embedded_sipo::sipo::PinTarget;
///
/// // Uno: 14 native pins, register outputs are pins 14..=21
/// assert_eq!(resolve_pin(5, 14), Some(PinTarget::Native(5)));
/// assert_eq!(resolve_pin(16, 14), Some(PinTarget::Register(2)));
/// assert_eq!(resolve_pin(22, 14), None);
/// ```
pub fn resolve_pin(pin: u8, native_pins: u8) -> Option<PinTarget> {
    if pin < native_pins {
        return Some(PinTarget::Native(pin));
    }
    register_bit(pin - native_pins).map(PinTarget::Register)
}

/// Validates a register output index.
///
/// # Example
/// ```
/// use embedded_sipo::sipo::helpers::register_bit;
///
/// assert_eq!(register_bit(7), Some(7));
/// assert_eq!(register_bit(8), None);
/// ```
#[inline]
pub fn register_bit(sr_pin: u8) -> Option<u8> {
    (sr_pin < REGISTER_WIDTH).then_some(sr_pin)
}

/// Extended pin number of register output `sr_pin`.
///
/// Returns `None` if `sr_pin` is not a register output or the sum overflows `u8`.
pub fn extended_pin(sr_pin: u8, native_pins: u8) -> Option<u8> {
    register_bit(sr_pin).and_then(|bit| native_pins.checked_add(bit))
}

#[test]
fn resolve_pin_edge_cases() {
    // Last native pin
    assert_eq!(resolve_pin(13, 14), Some(PinTarget::Native(13)));

    // First and last register outputs
    assert_eq!(resolve_pin(14, 14), Some(PinTarget::Register(0)));
    assert_eq!(resolve_pin(21, 14), Some(PinTarget::Register(7)));

    // Past the register
    assert_eq!(resolve_pin(22, 14), None);
    assert_eq!(resolve_pin(u8::MAX, 14), None);

    // No native pins at all
    assert_eq!(resolve_pin(0, 0), Some(PinTarget::Register(0)));

    // Mega
    assert_eq!(resolve_pin(54, 54), Some(PinTarget::Register(0)));
    assert_eq!(resolve_pin(53, 54), Some(PinTarget::Native(53)));
}

#[test]
fn extended_pin_round_trips_through_resolve() {
    for bit in 0..REGISTER_WIDTH {
        let pin = extended_pin(bit, 20).unwrap();
        assert_eq!(resolve_pin(pin, 20), Some(PinTarget::Register(bit)));
    }
    assert_eq!(extended_pin(8, 20), None);
    assert_eq!(extended_pin(7, 250), None);
}
