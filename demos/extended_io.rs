//! Extended I/O example: register outputs as extra digital pins
//!
//! This example demonstrates:
//! - Addressing native and register pins through one pin space
//! - Reading native inputs and register outputs alike
//! - Handing a register output to a generic embedded-hal driver
//! - Sharing the controller through a critical section

use embedded_hal::digital::{OutputPin, StatefulOutputPin};
use embedded_sipo::prelude::*;
use embedded_sipo::sipo::helpers::extended_pin;
use embedded_sipo::sipo::sim::SimBoard;

fn toggle_twice<P: StatefulOutputPin>(pin: &mut P) -> Result<(), P::Error> {
    pin.toggle()?;
    pin.toggle()
}

pub fn main() {
    let lines = ControlLines::new(11, 12, 13);
    let mut sr = ControllerBuilder::new()
        .lines(lines)
        .board(Board::Leonardo)
        .build(SimBoard::<1024>::new(lines))
        .unwrap();
    sr.init().unwrap();

    // ========== Example 1: One pin space ==========
    // Leonardo: pins 0..20 are native, 20..28 are register outputs
    sr.digital_write_ext(7, PinState::High).unwrap();
    assert_eq!(sr.io().level(7), PinState::High);

    let relay = extended_pin(5, sr.native_pins()).unwrap();
    assert_eq!(relay, 25);
    sr.digital_write_ext(relay, PinState::High).unwrap();
    assert_eq!(sr.io().chip().output(5), PinState::High);

    assert_eq!(
        sr.digital_write_ext(28, PinState::High),
        Err(ShiftError::PinOutOfRange(28))
    );

    // ========== Example 2: Reads ==========
    sr.io_mut().drive_input(2, PinState::High).unwrap();
    assert_eq!(sr.digital_read_ext(2).unwrap(), PinState::High);
    assert_eq!(sr.digital_read_ext(relay).unwrap(), PinState::High);

    // ========== Example 3: embedded-hal pins ==========
    {
        let mut led = sr.pin(0).unwrap();
        toggle_twice(&mut led).unwrap();
        led.set_high().unwrap();
    }
    assert_eq!(sr.read_all_pins(), 0b0010_0001);

    // ========== Example 4: Shared access ==========
    let shared = SharedController::new(sr);
    shared
        .batch(|sr| {
            sr.write(0, PinState::Low)?;
            sr.write(1, PinState::High)
        })
        .unwrap();
    let sr = shared.into_inner();
    assert_eq!(sr.io().chip().outputs(), 0b0010_0010);
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_extended_io_example() {
        super::main();
    }
}
