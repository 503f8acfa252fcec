//! Batch write example: several outputs, one latch
//!
//! This example demonstrates:
//! - Staging register writes with batch_write_start / batch_write_apply
//! - Reads during a batch seeing the committed state
//! - Dropping staged writes with clear and batch_write_cancel
//! - The closure form that cancels on error
//! - Bypassing a batch with overwrite

use embedded_sipo::prelude::*;
use embedded_sipo::sipo::sim::SimBoard;

pub fn main() {
    let lines = ControlLines::default();
    let mut sr = ControllerBuilder::new()
        .lines(lines)
        .board(Board::Uno)
        .build(SimBoard::<1024>::new(lines))
        .unwrap();
    sr.init().unwrap();

    // ========== Example 1: Staged writes go out together ==========
    sr.overwrite(0b0000_1111).unwrap();
    let latches_before = sr.io().chip().latch_count();

    sr.batch_write_start();
    for pin in 0..8 {
        let level = if pin < 4 { PinState::Low } else { PinState::High };
        sr.write(pin, level).unwrap();
    }

    // Nothing reached the register yet, reads still see the old state
    assert_eq!(sr.io().chip().outputs(), 0b0000_1111);
    assert_eq!(sr.read(7).unwrap(), PinState::Low);
    assert_eq!(sr.pending_pins(), Some(0b1111_0000));

    sr.batch_write_apply().unwrap();
    assert_eq!(sr.io().chip().outputs(), 0b1111_0000);
    assert_eq!(sr.io().chip().latch_count(), latches_before + 1);

    // ========== Example 2: Rolling back staged writes ==========
    sr.batch_write_start();
    sr.write(0, PinState::High).unwrap();
    sr.clear().unwrap(); // staged state is now all-low
    assert_eq!(sr.pending_pins(), Some(0));
    sr.batch_write_cancel().unwrap(); // leave without committing
    assert_eq!(sr.read_all_pins(), 0b1111_0000);

    // ========== Example 3: Closure form ==========
    sr.batch(|sr| {
        sr.write(0, PinState::High)?;
        sr.write(7, PinState::Low)
    })
    .unwrap();
    assert_eq!(sr.read_all_pins(), 0b0111_0001);

    // An error inside the closure cancels the batch
    let result = sr.batch(|sr| {
        sr.write(1, PinState::High)?;
        sr.write(8, PinState::High) // no output 8 on a single register
    });
    assert_eq!(result, Err(ShiftError::PinOutOfRange(8)));
    assert_eq!(sr.read_all_pins(), 0b0111_0001);

    // ========== Example 4: overwrite ignores batch mode ==========
    sr.batch_write_start();
    sr.write(3, PinState::High).unwrap();
    sr.overwrite(0xAA).unwrap();
    assert_eq!(sr.io().chip().outputs(), 0xAA);
    assert!(sr.is_batching());
    sr.batch_write_apply().unwrap();
    assert_eq!(sr.read_all_pins(), 0b0111_1001);
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_batch_write_example() {
        super::main();
    }
}
