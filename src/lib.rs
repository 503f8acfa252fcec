//! A `no_std`, no-alloc driver that extends a microcontroller's digital I/O with a
//! serial-in/parallel-out shift register such as the 74HC595.
//!
//! Pins beyond the board's native range are routed to the shift register, so calling
//! code can treat register outputs exactly like native pins. Direct register access
//! and an atomic batch-write mode are available for code that wants more control.
//!
//! # Features
//!
//! - **Extended addressing** - pin `native_pins + n` drives register output `n`
//! - **Atomic batch writes** - any number of bit changes, one physical update
//! - **embedded-hal pins** - register outputs implement `OutputPin`
//! - **Critical-section sharing** - run whole batches with interrupts masked
//! - **Host simulation** - a simulated board with a 74HC595 model for tests
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐  bit writes  ┌─────────────────────┐
//! │  digital_write_ext() │─────────────▶│  committed: PinBits │
//! │  write() / clear()   │  (direct)    │                     │
//! │                      │              └──────────┬──────────┘
//! │                      │  bit writes  ┌──────────┴──────────┐
//! │                      │─────────────▶│  Batched { pending }│
//! │                      │  (batched)   └──────────┬──────────┘
//! └──────────────────────┘                 apply   │ transmit
//!                                                  ▼
//!                              latch ▁▁▁▁▁▁▁▁▁▁▁▁▁▁▔▔
//!                              clock  ▁▔▁▔▁▔ … ▁▔▁
//!                              data   b7 b6 … b0  ▁
//! ```
//!
//! - **Direct mode** writes update the committed state and transmit immediately
//! - **Batched mode** writes only touch the pending buffer
//! - **Apply** commits the pending buffer with a single transmission
//! - **Reads** always see the committed state, never pending changes
//!
//! # Example
//!
//! ```rust
//! use embedded_sipo::prelude::*;
//! use embedded_sipo::sipo::sim::SimBoard;
//!
//! let lines = ControlLines::default();
//! let mut sr = ControllerBuilder::new()
//!     .board(Board::Uno)
//!     .build(SimBoard::<512>::new(lines))
//!     .unwrap();
//! sr.init().unwrap();
//!
//! // Pin 16 on an Uno is shift-register output 2.
//! sr.digital_write_ext(16, PinState::High).unwrap();
//! assert_eq!(sr.read_all_pins(), 0b0000_0100);
//!
//! // Several outputs change in a single latch.
//! sr.batch(|sr| {
//!     sr.write(0, PinState::High)?;
//!     sr.write(7, PinState::High)
//! })
//! .unwrap();
//! assert_eq!(sr.io().chip().outputs(), 0b1000_0101);
//! ```

#![deny(unsafe_code)]
#![no_std]

pub mod sipo;

pub mod prelude {
    pub use crate::sipo::prelude::*;
}
