#[macro_use]
mod log;

pub mod board;
pub mod builder;
pub mod controller;
pub mod error;
pub mod helpers;
pub mod native;
pub mod pin;
pub(crate) mod protocol;
pub mod shared;
pub mod sim;
pub mod types;

#[cfg(test)]
mod test_support;

pub use board::Board;
pub use builder::ControllerBuilder;
pub use controller::ShiftRegisterController;
pub use error::ShiftError;
pub use helpers::PinTarget;
pub use native::NativeIo;
pub use pin::ShiftPin;
pub use shared::SharedController;
pub use types::{ControlLines, PinBits, WriteMode};

pub use embedded_hal::digital::PinState;

pub mod prelude {
    pub use super::{
        Board, ControlLines, ControllerBuilder, NativeIo, PinBits, PinState, PinTarget,
        SharedController, ShiftError, ShiftPin, ShiftRegisterController, WriteMode,
    };
}
