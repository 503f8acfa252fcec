//! Native digital pin counts of common boards and the default wiring.
//!
//! Each board gets an upper-case constant (`UNO`, `MEGA`, ...) holding its native pin
//! count, and a [`Board`] variant that resolves to the same number.

/// Default native pin driving the register clock.
pub const DEFAULT_CLOCK_PIN: u8 = 2;
/// Default native pin driving the register latch.
pub const DEFAULT_LATCH_PIN: u8 = 3;
/// Default native pin driving the register data input.
pub const DEFAULT_DATA_PIN: u8 = 4;

macro_rules! boards {
    ($( $(#[$meta:meta])* $variant:ident => $pins:literal ),* $(,)?) => {
        paste::paste! {
            $(
                #[doc = "Native digital pins on the " $variant " board."]
                pub const [<$variant:upper>]: u8 = $pins;
            )*

            /// Supported board variants.
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
            #[cfg_attr(feature = "defmt", derive(defmt::Format))]
            pub enum Board {
                $( $(#[$meta])* $variant, )*
            }

            impl Board {
                /// Number of native digital pins; shift-register pins start at this index.
                pub const fn native_pins(self) -> u8 {
                    match self {
                        $( Board::$variant => [<$variant:upper>], )*
                    }
                }
            }
        }
    };
}

boards! {
    #[default]
    Uno => 14,
    Nano => 14,
    Micro => 10,
    Mega => 54,
    Due => 54,
    Leonardo => 20,
}

/// Native pin count used when no board is specified.
pub const DEFAULT_NATIVE_PINS: u8 = Board::Uno.native_pins();
