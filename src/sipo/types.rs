use bitmaps::Bitmap;
use embedded_hal::digital::PinState;

use crate::sipo::board;

/// Number of parallel outputs on a single register.
pub const REGISTER_WIDTH: u8 = 8;

/// Logic levels of the 8 register outputs, bit 0 = output 0.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct PinBits(Bitmap<8>);

impl PinBits {
    /// All outputs low.
    #[inline]
    pub fn new() -> Self {
        Self(Bitmap::new())
    }

    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        Self(Bitmap::from_value(bits))
    }

    #[inline]
    pub fn bits(&self) -> u8 {
        *self.0.as_value()
    }

    /// Level of output `bit`. Indices past the register width read low.
    #[inline]
    pub fn get(&self, bit: u8) -> PinState {
        if bit >= REGISTER_WIDTH {
            return PinState::Low;
        }
        PinState::from(self.0.get(bit as usize))
    }

    /// Sets output `bit` to `level`. Indices past the register width are ignored.
    #[inline]
    pub fn set(&mut self, bit: u8, level: PinState) {
        if bit < REGISTER_WIDTH {
            self.0.set(bit as usize, level == PinState::High);
        }
    }

    /// Levels in transmission order: bit 7 first, bit 0 last.
    pub fn msb_first(&self) -> impl Iterator<Item = PinState> + '_ {
        (0..REGISTER_WIDTH).rev().map(move |bit| self.get(bit))
    }
}

impl From<u8> for PinBits {
    fn from(bits: u8) -> Self {
        Self::from_bits(bits)
    }
}

impl From<PinBits> for u8 {
    fn from(pins: PinBits) -> Self {
        pins.bits()
    }
}

impl core::fmt::Debug for PinBits {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "PinBits({:#010b})", self.bits())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PinBits {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(f, "PinBits({=u8:#b})", self.bits())
    }
}

/// Native pins wired to the register's control inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlLines {
    /// Shift clock (SH_CP on a 74HC595).
    pub clock: u8,
    /// Storage latch (ST_CP).
    pub latch: u8,
    /// Serial data (DS).
    pub data: u8,
}

impl ControlLines {
    pub const fn new(clock: u8, latch: u8, data: u8) -> Self {
        Self { clock, latch, data }
    }
}

impl Default for ControlLines {
    fn default() -> Self {
        Self::new(
            board::DEFAULT_CLOCK_PIN,
            board::DEFAULT_LATCH_PIN,
            board::DEFAULT_DATA_PIN,
        )
    }
}

/// Where bit writes land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WriteMode {
    /// Writes update the committed state and transmit immediately.
    #[default]
    Direct,
    /// Writes accumulate in `pending` until the batch is applied.
    Batched { pending: PinBits },
}

impl WriteMode {
    #[inline]
    pub fn is_batched(&self) -> bool {
        matches!(self, WriteMode::Batched { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_each_bit() {
        let mut pins = PinBits::new();
        for bit in 0..REGISTER_WIDTH {
            pins.set(bit, PinState::High);
            assert_eq!(pins.get(bit), PinState::High);
            assert_eq!(pins.bits(), (1u16 << (bit + 1)).wrapping_sub(1) as u8);
        }
        for bit in 0..REGISTER_WIDTH {
            pins.set(bit, PinState::Low);
            assert_eq!(pins.get(bit), PinState::Low);
        }
        assert_eq!(pins.bits(), 0);
    }

    #[test]
    fn out_of_width_is_ignored() {
        let mut pins = PinBits::from_bits(0xA5);
        pins.set(8, PinState::High);
        pins.set(200, PinState::Low);
        assert_eq!(pins.bits(), 0xA5);
        assert_eq!(pins.get(8), PinState::Low);
    }

    #[test]
    fn msb_first_order() {
        let pins = PinBits::from_bits(0b1000_0001);
        let mut levels = [PinState::Low; 8];
        for (slot, level) in levels.iter_mut().zip(pins.msb_first()) {
            *slot = level;
        }
        assert_eq!(levels[0], PinState::High);
        assert!(levels[1..7].iter().all(|l| *l == PinState::Low));
        assert_eq!(levels[7], PinState::High);
    }

    #[test]
    fn debug_shows_binary() {
        let mut buf: heapless::String<32> = heapless::String::new();
        core::fmt::write(&mut buf, format_args!("{:?}", PinBits::from_bits(5))).unwrap();
        assert_eq!(buf.as_str(), "PinBits(0b00000101)");
    }

    #[test]
    fn default_lines() {
        let lines = ControlLines::default();
        assert_eq!((lines.clock, lines.latch, lines.data), (2, 3, 4));
    }
}
