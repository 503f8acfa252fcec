//! Host-side simulation of a board with a 74HC595 attached.
//!
//! [`SimBoard`] implements [`NativeIo`] over 64 simulated pins, keeps a bounded log of
//! every level it was asked to drive, and feeds the control lines into an [`Hc595`]
//! model. Tests and demos use it to check what actually reached the register outputs.

use bitmaps::Bitmap;
use embedded_hal::digital::PinState;
use heapless::Vec;

use crate::sipo::{native::NativeIo, types::ControlLines};

/// Number of native pins the simulated board exposes.
pub const SIM_PINS: u8 = 64;

/// Errors raised by the simulated board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SimError {
    /// Pin number is past the simulated pin count.
    NoSuchPin(u8),
    /// The event log or latch history is full.
    LogFull,
}

/// A single `write_pin` call seen by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineEvent {
    pub pin: u8,
    pub level: PinState,
}

/// Behavioural model of a 74HC595 with its output enable tied active.
///
/// A rising edge on the clock shifts the data level into the chain (towards output
/// 7); a rising edge on the latch copies the chain to the outputs. Every latch is
/// recorded, up to `H` entries.
#[derive(Debug)]
pub struct Hc595<const H: usize> {
    lines: ControlLines,
    clock: PinState,
    latch: PinState,
    data: PinState,
    chain: u8,
    outputs: u8,
    latches: Vec<u8, H>,
}

impl<const H: usize> Hc595<H> {
    pub const fn new(lines: ControlLines) -> Self {
        Self {
            lines,
            clock: PinState::Low,
            latch: PinState::Low,
            data: PinState::Low,
            chain: 0,
            outputs: 0,
            latches: Vec::new(),
        }
    }

    /// Current parallel outputs, bit 0 = Q0.
    pub fn outputs(&self) -> u8 {
        self.outputs
    }

    /// Level of output `n`.
    pub fn output(&self, n: u8) -> PinState {
        PinState::from(n < 8 && self.outputs & (1 << n) != 0)
    }

    /// Contents of the internal shift chain, not yet latched.
    pub fn chain(&self) -> u8 {
        self.chain
    }

    /// Output values after each latch, oldest first.
    pub fn latches(&self) -> &[u8] {
        &self.latches
    }

    pub fn latch_count(&self) -> usize {
        self.latches.len()
    }

    /// Whether driving `pin` to `level` would latch into a full history.
    fn would_overflow(&self, pin: u8, level: PinState) -> bool {
        pin == self.lines.latch
            && self.latch == PinState::Low
            && level == PinState::High
            && self.latches.is_full()
    }

    fn on_write(&mut self, pin: u8, level: PinState) -> Result<(), SimError> {
        if pin == self.lines.data {
            self.data = level;
        }
        if pin == self.lines.clock {
            if self.clock == PinState::Low && level == PinState::High {
                self.chain = (self.chain << 1) | (self.data == PinState::High) as u8;
            }
            self.clock = level;
        }
        if pin == self.lines.latch {
            if self.latch == PinState::Low && level == PinState::High {
                self.latches
                    .push(self.chain)
                    .map_err(|_| SimError::LogFull)?;
                self.outputs = self.chain;
            }
            self.latch = level;
        }
        Ok(())
    }
}

/// Simulated board with a shift register on `lines`.
///
/// `LOG` bounds both the pin event log and the register's latch history.
pub struct SimBoard<const LOG: usize> {
    levels: Bitmap<64>,
    outputs: Bitmap<64>,
    events: Vec<LineEvent, LOG>,
    chip: Hc595<LOG>,
}

impl<const LOG: usize> SimBoard<LOG> {
    pub fn new(lines: ControlLines) -> Self {
        Self {
            levels: Bitmap::new(),
            outputs: Bitmap::new(),
            events: Vec::new(),
            chip: Hc595::new(lines),
        }
    }

    /// The attached register.
    pub fn chip(&self) -> &Hc595<LOG> {
        &self.chip
    }

    /// Every `write_pin` call so far, oldest first.
    pub fn events(&self) -> &[LineEvent] {
        &self.events
    }

    /// Drops the event log. Pin levels and the register are left alone.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Level currently on `pin`; pins past the board read low.
    pub fn level(&self, pin: u8) -> PinState {
        PinState::from(pin < SIM_PINS && self.levels.get(pin as usize))
    }

    /// Whether `pin` was configured as an output.
    pub fn is_output(&self, pin: u8) -> bool {
        pin < SIM_PINS && self.outputs.get(pin as usize)
    }

    /// Forces the level of `pin` as if driven externally. Not logged, not seen by
    /// the register.
    pub fn drive_input(&mut self, pin: u8, level: PinState) -> Result<(), SimError> {
        Self::check(pin)?;
        self.levels.set(pin as usize, level == PinState::High);
        Ok(())
    }

    /// Level of the data line at every rising clock edge in the event log.
    pub fn clocked_bits(&self) -> Vec<PinState, LOG> {
        let lines = self.chip.lines;
        let mut data = PinState::Low;
        let mut clock = PinState::Low;
        let mut bits = Vec::new();
        for event in self.events.iter() {
            if event.pin == lines.data {
                data = event.level;
            }
            if event.pin == lines.clock {
                if clock == PinState::Low && event.level == PinState::High {
                    // bounded by the event log itself
                    let _ = bits.push(data);
                }
                clock = event.level;
            }
        }
        bits
    }

    fn check(pin: u8) -> Result<(), SimError> {
        if pin >= SIM_PINS {
            return Err(SimError::NoSuchPin(pin));
        }
        Ok(())
    }
}

impl<const LOG: usize> NativeIo for SimBoard<LOG> {
    type Error = SimError;

    fn set_output(&mut self, pin: u8) -> Result<(), SimError> {
        Self::check(pin)?;
        self.outputs.set(pin as usize, true);
        Ok(())
    }

    fn write_pin(&mut self, pin: u8, level: PinState) -> Result<(), SimError> {
        Self::check(pin)?;
        // Nothing changes unless both logs have room
        if self.events.is_full() || self.chip.would_overflow(pin, level) {
            return Err(SimError::LogFull);
        }
        self.events
            .push(LineEvent { pin, level })
            .map_err(|_| SimError::LogFull)?;
        self.levels.set(pin as usize, level == PinState::High);
        self.chip.on_write(pin, level)
    }

    fn read_pin(&mut self, pin: u8) -> Result<PinState, SimError> {
        Self::check(pin)?;
        Ok(self.level(pin))
    }
}
