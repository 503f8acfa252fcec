use embedded_hal::digital::PinState;

use crate::sipo::{
    ShiftError,
    helpers::{PinTarget, register_bit, resolve_pin},
    native::NativeIo,
    pin::ShiftPin,
    protocol,
    types::{ControlLines, PinBits, WriteMode},
};

/// Drives one 8-bit serial-in/parallel-out register and presents its outputs as
/// an extension of the host's native pins.
///
/// Pins `0..native_pins` are forwarded to the [`NativeIo`] unchanged; pins
/// `native_pins..native_pins + 8` address the register outputs. In direct mode every
/// register write is transmitted at once. Between
/// [`batch_write_start`](Self::batch_write_start) and
/// [`batch_write_apply`](Self::batch_write_apply) writes are staged and go out in a
/// single transmission, so the outputs never show a half-applied batch.
pub struct ShiftRegisterController<IO: NativeIo> {
    io: IO,
    lines: ControlLines,
    native_pins: u8,
    committed: PinBits,
    mode: WriteMode,
}

impl<IO: NativeIo> core::fmt::Debug for ShiftRegisterController<IO> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ShiftRegisterController")
            .field("lines", &self.lines)
            .field("native_pins", &self.native_pins)
            .field("committed", &self.committed)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl<IO: NativeIo> ShiftRegisterController<IO> {
    /// Configures the three control lines as outputs.
    ///
    /// Nothing is transmitted; call [`init`](Self::init) to bring the register to a
    /// known all-low state. See [`ControllerBuilder`](crate::sipo::ControllerBuilder)
    /// for construction with defaults.
    pub fn new(
        mut io: IO,
        lines: ControlLines,
        native_pins: u8,
    ) -> Result<Self, ShiftError<IO::Error>> {
        for pin in [lines.clock, lines.latch, lines.data] {
            io.set_output(pin).map_err(ShiftError::Native)?;
        }

        Ok(Self {
            io,
            lines,
            native_pins,
            committed: PinBits::new(),
            mode: WriteMode::Direct,
        })
    }

    /// Drives every register output low.
    pub fn init(&mut self) -> Result<(), ShiftError<IO::Error>> {
        self.committed = PinBits::new();
        self.transmit()
    }

    /// Writes a pin of the extended address space.
    ///
    /// Native pins go straight to [`NativeIo::write_pin`]. Register pins follow the
    /// current write mode. Pins past the register report
    /// [`ShiftError::PinOutOfRange`] and change nothing.
    pub fn digital_write_ext(
        &mut self,
        pin: u8,
        level: PinState,
    ) -> Result<(), ShiftError<IO::Error>> {
        match resolve_pin(pin, self.native_pins) {
            Some(PinTarget::Native(native)) => {
                self.io.write_pin(native, level).map_err(ShiftError::Native)
            }
            Some(PinTarget::Register(bit)) => self.update_bit(bit, level),
            None => Err(self.out_of_range(pin)),
        }
    }

    /// Reads a pin of the extended address space.
    ///
    /// Register pins report the committed level, even while a batch is staged.
    pub fn digital_read_ext(&mut self, pin: u8) -> Result<PinState, ShiftError<IO::Error>> {
        match resolve_pin(pin, self.native_pins) {
            Some(PinTarget::Native(native)) => {
                self.io.read_pin(native).map_err(ShiftError::Native)
            }
            Some(PinTarget::Register(bit)) => Ok(self.committed.get(bit)),
            None => Err(self.out_of_range(pin)),
        }
    }

    /// Writes register output `sr_pin`.
    pub fn write(&mut self, sr_pin: u8, level: PinState) -> Result<(), ShiftError<IO::Error>> {
        let bit = register_bit(sr_pin).ok_or_else(|| self.out_of_range(sr_pin))?;
        self.update_bit(bit, level)
    }

    /// Committed level of register output `sr_pin`.
    pub fn read(&self, sr_pin: u8) -> Result<PinState, ShiftError<IO::Error>> {
        let bit = register_bit(sr_pin).ok_or_else(|| self.out_of_range(sr_pin))?;
        Ok(self.committed.get(bit))
    }

    /// Clears the register.
    ///
    /// While batching only the staged changes are dropped and nothing is sent.
    /// Otherwise this is [`init`](Self::init).
    pub fn clear(&mut self) -> Result<(), ShiftError<IO::Error>> {
        if let WriteMode::Batched { pending } = &mut self.mode {
            *pending = PinBits::new();
            return Ok(());
        }
        self.init()
    }

    /// Starts staging writes.
    ///
    /// The staged state starts as a copy of the committed state. Calling this during
    /// a batch restarts it, dropping anything staged so far.
    pub fn batch_write_start(&mut self) {
        if self.mode.is_batched() {
            warn!("sipo: batch restarted, staged writes dropped");
        }
        self.mode = WriteMode::Batched {
            pending: self.committed,
        };
        debug!("sipo: batch start from {}", self.committed);
    }

    /// Commits the staged state with one transmission and returns to direct mode.
    ///
    /// Outside a batch this reports [`ShiftError::NotBatching`] and transmits nothing,
    /// where the Arduino library this mirrors would latch an all-low register.
    pub fn batch_write_apply(&mut self) -> Result<(), ShiftError<IO::Error>> {
        let WriteMode::Batched { pending } = self.mode else {
            return Err(ShiftError::NotBatching);
        };
        self.mode = WriteMode::Direct;
        self.committed = pending;
        debug!("sipo: batch apply {}", pending);
        self.transmit()
    }

    /// Leaves batch mode without committing or transmitting anything.
    pub fn batch_write_cancel(&mut self) -> Result<(), ShiftError<IO::Error>> {
        if !self.mode.is_batched() {
            return Err(ShiftError::NotBatching);
        }
        self.mode = WriteMode::Direct;
        debug!("sipo: batch cancelled");
        Ok(())
    }

    /// Runs `f` as one batch.
    ///
    /// The batch is applied if `f` succeeds and cancelled if it fails. If `f` ends the
    /// batch itself, nothing further is done.
    ///
    /// Called while a batch is already open, `f` joins that batch: its writes are
    /// staged alongside the earlier ones and the batch is neither restarted, applied
    /// nor cancelled, whatever `f` returns.
    pub fn batch<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<R, ShiftError<IO::Error>>,
    ) -> Result<R, ShiftError<IO::Error>> {
        if self.mode.is_batched() {
            debug!("sipo: joining open batch");
            return f(self);
        }

        self.batch_write_start();
        match f(self) {
            Ok(r) => {
                if self.mode.is_batched() {
                    self.batch_write_apply()?;
                }
                Ok(r)
            }
            Err(e) => {
                if self.mode.is_batched() {
                    self.batch_write_cancel()?;
                }
                Err(e)
            }
        }
    }

    /// Replaces the committed state and transmits it at once.
    ///
    /// Ignores batch mode: a running batch and its staged state are left as they are.
    pub fn overwrite(&mut self, value: u8) -> Result<(), ShiftError<IO::Error>> {
        self.committed = PinBits::from_bits(value);
        self.transmit()
    }

    /// Committed levels of all register outputs, bit 0 = output 0.
    #[inline]
    pub fn read_all_pins(&self) -> u8 {
        self.committed.bits()
    }

    #[inline]
    pub fn committed(&self) -> PinBits {
        self.committed
    }

    #[inline]
    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    #[inline]
    pub fn is_batching(&self) -> bool {
        self.mode.is_batched()
    }

    /// Staged levels, if a batch is in progress.
    pub fn pending_pins(&self) -> Option<u8> {
        match self.mode {
            WriteMode::Batched { pending } => Some(pending.bits()),
            WriteMode::Direct => None,
        }
    }

    /// Borrows register output `sr_pin` as an embedded-hal output pin.
    pub fn pin(&mut self, sr_pin: u8) -> Result<ShiftPin<'_, IO>, ShiftError<IO::Error>> {
        let bit = register_bit(sr_pin).ok_or_else(|| self.out_of_range(sr_pin))?;
        Ok(ShiftPin::new(self, bit))
    }

    #[inline]
    pub fn native_pins(&self) -> u8 {
        self.native_pins
    }

    #[inline]
    pub fn lines(&self) -> ControlLines {
        self.lines
    }

    pub fn io(&self) -> &IO {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut IO {
        &mut self.io
    }

    /// Gives the native I/O back.
    pub fn release(self) -> IO {
        self.io
    }

    fn update_bit(&mut self, bit: u8, level: PinState) -> Result<(), ShiftError<IO::Error>> {
        if let WriteMode::Batched { pending } = &mut self.mode {
            pending.set(bit, level);
            return Ok(());
        }
        self.committed.set(bit, level);
        self.transmit()
    }

    fn transmit(&mut self) -> Result<(), ShiftError<IO::Error>> {
        protocol::send(&mut self.io, &self.lines, self.committed).map_err(ShiftError::Native)
    }

    fn out_of_range(&self, pin: u8) -> ShiftError<IO::Error> {
        warn!("sipo: pin {} is not a register output", pin);
        ShiftError::PinOutOfRange(pin)
    }
}
