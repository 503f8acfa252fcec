#![allow(unsafe_code)]

use core::cell::RefCell;

use critical_section::{CriticalSection, Mutex};

use crate::sipo::{ShiftError, controller::ShiftRegisterController, native::NativeIo};

/// A controller that can be shared between the main loop and interrupt handlers.
///
/// The bare controller needs `&mut` access for everything. This wrapper hands that
/// access out inside a critical section, so a batch started in one context can never
/// be interleaved with writes from another.
///
/// ```rust
/// use embedded_sipo::prelude::*;
/// use embedded_sipo::sipo::sim::SimBoard;
///
/// let sr = ControllerBuilder::new()
///     .build(SimBoard::<256>::new(ControlLines::default()))
///     .unwrap();
/// let shared = SharedController::new(sr);
///
/// shared.with(|sr| sr.init()).unwrap();
/// shared
///     .batch(|sr| {
///         sr.write(0, PinState::High)?;
///         sr.write(1, PinState::High)
///     })
///     .unwrap();
/// assert_eq!(shared.with(|sr| sr.read_all_pins()), 0b11);
/// ```
pub struct SharedController<IO: NativeIo> {
    inner: Mutex<RefCell<ShiftRegisterController<IO>>>,
}

impl<IO: NativeIo> core::fmt::Debug for SharedController<IO> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedController").finish_non_exhaustive()
    }
}

impl<IO: NativeIo> SharedController<IO> {
    pub const fn new(sr: ShiftRegisterController<IO>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(sr)),
        }
    }

    /// Runs `f` with exclusive access to the controller inside a critical section.
    ///
    /// # Panics
    /// Panics if called re-entrantly from within `f`.
    pub fn with<R>(&self, f: impl FnOnce(&mut ShiftRegisterController<IO>) -> R) -> R {
        critical_section::with(|cs| Self::borrow_in(&self.inner, cs, f))
    }

    /// Runs `f` with exclusive access to the controller, without entering a
    /// critical section.
    ///
    /// # Safety
    /// The caller must guarantee nothing else can access this controller while `f`
    /// runs. Generally, if you are inside an ISR that cannot be preempted by another
    /// ISR touching the same controller, it is safe to call this function.
    pub unsafe fn with_unchecked<R>(
        &self,
        f: impl FnOnce(&mut ShiftRegisterController<IO>) -> R,
    ) -> R {
        let cs = unsafe { CriticalSection::new() };
        Self::borrow_in(&self.inner, cs, f)
    }

    /// Runs a whole batch inside a single critical section.
    ///
    /// See [`ShiftRegisterController::batch`].
    pub fn batch<R>(
        &self,
        f: impl FnOnce(&mut ShiftRegisterController<IO>) -> Result<R, ShiftError<IO::Error>>,
    ) -> Result<R, ShiftError<IO::Error>> {
        self.with(|sr| sr.batch(f))
    }

    /// Unwraps the controller.
    pub fn into_inner(self) -> ShiftRegisterController<IO> {
        self.inner.into_inner().into_inner()
    }

    fn borrow_in<R>(
        inner: &Mutex<RefCell<ShiftRegisterController<IO>>>,
        cs: CriticalSection<'_>,
        f: impl FnOnce(&mut ShiftRegisterController<IO>) -> R,
    ) -> R {
        let mut sr = inner.borrow(cs).borrow_mut();
        f(&mut sr)
    }
}

#[cfg(test)]
mod tests {
    use embedded_hal::digital::PinState;

    use super::*;
    use crate::sipo::test_support::{TestBoard, assert_out_of_range, test_controller};

    #[test]
    fn with_gives_controller_access() {
        let shared = SharedController::new(test_controller());

        shared.with(|sr| sr.write(3, PinState::High)).unwrap();

        let sr = shared.into_inner();
        assert_eq!(sr.read_all_pins(), 0b1000);
    }

    #[test]
    fn batch_runs_in_one_section_and_one_latch() {
        let shared = SharedController::new(test_controller());
        let before = shared.with(|sr| sr.io().chip().latch_count());

        shared
            .batch(|sr| {
                for pin in 0..8 {
                    sr.write(pin, PinState::High)?;
                }
                Ok(())
            })
            .unwrap();

        shared.with(|sr| {
            assert_eq!(sr.read_all_pins(), 0xFF);
            assert_eq!(sr.io().chip().latch_count(), before + 1);
            assert!(!sr.is_batching());
        });
    }

    #[test]
    fn failed_batch_is_cancelled() {
        let shared = SharedController::new(test_controller());

        let result = shared.batch(|sr| sr.write(12, PinState::High));

        assert_out_of_range(result, 12);
        shared.with(|sr| assert!(!sr.is_batching()));
    }

    #[test]
    fn batch_joins_batch_opened_earlier() {
        let shared = SharedController::new(test_controller());
        shared.with(|sr| {
            sr.batch_write_start();
            sr.write(0, PinState::High)
        })
        .unwrap();

        shared.batch(|sr| sr.write(1, PinState::High)).unwrap();

        shared.with(|sr| {
            assert!(sr.is_batching());
            assert_eq!(sr.pending_pins(), Some(0b11));
            sr.batch_write_apply().unwrap();
            assert_eq!(sr.read_all_pins(), 0b11);
        });
    }

    #[test]
    fn unchecked_access() {
        let shared: SharedController<TestBoard> = SharedController::new(test_controller());
        let value = unsafe {
            shared.with_unchecked(|sr| {
                sr.overwrite(0x42).unwrap();
                sr.read_all_pins()
            })
        };
        assert_eq!(value, 0x42);
    }
}
