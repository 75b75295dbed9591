//! Monotonic time source
//!
//! The touch debounce logic only needs "microseconds since some fixed
//! point"; wrap-around is not expected within the lifetime of a session.

/// Monotonic microsecond clock
pub trait Monotonic {
    /// Current time in microseconds
    fn now_us(&mut self) -> u64;

    /// Microseconds elapsed since `earlier`
    ///
    /// Saturates to zero if the clock appears to have gone backwards.
    fn elapsed_since(&mut self, earlier: u64) -> u64 {
        self.now_us().saturating_sub(earlier)
    }
}

impl<T: Monotonic + ?Sized> Monotonic for &mut T {
    fn now_us(&mut self) -> u64 {
        T::now_us(self)
    }
}
