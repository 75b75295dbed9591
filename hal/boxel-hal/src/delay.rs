//! Blocking delays
//!
//! Used for chip-select settling time and for the power-up sequences of
//! display controllers.

/// Busy-wait delay provider
pub trait DelayNs {
    /// Pause for at least `ns` nanoseconds
    fn delay_ns(&mut self, ns: u32);

    /// Pause for at least `us` microseconds
    fn delay_us(&mut self, us: u32) {
        for _ in 0..us {
            self.delay_ns(1_000);
        }
    }

    /// Pause for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.delay_us(1_000);
        }
    }
}

/// Delay that returns immediately
///
/// Handy for host-side tests and for buses that are slow enough that no
/// explicit settling time is needed.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Delay that only accumulates requested time
    struct CountingDelay {
        total_ns: u64,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
        }
    }

    #[test]
    fn test_delay_ms_accumulates() {
        let mut delay = CountingDelay { total_ns: 0 };
        delay.delay_ms(3);
        assert_eq!(delay.total_ns, 3_000_000);
    }

    #[test]
    fn test_no_delay() {
        let mut delay = NoDelay;
        delay.delay_ms(10);
    }
}
