//! Monotonic microsecond time sources.

use core::cell::Cell;

/// Something which reports monotonic microsecond timestamps.
///
/// Timestamps are opaque: only wrapping differences between nearby samples
/// are meaningful, so a wraparound of the underlying counter is harmless as
/// long as its period vastly exceeds the largest inter-step interval.
pub trait Clock {
    /// Microseconds since a clock-specific reference point (e.g. device
    /// startup).
    fn now_micros(&self) -> u64;
}

impl<C: Clock> Clock for &C {
    fn now_micros(&self) -> u64 {
        (*self).now_micros()
    }
}

/// A manually advanced clock for tests, demos and host simulation.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    /// Create a clock at the given starting timestamp.
    pub fn new(start_micros: u64) -> Self {
        Self {
            now: Cell::new(start_micros),
        }
    }

    /// Advance the clock by `micros` (wrapping).
    pub fn advance(&self, micros: u64) {
        self.now.set(self.now.get().wrapping_add(micros));
    }

    /// Set the clock to an absolute timestamp.
    pub fn set(&self, micros: u64) {
        self.now.set(micros);
    }
}

impl Clock for ManualClock {
    fn now_micros(&self) -> u64 {
        self.now.get()
    }
}

/// A monotonically non-decreasing clock backed by the operating system.
///
/// Requires the `std` feature.
#[cfg(feature = "std")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsClock {
    created_at: std::time::Instant,
}

#[cfg(feature = "std")]
impl OsClock {
    /// Create a clock whose reference point is now.
    pub fn new() -> OsClock {
        OsClock::default()
    }
}

#[cfg(feature = "std")]
impl Clock for OsClock {
    fn now_micros(&self) -> u64 {
        self.created_at.elapsed().as_micros() as u64
    }
}

#[cfg(feature = "std")]
impl Default for OsClock {
    fn default() -> OsClock {
        OsClock {
            created_at: std::time::Instant::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new(100);
        assert_eq!(clock.now_micros(), 100);
        clock.advance(25);
        assert_eq!(clock.now_micros(), 125);
    }

    #[test]
    fn test_manual_clock_wraps() {
        let clock = ManualClock::new(u64::MAX);
        clock.advance(2);
        assert_eq!(clock.now_micros(), 1);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_os_clock_is_monotonic() {
        let clock = OsClock::new();
        let a = clock.now_micros();
        let b = clock.now_micros();
        assert!(b >= a);
    }
}
