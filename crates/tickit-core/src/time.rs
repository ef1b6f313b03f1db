//! Simulated-time scalar.
//!
//! # Design
//!
//! `SimTime` is a monotonically non-decreasing nanosecond counter. There is
//! no wall-clock coupling anywhere in the kernel: the only way time advances
//! is by the master scheduler popping the next due entry from its wake queue
//! and moving `now` forward to it.
//!
//! Using an integer counter (rather than a floating-point or `Duration`-based
//! clock) keeps comparisons and arithmetic exact — no rounding drift across a
//! long-running simulation, and `Ord`/`Hash` fall out for free so `SimTime`
//! can key the wake queue directly.

use std::fmt;

/// An absolute simulated-time value, conventionally nanoseconds since the
/// start of the run (`SimTime::ZERO`).
///
/// Stored as `u64`: at one tick per nanosecond this lasts ~585 years, far
/// longer than any simulated run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// `self + delta`, saturating rather than panicking on overflow.
    ///
    /// Overflow itself is a fatal configuration error (§4.1); callers that
    /// need to detect it should use [`SimTime::checked_add`] instead.
    #[inline]
    pub fn offset(self, delta: u64) -> SimTime {
        SimTime(self.0.saturating_add(delta))
    }

    /// Checked addition — `None` on overflow.
    #[inline]
    pub fn checked_add(self, delta: u64) -> Option<SimTime> {
        self.0.checked_add(delta).map(SimTime)
    }

    /// Nanoseconds elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug builds if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> u64 {
        debug_assert!(earlier <= self, "since: earlier time is after self");
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: u64) -> SimTime {
        self.offset(rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: SimTime) -> u64 {
        self.since(rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}
