//! Monotonic time for edge timestamps and dwell durations.
//!
//! Timestamps are microseconds since boot held in a `u32`, so they wrap after
//! roughly 71 minutes. All comparisons go through [`Instant::duration_since`],
//! which uses wrapping arithmetic and stays correct across the wrap as long as
//! the two instants are less than one wrap period apart.

/// Trait for abstracting the board's monotonic microsecond clock.
pub trait TimeSource {
    /// Returns the current time instant.
    fn now(&self) -> Instant;
}

/// A span of time with microsecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Duration(u32);

impl Duration {
    /// Zero duration constant.
    pub const ZERO: Self = Duration(0);

    /// Creates a duration from microseconds.
    pub const fn from_micros(micros: u32) -> Self {
        Duration(micros)
    }

    /// Creates a duration from milliseconds.
    pub const fn from_millis(millis: u32) -> Self {
        Duration(millis.saturating_mul(1_000))
    }

    /// Returns the duration in microseconds.
    pub const fn as_micros(&self) -> u32 {
        self.0
    }

    /// Returns the duration in whole milliseconds.
    pub const fn as_millis(&self) -> u32 {
        self.0 / 1_000
    }
}

/// A point in time, in microseconds since boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Instant(u32);

impl Instant {
    /// The boot instant. Buttons start with this as their last accepted edge.
    pub const BOOT: Self = Instant(0);

    /// Creates an instant from a raw microsecond counter value.
    pub const fn from_micros(micros: u32) -> Self {
        Instant(micros)
    }

    /// Truncates a 64-bit microsecond counter (as exposed by most timer
    /// peripherals) to the wrapping 32-bit representation.
    pub const fn from_ticks_u64(micros: u64) -> Self {
        Instant(micros as u32)
    }

    /// Returns the raw microsecond value.
    pub const fn as_micros(&self) -> u32 {
        self.0
    }

    /// Calculates the duration since an earlier instant, handling counter wrap.
    pub const fn duration_since(&self, earlier: Self) -> Duration {
        Duration(self.0.wrapping_sub(earlier.0))
    }
}
