//! Clock abstractions
//!
//! Two independent time sources are needed: wall-clock time for the status
//! overlay and a monotonic millisecond counter for phase deadlines. The
//! monotonic clock must not jump when the wall clock is set.

/// Seconds in one calendar day
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Wall-clock time as whole seconds since an arbitrary epoch at midnight
///
/// The calendar breakdown treats the epoch as local midnight, so
/// `hour/minute/second` are derived by modulo arithmetic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallTime {
    secs: u64,
}

impl WallTime {
    /// Create from seconds since the epoch
    pub const fn from_secs(secs: u64) -> Self {
        Self { secs }
    }

    /// Create from a time of day on the epoch day
    ///
    /// Out of range components wrap (61 seconds is one minute one second).
    pub const fn from_hms(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            secs: hour as u64 * 3600 + minute as u64 * 60 + second as u64,
        }
    }

    /// Seconds since the epoch
    pub const fn as_secs(&self) -> u64 {
        self.secs
    }

    /// Hour of day (0-23)
    pub const fn hour(&self) -> u8 {
        ((self.secs % SECONDS_PER_DAY) / 3600) as u8
    }

    /// Minute of hour (0-59)
    pub const fn minute(&self) -> u8 {
        ((self.secs % 3600) / 60) as u8
    }

    /// Second of minute (0-59)
    pub const fn second(&self) -> u8 {
        (self.secs % 60) as u8
    }

    /// Time advanced by `secs` seconds
    pub const fn plus_secs(&self, secs: u64) -> Self {
        Self {
            secs: self.secs.wrapping_add(secs),
        }
    }
}

/// Wall clock
pub trait WallClock {
    /// Read the current time of day
    fn now(&self) -> WallTime;
}

/// Monotonic elapsed-time clock
pub trait Monotonic {
    /// Milliseconds since an arbitrary start point; never decreases
    fn now_ms(&self) -> u64;
}

impl<T: WallClock + ?Sized> WallClock for &T {
    fn now(&self) -> WallTime {
        (**self).now()
    }
}

impl<T: Monotonic + ?Sized> Monotonic for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
